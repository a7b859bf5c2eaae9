//! Input mapping: raw desktop input normalized into [`Action`]s.
//!
//! # Invariants
//! - Windowing types never cross this boundary; hosts convert their events
//!   into [`WheelDelta`], pixel positions and [`Key`]s first.
//! - Wheel deltas follow DOM conventions: positive `delta_y` scrolls down.

pub mod action;
mod mapper;

pub use action::Action;
pub use mapper::{InputMapper, Key, WheelDelta, LINE_HEIGHT_PX};
