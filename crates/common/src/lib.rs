//! Shared value types used by every orbitfield crate.
//!
//! # Invariants
//! - Types here are plain data: no scene logic, no rendering state.

mod color;
mod types;

pub use color::{Color, ColorParseError};
pub use types::{MeshId, Transform};
