//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the scene; they never mutate it.
//! - Everything a frame shows derives from the scene after the tick.

mod renderer;

pub use renderer::{DebugTextRenderer, Renderer};
