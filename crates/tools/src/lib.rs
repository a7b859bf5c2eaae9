//! Developer tooling: debug-panel model, scene inspector, frame timing.
//!
//! Nothing here depends on a UI toolkit; the desktop app draws the widgets and
//! routes edits through [`MaterialPanel`].
//!
//! # Invariants
//! - Panel edits are clamped and quantized before they reach the material.
//! - The inspector is read-only.

mod inspector;
mod params;
mod timing;

pub use inspector::{MeshInfo, SceneInspector, SceneSummary};
pub use params::{MaterialEdit, MaterialPanel, ParamRange};
pub use timing::FpsCounter;
