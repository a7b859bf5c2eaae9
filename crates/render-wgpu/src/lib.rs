//! wgpu render backend for the orbitfield scene.
//!
//! Draws the scene meshes with one shared physical material lit by a single
//! directional light, then the particle field as camera-facing sprites.
//!
//! # Invariants
//! - Renderer never mutates scene state.
//! - Geometry is generated once per mesh; per-frame uploads are only
//!   uniforms and model matrices.

mod camera;
mod gpu;
pub mod mesh;
mod shaders;

pub use camera::CameraProjection;
pub use gpu::WgpuRenderer;
pub use mesh::{MeshData, Vertex};
