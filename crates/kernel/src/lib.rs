//! Scene kernel: scene graph state, the animation driver, and scene configuration.
//!
//! # Invariants
//! - One ordered tick per frame: rotation state, orbit positions, mesh spin,
//!   camera drift. Rendering happens after the tick returns.
//! - The driver never allocates per frame and never fails.
//! - All orbiting bodies share one rotation angle and differ only by phase.

pub mod clock;
pub mod config;
pub mod driver;
pub mod material;
pub mod particles;
pub mod scene;
pub mod shape;
pub mod stage;

pub use clock::FrameClock;
pub use config::{ConfigError, SceneConfig};
pub use driver::{
    AnimationDriver, CursorState, DecayMode, DriverConfig, FrameReport, OrbitingBody,
    RotationState,
};
pub use material::PhysicalMaterial;
pub use particles::ParticleField;
pub use scene::{CameraRig, DirectionalLight, Scene, SceneMesh};
pub use shape::{MAX_SEGMENTS, MAX_WINDING, MeshShape};
pub use stage::Stage;
