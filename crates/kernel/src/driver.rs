use crate::scene::Scene;
use glam::{Vec2, Vec3};
use orbitfield_common::MeshId;
use serde::{Deserialize, Serialize};

/// Angular state shared by every orbiting body.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    /// Radians added to `rotation` per frame (before decay).
    pub speed: f32,
    /// Current orbit angle in radians. Unbounded; never wrapped.
    pub rotation: f32,
}

/// Latest pointer offset from the window center, as a fraction of the window size.
///
/// Roughly in [-0.5, 0.5] while the pointer is inside the window. Not clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CursorState {
    pub x: f32,
    pub y: f32,
}

/// A mesh whose x/z position is derived from the shared rotation angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitingBody {
    pub mesh: MeshId,
    pub phase_offset: f32,
    /// Orbit center on the ground plane: `x` is world x, `y` is world z.
    pub center: Vec2,
    pub radius: f32,
}

impl OrbitingBody {
    pub fn angle(&self, rotation: f32) -> f32 {
        rotation + self.phase_offset
    }

    /// Position on the ground plane: `x` is world x, `y` is world z.
    pub fn position_xz(&self, rotation: f32) -> Vec2 {
        let angle = self.angle(rotation);
        Vec2::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }
}

/// How speed decay and rotation advance relate to frame time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecayMode {
    /// One decay step and one rotation step per frame, whatever the frame time.
    /// Orbit speed therefore scales with the display refresh rate.
    #[default]
    FrameCoupled,
    /// Steps are scaled by `dt * reference_fps`, so a frame at exactly
    /// `1 / reference_fps` seconds behaves like one frame-coupled step.
    TimeScaled { reference_fps: f32 },
}

/// Tuning constants of the animation driver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Speed added per unit of wheel `deltaY`.
    pub wheel_sensitivity: f32,
    /// Per-frame speed multiplier.
    pub decay: f32,
    pub decay_mode: DecayMode,
    /// Mesh self-rotation in radians per second around x (`x`) and y (`y`).
    pub spin_rate: Vec2,
    /// Camera drift per second per unit of cursor offset.
    pub drift_gain: f32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            wheel_sensitivity: 0.0002,
            decay: 0.93,
            decay_mode: DecayMode::FrameCoupled,
            spin_rate: Vec2::new(0.1, 0.12),
            drift_gain: 1.5,
        }
    }
}

/// Result of one tick, for logging and the debug panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub speed: f32,
    pub rotation: f32,
    pub camera: Vec3,
}

/// Owns rotation and cursor state and applies them to a [`Scene`] once per frame.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    config: DriverConfig,
    state: RotationState,
    cursor: CursorState,
    bodies: Vec<OrbitingBody>,
}

impl AnimationDriver {
    pub fn new(config: DriverConfig, bodies: Vec<OrbitingBody>) -> Self {
        Self {
            config,
            state: RotationState::default(),
            cursor: CursorState::default(),
            bodies,
        }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    pub fn bodies(&self) -> &[OrbitingBody] {
        &self.bodies
    }

    pub fn set_decay_mode(&mut self, mode: DecayMode) {
        self.config.decay_mode = mode;
    }

    /// Overwrite rotation state, e.g. to seed a simulation.
    pub fn set_state(&mut self, state: RotationState) {
        self.state = state;
    }

    /// Feed one wheel event. `delta_y` follows DOM conventions: positive when
    /// scrolling down. Returns the new speed.
    pub fn apply_wheel(&mut self, delta_y: f32) -> f32 {
        self.state.speed += delta_y * self.config.wheel_sensitivity;
        tracing::debug!(delta_y, speed = self.state.speed, "wheel impulse");
        self.state.speed
    }

    pub fn set_cursor(&mut self, cursor: CursorState) {
        self.cursor = cursor;
    }

    /// Advance rotation by the current speed, then decay the speed.
    pub fn advance(&mut self, dt: f32) {
        match self.config.decay_mode {
            DecayMode::FrameCoupled => {
                self.state.rotation += self.state.speed;
                self.state.speed *= self.config.decay;
            }
            DecayMode::TimeScaled { reference_fps } => {
                let frames = dt * reference_fps;
                self.state.rotation += self.state.speed * frames;
                self.state.speed *= self.config.decay.powf(frames);
            }
        }
    }

    /// Current ground-plane position of every body, in body order.
    pub fn body_positions(&self) -> impl Iterator<Item = (MeshId, Vec2)> + '_ {
        let rotation = self.state.rotation;
        self.bodies
            .iter()
            .map(move |body| (body.mesh, body.position_xz(rotation)))
    }

    /// Run one frame: advance rotation, reposition orbiting bodies, spin every
    /// mesh, drift the camera. The caller renders afterwards.
    pub fn tick(&mut self, scene: &mut Scene, dt: f32) -> FrameReport {
        self.advance(dt);

        let rotation = self.state.rotation;
        for body in &self.bodies {
            let xz = body.position_xz(rotation);
            if let Some(mesh) = scene.mesh_mut(body.mesh) {
                mesh.transform.position.x = xz.x;
                mesh.transform.position.z = xz.y;
            }
        }

        let spin_x = self.config.spin_rate.x * dt;
        let spin_y = self.config.spin_rate.y * dt;
        for mesh in scene.meshes_mut() {
            mesh.transform.rotation.x += spin_x;
            mesh.transform.rotation.y += spin_y;
        }

        let gain = self.config.drift_gain;
        let camera = scene.camera_mut();
        camera.position.x += self.cursor.x * dt * gain;
        camera.position.y += -self.cursor.y * dt * gain;
        let camera = camera.position;

        let frame = scene.advance_frame();
        FrameReport {
            frame,
            speed: self.state.speed,
            rotation,
            camera,
        }
    }
}
