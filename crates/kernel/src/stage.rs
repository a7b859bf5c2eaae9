use crate::config::SceneConfig;
use crate::driver::{AnimationDriver, CursorState, DecayMode, FrameReport, OrbitingBody};
use crate::particles::ParticleField;
use crate::scene::{Scene, SceneMesh};
use orbitfield_common::Transform;

/// The animation context: the scene and the driver that animates it.
///
/// Hosts own one `Stage`, feed it input, call [`tick`](Stage::tick) once per
/// frame and render [`scene`](Stage::scene) afterwards.
#[derive(Debug, Clone)]
pub struct Stage {
    scene: Scene,
    driver: AnimationDriver,
}

impl Stage {
    pub fn from_config(config: &SceneConfig) -> Self {
        let mut scene = Scene::new()
            .with_camera(config.camera)
            .with_light(config.light)
            .with_material(config.material)
            .with_particles(ParticleField::generate(&config.particles));

        let mut bodies = Vec::new();
        for mesh in &config.meshes {
            let id = scene.spawn(SceneMesh::new(
                mesh.name.clone(),
                mesh.shape,
                Transform::at(mesh.position),
            ));
            if let Some(phase_offset) = mesh.phase_offset {
                bodies.push(OrbitingBody {
                    mesh: id,
                    phase_offset,
                    center: mesh.orbit_center.unwrap_or(config.orbit.center),
                    radius: config.orbit.radius,
                });
            }
        }

        tracing::info!(
            meshes = scene.mesh_count(),
            orbiting = bodies.len(),
            particles = scene.particles().len(),
            decay_mode = ?config.driver.decay_mode,
            "stage built"
        );

        Self {
            scene,
            driver: AnimationDriver::new(config.driver, bodies),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut AnimationDriver {
        &mut self.driver
    }

    pub fn set_decay_mode(&mut self, mode: DecayMode) {
        self.driver.set_decay_mode(mode);
    }

    /// Feed one DOM-style wheel `deltaY`. Returns the new speed.
    pub fn apply_wheel(&mut self, delta_y: f32) -> f32 {
        self.driver.apply_wheel(delta_y)
    }

    pub fn set_cursor(&mut self, cursor: CursorState) {
        self.driver.set_cursor(cursor);
    }

    /// Output size changed: refresh the camera aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.scene.camera_mut().set_viewport(width, height);
        tracing::debug!(width, height, aspect = self.scene.camera().aspect, "viewport resized");
    }

    pub fn tick(&mut self, dt: f32) -> FrameReport {
        self.driver.tick(&mut self.scene, dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MeshConfig;
    use crate::shape::MeshShape;
    use glam::{Vec2, Vec3};
    use orbitfield_common::MeshId;

    #[test]
    fn demo_stage_has_four_orbiting_meshes() {
        let stage = Stage::from_config(&SceneConfig::default());
        assert_eq!(stage.scene().mesh_count(), 4);
        assert_eq!(stage.driver().bodies().len(), 4);
        assert_eq!(stage.scene().particles().len(), 700);
        let first = stage.scene().mesh(MeshId(0)).unwrap();
        assert_eq!(first.name, "torus");
        assert_eq!(first.transform.position, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn first_tick_moves_meshes_onto_the_orbit() {
        let mut stage = Stage::from_config(&SceneConfig::default());
        stage.tick(1.0 / 60.0);
        let center = Vec3::new(2.0, 0.0, -3.0);
        for mesh in stage.scene().meshes() {
            let d = mesh.transform.position.distance(center);
            assert!((d - 3.8).abs() < 1e-4, "{} at distance {d}", mesh.name);
        }
        let icosahedron = stage.scene().mesh(MeshId(3)).unwrap();
        assert!((icosahedron.transform.position - Vec3::new(2.0, 0.0, -6.8)).length() < 1e-4);
    }

    #[test]
    fn wheel_then_ticks_spin_the_ring() {
        let mut stage = Stage::from_config(&SceneConfig::default());
        stage.apply_wheel(100.0);
        let report = stage.tick(1.0 / 60.0);
        assert!((report.rotation - 0.02).abs() < 1e-7);
        assert!((report.speed - 0.0186).abs() < 1e-7);
        assert_eq!(report.frame, 1);
    }

    #[test]
    fn meshes_without_phase_do_not_orbit() {
        let mut config = SceneConfig::default();
        config.meshes.push(MeshConfig {
            name: "anchor".into(),
            shape: MeshShape::octahedron(),
            position: Vec3::new(0.0, 2.0, 0.0),
            phase_offset: None,
            orbit_center: None,
        });
        let mut stage = Stage::from_config(&config);
        stage.apply_wheel(300.0);
        for _ in 0..10 {
            stage.tick(1.0 / 60.0);
        }
        let anchor = stage.scene().mesh(MeshId(4)).unwrap();
        assert_eq!(anchor.transform.position, Vec3::new(0.0, 2.0, 0.0));
        assert!(anchor.transform.rotation.x > 0.0);
    }

    #[test]
    fn per_mesh_orbit_center_override() {
        let mut config = SceneConfig::default();
        config.meshes[3].orbit_center = Some(Vec2::new(5.0, 3.0));
        let mut stage = Stage::from_config(&config);
        stage.tick(0.0);
        let p = stage.scene().mesh(MeshId(3)).unwrap().transform.position;
        assert!((p - Vec3::new(5.0, 0.0, 3.0 - 3.8)).length() < 1e-4);
    }

    #[test]
    fn identical_inputs_give_identical_scenes() {
        let run = || {
            let mut stage = Stage::from_config(&SceneConfig::default());
            stage.set_cursor(CursorState { x: 0.1, y: -0.3 });
            for frame in 0..120 {
                if frame % 30 == 0 {
                    stage.apply_wheel(120.0);
                }
                stage.tick(1.0 / 60.0);
            }
            stage.scene().state_hash()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn resize_updates_camera_aspect() {
        let mut stage = Stage::from_config(&SceneConfig::default());
        stage.resize(1000, 500);
        assert_eq!(stage.scene().camera().aspect, 2.0);
    }
}
