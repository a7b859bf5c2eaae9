use glam::Vec3;
use orbitfield_common::MeshId;
use orbitfield_kernel::{Scene, Stage};

/// Scene inspector for the debug panel and the CLI.
///
/// Read-only queries against the stage.
pub struct SceneInspector;

impl SceneInspector {
    pub fn summary(stage: &Stage) -> SceneSummary {
        let scene = stage.scene();
        let state = stage.driver().state();
        SceneSummary {
            frame: scene.frame(),
            speed: state.speed,
            rotation: state.rotation,
            camera: scene.camera().position,
            meshes: scene.mesh_count(),
            orbiting: stage.driver().bodies().len(),
            particles: scene.particles().len(),
        }
    }

    pub fn inspect_mesh(scene: &Scene, id: MeshId) -> Option<MeshInfo> {
        scene.mesh(id).map(|mesh| MeshInfo {
            id,
            name: mesh.name.clone(),
            shape: mesh.shape.label(),
            position: mesh.transform.position,
            rotation: mesh.transform.rotation,
        })
    }

    pub fn list_meshes(scene: &Scene) -> Vec<MeshId> {
        scene.entries().map(|(id, _)| id).collect()
    }
}

/// Driver and scene state at one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSummary {
    pub frame: u64,
    pub speed: f32,
    pub rotation: f32,
    pub camera: Vec3,
    pub meshes: usize,
    pub orbiting: usize,
    pub particles: usize,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: frame={} speed={:.6} rotation={:.4} camera=({:.3}, {:.3}, {:.3}) meshes={} orbiting={} particles={}",
            self.frame,
            self.speed,
            self.rotation,
            self.camera.x,
            self.camera.y,
            self.camera.z,
            self.meshes,
            self.orbiting,
            self.particles,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeshInfo {
    pub id: MeshId,
    pub name: String,
    pub shape: &'static str,
    pub position: Vec3,
    pub rotation: Vec3,
}

impl std::fmt::Display for MeshInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({}) pos=({:.3}, {:.3}, {:.3}) rot=({:.3}, {:.3}, {:.3})",
            self.id,
            self.name,
            self.shape,
            self.position.x,
            self.position.y,
            self.position.z,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbitfield_kernel::{CursorState, SceneConfig};

    #[test]
    fn summary_of_fresh_stage() {
        let stage = Stage::from_config(&SceneConfig::default());
        let summary = SceneInspector::summary(&stage);
        assert_eq!(summary.frame, 0);
        assert_eq!(summary.speed, 0.0);
        assert_eq!(summary.meshes, 4);
        assert_eq!(summary.orbiting, 4);
        assert_eq!(summary.particles, 700);
        assert_eq!(summary.camera, Vec3::new(0.0, 0.0, 6.0));
    }

    #[test]
    fn summary_tracks_ticks() {
        let mut stage = Stage::from_config(&SceneConfig::default());
        stage.apply_wheel(100.0);
        stage.set_cursor(CursorState { x: 0.5, y: 0.0 });
        stage.tick(0.1);
        let summary = SceneInspector::summary(&stage);
        assert_eq!(summary.frame, 1);
        assert!((summary.rotation - 0.02).abs() < 1e-7);
        assert!((summary.camera.x - 0.075).abs() < 1e-6);
    }

    #[test]
    fn summary_display() {
        let stage = Stage::from_config(&SceneConfig::default());
        let s = SceneInspector::summary(&stage).to_string();
        assert!(s.contains("frame=0"));
        assert!(s.contains("meshes=4"));
        assert!(s.contains("camera=(0.000, 0.000, 6.000)"));
    }

    #[test]
    fn inspect_mesh_found_and_missing() {
        let stage = Stage::from_config(&SceneConfig::default());
        let info = SceneInspector::inspect_mesh(stage.scene(), MeshId(2)).unwrap();
        assert_eq!(info.name, "torus knot");
        assert_eq!(info.shape, "torus knot");
        assert_eq!(info.position, Vec3::new(2.0, 0.0, -6.0));
        assert!(SceneInspector::inspect_mesh(stage.scene(), MeshId(99)).is_none());
    }

    #[test]
    fn list_meshes_in_spawn_order() {
        let stage = Stage::from_config(&SceneConfig::default());
        let ids = SceneInspector::list_meshes(stage.scene());
        assert_eq!(ids, vec![MeshId(0), MeshId(1), MeshId(2), MeshId(3)]);
    }
}
