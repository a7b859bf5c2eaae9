use orbitfield_kernel::Scene;
use std::fmt::Write;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the scene (meshes, camera, light, material) and produces
/// output. It never mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the given scene.
    fn render(&self, scene: &Scene) -> Self::Output;
}

/// Human-readable dump of a scene frame, for the CLI, logs and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Also list the first few particle positions.
    pub show_particles: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene) -> String {
        let mut out = String::new();
        let camera = scene.camera();
        let material = scene.material();
        let light = scene.light();

        let _ = writeln!(out, "=== Frame {} ===", scene.frame());
        let _ = writeln!(
            out,
            "Camera: pos=({:.4}, {:.4}, {:.4}) fov={:.0} aspect={:.3}",
            camera.position.x, camera.position.y, camera.position.z, camera.fov_degrees, camera.aspect
        );
        let _ = writeln!(
            out,
            "Material: color={} metalness={:.3} roughness={:.3}",
            material.color, material.metalness, material.roughness
        );
        let _ = writeln!(
            out,
            "Light: color={} intensity={:.1} from=({:.2}, {:.2}, {:.2})",
            light.color, light.intensity, light.position.x, light.position.y, light.position.z
        );
        let _ = writeln!(out, "Meshes: {}", scene.mesh_count());
        for (id, mesh) in scene.entries() {
            let p = mesh.transform.position;
            let r = mesh.transform.rotation;
            let _ = writeln!(
                out,
                "  [{id}] {:<12} pos=({:.4}, {:.4}, {:.4}) rot=({:.4}, {:.4}, {:.4})",
                mesh.name, p.x, p.y, p.z, r.x, r.y, r.z
            );
        }

        let particles = scene.particles();
        let _ = writeln!(
            out,
            "Particles: {} size={} color={}",
            particles.len(),
            particles.size(),
            particles.color()
        );
        if self.show_particles {
            for p in particles.positions().iter().take(5) {
                let _ = writeln!(out, "  ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
            }
        }

        out
    }
}
