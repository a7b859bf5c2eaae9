use crate::material::PhysicalMaterial;
use crate::particles::ParticleField;
use crate::shape::MeshShape;
use glam::Vec3;
use orbitfield_common::{Color, MeshId, Transform};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named mesh placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneMesh {
    pub name: String,
    pub shape: MeshShape,
    pub transform: Transform,
}

impl SceneMesh {
    pub fn new(name: impl Into<String>, shape: MeshShape, transform: Transform) -> Self {
        Self {
            name: name.into(),
            shape,
            transform,
        }
    }
}

/// Perspective camera placement. The camera always looks down -Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraRig {
    pub position: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    #[serde(skip)]
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 6.0),
            fov_degrees: 35.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl CameraRig {
    /// Recompute the aspect ratio for a new output size. Zero dimensions count as 1.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(format!(
                "fov_degrees must be within (0, 180), got {}",
                self.fov_degrees
            ));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                self.near, self.far
            ));
        }
        Ok(())
    }
}

/// Light arriving from `position` toward the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 4.0,
            position: Vec3::new(0.5, 1.0, 0.0),
        }
    }
}

impl DirectionalLight {
    /// Unit vector pointing from the surface toward the light.
    pub fn to_light(&self) -> Vec3 {
        self.position.try_normalize().unwrap_or(Vec3::Y)
    }
}

/// The whole scene graph: meshes, camera, light, shared material, particles.
///
/// Meshes are kept in a BTreeMap keyed by spawn order so iteration (and the
/// state hash) is deterministic.
#[derive(Debug, Clone)]
pub struct Scene {
    meshes: BTreeMap<MeshId, SceneMesh>,
    next_id: u32,
    frame: u64,
    camera: CameraRig,
    light: DirectionalLight,
    material: PhysicalMaterial,
    particles: ParticleField,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// An empty scene with the default camera, light and material and no particles.
    pub fn new() -> Self {
        Self {
            meshes: BTreeMap::new(),
            next_id: 0,
            frame: 0,
            camera: CameraRig::default(),
            light: DirectionalLight::default(),
            material: PhysicalMaterial::default(),
            particles: ParticleField::empty(),
        }
    }

    pub fn with_camera(mut self, camera: CameraRig) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_light(mut self, light: DirectionalLight) -> Self {
        self.light = light;
        self
    }

    pub fn with_material(mut self, material: PhysicalMaterial) -> Self {
        self.material = material;
        self
    }

    pub fn with_particles(mut self, particles: ParticleField) -> Self {
        self.particles = particles;
        self
    }

    /// Number of completed ticks.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Count one completed tick. Returns the new frame number.
    pub fn advance_frame(&mut self) -> u64 {
        self.frame += 1;
        self.frame
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Add a mesh. Returns its id.
    pub fn spawn(&mut self, mesh: SceneMesh) -> MeshId {
        let id = MeshId(self.next_id);
        self.next_id += 1;
        tracing::debug!(%id, name = %mesh.name, shape = mesh.shape.label(), "mesh spawned");
        self.meshes.insert(id, mesh);
        id
    }

    pub fn mesh(&self, id: MeshId) -> Option<&SceneMesh> {
        self.meshes.get(&id)
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut SceneMesh> {
        self.meshes.get_mut(&id)
    }

    /// Meshes in spawn order.
    pub fn meshes(&self) -> impl Iterator<Item = &SceneMesh> {
        self.meshes.values()
    }

    pub fn meshes_mut(&mut self) -> impl Iterator<Item = &mut SceneMesh> {
        self.meshes.values_mut()
    }

    /// Ids and meshes in spawn order.
    pub fn entries(&self) -> impl Iterator<Item = (MeshId, &SceneMesh)> {
        self.meshes.iter().map(|(id, mesh)| (*id, mesh))
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.camera
    }

    pub fn light(&self) -> &DirectionalLight {
        &self.light
    }

    pub fn material(&self) -> &PhysicalMaterial {
        &self.material
    }

    pub fn material_mut(&mut self) -> &mut PhysicalMaterial {
        &mut self.material
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    /// FNV-1a hash over frame counter, mesh transforms and camera position.
    ///
    /// Two scenes driven by identical inputs hash identically.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        fnv_mix(&mut h, &self.frame.to_le_bytes());
        for (id, mesh) in &self.meshes {
            fnv_mix(&mut h, &id.0.to_le_bytes());
            fnv_mix_vec(&mut h, mesh.transform.position);
            fnv_mix_vec(&mut h, mesh.transform.rotation);
            fnv_mix_vec(&mut h, mesh.transform.scale);
        }
        fnv_mix_vec(&mut h, self.camera.position);
        h
    }
}

fn fnv_mix(h: &mut u64, bytes: &[u8]) {
    for &b in bytes {
        *h ^= b as u64;
        *h = h.wrapping_mul(0x0100_0000_01b3);
    }
}

fn fnv_mix_vec(h: &mut u64, v: Vec3) {
    for c in v.to_array() {
        fnv_mix(h, &c.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_starts_empty() {
        let scene = Scene::new();
        assert_eq!(scene.frame(), 0);
        assert_eq!(scene.mesh_count(), 0);
        assert!(scene.particles().is_empty());
        assert_eq!(scene.camera().position, Vec3::new(0.0, 0.0, 6.0));
    }

    #[test]
    fn spawn_assigns_sequential_ids() {
        let mut scene = Scene::new();
        let a = scene.spawn(SceneMesh::new("a", MeshShape::torus(), Transform::default()));
        let b = scene.spawn(SceneMesh::new("b", MeshShape::octahedron(), Transform::default()));
        assert_eq!(a, MeshId(0));
        assert_eq!(b, MeshId(1));
        let names: Vec<&str> = scene.meshes().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn mesh_mut_updates_transform() {
        let mut scene = Scene::new();
        let id = scene.spawn(SceneMesh::new("a", MeshShape::torus(), Transform::default()));
        scene.mesh_mut(id).unwrap().transform.position = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(
            scene.mesh(id).unwrap().transform.position,
            Vec3::new(1.0, 2.0, 3.0)
        );
        assert!(scene.mesh(MeshId(9)).is_none());
    }

    #[test]
    fn viewport_sets_aspect_and_guards_zero() {
        let mut camera = CameraRig::default();
        camera.set_viewport(1280, 720);
        assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-6);
        camera.set_viewport(800, 0);
        assert_eq!(camera.aspect, 800.0);
    }

    #[test]
    fn camera_validation() {
        assert!(CameraRig::default().validate().is_ok());
        let bad = CameraRig {
            near: 10.0,
            far: 1.0,
            ..CameraRig::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn light_points_back_toward_its_position() {
        let light = DirectionalLight::default();
        let dir = light.to_light();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x > 0.0 && dir.y > dir.x);
    }

    #[test]
    fn state_hash_tracks_transforms() {
        let mut a = Scene::new();
        let mut b = Scene::new();
        let id = a.spawn(SceneMesh::new("a", MeshShape::torus(), Transform::default()));
        b.spawn(SceneMesh::new("a", MeshShape::torus(), Transform::default()));
        assert_eq!(a.state_hash(), b.state_hash());

        a.mesh_mut(id).unwrap().transform.rotation.x = 0.1;
        assert_ne!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn state_hash_includes_frame_and_camera() {
        let mut a = Scene::new();
        let b = Scene::new();
        a.advance_frame();
        assert_ne!(a.state_hash(), b.state_hash());

        let mut c = Scene::new();
        c.camera_mut().position.x += 0.5;
        assert_ne!(c.state_hash(), b.state_hash());
    }
}
