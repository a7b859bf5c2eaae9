//! Scene configuration: every tunable constant of the demo, loadable from YAML.
//!
//! Missing keys fall back to the built-in demo values, so a config file only
//! needs to mention what it changes.

use crate::driver::{DecayMode, DriverConfig};
use crate::material::PhysicalMaterial;
use crate::particles::ParticleConfig;
use crate::scene::{CameraRig, DirectionalLight};
use crate::shape::MeshShape;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};
use std::path::{Path, PathBuf};

/// Errors from loading or validating a [`SceneConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Shared circular path of the orbiting meshes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Center on the ground plane: `x` is world x, `y` is world z.
    pub center: Vec2,
    pub radius: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            center: Vec2::new(2.0, -3.0),
            radius: 3.8,
        }
    }
}

/// One mesh of the scene and, optionally, its place on the orbit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    pub name: String,
    pub shape: MeshShape,
    /// Position before the first tick moves the mesh onto the orbit.
    pub position: Vec3,
    /// Phase on the shared orbit. Meshes without a phase stay where they are.
    #[serde(default)]
    pub phase_offset: Option<f32>,
    /// Per-mesh orbit center overriding [`OrbitConfig::center`].
    #[serde(default)]
    pub orbit_center: Option<Vec2>,
}

/// Complete description of the demo scene and its animation tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub driver: DriverConfig,
    pub orbit: OrbitConfig,
    pub meshes: Vec<MeshConfig>,
    pub material: PhysicalMaterial,
    pub camera: CameraRig,
    pub light: DirectionalLight,
    pub particles: ParticleConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let mesh = |name: &str, shape, position, phase| MeshConfig {
            name: name.to_string(),
            shape,
            position,
            phase_offset: Some(phase),
            orbit_center: None,
        };
        Self {
            driver: DriverConfig::default(),
            orbit: OrbitConfig::default(),
            meshes: vec![
                mesh("torus", MeshShape::torus(), Vec3::new(2.0, 0.0, 0.0), 0.0),
                mesh(
                    "octahedron",
                    MeshShape::octahedron(),
                    Vec3::new(-1.0, 0.0, 0.0),
                    FRAC_PI_2,
                ),
                mesh(
                    "torus knot",
                    MeshShape::torus_knot(),
                    Vec3::new(2.0, 0.0, -6.0),
                    PI,
                ),
                mesh(
                    "icosahedron",
                    MeshShape::icosahedron(),
                    Vec3::new(5.0, 0.0, 3.0),
                    3.0 * FRAC_PI_2,
                ),
            ],
            material: PhysicalMaterial::default(),
            camera: CameraRig::default(),
            light: DirectionalLight::default(),
            particles: ParticleConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Read, parse and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text)?;
        tracing::info!(path = %path.display(), meshes = config.meshes.len(), "config loaded");
        Ok(config)
    }

    /// Parse and validate YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.driver;
        if !(d.decay > 0.0 && d.decay <= 1.0) {
            return Err(ConfigError::invalid(
                "driver.decay",
                format!("must be within (0, 1], got {}", d.decay),
            ));
        }
        if !d.wheel_sensitivity.is_finite() {
            return Err(ConfigError::invalid(
                "driver.wheel_sensitivity",
                "must be finite",
            ));
        }
        finite("driver.spin_rate", &d.spin_rate.to_array())?;
        finite("driver.drift_gain", &[d.drift_gain])?;
        if let DecayMode::TimeScaled { reference_fps } = d.decay_mode {
            if !(reference_fps > 0.0 && reference_fps.is_finite()) {
                return Err(ConfigError::invalid(
                    "driver.decay_mode.reference_fps",
                    format!("must be positive, got {reference_fps}"),
                ));
            }
        }
        if !(self.orbit.radius > 0.0 && self.orbit.radius.is_finite()) {
            return Err(ConfigError::invalid(
                "orbit.radius",
                format!("must be positive, got {}", self.orbit.radius),
            ));
        }
        finite("orbit.center", &self.orbit.center.to_array())?;
        for (i, mesh) in self.meshes.iter().enumerate() {
            finite(&format!("meshes[{i}].position"), &mesh.position.to_array())?;
            if let Some(phase) = mesh.phase_offset {
                finite(&format!("meshes[{i}].phase_offset"), &[phase])?;
            }
            if let Some(center) = mesh.orbit_center {
                finite(&format!("meshes[{i}].orbit_center"), &center.to_array())?;
            }
            mesh.shape
                .validate()
                .map_err(|reason| ConfigError::invalid(format!("meshes[{i}].shape"), reason))?;
        }
        self.material
            .validate()
            .map_err(|reason| ConfigError::invalid("material", reason))?;
        self.camera
            .validate()
            .map_err(|reason| ConfigError::invalid("camera", reason))?;
        if self.light.intensity < 0.0 || self.light.intensity.is_nan() {
            return Err(ConfigError::invalid(
                "light.intensity",
                format!("must not be negative, got {}", self.light.intensity),
            ));
        }
        finite("light.position", &self.light.position.to_array())?;
        let p = &self.particles;
        if !(p.size > 0.0 && p.size.is_finite() && p.extent >= 0.0 && p.extent.is_finite()) {
            return Err(ConfigError::invalid(
                "particles",
                format!(
                    "size must be positive and extent non-negative (both finite), got size={} extent={}",
                    p.size, p.extent
                ),
            ));
        }
        Ok(())
    }
}

fn finite(field: &str, values: &[f32]) -> Result<(), ConfigError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be finite, got {values:?}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_describe_the_demo_scene() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.meshes.len(), 4);
        assert_eq!(config.driver.wheel_sensitivity, 0.0002);
        assert_eq!(config.driver.decay, 0.93);
        assert_eq!(config.driver.decay_mode, DecayMode::FrameCoupled);
        assert_eq!(config.orbit.radius, 3.8);
        assert_eq!(config.camera.fov_degrees, 35.0);
        assert_eq!(config.particles.count, 700);
        assert_eq!(config.light.intensity, 4.0);
        assert_eq!(config.meshes[3].position, Vec3::new(5.0, 0.0, 3.0));
    }

    #[test]
    fn yaml_round_trips_defaults() {
        let config = SceneConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("#3c94d7"));
        let parsed = SceneConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "
driver:
  decay: 0.9
  decay_mode:
    kind: time_scaled
    reference_fps: 60.0
material:
  color: '#ff0000'
";
        let config = SceneConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.driver.decay, 0.9);
        assert_eq!(config.driver.wheel_sensitivity, 0.0002);
        assert_eq!(
            config.driver.decay_mode,
            DecayMode::TimeScaled {
                reference_fps: 60.0
            }
        );
        assert_eq!(config.material.color.to_string(), "#ff0000");
        assert_eq!(config.material.metalness, 0.86);
        assert_eq!(config.meshes.len(), 4);
    }

    #[test]
    fn rejects_out_of_range_material() {
        let err = SceneConfig::from_yaml("material:\n  roughness: 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "material"));
    }

    #[test]
    fn rejects_bad_decay_and_radius() {
        let err = SceneConfig::from_yaml("driver:\n  decay: 1.2\n").unwrap_err();
        assert!(err.to_string().contains("driver.decay"));
        let err = SceneConfig::from_yaml("orbit:\n  radius: 0.0\n").unwrap_err();
        assert!(err.to_string().contains("orbit.radius"));
    }

    #[test]
    fn rejects_non_finite_driver_tuning() {
        let err = SceneConfig::from_yaml("driver:\n  drift_gain: .nan\n").unwrap_err();
        assert!(err.to_string().contains("driver.drift_gain"));
        let err = SceneConfig::from_yaml("driver:\n  spin_rate: [0.1, .inf]\n").unwrap_err();
        assert!(err.to_string().contains("driver.spin_rate"));
    }

    #[test]
    fn rejects_non_finite_orbit_placement() {
        let err = SceneConfig::from_yaml("orbit:\n  center: [.nan, 0.0]\n").unwrap_err();
        assert!(err.to_string().contains("orbit.center"));

        let mut config = SceneConfig::default();
        config.meshes[1].phase_offset = Some(f32::NAN);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("meshes[1].phase_offset"));

        let mut config = SceneConfig::default();
        config.meshes[2].orbit_center = Some(Vec2::new(0.0, f32::INFINITY));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("meshes[2].orbit_center"));
    }

    #[test]
    fn rejects_non_finite_light_and_particles() {
        let err = SceneConfig::from_yaml("light:\n  position: [1.0, -.inf, 0.0]\n").unwrap_err();
        assert!(err.to_string().contains("light.position"));
        let err = SceneConfig::from_yaml("particles:\n  extent: .inf\n").unwrap_err();
        assert!(err.to_string().contains("particles"));
    }

    #[test]
    fn rejects_malformed_color() {
        let err = SceneConfig::from_yaml("material:\n  color: blue\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "orbit:\n  radius: 5.0").unwrap();
        let config = SceneConfig::load(file.path()).unwrap();
        assert_eq!(config.orbit.radius, 5.0);
        assert_eq!(config.orbit.center, Vec2::new(2.0, -3.0));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SceneConfig::load(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
