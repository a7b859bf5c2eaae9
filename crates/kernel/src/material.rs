use orbitfield_common::Color;
use serde::{Deserialize, Serialize};

/// Physically based surface shared by every mesh in the scene.
///
/// `metalness` and `roughness` live in [0, 1]. The setters clamp; direct field
/// writes are trusted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalMaterial {
    pub color: Color,
    pub metalness: f32,
    pub roughness: f32,
    pub flat_shading: bool,
}

impl Default for PhysicalMaterial {
    fn default() -> Self {
        Self {
            color: Color::rgb(0x3c, 0x94, 0xd7),
            metalness: 0.86,
            roughness: 0.37,
            flat_shading: true,
        }
    }
}

impl PhysicalMaterial {
    pub fn set_metalness(&mut self, value: f32) {
        self.metalness = clamp_unit(value);
    }

    pub fn set_roughness(&mut self, value: f32) {
        self.roughness = clamp_unit(value);
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("metalness", self.metalness), ("roughness", self.roughness)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} must be within [0, 1], got {value}"));
            }
        }
        Ok(())
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_demo_material() {
        let m = PhysicalMaterial::default();
        assert_eq!(m.color.to_string(), "#3c94d7");
        assert_eq!(m.metalness, 0.86);
        assert_eq!(m.roughness, 0.37);
        assert!(m.flat_shading);
        assert!(m.validate().is_ok());
    }

    #[test]
    fn setters_clamp_to_unit_range() {
        let mut m = PhysicalMaterial::default();
        m.set_metalness(1.5);
        m.set_roughness(-0.2);
        assert_eq!(m.metalness, 1.0);
        assert_eq!(m.roughness, 0.0);
        m.set_roughness(f32::NAN);
        assert_eq!(m.roughness, 0.0);
    }

    #[test]
    fn validate_rejects_out_of_range() {
        let m = PhysicalMaterial {
            metalness: 1.2,
            ..PhysicalMaterial::default()
        };
        assert!(m.validate().unwrap_err().contains("metalness"));
    }
}
