use serde::{Deserialize, Serialize};

/// Upper bound on radial and tubular segment counts.
pub const MAX_SEGMENTS: u32 = 1024;
/// Upper bound on the `p` and `q` windings of a torus knot.
pub const MAX_WINDING: u32 = 64;

/// Procedural primitive a scene mesh is built from.
///
/// The kernel only describes shapes; render backends turn them into geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeshShape {
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    Octahedron {
        radius: f32,
    },
    TorusKnot {
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
        p: u32,
        q: u32,
    },
    Icosahedron {
        radius: f32,
    },
}

impl MeshShape {
    pub fn torus() -> Self {
        Self::Torus {
            radius: 1.0,
            tube: 0.4,
            radial_segments: 16,
            tubular_segments: 60,
        }
    }

    pub fn octahedron() -> Self {
        Self::Octahedron { radius: 1.0 }
    }

    pub fn torus_knot() -> Self {
        Self::TorusKnot {
            radius: 0.8,
            tube: 0.35,
            tubular_segments: 100,
            radial_segments: 16,
            p: 2,
            q: 3,
        }
    }

    pub fn icosahedron() -> Self {
        Self::Icosahedron { radius: 1.0 }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Torus { .. } => "torus",
            Self::Octahedron { .. } => "octahedron",
            Self::TorusKnot { .. } => "torus knot",
            Self::Icosahedron { .. } => "icosahedron",
        }
    }

    /// Reject shapes that cannot produce a valid mesh.
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            Self::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => {
                positive(radius, "radius")?;
                positive(tube, "tube")?;
                segments(radial_segments, 3, MAX_SEGMENTS, "radial_segments")?;
                segments(tubular_segments, 3, MAX_SEGMENTS, "tubular_segments")
            }
            Self::TorusKnot {
                radius,
                tube,
                tubular_segments,
                radial_segments,
                p,
                q,
            } => {
                positive(radius, "radius")?;
                positive(tube, "tube")?;
                segments(tubular_segments, 3, MAX_SEGMENTS, "tubular_segments")?;
                segments(radial_segments, 3, MAX_SEGMENTS, "radial_segments")?;
                segments(p, 1, MAX_WINDING, "p")?;
                segments(q, 1, MAX_WINDING, "q")
            }
            Self::Octahedron { radius } | Self::Icosahedron { radius } => {
                positive(radius, "radius")
            }
        }
    }
}

fn positive(value: f32, name: &str) -> Result<(), String> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(format!("{name} must be positive, got {value}"))
    }
}

fn segments(value: u32, min: u32, max: u32, name: &str) -> Result<(), String> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(format!("{name} must be within {min}..={max}, got {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_shapes_are_valid() {
        for shape in [
            MeshShape::torus(),
            MeshShape::octahedron(),
            MeshShape::torus_knot(),
            MeshShape::icosahedron(),
        ] {
            assert!(shape.validate().is_ok(), "{}", shape.label());
        }
    }

    #[test]
    fn degenerate_torus_rejected() {
        let shape = MeshShape::Torus {
            radius: 1.0,
            tube: 0.0,
            radial_segments: 16,
            tubular_segments: 2,
        };
        let err = shape.validate().unwrap_err();
        assert!(err.contains("tube"));
    }

    #[test]
    fn oversized_segment_counts_rejected() {
        let shape = MeshShape::Torus {
            radius: 1.0,
            tube: 0.4,
            radial_segments: 70_000,
            tubular_segments: 70_000,
        };
        let err = shape.validate().unwrap_err();
        assert!(err.contains("radial_segments"));

        let knot = MeshShape::TorusKnot {
            radius: 0.8,
            tube: 0.35,
            tubular_segments: MAX_SEGMENTS,
            radial_segments: 16,
            p: 2,
            q: MAX_WINDING + 1,
        };
        assert!(knot.validate().unwrap_err().contains("q"));
        let at_limit = MeshShape::Torus {
            radius: 1.0,
            tube: 0.4,
            radial_segments: MAX_SEGMENTS,
            tubular_segments: MAX_SEGMENTS,
        };
        assert!(at_limit.validate().is_ok());
    }
}
