use orbitfield_common::Color;
use orbitfield_kernel::PhysicalMaterial;

/// Bounds and step of one numeric panel control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamRange {
    /// Unit interval with millesimal steps, used by metalness and roughness.
    pub const UNIT: ParamRange = ParamRange {
        min: 0.0,
        max: 1.0,
        step: 0.001,
    };

    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    /// Clamp, then snap to the nearest step counted from `min`.
    pub fn quantize(&self, value: f32) -> f32 {
        let value = self.clamp(value);
        if self.step <= 0.0 {
            return value;
        }
        let steps = ((value - self.min) / self.step).round();
        self.clamp(self.min + steps * self.step)
    }
}

impl Default for ParamRange {
    fn default() -> Self {
        Self::UNIT
    }
}

/// One edit coming from the debug panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialEdit {
    Color(Color),
    Metalness(f32),
    Roughness(f32),
}

/// Model behind the material section of the debug panel.
#[derive(Debug, Clone, Default)]
pub struct MaterialPanel {
    pub metalness: ParamRange,
    pub roughness: ParamRange,
}

impl MaterialPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an edit immediately. Returns `true` if the material changed.
    pub fn apply(&self, material: &mut PhysicalMaterial, edit: MaterialEdit) -> bool {
        let before = *material;
        match edit {
            MaterialEdit::Color(color) => material.color = color,
            MaterialEdit::Metalness(v) => material.set_metalness(self.metalness.quantize(v)),
            MaterialEdit::Roughness(v) => material.set_roughness(self.roughness.quantize(v)),
        }
        let changed = *material != before;
        if changed {
            tracing::debug!(
                color = %material.color,
                metalness = material.metalness,
                roughness = material.roughness,
                "material edited"
            );
        }
        changed
    }

    /// Compare the widget values against the material and apply whatever
    /// differs, in color, metalness, roughness order.
    pub fn sync(
        &self,
        material: &mut PhysicalMaterial,
        color: [u8; 3],
        metalness: f32,
        roughness: f32,
    ) -> bool {
        let mut changed = false;
        if color != material.color.to_array() {
            changed |= self.apply(material, MaterialEdit::Color(Color::from_array(color)));
        }
        if metalness != material.metalness {
            changed |= self.apply(material, MaterialEdit::Metalness(metalness));
        }
        if roughness != material.roughness {
            changed |= self.apply(material, MaterialEdit::Roughness(roughness));
        }
        changed
    }
}
