use glam::Vec3;
use orbitfield_common::Color;
use serde::{Deserialize, Serialize};

/// Parameters of the static point field scattered around the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// Edge length of the cube the points are scattered in, centered on the origin.
    pub extent: f32,
    /// World-space size of each point sprite.
    pub size: f32,
    pub color: Color,
    pub seed: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 700,
            extent: 10.0,
            size: 0.025,
            color: Color::WHITE,
            seed: 42,
        }
    }
}

/// A fixed cloud of points. Positions never change after generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    positions: Vec<Vec3>,
    size: f32,
    color: Color,
}

impl ParticleField {
    /// Scatter `config.count` points uniformly in `[-extent/2, extent/2)` on each axis.
    ///
    /// The same seed always yields the same field.
    pub fn generate(config: &ParticleConfig) -> Self {
        let mut rng = SplitMix64::new(config.seed);
        let mut next = || (rng.next_f32() - 0.5) * config.extent;
        let positions = (0..config.count)
            .map(|_| {
                let x = next();
                let y = next();
                let z = next();
                Vec3::new(x, y, z)
            })
            .collect();
        Self {
            positions,
            size: config.size,
            color: config.color,
        }
    }

    pub fn empty() -> Self {
        Self {
            positions: Vec::new(),
            size: 0.0,
            color: Color::WHITE,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// Splitmix64 stream: deterministic across platforms, no external RNG state.
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1), 24 bits of mantissa.
    fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }
}
