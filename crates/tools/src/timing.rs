/// Smoothed frames-per-second estimate for the debug panel.
///
/// Exponential moving average over instantaneous rates, seeded at 60.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    smoothed: f32,
    /// Weight of the newest sample, in (0, 1].
    smoothing: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            smoothed: 60.0,
            smoothing: 0.05,
        }
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame duration in seconds. Non-positive durations are ignored.
    pub fn record(&mut self, dt: f32) {
        if dt > 0.0 && dt.is_finite() {
            let instant = 1.0 / dt;
            self.smoothed = self.smoothed * (1.0 - self.smoothing) + instant * self.smoothing;
        }
    }

    pub fn fps(&self) -> f32 {
        self.smoothed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_frames_hold_the_rate() {
        let mut fps = FpsCounter::new();
        for _ in 0..100 {
            fps.record(1.0 / 60.0);
        }
        assert!((fps.fps() - 60.0).abs() < 1e-2);
    }

    #[test]
    fn converges_toward_new_rate() {
        let mut fps = FpsCounter::new();
        for _ in 0..400 {
            fps.record(1.0 / 144.0);
        }
        assert!((fps.fps() - 144.0).abs() < 0.5);
    }

    #[test]
    fn zero_and_negative_durations_are_ignored() {
        let mut fps = FpsCounter::new();
        fps.record(0.0);
        fps.record(-1.0);
        fps.record(f32::NAN);
        assert_eq!(fps.fps(), 60.0);
    }
}
