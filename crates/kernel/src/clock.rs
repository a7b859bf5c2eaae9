use std::time::{Duration, Instant};

/// Monotonic per-frame clock.
///
/// The clock starts on the first [`delta`](FrameClock::delta), which returns
/// zero; every later call returns the time since the previous call.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
    elapsed: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call. Never negative.
    pub fn delta(&mut self) -> f32 {
        self.delta_at(Instant::now())
    }

    /// Like [`delta`](FrameClock::delta) with an explicit timestamp.
    ///
    /// A timestamp earlier than the previous one yields zero.
    pub fn delta_at(&mut self, now: Instant) -> f32 {
        let Some(last) = self.last else {
            self.last = Some(now);
            return 0.0;
        };
        let dt = now.saturating_duration_since(last);
        if now > last {
            self.last = Some(now);
        }
        self.elapsed += dt;
        dt.as_secs_f32()
    }

    /// Whether `delta` has been called at least once.
    pub fn is_running(&self) -> bool {
        self.last.is_some()
    }

    /// Total time handed out through `delta` so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_delta_starts_the_clock() {
        let mut clock = FrameClock::new();
        assert!(!clock.is_running());
        let later = Instant::now() + Duration::from_millis(300);
        assert_eq!(clock.delta_at(later), 0.0);
        assert!(clock.is_running());
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn delta_measures_between_calls() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        assert_eq!(clock.delta_at(start), 0.0);
        let dt = clock.delta_at(start + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-6);
        let dt = clock.delta_at(start + Duration::from_millis(50));
        assert!((dt - 0.034).abs() < 1e-6);
        assert_eq!(clock.elapsed(), Duration::from_millis(50));
    }

    #[test]
    fn earlier_timestamp_gives_zero() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.delta_at(start);
        clock.delta_at(start + Duration::from_millis(20));
        let dt = clock.delta_at(start + Duration::from_millis(10));
        assert_eq!(dt, 0.0);
        let dt = clock.delta_at(start + Duration::from_millis(30));
        assert!((dt - 0.010).abs() < 1e-6);
    }

    #[test]
    fn real_delta_is_non_negative() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(), 0.0);
        for _ in 0..10 {
            assert!(clock.delta() >= 0.0);
        }
    }
}
