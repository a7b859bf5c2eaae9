use orbitfield_input::Action;
use orbitfield_kernel::{CursorState, Stage};
use orbitfield_render::{DebugTextRenderer, Renderer};
use std::fmt::Write;

/// A wheel event injected before a given frame's tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelImpulse {
    pub frame: u64,
    pub delta_y: f32,
}

/// Parse `FRAME:DELTA_Y`, e.g. `0:100` or `30:-250.5`.
pub fn parse_wheel(s: &str) -> Result<WheelImpulse, String> {
    let (frame, delta) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FRAME:DELTA_Y, got {s:?}"))?;
    let frame = frame
        .trim()
        .parse()
        .map_err(|e| format!("bad frame in {s:?}: {e}"))?;
    let delta_y: f32 = delta
        .trim()
        .parse()
        .map_err(|e| format!("bad delta in {s:?}: {e}"))?;
    if !delta_y.is_finite() {
        return Err(format!("delta must be finite in {s:?}"));
    }
    Ok(WheelImpulse { frame, delta_y })
}

/// Parse `X,Y` cursor offsets from the window center.
pub fn parse_cursor(s: &str) -> Result<CursorState, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(CursorState { x, y })
}

/// Headless run of the per-frame loop.
pub struct Simulation {
    pub frames: u64,
    pub dt: f32,
    pub wheel: Vec<WheelImpulse>,
    pub cursor: Option<CursorState>,
    /// Print every k-th frame; 0 prints only the last one.
    pub every: u64,
}

impl Simulation {
    /// Drive the stage and collect the printed frames.
    pub fn run(&self, stage: &mut Stage, renderer: &DebugTextRenderer) -> String {
        let mut out = String::new();
        if let Some(cursor) = self.cursor {
            Action::PointerMoved(cursor).apply(stage);
        }

        for frame in 0..self.frames {
            for impulse in self.wheel.iter().filter(|w| w.frame == frame) {
                Action::Scroll {
                    delta_y: impulse.delta_y,
                }
                .apply(stage);
            }
            let report = stage.tick(self.dt);
            tracing::debug!(
                frame = report.frame,
                speed = report.speed,
                rotation = report.rotation,
                "tick"
            );

            let last = frame + 1 == self.frames;
            let sampled = self.every > 0 && report.frame % self.every == 0;
            if sampled || last {
                out.push_str(&renderer.render(stage.scene()));
                let _ = writeln!(
                    out,
                    "Driver: speed={:.6} rotation={:.6}",
                    report.speed, report.rotation
                );
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbitfield_kernel::SceneConfig;

    #[test]
    fn parse_wheel_accepts_frame_and_delta() {
        assert_eq!(
            parse_wheel("30:-250.5"),
            Ok(WheelImpulse {
                frame: 30,
                delta_y: -250.5
            })
        );
        assert_eq!(parse_wheel(" 0 : 100 ").map(|w| w.delta_y), Ok(100.0));
    }

    #[test]
    fn parse_wheel_rejects_garbage() {
        assert!(parse_wheel("100").is_err());
        assert!(parse_wheel("x:100").is_err());
        assert!(parse_wheel("1:abc").is_err());
        assert!(parse_wheel("1:inf").is_err());
    }

    #[test]
    fn parse_cursor_pairs() {
        assert_eq!(parse_cursor("0.3,-0.2"), Ok(CursorState { x: 0.3, y: -0.2 }));
        assert!(parse_cursor("0.3").is_err());
        assert!(parse_cursor("a,b").is_err());
    }

    #[test]
    fn run_prints_last_frame_by_default() {
        let mut stage = Stage::from_config(&SceneConfig::default());
        let sim = Simulation {
            frames: 3,
            dt: 1.0 / 60.0,
            wheel: vec![WheelImpulse {
                frame: 0,
                delta_y: 100.0,
            }],
            cursor: None,
            every: 0,
        };
        let out = sim.run(&mut stage, &DebugTextRenderer::new());
        assert_eq!(out.matches("=== Frame").count(), 1);
        assert!(out.contains("=== Frame 3 ==="));
        assert_eq!(stage.scene().frame(), 3);
        assert!(stage.driver().state().rotation > 0.0);
    }

    #[test]
    fn run_samples_every_k_frames() {
        let mut stage = Stage::from_config(&SceneConfig::default());
        let sim = Simulation {
            frames: 10,
            dt: 1.0 / 60.0,
            wheel: Vec::new(),
            cursor: Some(CursorState { x: 0.3, y: -0.2 }),
            every: 5,
        };
        let out = sim.run(&mut stage, &DebugTextRenderer::new());
        assert!(out.contains("=== Frame 5 ==="));
        assert!(out.contains("=== Frame 10 ==="));
        assert_eq!(out.matches("=== Frame").count(), 2);
        assert!(stage.scene().camera().position.x > 0.0);
    }

    #[test]
    fn wheel_impulses_land_on_their_frame() {
        let mut early = Stage::from_config(&SceneConfig::default());
        let mut late = Stage::from_config(&SceneConfig::default());
        let sim = |frame| Simulation {
            frames: 2,
            dt: 1.0 / 60.0,
            wheel: vec![WheelImpulse {
                frame,
                delta_y: 100.0,
            }],
            cursor: None,
            every: 0,
        };
        sim(0).run(&mut early, &DebugTextRenderer::new());
        sim(1).run(&mut late, &DebugTextRenderer::new());
        // 0.02 + 0.0186 vs 0 + 0.02
        assert!((early.driver().state().rotation - 0.0386).abs() < 1e-6);
        assert!((late.driver().state().rotation - 0.02).abs() < 1e-6);
    }
}
