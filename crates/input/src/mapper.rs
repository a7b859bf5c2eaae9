use crate::action::Action;
use orbitfield_kernel::CursorState;

/// Pixels per wheel line, matching what browsers report for one notch.
pub const LINE_HEIGHT_PX: f32 = 100.0;

/// Wheel movement as reported by the windowing layer.
///
/// Both variants use the desktop convention: positive `y` scrolls up / toward
/// the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelDelta {
    /// Notched wheels: number of lines.
    Lines { y: f32 },
    /// Touchpads and high-resolution wheels: physical pixels.
    Pixels { y: f64 },
}

impl WheelDelta {
    /// Convert to a DOM-style `deltaY` (positive scrolls down, in pixels).
    pub fn dom_delta_y(self) -> f32 {
        match self {
            WheelDelta::Lines { y } => -y * LINE_HEIGHT_PX,
            WheelDelta::Pixels { y } => -y as f32,
        }
    }
}

/// Keys the demo binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    F1,
    Escape,
    Other,
}

/// Turns raw input into [`Action`]s. Tracks the window size for cursor
/// normalization.
#[derive(Debug, Clone)]
pub struct InputMapper {
    width: u32,
    height: u32,
}

impl InputMapper {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resized(&mut self, width: u32, height: u32) -> Action {
        self.width = width.max(1);
        self.height = height.max(1);
        Action::Resized {
            width: self.width,
            height: self.height,
        }
    }

    pub fn wheel(&self, delta: WheelDelta) -> Action {
        let delta_y = delta.dom_delta_y();
        if delta_y == 0.0 {
            return Action::Noop;
        }
        Action::Scroll { delta_y }
    }

    /// Pointer at (`x`, `y`) pixels from the window's top-left corner.
    ///
    /// Offsets are not clamped: positions outside the window map outside
    /// [-0.5, 0.5].
    pub fn cursor_moved(&self, x: f64, y: f64) -> Action {
        let cursor = CursorState {
            x: (x / self.width as f64 - 0.5) as f32,
            y: (y / self.height as f64 - 0.5) as f32,
        };
        tracing::trace!(x = cursor.x, y = cursor.y, "cursor");
        Action::PointerMoved(cursor)
    }

    pub fn key_pressed(&self, key: Key) -> Action {
        match key {
            Key::F1 => Action::TogglePanel,
            Key::Escape => Action::Quit,
            Key::Other => Action::Noop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_delta_scrolling_down_is_positive() {
        let mapper = InputMapper::new(800, 600);
        assert_eq!(
            mapper.wheel(WheelDelta::Lines { y: -1.0 }),
            Action::Scroll { delta_y: 100.0 }
        );
        assert_eq!(
            mapper.wheel(WheelDelta::Lines { y: 2.0 }),
            Action::Scroll { delta_y: -200.0 }
        );
    }

    #[test]
    fn pixel_delta_is_negated() {
        let mapper = InputMapper::new(800, 600);
        assert_eq!(
            mapper.wheel(WheelDelta::Pixels { y: -37.5 }),
            Action::Scroll { delta_y: 37.5 }
        );
    }

    #[test]
    fn zero_wheel_is_noop() {
        let mapper = InputMapper::new(800, 600);
        assert_eq!(mapper.wheel(WheelDelta::Pixels { y: 0.0 }), Action::Noop);
    }

    #[test]
    fn cursor_center_is_zero() {
        let mapper = InputMapper::new(800, 600);
        assert_eq!(
            mapper.cursor_moved(400.0, 300.0),
            Action::PointerMoved(CursorState { x: 0.0, y: 0.0 })
        );
    }

    #[test]
    fn cursor_corners_and_outside() {
        let mapper = InputMapper::new(800, 600);
        assert_eq!(
            mapper.cursor_moved(0.0, 600.0),
            Action::PointerMoved(CursorState { x: -0.5, y: 0.5 })
        );
        assert_eq!(
            mapper.cursor_moved(1200.0, -300.0),
            Action::PointerMoved(CursorState { x: 1.0, y: -1.0 })
        );
    }

    #[test]
    fn resize_clamps_zero_and_renormalizes_cursor() {
        let mut mapper = InputMapper::new(800, 600);
        assert_eq!(
            mapper.resized(0, 400),
            Action::Resized {
                width: 1,
                height: 400
            }
        );
        assert_eq!(mapper.size(), (1, 400));
        assert_eq!(
            mapper.cursor_moved(1.0, 100.0),
            Action::PointerMoved(CursorState { x: 0.5, y: -0.25 })
        );
    }

    #[test]
    fn key_bindings() {
        let mapper = InputMapper::new(800, 600);
        assert_eq!(mapper.key_pressed(Key::F1), Action::TogglePanel);
        assert_eq!(mapper.key_pressed(Key::Escape), Action::Quit);
        assert_eq!(mapper.key_pressed(Key::Other), Action::Noop);
    }
}
