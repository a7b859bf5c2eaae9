use orbitfield_kernel::{CursorState, Stage};

/// A high-level input action the stage understands.
///
/// The stage consumes actions, never raw window events, so the desktop app
/// and the headless CLI drive it through the same path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Wheel impulse as a DOM-style `deltaY` (positive scrolls down).
    Scroll { delta_y: f32 },
    /// New pointer offset from the window center.
    PointerMoved(CursorState),
    /// Output size changed, in physical pixels.
    Resized { width: u32, height: u32 },
    /// Show or hide the debug panel.
    TogglePanel,
    /// Close the application.
    Quit,
    /// Input with no binding.
    Noop,
}

impl Action {
    /// Apply the action's effect on the stage. Returns `false` for actions the
    /// stage does not handle (panel, quit, no-op), which belong to the host.
    pub fn apply(self, stage: &mut Stage) -> bool {
        match self {
            Action::Scroll { delta_y } => {
                stage.apply_wheel(delta_y);
                true
            }
            Action::PointerMoved(cursor) => {
                stage.set_cursor(cursor);
                true
            }
            Action::Resized { width, height } => {
                stage.resize(width, height);
                true
            }
            Action::TogglePanel | Action::Quit | Action::Noop => false,
        }
    }
}
