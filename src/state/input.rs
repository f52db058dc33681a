// Keyboard and wheel bindings for the open viewer.
use crate::config::WHEEL_ZOOM_STEP;
use crate::model::ViewerAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Prev,
    Next,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    First,
    Last,
    Close,
}

/// Maps `KeyboardEvent.key` to a command. Every `Some` result means the
/// event's default action must be prevented.
pub fn key_command(key: &str) -> Option<KeyCommand> {
    use KeyCommand::*;
    let cmd = match key {
        "ArrowLeft" => Prev,
        "ArrowRight" => Next,
        "+" | "=" => ZoomIn,
        "-" | "_" => ZoomOut,
        "0" => ResetZoom,
        "Home" => First,
        "End" => Last,
        "Escape" | "Esc" => Close,
        _ => return None,
    };
    Some(cmd)
}

impl KeyCommand {
    /// Store action for this command; `Close` is handled by the host.
    pub fn action(self, image_count: usize) -> Option<ViewerAction> {
        use KeyCommand::*;
        match self {
            Prev => Some(ViewerAction::Prev),
            Next => Some(ViewerAction::Next),
            ZoomIn => Some(ViewerAction::ZoomIn),
            ZoomOut => Some(ViewerAction::ZoomOut),
            ResetZoom => Some(ViewerAction::ResetZoom),
            First => Some(ViewerAction::GoTo(0)),
            Last => image_count.checked_sub(1).map(ViewerAction::GoTo),
            Close => None,
        }
    }
}

/// Wheel events never scroll the page behind the viewer; they only zoom
/// while ctrl (or cmd) is held.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WheelOutcome {
    Zoom(f64),
    Suppress,
}

pub fn wheel_outcome(delta_y: f64, ctrl: bool, meta: bool) -> WheelOutcome {
    if !(ctrl || meta) {
        return WheelOutcome::Suppress;
    }
    if delta_y < 0.0 {
        WheelOutcome::Zoom(WHEEL_ZOOM_STEP)
    } else if delta_y > 0.0 {
        WheelOutcome::Zoom(-WHEEL_ZOOM_STEP)
    } else {
        WheelOutcome::Suppress
    }
}
