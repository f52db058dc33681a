use crate::model::ViewerState;

/// Where the viewer is in its open/load/zoom cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerPhase {
    Closed,
    Loading,
    Ready,
    Zoomed,
    Failed,
}

impl ViewerPhase {
    /// An empty sequence renders nothing, same as closed. So does an open
    /// request the store has not started a session for yet.
    pub fn of(is_open: bool, state: &ViewerState) -> Self {
        if !is_open || !state.active || state.is_empty() {
            ViewerPhase::Closed
        } else if state.load_failed {
            ViewerPhase::Failed
        } else if state.is_loading {
            ViewerPhase::Loading
        } else if state.is_zoomed() {
            ViewerPhase::Zoomed
        } else {
            ViewerPhase::Ready
        }
    }
}
