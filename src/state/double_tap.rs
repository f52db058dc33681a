use crate::config::{DOUBLE_TAP_RADIUS_PX, DOUBLE_TAP_WINDOW_MS};

use super::touch::TouchPoint;

// Last tap time (ms) and position; only compared, never scheduled.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct DoubleTapTracker {
    last: Option<(f64, TouchPoint)>,
}

impl DoubleTapTracker {
    /// Records a tap and reports whether it completes a double tap with the
    /// previous one. The record is updated either way, so a slow third tap
    /// starts a new pair instead of chaining.
    pub fn register(&mut self, now_ms: f64, at: TouchPoint) -> bool {
        let hit = match self.last {
            Some((t, p)) => {
                let dt = now_ms - t;
                dt >= 0.0 && dt < DOUBLE_TAP_WINDOW_MS && p.distance(at) < DOUBLE_TAP_RADIUS_PX
            }
            None => false,
        };
        self.last = Some((now_ms, at));
        hit
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
