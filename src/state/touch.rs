// Touch gesture interpreter: turns touch sequences into store actions.
use crate::config::DEFAULT_ZOOM;
use crate::model::{ViewerAction, clamp_zoom};

use super::double_tap::DoubleTapTracker;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: TouchPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Gesture kind is fixed by the contact count when it starts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Drag {
        last: TouchPoint,
    },
    Pinch {
        start_distance: f64,
        start_zoom: f64,
    },
}

#[derive(Default, Debug, Clone)]
pub struct TouchState {
    pub gesture: Gesture,
    pub double_tap: DoubleTapTracker,
}

impl TouchState {
    pub fn touch_start(&mut self, touches: &[TouchPoint], zoom: f64) {
        self.gesture = match touches {
            [] => Gesture::Idle,
            [p] => Gesture::Drag { last: *p },
            [a, b, ..] => {
                let d = a.distance(*b);
                if d > 0.0 {
                    Gesture::Pinch {
                        start_distance: d,
                        start_zoom: zoom,
                    }
                } else {
                    Gesture::Idle
                }
            }
        };
    }

    /// Dragging only pans while zoomed in; the pointer is tracked regardless
    /// so a drag that crosses into zoom does not jump.
    pub fn touch_move(&mut self, touches: &[TouchPoint], zoom: f64) -> Option<ViewerAction> {
        match (&mut self.gesture, touches) {
            (Gesture::Drag { last }, [p]) => {
                let (dx, dy) = (p.x - last.x, p.y - last.y);
                *last = *p;
                if zoom > DEFAULT_ZOOM && (dx != 0.0 || dy != 0.0) {
                    Some(ViewerAction::PanBy { dx, dy })
                } else {
                    None
                }
            }
            (
                Gesture::Pinch {
                    start_distance,
                    start_zoom,
                },
                [a, b, ..],
            ) => {
                let d = a.distance(*b);
                Some(ViewerAction::SetZoom(clamp_zoom(*start_zoom * d / *start_distance)))
            }
            _ => None,
        }
    }

    /// `remaining` are the contacts still down, `lifted` the one that just
    /// left. Only the end of a whole sequence can produce a (double) tap.
    pub fn touch_end(
        &mut self,
        remaining: &[TouchPoint],
        lifted: Option<TouchPoint>,
        now_ms: f64,
        zoom: f64,
    ) -> Option<ViewerAction> {
        if !remaining.is_empty() {
            return None;
        }
        self.gesture = Gesture::Idle;
        let at = lifted?;
        if self.double_tap.register(now_ms, at) {
            Some(ViewerAction::ToggleZoom {
                fit_to_screen: (zoom - DEFAULT_ZOOM).abs() > 1e-9,
            })
        } else {
            None
        }
    }

    /// A cancelled sequence never counts as a tap.
    pub fn touch_cancel(&mut self, remaining: &[TouchPoint]) {
        if remaining.is_empty() {
            self.gesture = Gesture::Idle;
        }
    }

    /// Forget everything, e.g. when the viewer closes mid-gesture.
    pub fn reset(&mut self) {
        self.gesture = Gesture::Idle;
        self.double_tap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_ZOOM, MIN_ZOOM};
    use crate::model::ViewerState;

    fn pt(x: f64, y: f64) -> TouchPoint {
        TouchPoint::new(x, y)
    }

    #[test]
    fn drag_pans_only_when_zoomed() {
        let mut ts = TouchState::default();
        ts.touch_start(&[pt(10.0, 10.0)], 1.0);
        assert_eq!(ts.touch_move(&[pt(30.0, 15.0)], 1.0), None);

        ts.touch_start(&[pt(10.0, 10.0)], 2.0);
        assert_eq!(
            ts.touch_move(&[pt(30.0, 15.0)], 2.0),
            Some(ViewerAction::PanBy { dx: 20.0, dy: 5.0 })
        );
        assert_eq!(
            ts.touch_move(&[pt(25.0, 25.0)], 2.0),
            Some(ViewerAction::PanBy { dx: -5.0, dy: 10.0 })
        );
    }

    #[test]
    fn pinch_scales_from_baseline() {
        let mut ts = TouchState::default();
        ts.touch_start(&[pt(0.0, 0.0), pt(100.0, 0.0)], 1.5);
        assert_eq!(
            ts.touch_move(&[pt(0.0, 0.0), pt(200.0, 0.0)], 1.5),
            Some(ViewerAction::SetZoom(3.0))
        );
        // baseline stays fixed while the gesture lasts
        assert_eq!(
            ts.touch_move(&[pt(0.0, 0.0), pt(50.0, 0.0)], 3.0),
            Some(ViewerAction::SetZoom(0.75))
        );
    }

    #[test]
    fn pinch_is_clamped() {
        let mut ts = TouchState::default();
        ts.touch_start(&[pt(0.0, 0.0), pt(10.0, 0.0)], 2.0);
        assert_eq!(
            ts.touch_move(&[pt(0.0, 0.0), pt(1_000.0, 0.0)], 2.0),
            Some(ViewerAction::SetZoom(MAX_ZOOM))
        );
        assert_eq!(
            ts.touch_move(&[pt(0.0, 0.0), pt(0.5, 0.0)], 2.0),
            Some(ViewerAction::SetZoom(MIN_ZOOM))
        );
    }

    #[test]
    fn pinch_with_coincident_fingers_is_ignored() {
        let mut ts = TouchState::default();
        ts.touch_start(&[pt(5.0, 5.0), pt(5.0, 5.0)], 1.0);
        assert_eq!(ts.gesture, Gesture::Idle);
        assert_eq!(ts.touch_move(&[pt(0.0, 0.0), pt(50.0, 0.0)], 1.0), None);
    }

    #[test]
    fn gestures_do_not_mix() {
        let mut ts = TouchState::default();
        ts.touch_start(&[pt(0.0, 0.0)], 2.0);
        assert_eq!(ts.touch_move(&[pt(0.0, 0.0), pt(40.0, 0.0)], 2.0), None);

        ts.touch_start(&[pt(0.0, 0.0), pt(40.0, 0.0)], 2.0);
        assert_eq!(ts.touch_move(&[pt(10.0, 0.0)], 2.0), None);
    }

    #[test]
    fn sequence_ends_only_when_all_contacts_lift() {
        let mut ts = TouchState::default();
        ts.touch_start(&[pt(0.0, 0.0), pt(40.0, 0.0)], 1.0);
        assert_eq!(ts.touch_end(&[pt(0.0, 0.0)], Some(pt(40.0, 0.0)), 0.0, 1.0), None);
        assert!(matches!(ts.gesture, Gesture::Pinch { .. }));
        ts.touch_end(&[], Some(pt(0.0, 0.0)), 10.0, 1.0);
        assert_eq!(ts.gesture, Gesture::Idle);
    }

    #[test]
    fn double_tap_toggles_through_the_store() {
        let mut ts = TouchState::default();
        let mut s = ViewerState::new(0, 1);
        let p = pt(50.0, 50.0);

        let tap = |ts: &mut TouchState, s: &mut ViewerState, now: f64| {
            ts.touch_start(&[p], s.zoom);
            if let Some(a) = ts.touch_end(&[], Some(p), now, s.zoom) {
                s.apply(a);
            }
        };

        tap(&mut ts, &mut s, 0.0);
        assert_eq!(s.zoom, 1.0);
        tap(&mut ts, &mut s, 150.0);
        assert_eq!(s.zoom, 2.0);
        tap(&mut ts, &mut s, 600.0);
        assert_eq!(s.zoom, 2.0);
        tap(&mut ts, &mut s, 700.0);
        assert_eq!(s.zoom, 1.0);
    }

    #[test]
    fn cancel_drops_the_gesture_without_tapping() {
        let mut ts = TouchState::default();
        let p = pt(3.0, 3.0);
        ts.touch_end(&[], Some(p), 0.0, 1.0);
        ts.touch_start(&[p], 2.0);
        ts.touch_cancel(&[]);
        assert_eq!(ts.gesture, Gesture::Idle);
        // the earlier tap is still armed, cancel did not register a second one
        assert!(ts.touch_end(&[], Some(p), 100.0, 1.0).is_some());
    }

    #[test]
    fn double_tap_while_pinched_in_fits_to_screen() {
        let mut ts = TouchState::default();
        let p = pt(1.0, 1.0);
        ts.touch_end(&[], Some(p), 0.0, 0.5);
        assert_eq!(
            ts.touch_end(&[], Some(p), 100.0, 0.5),
            Some(ViewerAction::ToggleZoom {
                fit_to_screen: true
            })
        );
    }
}
