//! Core data model for the report photo viewer.
//! `ViewerState` is the single source of truth for index, zoom and pan; every
//! mutation goes through the methods below (directly or via `ViewerAction`).

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

use crate::config::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, TOGGLE_ZOOM, ZOOM_STEP};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageItem {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl ImageItem {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: None,
        }
    }

    pub fn with_alt(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: Some(alt.into()),
        }
    }
}

pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        return DEFAULT_ZOOM;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

fn is_default_zoom(zoom: f64) -> bool {
    (zoom - DEFAULT_ZOOM).abs() < 1e-9
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerState {
    pub current_index: usize,
    /// Always within `MIN_ZOOM..=MAX_ZOOM`.
    pub zoom: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    /// Set on every index change, cleared by the image `load` event.
    pub is_loading: bool,
    pub load_failed: bool,
    /// Bumped by retries so the image element is recreated.
    pub load_attempt: u32,
    pub image_count: usize,
    /// Rendered image size in CSS pixels at zoom 1, once known.
    pub surface: Option<(f64, f64)>,
    pub clamp_pan: bool,
    /// False between `close` and the next `open`.
    pub active: bool,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl ViewerState {
    pub fn new(initial_index: usize, image_count: usize) -> Self {
        let mut s = Self {
            current_index: 0,
            zoom: DEFAULT_ZOOM,
            translate_x: 0.0,
            translate_y: 0.0,
            is_loading: true,
            load_failed: false,
            load_attempt: 0,
            image_count,
            surface: None,
            clamp_pan: false,
            active: false,
        };
        s.open(initial_index, image_count, false);
        s
    }

    /// Starts a fresh session. Nothing from a previous session survives
    /// except the measured surface size.
    pub fn open(&mut self, initial_index: usize, image_count: usize, clamp_pan: bool) {
        self.image_count = image_count;
        self.current_index = initial_index.min(image_count.saturating_sub(1));
        self.zoom = DEFAULT_ZOOM;
        self.translate_x = 0.0;
        self.translate_y = 0.0;
        // nothing to wait for in an empty sequence
        self.is_loading = image_count > 0;
        self.load_failed = false;
        self.load_attempt = 0;
        self.clamp_pan = clamp_pan;
        self.active = true;
    }

    /// Ends the session and drops its view, so a later `open` never shows
    /// the old zoom or pan, not even for one frame.
    pub fn close(&mut self) {
        self.active = false;
        self.zoom = DEFAULT_ZOOM;
        self.translate_x = 0.0;
        self.translate_y = 0.0;
        self.is_loading = false;
        self.load_failed = false;
        self.load_attempt = 0;
    }

    /// True while an open session shows an image that has neither painted
    /// nor failed yet.
    pub fn awaiting_image(&self) -> bool {
        self.active && !self.is_empty() && self.is_loading
    }

    pub fn is_empty(&self) -> bool {
        self.image_count == 0
    }

    pub fn is_zoomed(&self) -> bool {
        !is_default_zoom(self.zoom)
    }

    pub fn has_next(&self) -> bool {
        self.current_index + 1 < self.image_count
    }

    pub fn has_prev(&self) -> bool {
        self.current_index > 0
    }

    fn set_index(&mut self, index: usize) {
        if index == self.current_index {
            return;
        }
        self.current_index = index;
        self.zoom = DEFAULT_ZOOM;
        self.translate_x = 0.0;
        self.translate_y = 0.0;
        self.is_loading = true;
        self.load_failed = false;
        self.load_attempt = 0;
    }

    pub fn next_image(&mut self) {
        if self.has_next() {
            self.set_index(self.current_index + 1);
        }
    }

    pub fn prev_image(&mut self) {
        if self.has_prev() {
            self.set_index(self.current_index - 1);
        }
    }

    /// Out-of-range indices are ignored.
    pub fn go_to_image(&mut self, index: usize) {
        if index < self.image_count {
            self.set_index(index);
        }
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = clamp_zoom(zoom);
        self.constrain_pan();
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.set_zoom(self.zoom + delta);
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(-ZOOM_STEP);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = DEFAULT_ZOOM;
        self.translate_x = 0.0;
        self.translate_y = 0.0;
    }

    /// `fit_to_screen` forces the default zoom; otherwise flips between the
    /// default zoom and `TOGGLE_ZOOM`.
    pub fn toggle_zoom(&mut self, fit_to_screen: bool) {
        if fit_to_screen || self.is_zoomed() {
            self.reset_zoom();
        } else {
            self.reset_zoom();
            self.zoom = TOGGLE_ZOOM;
        }
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.translate_x += dx;
        self.translate_y += dy;
        self.constrain_pan();
    }

    pub fn set_surface(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.surface = Some((width, height));
            self.constrain_pan();
        }
    }

    /// Largest pan offset per axis that keeps the zoomed image covering the
    /// surface centre. `None` when panning is unbounded.
    pub fn pan_limit(&self) -> Option<(f64, f64)> {
        if !self.clamp_pan {
            return None;
        }
        let (w, h) = self.surface?;
        let grow = (self.zoom - 1.0).max(0.0);
        Some((w * grow / 2.0, h * grow / 2.0))
    }

    fn constrain_pan(&mut self) {
        if let Some((lx, ly)) = self.pan_limit() {
            self.translate_x = self.translate_x.clamp(-lx, lx);
            self.translate_y = self.translate_y.clamp(-ly, ly);
        }
    }

    pub fn image_loaded(&mut self) {
        self.is_loading = false;
        self.load_failed = false;
    }

    /// Ignored once the image has painted; a late timeout must not hide a
    /// visible image.
    pub fn image_failed(&mut self) {
        if self.is_loading {
            self.is_loading = false;
            self.load_failed = true;
        }
    }

    pub fn retry_load(&mut self) {
        if self.load_failed {
            self.load_failed = false;
            self.is_loading = true;
            self.load_attempt = self.load_attempt.wrapping_add(1);
        }
    }

    /// CSS transform for the render surface.
    pub fn transform_css(&self) -> String {
        format!(
            "translate({:.2}px, {:.2}px) scale({:.4})",
            self.translate_x, self.translate_y, self.zoom
        )
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug, PartialEq)]
pub enum ViewerAction {
    Open {
        initial_index: usize,
        image_count: usize,
        clamp_pan: bool,
    },
    Close,
    Next,
    Prev,
    GoTo(usize),
    ZoomIn,
    ZoomOut,
    ZoomBy(f64), // wheel
    SetZoom(f64), // pinch
    ResetZoom,
    ToggleZoom { fit_to_screen: bool },
    PanBy { dx: f64, dy: f64 },
    SetSurface { width: f64, height: f64 },
    ImageLoaded,
    ImageFailed,
    RetryLoad,
}

impl ViewerState {
    pub fn apply(&mut self, action: ViewerAction) {
        use ViewerAction::*;
        match action {
            Open {
                initial_index,
                image_count,
                clamp_pan,
            } => self.open(initial_index, image_count, clamp_pan),
            Close => self.close(),
            Next => self.next_image(),
            Prev => self.prev_image(),
            GoTo(i) => self.go_to_image(i),
            ZoomIn => self.zoom_in(),
            ZoomOut => self.zoom_out(),
            ZoomBy(d) => self.zoom_by(d),
            SetZoom(z) => self.set_zoom(z),
            ResetZoom => self.reset_zoom(),
            ToggleZoom { fit_to_screen } => self.toggle_zoom(fit_to_screen),
            PanBy { dx, dy } => self.pan_by(dx, dy),
            SetSurface { width, height } => self.set_surface(width, height),
            ImageLoaded => self.image_loaded(),
            ImageFailed => self.image_failed(),
            RetryLoad => self.retry_load(),
        }
    }
}

impl Reducible for ViewerState {
    type Action = ViewerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        new.apply(action);
        if new == *self {
            return self;
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_reset(s: &ViewerState) {
        assert_eq!(s.zoom, 1.0);
        assert_eq!(s.translate_x, 0.0);
        assert_eq!(s.translate_y, 0.0);
        assert!(s.is_loading);
    }

    #[test]
    fn walkthrough_three_images_from_middle() {
        let mut s = ViewerState::new(1, 3);
        s.next_image();
        assert_eq!(s.current_index, 2);
        assert_eq!(s.zoom, 1.0);

        s.next_image();
        assert_eq!(s.current_index, 2);

        for _ in 0..4 {
            s.zoom_in();
        }
        assert_eq!(s.zoom, 2.0);

        s.prev_image();
        assert_eq!(s.current_index, 1);
        assert_eq!(s.zoom, 1.0);
    }

    #[test]
    fn go_to_out_of_range_is_noop() {
        let mut s = ViewerState::new(0, 3);
        s.image_loaded();
        s.zoom_in();
        s.pan_by(4.0, -2.0);
        let before = s.clone();
        s.go_to_image(99);
        assert_eq!(s, before);
    }

    #[test]
    fn prev_at_start_is_noop() {
        let mut s = ViewerState::new(0, 3);
        s.image_loaded();
        s.prev_image();
        assert_eq!(s.current_index, 0);
        assert!(!s.is_loading);
    }

    #[test]
    fn zoom_stays_in_bounds() {
        let mut s = ViewerState::new(0, 1);
        for _ in 0..50 {
            s.zoom_in();
            assert!(s.zoom <= MAX_ZOOM);
        }
        assert_eq!(s.zoom, MAX_ZOOM);
        for _ in 0..50 {
            s.zoom_out();
            assert!(s.zoom >= MIN_ZOOM);
        }
        assert_eq!(s.zoom, MIN_ZOOM);
        s.set_zoom(100.0);
        assert_eq!(s.zoom, MAX_ZOOM);
        s.set_zoom(-3.0);
        assert_eq!(s.zoom, MIN_ZOOM);
        s.set_zoom(f64::NAN);
        assert_eq!(s.zoom, 1.0);
    }

    #[test]
    fn index_stays_in_bounds_under_mixed_navigation() {
        let mut s = ViewerState::new(0, 4);
        let ops: [fn(&mut ViewerState); 6] = [
            |s| s.next_image(),
            |s| s.next_image(),
            |s| s.prev_image(),
            |s| s.go_to_image(3),
            |s| s.go_to_image(7),
            |s| s.next_image(),
        ];
        for _ in 0..5 {
            for op in ops {
                op(&mut s);
                assert!(s.current_index < 4);
            }
        }
        assert_eq!(s.current_index, 3);
    }

    #[test]
    fn every_index_change_resets_view() {
        let mut s = ViewerState::new(0, 3);
        s.image_loaded();
        s.set_zoom(3.0);
        s.pan_by(40.0, 10.0);
        s.go_to_image(2);
        assert_reset(&s);

        s.image_loaded();
        s.zoom_out();
        s.pan_by(-5.0, 5.0);
        s.prev_image();
        assert_eq!(s.current_index, 1);
        assert_reset(&s);

        s.image_loaded();
        s.zoom_in();
        s.next_image();
        assert_reset(&s);
    }

    #[test]
    fn go_to_current_index_keeps_view() {
        let mut s = ViewerState::new(1, 3);
        s.image_loaded();
        s.zoom_in();
        s.go_to_image(1);
        assert_eq!(s.zoom, 1.25);
        assert!(!s.is_loading);
    }

    #[test]
    fn toggle_zoom_flips_and_fits() {
        let mut s = ViewerState::new(0, 1);
        s.toggle_zoom(false);
        assert_eq!(s.zoom, TOGGLE_ZOOM);
        s.toggle_zoom(false);
        assert_eq!(s.zoom, 1.0);

        s.set_zoom(3.5);
        s.pan_by(12.0, 12.0);
        s.toggle_zoom(true);
        assert_eq!(s.zoom, 1.0);
        assert_eq!((s.translate_x, s.translate_y), (0.0, 0.0));
    }

    #[test]
    fn reset_zoom_clears_pan() {
        let mut s = ViewerState::new(0, 1);
        s.zoom_in();
        s.pan_by(10.0, -30.0);
        s.reset_zoom();
        assert_eq!(s.zoom, 1.0);
        assert_eq!((s.translate_x, s.translate_y), (0.0, 0.0));
    }

    #[test]
    fn pan_is_unbounded_unless_clamped() {
        let mut s = ViewerState::new(0, 1);
        s.set_surface(400.0, 300.0);
        s.set_zoom(2.0);
        s.pan_by(5_000.0, -5_000.0);
        assert_eq!((s.translate_x, s.translate_y), (5_000.0, -5_000.0));

        s.open(0, 1, true);
        s.set_zoom(2.0);
        s.pan_by(5_000.0, -5_000.0);
        assert_eq!((s.translate_x, s.translate_y), (200.0, -150.0));

        // zooming back out pulls the image back into view
        s.set_zoom(1.5);
        assert_eq!((s.translate_x, s.translate_y), (100.0, -75.0));
    }

    #[test]
    fn load_failure_and_retry() {
        let mut s = ViewerState::new(0, 2);
        s.image_failed();
        assert!(s.load_failed);
        assert!(!s.is_loading);

        s.retry_load();
        assert!(s.is_loading);
        assert!(!s.load_failed);
        assert_eq!(s.load_attempt, 1);

        s.image_loaded();
        s.image_failed();
        assert!(!s.load_failed, "late failure must not hide a painted image");

        s.retry_load();
        assert_eq!(s.load_attempt, 1);
    }

    #[test]
    fn open_clamps_initial_index_and_resets() {
        let mut s = ViewerState::new(0, 3);
        s.go_to_image(2);
        s.image_loaded();
        s.zoom_in();
        s.open(10, 3, false);
        assert_eq!(s.current_index, 2);
        assert_reset(&s);

        s.open(0, 0, false);
        assert!(s.is_empty());
        assert_eq!(s.current_index, 0);
    }

    #[test]
    fn closing_drops_the_session_view() {
        let mut s = ViewerState::new(0, 3);
        s.go_to_image(1);
        s.image_loaded();
        s.zoom_in();
        s.pan_by(12.0, 8.0);

        s.apply(ViewerAction::Close);
        assert!(!s.active);
        assert_eq!(s.zoom, 1.0);
        assert_eq!((s.translate_x, s.translate_y), (0.0, 0.0));
        assert!(!s.awaiting_image());

        s.apply(ViewerAction::Open {
            initial_index: 2,
            image_count: 3,
            clamp_pan: false,
        });
        assert!(s.active);
        assert_eq!(s.current_index, 2);
        assert_reset(&s);
        assert!(s.awaiting_image());
    }

    #[test]
    fn close_twice_is_a_noop_for_the_reducer() {
        let mut closed = ViewerState::new(1, 2);
        closed.close();
        let s = Rc::new(closed);
        let again = s.clone().reduce(ViewerAction::Close);
        assert!(Rc::ptr_eq(&s, &again));
    }

    #[test]
    fn empty_sequence_never_waits_for_an_image() {
        let s = ViewerState::new(0, 0);
        assert!(s.active);
        assert!(!s.is_loading);
        assert!(!s.awaiting_image());

        let mut s = ViewerState::new(0, 1);
        assert!(s.awaiting_image());
        s.image_failed();
        assert!(!s.awaiting_image());
    }

    #[test]
    fn reducer_skips_rerender_on_noop() {
        let s = Rc::new(ViewerState::new(2, 3));
        let same = s.clone().reduce(ViewerAction::Next);
        assert!(Rc::ptr_eq(&s, &same));

        let moved = s.clone().reduce(ViewerAction::Prev);
        assert!(!Rc::ptr_eq(&s, &moved));
        assert_eq!(moved.current_index, 1);
    }

    #[test]
    fn transform_reflects_zoom_and_pan() {
        let mut s = ViewerState::new(0, 1);
        s.zoom_in();
        s.pan_by(10.0, -4.5);
        assert_eq!(s.transform_css(), "translate(10.00px, -4.50px) scale(1.2500)");
    }
}
