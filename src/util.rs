// Small display helpers shared by the viewer components.

pub fn format_zoom(zoom: f64) -> String {
    format!("{}%", (zoom * 100.0).round() as i64)
}

/// One-based position label, e.g. "2 / 5".
pub fn counter_label(index: usize, count: usize) -> String {
    if count == 0 {
        return String::new();
    }
    format!("{} / {}", index.min(count - 1) + 1, count)
}

/// Browser clock in milliseconds, for tap timing.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}
