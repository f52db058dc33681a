//! Viewer constants and the persisted user configuration.

use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{ViewerError, ViewerResult};

pub const MIN_ZOOM: f64 = 0.25;
pub const MAX_ZOOM: f64 = 5.0;
pub const DEFAULT_ZOOM: f64 = 1.0;
/// Zoom applied by a double tap when the image is at its default size.
pub const TOGGLE_ZOOM: f64 = 2.0;
pub const ZOOM_STEP: f64 = 0.25;
pub const WHEEL_ZOOM_STEP: f64 = 0.1;

pub const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;
pub const DOUBLE_TAP_RADIUS_PX: f64 = 30.0;

pub const DEFAULT_LOAD_TIMEOUT_MS: u32 = 15_000;
pub const MIN_LOAD_TIMEOUT_MS: u32 = 1_000;
pub const MAX_LOAD_TIMEOUT_MS: u32 = 120_000;

pub const DEFAULT_INDICATOR_HIDE_MS: u32 = 2_000;
pub const MIN_INDICATOR_HIDE_MS: u32 = 250;
pub const MAX_INDICATOR_HIDE_MS: u32 = 10_000;

pub const STORAGE_KEY: &str = "tj_viewer_config";

/// User-tunable viewer settings, stored as JSON in `localStorage`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub load_timeout_ms: u32,
    pub indicator_hide_ms: u32,
    /// Keep the zoomed image from being dragged out of view.
    pub clamp_pan: bool,
    pub show_thumbnails: bool,
    pub log_level: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            load_timeout_ms: DEFAULT_LOAD_TIMEOUT_MS,
            indicator_hide_ms: DEFAULT_INDICATOR_HIDE_MS,
            clamp_pan: false,
            show_thumbnails: true,
            log_level: "info".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Parses and validates a stored config. Missing fields take defaults.
    pub fn from_json(raw: &str) -> ViewerResult<Self> {
        let cfg: ViewerConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> ViewerResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> ViewerResult<()> {
        if !(MIN_LOAD_TIMEOUT_MS..=MAX_LOAD_TIMEOUT_MS).contains(&self.load_timeout_ms) {
            return Err(ViewerError::invalid(
                "load_timeout_ms",
                format!(
                    "{} is outside {}..={}",
                    self.load_timeout_ms, MIN_LOAD_TIMEOUT_MS, MAX_LOAD_TIMEOUT_MS
                ),
            ));
        }
        if !(MIN_INDICATOR_HIDE_MS..=MAX_INDICATOR_HIDE_MS).contains(&self.indicator_hide_ms) {
            return Err(ViewerError::invalid(
                "indicator_hide_ms",
                format!(
                    "{} is outside {}..={}",
                    self.indicator_hide_ms, MIN_INDICATOR_HIDE_MS, MAX_INDICATOR_HIDE_MS
                ),
            ));
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> ViewerResult<LevelFilter> {
        LevelFilter::from_str(self.log_level.trim())
            .map_err(|_| ViewerError::invalid("log_level", format!("unknown level `{}`", self.log_level)))
    }

    /// Reads the stored config, `Ok(None)` when nothing has been saved yet.
    pub fn load() -> ViewerResult<Option<Self>> {
        let store = local_storage()?;
        match store.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => Self::from_json(&raw).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(ViewerError::storage(format!("{:?}", e))),
        }
    }

    /// Stored config, or defaults when it is absent or unusable.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(Some(cfg)) => cfg,
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("using default viewer config: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> ViewerResult<()> {
        self.validate()?;
        let raw = self.to_json()?;
        local_storage()?
            .set_item(STORAGE_KEY, &raw)
            .map_err(|e| ViewerError::storage(format!("{:?}", e)))
    }

    pub fn clear_saved() -> ViewerResult<()> {
        local_storage()?
            .remove_item(STORAGE_KEY)
            .map_err(|e| ViewerError::storage(format!("{:?}", e)))
    }
}

fn local_storage() -> ViewerResult<web_sys::Storage> {
    let win = web_sys::window().ok_or_else(|| ViewerError::storage("no window"))?;
    match win.local_storage() {
        Ok(Some(store)) => Ok(store),
        Ok(None) => Err(ViewerError::storage("localStorage disabled")),
        Err(e) => Err(ViewerError::storage(format!("{:?}", e))),
    }
}
