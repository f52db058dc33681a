pub mod app;
pub mod image_viewer;
pub mod load_error_overlay;
pub mod report_gallery;
pub mod settings_modal;
pub mod shortcuts_overlay;
pub mod thumbnail_strip;
pub mod viewer_controls;
pub mod zoom_indicator;
