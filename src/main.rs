mod components;
mod config;
mod error;
mod logging;
mod model;
mod state;
mod util;

use components::app::{App, AppProps};
use config::ViewerConfig;
use log::LevelFilter;

fn main() {
    // Logger first so config problems are reported
    logging::init(LevelFilter::Info);
    let config = ViewerConfig::load_or_default();
    if let Ok(level) = config.level_filter() {
        log::set_max_level(level);
    }
    log::info!("report photo viewer starting");
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
