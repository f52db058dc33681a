use std::rc::Rc;

use super::{image_viewer::ImageViewer, report_gallery::ReportGallery, settings_modal::SettingsModal};
use crate::config::ViewerConfig;
use crate::model::ImageItem;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AppProps {
    pub config: ViewerConfig,
}

fn report_photos() -> Vec<ImageItem> {
    vec![
        ImageItem::with_alt(
            "assets/reports/bundaran-hi-platform-door.jpg",
            "Halte Bundaran HI: platform door stuck open",
        ),
        ImageItem::with_alt(
            "assets/reports/bundaran-hi-queue.jpg",
            "Evening queue at the Bundaran HI gate",
        ),
        ImageItem::with_alt(
            "assets/reports/corridor-1-bus-interior.jpg",
            "Corridor 1 bus, broken handrail",
        ),
        ImageItem::new("assets/reports/halte-sarinah-signage.jpg"),
    ]
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let initial_config = props.config.clone();
    let config = use_state(move || initial_config);
    let images: Rc<Vec<ImageItem>> = use_memo((), |_| report_photos());
    let viewer_open = use_state(|| false);
    let start_index = use_state(|| 0usize);
    let show_settings = use_state(|| false);

    // Apply the log level whenever the config changes
    {
        use_effect_with((*config).clone(), move |cfg| {
            match cfg.level_filter() {
                Ok(level) => log::set_max_level(level),
                Err(e) => log::warn!("{}", e),
            }
            || ()
        });
    }

    let open_viewer = {
        let viewer_open = viewer_open.clone();
        let start_index = start_index.clone();
        Callback::from(move |i: usize| {
            start_index.set(i);
            viewer_open.set(true);
        })
    };
    let close_viewer = {
        let viewer_open = viewer_open.clone();
        Callback::from(move |_| viewer_open.set(false))
    };
    let open_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(true))
    };
    let close_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(false))
    };
    let change_config = {
        let config = config.clone();
        Callback::from(move |cfg: ViewerConfig| {
            if let Err(e) = cfg.save() {
                log::warn!("viewer settings not saved: {}", e);
            }
            config.set(cfg);
        })
    };
    let restore_defaults = {
        let config = config.clone();
        Callback::from(move |_| {
            if let Err(e) = ViewerConfig::clear_saved() {
                log::warn!("could not clear saved viewer settings: {}", e);
            }
            config.set(ViewerConfig::default());
        })
    };

    html! {
        <div id="root" style="padding:16px; max-width:720px; margin:0 auto; display:flex; flex-direction:column; gap:16px;">
            <header style="display:flex; align-items:center; justify-content:space-between;">
                <h2 style="margin:0;">{"Report #4821"}</h2>
                <button onclick={open_settings}>{"Settings"}</button>
            </header>
            <ReportGallery title="Photos" images={images.clone()} on_open={open_viewer} />
            <ImageViewer
                images={images}
                initial_index={*start_index}
                is_open={*viewer_open}
                on_close={close_viewer}
                config={(*config).clone()}
            />
            <SettingsModal
                show={*show_settings}
                on_close={close_settings}
                config={(*config).clone()}
                on_change={change_config}
                on_restore_defaults={restore_defaults}
            />
        </div>
    }
}
