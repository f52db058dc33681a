use crate::config::ViewerConfig;
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

const TIMEOUT_CHOICES: [(u32, &str); 4] = [
    (5_000, "5 seconds"),
    (15_000, "15 seconds"),
    (30_000, "30 seconds"),
    (60_000, "60 seconds"),
];

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub on_close: Callback<()>,
    pub config: ViewerConfig,
    pub on_change: Callback<ViewerConfig>,
    pub on_restore_defaults: Callback<()>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle_thumbnails_cb = {
        let cb = props.on_change.clone();
        let cfg = props.config.clone();
        Callback::from(move |_| {
            cb.emit(ViewerConfig {
                show_thumbnails: !cfg.show_thumbnails,
                ..cfg.clone()
            })
        })
    };
    let toggle_clamp_cb = {
        let cb = props.on_change.clone();
        let cfg = props.config.clone();
        Callback::from(move |_| {
            cb.emit(ViewerConfig {
                clamp_pan: !cfg.clamp_pan,
                ..cfg.clone()
            })
        })
    };
    let timeout_cb = {
        let cb = props.on_change.clone();
        let cfg = props.config.clone();
        Callback::from(move |e: Event| {
            let Some(select) = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
            else {
                return;
            };
            if let Ok(ms) = select.value().parse::<u32>() {
                cb.emit(ViewerConfig {
                    load_timeout_ms: ms,
                    ..cfg.clone()
                });
            }
        })
    };
    let restore_cb = {
        let cb = props.on_restore_defaults.clone();
        Callback::from(move |_| {
            if let Some(win) = web_sys::window() {
                if win
                    .confirm_with_message("Restore the default photo viewer settings?")
                    .unwrap_or(false)
                {
                    cb.emit(());
                }
            } else {
                cb.emit(());
            }
        })
    };

    html! {<div style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:320px; max-width:480px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Photo viewer settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={props.config.show_thumbnails} onclick={toggle_thumbnails_cb} />
                    <span>{"Show thumbnail strip"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={props.config.clamp_pan} onclick={toggle_clamp_cb} />
                    <span>{"Keep zoomed photos in view while dragging"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px;">
                    <span style="flex:1;">{"Give up loading a photo after"}</span>
                    <select onchange={timeout_cb}>
                        { for TIMEOUT_CHOICES.iter().map(|(ms, label)| html! {
                            <option value={ms.to_string()} selected={*ms == props.config.load_timeout_ms}>{ *label }</option>
                        }) }
                    </select>
                </label>
            </div>
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                <button onclick={restore_cb} style="flex:1;">{"Restore defaults"}</button>
                <button onclick={close_cb} style="flex:0 0 auto;">{"Done"}</button>
            </div>
        </div>
    </div>}
}
