use crate::config::{MAX_ZOOM, MIN_ZOOM};
use crate::util::format_zoom;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ViewerControlsProps {
    pub zoom: f64,
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component(ViewerControls)]
pub fn viewer_controls(props: &ViewerControlsProps) -> Html {
    let zi = {
        let cb = props.on_zoom_in.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let zo = {
        let cb = props.on_zoom_out.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let rz = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="align-self:center; margin:8px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:6px 8px; display:flex; gap:6px; align-items:center;">
        <button onclick={zo} disabled={props.zoom <= MIN_ZOOM} title="Zoom out (-)"> {"−"} </button>
        <span style="min-width:52px; text-align:center; font-variant-numeric:tabular-nums;">{ format_zoom(props.zoom) }</span>
        <button onclick={zi} disabled={props.zoom >= MAX_ZOOM} title="Zoom in (+)"> {"+"} </button>
        <span style="width:8px;"></span>
        <button onclick={rz} title="Reset zoom (0)"> {"Reset"} </button>
    </div>}
}
