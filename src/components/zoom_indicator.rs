use crate::util::format_zoom;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ZoomIndicatorProps {
    pub zoom: f64,
    pub visible: bool,
}

#[function_component(ZoomIndicator)]
pub fn zoom_indicator(props: &ZoomIndicatorProps) -> Html {
    let opacity = if props.visible { "1" } else { "0" };
    html! {<div style={format!("position:absolute; top:12px; left:50%; transform:translateX(-50%); padding:4px 10px; border-radius:12px; background:rgba(0,0,0,0.7); font-size:14px; font-weight:600; pointer-events:none; transition:opacity 0.3s; opacity:{};", opacity)}>
        { format_zoom(props.zoom) }
    </div>}
}
