use std::rc::Rc;

use crate::model::ImageItem;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ThumbnailStripProps {
    pub images: Rc<Vec<ImageItem>>,
    pub current: usize,
    pub on_select: Callback<usize>,
}

#[function_component(ThumbnailStrip)]
pub fn thumbnail_strip(props: &ThumbnailStripProps) -> Html {
    html! {
        <div style="display:flex; gap:6px; padding:8px 12px; overflow-x:auto; justify-content:center;">
            { for props.images.iter().enumerate().map(|(i, item)| {
                let cb = props.on_select.clone();
                let onclick = Callback::from(move |_| cb.emit(i));
                let border = if i == props.current { "#58a6ff" } else { "#30363d" };
                html! {
                    <button key={i} {onclick} title={item.alt.clone().unwrap_or_default()} style={format!("padding:0; width:56px; height:56px; flex-shrink:0; border:2px solid {}; border-radius:6px; overflow:hidden; background:#0d1117;", border)}>
                        <img src={item.url.clone()} alt="" loading="lazy" draggable="false" style="width:100%; height:100%; object-fit:cover;" />
                    </button>
                }
            }) }
        </div>
    }
}
