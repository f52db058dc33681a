use std::rc::Rc;

use crate::model::ImageItem;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ReportGalleryProps {
    pub title: String,
    pub images: Rc<Vec<ImageItem>>,
    pub on_open: Callback<usize>,
}

#[function_component(ReportGallery)]
pub fn report_gallery(props: &ReportGalleryProps) -> Html {
    if props.images.is_empty() {
        return html! { <p style="opacity:0.6;">{"No photos attached to this report."}</p> };
    }
    html! {
        <section style="display:flex; flex-direction:column; gap:10px;">
            <h3 style="margin:0; font-size:16px;">{ format!("{} ({} photos)", props.title, props.images.len()) }</h3>
            <div style="display:grid; grid-template-columns:repeat(auto-fill, minmax(120px, 1fr)); gap:8px;">
                { for props.images.iter().enumerate().map(|(i, item)| {
                    let cb = props.on_open.clone();
                    let onclick = Callback::from(move |_| cb.emit(i));
                    html! {
                        <button key={i} {onclick} style="padding:0; aspect-ratio:1; border:1px solid #30363d; border-radius:8px; overflow:hidden; background:#0d1117; cursor:zoom-in;">
                            <img src={item.url.clone()} alt={item.alt.clone().unwrap_or_default()} loading="lazy" style="width:100%; height:100%; object-fit:cover;" />
                        </button>
                    }
                }) }
            </div>
        </section>
    }
}
