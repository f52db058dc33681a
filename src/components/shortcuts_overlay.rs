use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ShortcutsOverlayProps {
    pub show: bool,
    pub on_close: Callback<()>,
}

#[function_component(ShortcutsOverlay)]
pub fn shortcuts_overlay(props: &ShortcutsOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let close_btn = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.87); border:2px solid #30363d; padding:24px 32px; border-radius:14px; max-width:460px; width:90%; box-shadow:0 0 0 1px #1a1f24, 0 6px 18px rgba(0,0,0,0.6); font-size:14px; line-height:1.4;">
            <h2 style="margin:0 0 12px 0; font-size:20px; color:#58a6ff; text-align:center;">{"Photo viewer"}</h2>
            <ul style="margin:0 0 12px 18px; padding:0; list-style:disc; display:flex; flex-direction:column; gap:4px;">
                <li>{"← / → : previous / next photo"}</li>
                <li>{"Home / End : first / last photo"}</li>
                <li>{"+ / - : zoom in / out, 0 : reset zoom"}</li>
                <li>{"Ctrl (⌘) + wheel : zoom"}</li>
                <li>{"Double tap or double click : toggle 2× zoom"}</li>
                <li>{"Pinch to zoom, drag to move a zoomed photo"}</li>
                <li>{"Esc : close"}</li>
            </ul>
            <div style="display:flex; justify-content:center;">
                <button onclick={close_btn}>{"Got it"}</button>
            </div>
        </div>
    }
}
