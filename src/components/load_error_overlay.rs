use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LoadErrorOverlayProps {
    pub show: bool,
    pub url: String,
    pub on_retry: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn LoadErrorOverlay(props: &LoadErrorOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let retry_cb = props.on_retry.clone();
    let retry_btn = Callback::from(move |_| retry_cb.emit(()));
    let close_btn = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); border:2px solid #f85149; padding:24px 32px; border-radius:12px; text-align:center; min-width:300px; max-width:90%;">
            <h2 style="margin:0 0 12px 0; color:#f85149; font-size:18px;">{"Photo unavailable"}</h2>
            <p style="margin:4px 0; opacity:0.8;">{"The image could not be loaded."}</p>
            <p style="margin:4px 0; font-size:11px; opacity:0.6; word-break:break-all;">{ props.url.clone() }</p>
            <div style="margin-top:16px; display:flex; gap:12px; justify-content:center;">
                <button onclick={retry_btn}>{"Retry"}</button>
                <button onclick={close_btn}>{"Close"}</button>
            </div>
        </div>
    }
}
