use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, HtmlImageElement, KeyboardEvent, TouchEvent, TouchList, WheelEvent};
use yew::prelude::*;

use super::{
    load_error_overlay::LoadErrorOverlay, shortcuts_overlay::ShortcutsOverlay,
    thumbnail_strip::ThumbnailStrip, viewer_controls::ViewerControls,
    zoom_indicator::ZoomIndicator,
};
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::model::{ImageItem, ViewerAction, ViewerState};
use crate::state::{KeyCommand, TouchPoint, TouchState, ViewerPhase, WheelOutcome, key_command, wheel_outcome};
use crate::util::{counter_label, now_ms};

#[derive(Properties, PartialEq, Clone)]
pub struct ImageViewerProps {
    pub images: Rc<Vec<ImageItem>>,
    #[prop_or_default]
    pub initial_index: usize,
    pub is_open: bool,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub config: ViewerConfig,
}

type StateRef = Rc<RefCell<UseReducerHandle<ViewerState>>>;

fn touch_points(list: &TouchList) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| TouchPoint::new(t.client_x() as f64, t.client_y() as f64))
        .collect()
}

fn dispatch_on<E: 'static>(state: &UseReducerHandle<ViewerState>, action: ViewerAction) -> Callback<E> {
    let state = state.clone();
    Callback::from(move |_: E| state.dispatch(action.clone()))
}

fn measure_image(img_ref: &NodeRef) -> Option<ViewerAction> {
    let img = img_ref.cast::<HtmlImageElement>()?;
    Some(ViewerAction::SetSurface {
        width: img.offset_width() as f64,
        height: img.offset_height() as f64,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListenerTarget {
    /// The image area; gestures start here.
    Stage,
    /// The whole modal, header and toolbars included.
    Overlay,
    Document,
    Window,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SessionEvent {
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    Wheel,
    KeyDown,
    Resize,
}

impl SessionEvent {
    const ALL: [SessionEvent; 7] = [
        SessionEvent::TouchStart,
        SessionEvent::TouchMove,
        SessionEvent::TouchEnd,
        SessionEvent::TouchCancel,
        SessionEvent::Wheel,
        SessionEvent::KeyDown,
        SessionEvent::Resize,
    ];

    fn name(self) -> &'static str {
        match self {
            SessionEvent::TouchStart => "touchstart",
            SessionEvent::TouchMove => "touchmove",
            SessionEvent::TouchEnd => "touchend",
            SessionEvent::TouchCancel => "touchcancel",
            SessionEvent::Wheel => "wheel",
            SessionEvent::KeyDown => "keydown",
            SessionEvent::Resize => "resize",
        }
    }

    /// Wheel goes on the overlay: no wheel anywhere over the modal may
    /// scroll or zoom the page behind it.
    fn target(self) -> ListenerTarget {
        match self {
            SessionEvent::TouchStart
            | SessionEvent::TouchMove
            | SessionEvent::TouchEnd
            | SessionEvent::TouchCancel => ListenerTarget::Stage,
            SessionEvent::Wheel => ListenerTarget::Overlay,
            SessionEvent::KeyDown => ListenerTarget::Document,
            SessionEvent::Resize => ListenerTarget::Window,
        }
    }
}

/// What the session handlers share with the component.
#[derive(Clone)]
struct SessionContext {
    img_ref: NodeRef,
    state_ref: StateRef,
    touch_state: Rc<RefCell<TouchState>>,
    on_close: Callback<()>,
}

impl SessionContext {
    // Handlers clone the handle out of the ref before dispatching, so no
    // borrow is held while the reducer runs.
    fn handler(self, event: SessionEvent) -> Box<dyn FnMut(&Event)> {
        let SessionContext {
            img_ref,
            state_ref,
            touch_state,
            on_close,
        } = self;
        match event {
            SessionEvent::TouchStart => Box::new(move |e: &Event| {
                let Some(e) = e.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let zoom = state_ref.borrow().zoom;
                touch_state
                    .borrow_mut()
                    .touch_start(&touch_points(&e.touches()), zoom);
            }),
            SessionEvent::TouchMove => Box::new(move |e: &Event| {
                let Some(e) = e.dyn_ref::<TouchEvent>() else {
                    return;
                };
                e.prevent_default();
                let handle = state_ref.borrow().clone();
                let action = touch_state
                    .borrow_mut()
                    .touch_move(&touch_points(&e.touches()), handle.zoom);
                if let Some(a) = action {
                    handle.dispatch(a);
                }
            }),
            SessionEvent::TouchEnd => Box::new(move |e: &Event| {
                let Some(e) = e.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let handle = state_ref.borrow().clone();
                let lifted = touch_points(&e.changed_touches()).into_iter().next();
                let action = touch_state.borrow_mut().touch_end(
                    &touch_points(&e.touches()),
                    lifted,
                    now_ms(),
                    handle.zoom,
                );
                if let Some(a) = action {
                    // keep the browser from synthesizing a click / its own zoom
                    e.prevent_default();
                    log::debug!("double tap: {:?}", a);
                    handle.dispatch(a);
                }
            }),
            SessionEvent::TouchCancel => Box::new(move |e: &Event| {
                let Some(e) = e.dyn_ref::<TouchEvent>() else {
                    return;
                };
                touch_state
                    .borrow_mut()
                    .touch_cancel(&touch_points(&e.touches()));
            }),
            SessionEvent::Wheel => Box::new(move |e: &Event| {
                let Some(e) = e.dyn_ref::<WheelEvent>() else {
                    return;
                };
                e.prevent_default();
                if let WheelOutcome::Zoom(delta) = wheel_outcome(e.delta_y(), e.ctrl_key(), e.meta_key()) {
                    let handle = state_ref.borrow().clone();
                    handle.dispatch(ViewerAction::ZoomBy(delta));
                }
            }),
            SessionEvent::KeyDown => Box::new(move |e: &Event| {
                let Some(e) = e.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let Some(cmd) = key_command(&e.key()) else {
                    return;
                };
                e.prevent_default();
                if cmd == KeyCommand::Close {
                    on_close.emit(());
                    return;
                }
                let handle = state_ref.borrow().clone();
                if let Some(a) = cmd.action(handle.image_count) {
                    handle.dispatch(a);
                }
            }),
            SessionEvent::Resize => Box::new(move |_: &Event| {
                if let Some(a) = measure_image(&img_ref) {
                    let handle = state_ref.borrow().clone();
                    handle.dispatch(a);
                }
            }),
        }
    }
}

/// Listeners for one open session. Dropping this detaches all of them.
struct SessionListeners {
    _listeners: Vec<EventListener>,
}

impl SessionListeners {
    fn attach(overlay: &Element, stage: &Element, ctx: SessionContext) -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        let overlay: &EventTarget = overlay;
        let stage: &EventTarget = stage;
        let doc: &EventTarget = &document;
        let win: &EventTarget = &window;

        let listeners = SessionEvent::ALL
            .iter()
            .map(|&event| {
                let target = match event.target() {
                    ListenerTarget::Stage => stage,
                    ListenerTarget::Overlay => overlay,
                    ListenerTarget::Document => doc,
                    ListenerTarget::Window => win,
                };
                // non-passive: touchmove and wheel call prevent_default
                EventListener::new_with_options(
                    target,
                    event.name(),
                    EventListenerOptions::enable_prevent_default(),
                    ctx.clone().handler(event),
                )
            })
            .collect();
        Some(Self {
            _listeners: listeners,
        })
    }
}

#[function_component(ImageViewer)]
pub fn image_viewer(props: &ImageViewerProps) -> Html {
    let (initial_index, image_count) = (props.initial_index, props.images.len());
    let opened_at_mount = props.is_open;
    let state = use_reducer(move || {
        let mut s = ViewerState::new(initial_index, image_count);
        if !opened_at_mount {
            s.close();
        }
        s
    });
    let state_ref = use_mut_ref(|| state.clone());
    let touch_state = use_mut_ref(TouchState::default);
    let overlay_ref = use_node_ref();
    let stage_ref = use_node_ref();
    let img_ref = use_node_ref();
    let show_help = use_state(|| false);
    let indicator_visible = use_state(|| false);
    let last_zoom = use_mut_ref(|| state.zoom);

    // Listeners read through this, so keep it on the latest handle
    {
        let state_ref = state_ref.clone();
        let current_handle = state.clone();
        use_effect_with((*state).clone(), move |_| {
            *state_ref.borrow_mut() = current_handle;
            || ()
        });
    }

    // Every open starts a fresh session from the props
    {
        let state = state.clone();
        let touch_state = touch_state.clone();
        let show_help = show_help.clone();
        let deps = (
            props.is_open,
            props.initial_index,
            props.images.len(),
            props.config.clamp_pan,
        );
        use_effect_with(deps, move |&(open, initial_index, image_count, clamp_pan)| {
            touch_state.borrow_mut().reset();
            if open {
                state.dispatch(ViewerAction::Open {
                    initial_index,
                    image_count,
                    clamp_pan,
                });
                log::info!("viewer opened at {} of {}", initial_index + 1, image_count);
            } else {
                // reset now so the next open never paints this session's view
                state.dispatch(ViewerAction::Close);
                show_help.set(false);
                log::debug!("viewer closed");
            }
            || ()
        });
    }

    // Store and props must agree before the stage is rendered
    let rendered = props.is_open && state.active && !props.images.is_empty();

    // Gesture, wheel, key and resize listeners live exactly as long as the open stage
    {
        let overlay_ref = overlay_ref.clone();
        let stage_ref = stage_ref.clone();
        let ctx = SessionContext {
            img_ref: img_ref.clone(),
            state_ref: state_ref.clone(),
            touch_state: touch_state.clone(),
            on_close: props.on_close.clone(),
        };
        use_effect_with(rendered, move |&rendered| {
            let listeners = if rendered {
                match (overlay_ref.cast::<Element>(), stage_ref.cast::<Element>()) {
                    (Some(overlay), Some(stage)) => SessionListeners::attach(&overlay, &stage, ctx),
                    _ => None,
                }
            } else {
                None
            };
            if rendered && listeners.is_none() {
                log::error!("failed to attach viewer listeners");
            }
            move || drop(listeners)
        });
    }

    // Image load timeout; re-armed per image and per retry, dropped once loaded
    {
        let state = state.clone();
        let images = props.images.clone();
        let timeout_ms = props.config.load_timeout_ms;
        let deps = (
            props.is_open && state.awaiting_image(),
            state.current_index,
            state.load_attempt,
        );
        use_effect_with(deps, move |&(waiting, index, _)| {
            let timer = waiting.then(|| {
                Timeout::new(timeout_ms, move || {
                    let url = images.get(index).map(|i| i.url.clone()).unwrap_or_default();
                    log::warn!("{}", ViewerError::LoadTimeout { url, ms: timeout_ms });
                    state.dispatch(ViewerAction::ImageFailed);
                })
            });
            move || drop(timer)
        });
    }

    // Zoom indicator: show on change, hide after a quiet period
    {
        let indicator_visible = indicator_visible.clone();
        let hide_ms = props.config.indicator_hide_ms;
        use_effect_with((state.zoom, state.active), move |&(zoom, active)| {
            let mut timer = None;
            let changed = (*last_zoom.borrow() - zoom).abs() > f64::EPSILON;
            *last_zoom.borrow_mut() = zoom;
            if !active {
                indicator_visible.set(false);
            } else if changed {
                indicator_visible.set(true);
                let vis = indicator_visible.clone();
                timer = Some(Timeout::new(hide_ms, move || vis.set(false)));
            }
            move || drop(timer)
        });
    }

    {
        let index = state.current_index;
        let count = props.images.len();
        use_effect_with(index, move |&index| {
            log::debug!("showing image {}", counter_label(index, count));
            || ()
        });
    }

    if !rendered {
        return html! {};
    }
    let phase = ViewerPhase::of(props.is_open, &state);
    let Some(item) = props
        .images
        .get(state.current_index)
        .or_else(|| props.images.last())
    else {
        return html! {};
    };

    let close_cb = props.on_close.reform(|_: MouseEvent| ());
    // Backdrop and empty stage area close; clicks on the image do not
    let close_on_self = {
        let cb = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            if e.target() == e.current_target() {
                cb.emit(());
            }
        })
    };
    let onload = {
        let state = state.clone();
        let img_ref = img_ref.clone();
        Callback::from(move |_: Event| {
            state.dispatch(ViewerAction::ImageLoaded);
            if let Some(a) = measure_image(&img_ref) {
                state.dispatch(a);
            }
        })
    };
    let onerror = {
        let state = state.clone();
        let url = item.url.clone();
        Callback::from(move |_: Event| {
            log::warn!("{}", ViewerError::ImageLoad { url: url.clone() });
            state.dispatch(ViewerAction::ImageFailed);
        })
    };
    let on_select = {
        let state = state.clone();
        Callback::from(move |i: usize| state.dispatch(ViewerAction::GoTo(i)))
    };
    let toggle_help = {
        let show_help = show_help.clone();
        Callback::from(move |_: ()| show_help.set(!*show_help))
    };

    let img_style = format!(
        "max-width:100%; max-height:100%; object-fit:contain; user-select:none; -webkit-user-drag:none; transform:{}; transform-origin:center center; opacity:{}; cursor:{};",
        state.transform_css(),
        if phase == ViewerPhase::Loading || phase == ViewerPhase::Failed { "0" } else { "1" },
        if state.zoom > 1.0 { "grab" } else { "zoom-in" },
    );
    let nav_btn = "position:absolute; top:50%; transform:translateY(-50%); padding:10px 14px; font-size:20px; background:rgba(22,27,34,0.8); border:1px solid #30363d; border-radius:8px; color:#e6edf3;";
    let many = props.images.len() > 1;

    html! {
        <div ref={overlay_ref} onclick={close_on_self.clone()} style="position:fixed; inset:0; z-index:100; background:rgba(1,4,9,0.92); display:flex; flex-direction:column; color:#e6edf3;">
            <div style="display:flex; align-items:center; gap:12px; padding:10px 14px;">
                <span style="font-variant-numeric:tabular-nums; font-weight:600;">{ counter_label(state.current_index, props.images.len()) }</span>
                <span style="flex:1; opacity:0.8; overflow:hidden; text-overflow:ellipsis; white-space:nowrap;">{ item.alt.clone().unwrap_or_default() }</span>
                <button onclick={toggle_help.reform(|_: MouseEvent| ())} title="Keyboard shortcuts">{"?"}</button>
                <button onclick={close_cb} title="Close (Esc)">{"✕"}</button>
            </div>
            <div ref={stage_ref} onclick={close_on_self} style="position:relative; flex:1; display:flex; align-items:center; justify-content:center; overflow:hidden; touch-action:none;">
                <img
                    key={format!("{}-{}", state.current_index, state.load_attempt)}
                    ref={img_ref}
                    src={item.url.clone()}
                    alt={item.alt.clone().unwrap_or_default()}
                    draggable="false"
                    onload={onload}
                    onerror={onerror}
                    ondblclick={dispatch_on(&state, ViewerAction::ToggleZoom { fit_to_screen: state.is_zoomed() })}
                    style={img_style}
                />
                if phase == ViewerPhase::Loading {
                    <div style="position:absolute; opacity:0.7; pointer-events:none;">{"Loading…"}</div>
                }
                if many {
                    <>
                        <button onclick={dispatch_on(&state, ViewerAction::Prev)} disabled={!state.has_prev()} style={format!("{} left:12px;", nav_btn)}>{"‹"}</button>
                        <button onclick={dispatch_on(&state, ViewerAction::Next)} disabled={!state.has_next()} style={format!("{} right:12px;", nav_btn)}>{"›"}</button>
                    </>
                }
                <ZoomIndicator zoom={state.zoom} visible={*indicator_visible} />
                <LoadErrorOverlay
                    show={phase == ViewerPhase::Failed}
                    url={item.url.clone()}
                    on_retry={dispatch_on(&state, ViewerAction::RetryLoad)}
                    on_close={props.on_close.clone()}
                />
            </div>
            <ViewerControls
                zoom={state.zoom}
                on_zoom_in={dispatch_on(&state, ViewerAction::ZoomIn)}
                on_zoom_out={dispatch_on(&state, ViewerAction::ZoomOut)}
                on_reset={dispatch_on(&state, ViewerAction::ResetZoom)}
            />
            if props.config.show_thumbnails && many {
                <ThumbnailStrip images={props.images.clone()} current={state.current_index} on_select={on_select} />
            }
            <ShortcutsOverlay show={*show_help} on_close={toggle_help} />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_is_caught_across_the_whole_overlay() {
        assert_eq!(SessionEvent::Wheel.target(), ListenerTarget::Overlay);
    }

    #[test]
    fn gestures_stay_on_the_stage() {
        for event in [
            SessionEvent::TouchStart,
            SessionEvent::TouchMove,
            SessionEvent::TouchEnd,
            SessionEvent::TouchCancel,
        ] {
            assert_eq!(event.target(), ListenerTarget::Stage, "{}", event.name());
        }
        assert_eq!(SessionEvent::KeyDown.target(), ListenerTarget::Document);
        assert_eq!(SessionEvent::Resize.target(), ListenerTarget::Window);
    }

    #[test]
    fn every_session_event_is_attached_once() {
        let mut names: Vec<_> = SessionEvent::ALL.iter().map(|e| e.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SessionEvent::ALL.len());
        assert!(names.contains(&"wheel"));
    }
}
