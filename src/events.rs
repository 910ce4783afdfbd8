//! Global event handlers.
//!
//! Registered exactly once, from `init`, on the document:
//!
//! * `click` – declarative open / close markers;
//! * `keydown` – cancel key closes the active modal;
//! * `animationend` – completion signal for running transitions;
//! * `cancel` (capture phase, the event does not bubble) – native dismissal
//!   of a dialog whose cancel listener is active;
//! * `close` (capture phase) – a dialog closed by the platform or by page
//!   code, e.g. a `<form method="dialog">` submit.

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AnimationEvent, Document, Element, Event, HtmlDialogElement, KeyboardEvent, MouseEvent};

use crate::config::ModalConfig;
use crate::dom_utils;
use crate::driver;
use crate::error_log;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn setup_global_listeners(document: &Document) -> Result<(), JsValue> {
    let config = driver::config()?;
    setup_click_handler(document, &config)?;
    setup_key_handler(document)?;
    setup_animation_end_handler(document)?;
    setup_cancel_handler(document)?;
    setup_close_handler(document)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Individual handlers
// ---------------------------------------------------------------------------

/// `[data-open-modal="id"]` opens, `[data-close-modal]` closes the active modal.
fn setup_click_handler(document: &Document, config: &ModalConfig) -> Result<(), JsValue> {
    let open_selector = config.open_selector();
    let close_selector = config.close_selector();
    let open_attribute = config.open_attribute.clone();

    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: MouseEvent| {
        let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let opener = target.closest(&open_selector).ok().flatten();
        let closer = target.closest(&close_selector).ok().flatten();
        if opener.is_none() && closer.is_none() {
            return;
        }

        let open_target = opener.as_ref().and_then(|el| el.get_attribute(&open_attribute));
        let close_marker = closer.is_some();
        let origin: JsValue = opener.or(closer).map(JsValue::from).unwrap_or(JsValue::NULL);

        if let Err(err) = driver::run(|coordinator, registry| {
            coordinator.click(registry, open_target.as_deref(), close_marker, origin)
        }) {
            web_sys::console::warn_1(&format!("modal click ignored: {}", err).into());
        }
    }));
    document.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

fn setup_key_handler(document: &Document) -> Result<(), JsValue> {
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: KeyboardEvent| {
        let key = e.key();
        let trigger: JsValue = e.clone().into();
        match driver::run_with(|coordinator, registry| coordinator.key_down(registry, &key, trigger)) {
            Ok(true) => e.prevent_default(),
            Ok(false) => {}
            Err(err) => error_log!("modal keydown failed: {}", err),
        }
    }));
    document.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// `animationend` bubbles, so animations of the dialog's content count too.
/// The first one to finish completes the transition; the coordinator drops
/// the rest.
fn setup_animation_end_handler(document: &Document) -> Result<(), JsValue> {
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: AnimationEvent| {
        let Some(dialog) = e
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| dom_utils::owning_dialog(&el))
        else {
            return;
        };
        let id = dialog.id();
        if id.is_empty() {
            return;
        }
        if let Err(err) = driver::run(|coordinator, registry| Ok(coordinator.animation_ended(registry, &id))) {
            error_log!("modal animationend failed: {}", err);
        }
    }));
    document.add_event_listener_with_callback("animationend", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

fn setup_cancel_handler(document: &Document) -> Result<(), JsValue> {
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: Event| {
        let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let id = target.id();
        if !driver::is_watching_cancel(&id) {
            return;
        }
        let cancelable = e.cancelable();
        match driver::run_with(|coordinator, registry| coordinator.cancel(registry, &id, cancelable)) {
            Ok(true) => e.prevent_default(),
            Ok(false) => {}
            Err(err) => error_log!("modal cancel failed: {}", err),
        }
    }));
    document.add_event_listener_with_callback_and_bool("cancel", cb.as_ref().unchecked_ref(), true)?;
    cb.forget();
    Ok(())
}

fn setup_close_handler(document: &Document) -> Result<(), JsValue> {
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: Event| {
        let Some(dialog) = e.target().and_then(|t| t.dyn_into::<HtmlDialogElement>().ok()) else {
            return;
        };
        if let Err(err) = driver::platform_closed(&dialog) {
            error_log!("modal close failed: {}", err);
        }
    }));
    document.add_event_listener_with_callback_and_bool("close", cb.as_ref().unchecked_ref(), true)?;
    cb.forget();
    Ok(())
}
