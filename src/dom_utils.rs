//! dom_utils.rs – thin helper layer for the handful of DOM operations the
//! modal driver needs.
//!
//! Keeps `web_sys` plumbing (casts, class lists, computed styles) out of the
//! driver so it reads as a plain command executor.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, Document, Element, HtmlDialogElement};

use crate::error::ModalError;

/// Property set on lifecycle events so listeners written against the
/// `event.triggerElement` convention keep working alongside `event.detail`.
const TRIGGER_PROPERTY: &str = "triggerElement";

pub fn document() -> Result<Document, ModalError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ModalError::Dom("no global document".into()))
}

/// Look up `<dialog id="{id}">`.  Elements with that id that are not dialogs
/// do not count as modals.
pub fn dialog_by_id(document: &Document, id: &str) -> Option<HtmlDialogElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlDialogElement>().ok())
}

pub fn add_class(el: &Element, class: &str) -> Result<(), JsValue> {
    el.class_list().add_1(class)
}

pub fn remove_class(el: &Element, class: &str) -> Result<(), JsValue> {
    el.class_list().remove_1(class)
}

/// Dispatch a non-bubbling lifecycle notification on `el`, carrying the
/// trigger origin as `detail`.
pub fn dispatch_lifecycle(el: &Element, name: &str, trigger: Option<&JsValue>) -> Result<(), JsValue> {
    let detail = trigger.cloned().unwrap_or(JsValue::NULL);
    let event = CustomEvent::new(name)?;
    event.init_custom_event_with_can_bubble_and_cancelable_and_detail(name, false, false, &detail);
    js_sys::Reflect::set(&event, &JsValue::from_str(TRIGGER_PROPERTY), &detail)?;
    el.dispatch_event(&event)?;
    Ok(())
}

/// Scroll the dialog's content container (or the dialog itself when it has
/// none) back to the top.
pub fn scroll_content_to_top(dialog: &Element, content_selector: &str) -> Result<(), JsValue> {
    let target = dialog
        .query_selector(content_selector)?
        .unwrap_or_else(|| dialog.clone());
    target.scroll_to_with_x_and_y(0.0, 0.0);
    Ok(())
}

/// Whether a CSS animation is bound to the dialog or its content container.
/// When nothing animates no `animationend` will ever fire, so the caller has
/// to complete the transition on its own.
pub fn is_animated(dialog: &Element, content_selector: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let content = dialog.query_selector(content_selector).ok().flatten();

    std::iter::once(dialog.clone())
        .chain(content)
        .any(|el| match window.get_computed_style(&el) {
            Ok(Some(style)) => {
                let name = style.get_property_value("animation-name").unwrap_or_default();
                let duration = style
                    .get_property_value("animation-duration")
                    .unwrap_or_default();
                has_named_animation(&name) && has_running_duration(&duration)
            }
            _ => false,
        })
}

/// Whether the dialog is rendered modally (`showModal()`) rather than with
/// `show()`.  Browsers without `:modal` support report `false`.
pub fn is_modal(dialog: &Element) -> bool {
    dialog.matches(":modal").unwrap_or(false)
}

/// Resolve the `<dialog>` an event target belongs to (itself or the closest
/// ancestor dialog).
pub fn owning_dialog(target: &Element) -> Option<Element> {
    target.closest("dialog").ok().flatten()
}

/// `animation-name` lists use `none` for "no animation" per entry.
fn has_named_animation(value: &str) -> bool {
    value
        .split(',')
        .map(str::trim)
        .any(|name| !name.is_empty() && name != "none")
}

/// True when any entry of a computed `animation-duration` list is non-zero,
/// e.g. `"0s, 0.3s"` or `"150ms"`.
fn has_running_duration(value: &str) -> bool {
    value.split(',').map(str::trim).any(|entry| {
        let seconds = if let Some(ms) = entry.strip_suffix("ms") {
            ms.trim().parse::<f64>().map(|v| v / 1000.0)
        } else if let Some(s) = entry.strip_suffix('s') {
            s.trim().parse::<f64>()
        } else {
            return false;
        };
        seconds.map(|s| s > 0.0).unwrap_or(false)
    })
}

// ---------------------------------------------------------------------------
// Unit tests (run with `cargo test --lib`)
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // Only the string parsing helpers are testable off-browser; DOM behaviour
    // is covered by the wasm-bindgen tests under `tests/`.

    #[test]
    fn durations() {
        assert!(has_running_duration("0.3s"));
        assert!(has_running_duration("150ms"));
        assert!(has_running_duration("0s, 0.2s"));
        assert!(!has_running_duration("0s"));
        assert!(!has_running_duration("0ms, 0s"));
        assert!(!has_running_duration(""));
        assert!(!has_running_duration("auto"));
    }

    #[test]
    fn animation_names() {
        assert!(has_named_animation("modal-overlay"));
        assert!(has_named_animation("none, zoom"));
        assert!(!has_named_animation("none"));
        assert!(!has_named_animation(""));
    }
}
