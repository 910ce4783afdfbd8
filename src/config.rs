//! Names shared between the Rust side and the page markup / stylesheet.
//!
//! The defaults match the markup conventions the utility was written for;
//! `init_with_config` lets a page override any subset of them from JS:
//!
//! ```js
//! init_with_config({ openingClass: "fade-in", cancelKey: "Esc" });
//! ```

use serde::Deserialize;

use crate::constants::{
    DEFAULT_CANCEL_KEY, DEFAULT_CLOSE_ATTRIBUTE, DEFAULT_CLOSING_CLASS, DEFAULT_CONTENT_SELECTOR,
    DEFAULT_OPENING_CLASS, DEFAULT_OPEN_ATTRIBUTE, DEFAULT_SCROLL_ATTRIBUTE,
    DEFAULT_SCROLL_TOP_VALUE, EVENT_AFTER_CLOSE, EVENT_AFTER_OPEN, EVENT_BEFORE_CLOSE,
    EVENT_BEFORE_OPEN,
};
use crate::error::ModalError;
use crate::messages::{LifecycleEvent, TransitionClass};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModalConfig {
    /// Attribute whose value names the modal to open, e.g. `data-open-modal="settings"`.
    pub open_attribute: String,
    /// Valueless attribute marking an element that closes the active modal.
    pub close_attribute: String,
    /// Per-modal attribute selecting scroll behaviour on open.
    pub scroll_attribute: String,
    /// Value of `scroll_attribute` that requests scroll-to-top.
    pub scroll_top_value: String,
    /// Selector of the scrollable content inside the dialog.
    pub content_selector: String,
    pub opening_class: String,
    pub closing_class: String,
    pub events: EventNames,
    /// `KeyboardEvent.key` value that closes the active modal.
    pub cancel_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventNames {
    pub before_open: String,
    pub after_open: String,
    pub before_close: String,
    pub after_close: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            open_attribute: DEFAULT_OPEN_ATTRIBUTE.to_string(),
            close_attribute: DEFAULT_CLOSE_ATTRIBUTE.to_string(),
            scroll_attribute: DEFAULT_SCROLL_ATTRIBUTE.to_string(),
            scroll_top_value: DEFAULT_SCROLL_TOP_VALUE.to_string(),
            content_selector: DEFAULT_CONTENT_SELECTOR.to_string(),
            opening_class: DEFAULT_OPENING_CLASS.to_string(),
            closing_class: DEFAULT_CLOSING_CLASS.to_string(),
            events: EventNames::default(),
            cancel_key: DEFAULT_CANCEL_KEY.to_string(),
        }
    }
}

impl Default for EventNames {
    fn default() -> Self {
        Self {
            before_open: EVENT_BEFORE_OPEN.to_string(),
            after_open: EVENT_AFTER_OPEN.to_string(),
            before_close: EVENT_BEFORE_CLOSE.to_string(),
            after_close: EVENT_AFTER_CLOSE.to_string(),
        }
    }
}

impl ModalConfig {
    /// Decode a (possibly partial) config object handed over from JS.
    /// `undefined` / `null` yield the defaults.
    pub fn from_js(value: wasm_bindgen::JsValue) -> Result<Self, ModalError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| ModalError::InvalidConfig(e.to_string()))
    }

    pub fn event_name(&self, event: LifecycleEvent) -> &str {
        match event {
            LifecycleEvent::BeforeOpen => &self.events.before_open,
            LifecycleEvent::AfterOpen => &self.events.after_open,
            LifecycleEvent::BeforeClose => &self.events.before_close,
            LifecycleEvent::AfterClose => &self.events.after_close,
        }
    }

    pub fn class_name(&self, class: TransitionClass) -> &str {
        match class {
            TransitionClass::Opening => &self.opening_class,
            TransitionClass::Closing => &self.closing_class,
        }
    }

    /// CSS selector matching elements that carry the open-target attribute.
    pub fn open_selector(&self) -> String {
        format!("[{}]", self.open_attribute)
    }

    pub fn close_selector(&self) -> String {
        format!("[{}]", self.close_attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let cfg: ModalConfig =
            serde_json::from_str(r#"{"openingClass":"fade-in","events":{"afterClose":"hidden"}}"#)
                .unwrap();

        assert_eq!(cfg.opening_class, "fade-in");
        assert_eq!(cfg.closing_class, DEFAULT_CLOSING_CLASS);
        assert_eq!(cfg.events.after_close, "hidden");
        assert_eq!(cfg.events.before_open, EVENT_BEFORE_OPEN);
        assert_eq!(cfg.cancel_key, "Escape");
    }

    #[test]
    fn selectors_wrap_attribute_names() {
        let cfg = ModalConfig::default();
        assert_eq!(cfg.open_selector(), "[data-open-modal]");
        assert_eq!(cfg.close_selector(), "[data-close-modal]");
        assert_eq!(cfg.event_name(LifecycleEvent::AfterOpen), "onModalOpened");
        assert_eq!(cfg.class_name(TransitionClass::Closing), "modal-is-closing");
    }
}
