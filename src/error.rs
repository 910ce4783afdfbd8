//! Failure taxonomy for modal operations.
//!
//! Every exported function converts these into a JS `Error` at the wasm
//! boundary so callers get a readable rejection instead of a null
//! dereference deep inside the DOM glue.

use std::fmt;

use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalError {
    /// No `<dialog>` with the requested id exists in the document.
    NotFound(String),
    /// A close marker was clicked while no modal was active.
    NoActiveModal,
    /// An exported operation ran before `init()`.
    NotInitialized,
    /// `init_with_config` received an object it could not decode.
    InvalidConfig(String),
    /// A web API call failed.
    Dom(String),
}

impl fmt::Display for ModalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModalError::NotFound(id) => write!(f, "no modal dialog with id '{}'", id),
            ModalError::NoActiveModal => write!(f, "close requested but no modal is active"),
            ModalError::NotInitialized => {
                write!(f, "modal coordinator not initialised, call init() first")
            }
            ModalError::InvalidConfig(msg) => write!(f, "invalid modal config: {}", msg),
            ModalError::Dom(msg) => write!(f, "DOM operation failed: {}", msg),
        }
    }
}

impl std::error::Error for ModalError {}

impl From<JsValue> for ModalError {
    fn from(value: JsValue) -> Self {
        ModalError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<ModalError> for JsValue {
    fn from(err: ModalError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_id() {
        let err = ModalError::NotFound("settings".into());
        assert_eq!(err.to_string(), "no modal dialog with id 'settings'");
        assert!(ModalError::NoActiveModal.to_string().contains("no modal is active"));
    }
}
