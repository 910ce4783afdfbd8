use wasm_bindgen::prelude::*;

mod macros;

pub mod config;
pub mod constants;
pub mod coordinator;
pub mod dom_utils;
pub mod driver;
pub mod error;
mod events;
pub mod messages;
pub mod registry;

#[cfg(test)]
mod coordinator_prop_test;

pub use config::ModalConfig;
pub use coordinator::ModalCoordinator;
pub use error::ModalError;
pub use messages::{Command, LifecycleEvent, ModalPhase, TransitionClass};
pub use registry::{ModalRegistry, StaticRegistry};

/// Install the coordinator with the default markup conventions and attach
/// the global listeners.  Calling it again is a no-op.
#[wasm_bindgen]
pub fn init() -> Result<(), JsValue> {
    init_with_config(JsValue::UNDEFINED)
}

/// Same as [`init`] but with names overridden from a (partial) JS object,
/// see [`ModalConfig`].
#[wasm_bindgen]
pub fn init_with_config(config: JsValue) -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    let config = ModalConfig::from_js(config)?;
    if !driver::install(config) {
        debug_log!("modal coordinator already initialised");
        return Ok(());
    }

    let document = dom_utils::document()?;
    events::setup_global_listeners(&document)?;
    debug_log!("modal coordinator ready");
    Ok(())
}

/// Open the modal with the given id, closing the active one first.
/// `trigger` is forwarded to the lifecycle events.
#[wasm_bindgen(js_name = openModal)]
pub fn open_modal(id: &str, trigger: JsValue) -> Result<(), JsValue> {
    let trigger = optional(trigger);
    driver::run(|coordinator, registry| coordinator.open(registry, id, trigger))?;
    Ok(())
}

/// Close the modal with the given id; `next` is opened once it is hidden.
#[wasm_bindgen(js_name = closeModal)]
pub fn close_modal(id: &str, trigger: JsValue, next: Option<String>) -> Result<(), JsValue> {
    let trigger = optional(trigger);
    driver::run(|coordinator, registry| coordinator.close(registry, id, trigger, next.as_deref()))?;
    Ok(())
}

#[wasm_bindgen(js_name = toggleModal)]
pub fn toggle_modal(id: &str, trigger: JsValue) -> Result<(), JsValue> {
    let trigger = optional(trigger);
    driver::run(|coordinator, registry| coordinator.toggle(registry, id, trigger))?;
    Ok(())
}

/// Id of the modal currently open or mid-transition.
#[wasm_bindgen(js_name = activeModal)]
pub fn active_modal() -> Option<String> {
    driver::active_modal()
}

fn optional(value: JsValue) -> Option<JsValue> {
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}
