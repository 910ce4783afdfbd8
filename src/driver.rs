//! Glue between the pure [`ModalCoordinator`] and the live document.
//!
//! The coordinator lives in a thread-local singleton installed once by
//! `init`.  Every entry point goes through [`run`] / [`run_with`]: the
//! coordinator plans the transition while borrowed, the borrow is dropped,
//! and only then are the resulting commands applied.  Lifecycle listeners
//! may therefore call `openModal` / `closeModal` re-entrantly.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlDialogElement};

use crate::config::ModalConfig;
use crate::coordinator::{Commands, ModalCoordinator};
use crate::debug_log;
use crate::dom_utils;
use crate::error::ModalError;
use crate::error_log;
use crate::messages::Command;
use crate::registry::ModalRegistry;

struct Runtime {
    coordinator: ModalCoordinator<JsValue>,
    config: Rc<ModalConfig>,
}

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = RefCell::new(None);

    // Dialogs whose native `cancel` event is currently routed to the coordinator.
    static WATCHED_CANCEL: RefCell<HashSet<String>> = RefCell::new(HashSet::new());
}

/// Install the singleton.  Returns `false` (and keeps the existing
/// coordinator) when called a second time.
pub fn install(config: ModalConfig) -> bool {
    RUNTIME.with(|rt| {
        let mut rt = rt.borrow_mut();
        if rt.is_some() {
            return false;
        }
        let coordinator = ModalCoordinator::new().with_cancel_key(config.cancel_key.clone());
        *rt = Some(Runtime {
            coordinator,
            config: Rc::new(config),
        });
        true
    })
}

pub fn config() -> Result<Rc<ModalConfig>, ModalError> {
    RUNTIME.with(|rt| {
        rt.borrow()
            .as_ref()
            .map(|r| r.config.clone())
            .ok_or(ModalError::NotInitialized)
    })
}

pub fn active_modal() -> Option<String> {
    RUNTIME.with(|rt| {
        rt.borrow()
            .as_ref()
            .and_then(|r| r.coordinator.active().map(str::to_string))
    })
}

pub fn is_watching_cancel(id: &str) -> bool {
    WATCHED_CANCEL.with(|w| w.borrow().contains(id))
}

// ---------------------------------------------------------------------------
// Registry backed by the live document
// ---------------------------------------------------------------------------

pub struct DomRegistry {
    document: Document,
    config: Rc<ModalConfig>,
}

impl DomRegistry {
    pub fn new(document: Document, config: Rc<ModalConfig>) -> Self {
        Self { document, config }
    }

    fn dialog(&self, id: &str) -> Result<HtmlDialogElement, ModalError> {
        dom_utils::dialog_by_id(&self.document, id).ok_or_else(|| ModalError::NotFound(id.to_string()))
    }
}

impl ModalRegistry for DomRegistry {
    fn contains(&self, id: &str) -> bool {
        dom_utils::dialog_by_id(&self.document, id).is_some()
    }

    fn scrolls_to_top(&self, id: &str) -> bool {
        dom_utils::dialog_by_id(&self.document, id)
            .and_then(|d| d.get_attribute(&self.config.scroll_attribute))
            .map_or(false, |v| v == self.config.scroll_top_value)
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Run a coordinator operation and apply its commands.
pub fn run<F>(op: F) -> Result<(), ModalError>
where
    F: FnOnce(&mut ModalCoordinator<JsValue>, &DomRegistry) -> Result<Commands<JsValue>, ModalError>,
{
    run_with(|coordinator, registry| Ok(((), op(coordinator, registry)?)))
}

/// Like [`run`] for operations that also report a value (e.g. whether the
/// platform default should be prevented).
pub fn run_with<T, F>(op: F) -> Result<T, ModalError>
where
    F: FnOnce(&mut ModalCoordinator<JsValue>, &DomRegistry) -> Result<(T, Commands<JsValue>), ModalError>,
{
    let registry = DomRegistry::new(dom_utils::document()?, config()?);

    let (out, commands) = RUNTIME.with(|rt| {
        let mut rt = rt.borrow_mut();
        let rt = rt.as_mut().ok_or(ModalError::NotInitialized)?;
        op(&mut rt.coordinator, &registry)
    })?;

    execute(&registry, commands);
    Ok(out)
}

// ---------------------------------------------------------------------------
// Command executor
// ---------------------------------------------------------------------------

fn execute(registry: &DomRegistry, commands: Commands<JsValue>) {
    let mut settled: Vec<String> = Vec::new();
    let mut aborted: Vec<String> = Vec::new();

    for command in commands {
        let id = command.modal_id().to_string();
        // Failing any of these leaves a transition nobody will complete.
        let drives_transition = matches!(
            command,
            Command::ShowModal(_) | Command::AddClass { .. } | Command::AwaitAnimation(_)
        );
        match apply(registry, command) {
            Ok(true) => settled.push(id),
            Ok(false) => {}
            Err(err) => {
                error_log!("modal '{}': {}", id, err);
                if drives_transition && !aborted.contains(&id) {
                    aborted.push(id);
                }
            }
        }
    }

    for id in aborted.iter() {
        debug_log!("releasing modal '{}' after a failed transition", id);
        if let Err(err) = run(|coordinator, registry| Ok(coordinator.dialog_closed(registry, id))) {
            error_log!("releasing '{}' failed: {}", id, err);
        }
    }

    // Transitions without a bound animation complete right away.
    for id in settled.into_iter().filter(|id| !aborted.contains(id)) {
        debug_log!("modal '{}' has nothing to animate, completing transition", id);
        if let Err(err) = run(|coordinator, registry| Ok(coordinator.animation_ended(registry, &id))) {
            error_log!("completing transition of '{}' failed: {}", id, err);
        }
    }
}

/// Apply one command.  `Ok(true)` means the transition on this modal has
/// nothing to wait for.
fn apply(registry: &DomRegistry, command: Command<JsValue>) -> Result<bool, ModalError> {
    // Listener bookkeeping must succeed even when the dialog is already gone.
    match &command {
        Command::WatchCancel(id) => {
            WATCHED_CANCEL.with(|w| w.borrow_mut().insert(id.clone()));
            return Ok(false);
        }
        Command::UnwatchCancel(id) => {
            WATCHED_CANCEL.with(|w| w.borrow_mut().remove(id));
            return Ok(false);
        }
        _ => {}
    }

    let config = &registry.config;
    let dialog = registry.dialog(command.modal_id())?;

    match command {
        Command::Dispatch { event, trigger, .. } => {
            dom_utils::dispatch_lifecycle(&dialog, config.event_name(event), trigger.as_ref())?;
        }
        Command::AddClass { class, .. } => {
            dom_utils::add_class(&dialog, config.class_name(class))?;
        }
        Command::RemoveClass { class, .. } => {
            dom_utils::remove_class(&dialog, config.class_name(class))?;
        }
        Command::ShowModal(_) => {
            if dialog.open() && !dom_utils::is_modal(&dialog) {
                // Opened with `show()` elsewhere: reopen so the page behind is inert.
                dialog.close();
            }
            if !dialog.open() {
                dialog.show_modal()?;
            }
        }
        Command::CloseDialog(_) => dialog.close(),
        Command::ScrollToTop(_) => {
            dom_utils::scroll_content_to_top(&dialog, &config.content_selector)?;
        }
        Command::AwaitAnimation(_) => {
            // A hidden dialog never fires `animationend`.
            let waits = dialog.open() && dom_utils::is_animated(&dialog, &config.content_selector);
            return Ok(!waits);
        }
        Command::WatchCancel(_) | Command::UnwatchCancel(_) => {}
    }
    Ok(false)
}

/// Route a native `close` event.  Our own `close()` calls land here too,
/// after the coordinator has already moved on, and are ignored because the
/// dialog is either no longer active or has been reopened since.
pub fn platform_closed(dialog: &HtmlDialogElement) -> Result<(), ModalError> {
    if dialog.open() {
        return Ok(());
    }
    let id = dialog.id();
    run(|coordinator, registry| Ok(coordinator.dialog_closed(registry, &id)))
}
