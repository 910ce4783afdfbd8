//! Side effects produced by the coordinator.
//!
//! The coordinator never touches the DOM itself. It returns `Command`s that
//! the driver applies once the state borrow has been released, so listeners
//! reacting to a lifecycle event may call back into the exported API.

/// Lifecycle notifications dispatched on the modal element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    BeforeOpen,
    AfterOpen,
    BeforeClose,
    AfterClose,
}

/// CSS class applied for the duration of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionClass {
    Opening,
    Closing,
}

/// Visible state of a single modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command<T> {
    /// Fire a lifecycle notification carrying the trigger origin.
    Dispatch {
        id: String,
        event: LifecycleEvent,
        trigger: Option<T>,
    },

    AddClass { id: String, class: TransitionClass },

    RemoveClass { id: String, class: TransitionClass },

    /// Render the dialog modally (`showModal()`).
    ShowModal(String),

    /// Stop rendering the dialog (`close()`).
    CloseDialog(String),

    /// Scroll the dialog's content container back to the top.
    ScrollToTop(String),

    /// Start listening for the native `cancel` event on the dialog.
    WatchCancel(String),

    UnwatchCancel(String),

    /// A transition began on this modal; the executor must eventually feed
    /// `animation_ended` back, immediately if no animation is bound.
    AwaitAnimation(String),
}

impl<T> Command<T> {
    /// Modal the command operates on.
    pub fn modal_id(&self) -> &str {
        match self {
            Command::Dispatch { id, .. }
            | Command::AddClass { id, .. }
            | Command::RemoveClass { id, .. } => id,
            Command::ShowModal(id)
            | Command::CloseDialog(id)
            | Command::ScrollToTop(id)
            | Command::WatchCancel(id)
            | Command::UnwatchCancel(id)
            | Command::AwaitAnimation(id) => id,
        }
    }
}
