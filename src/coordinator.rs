//! Modal coordinator – the single owner of "which modal is active".
//!
//! The coordinator is a plain state machine: every operation inspects the
//! current state, updates it and returns the list of [`Command`]s that have
//! to be applied to the page.  Nothing in here talks to the DOM, which keeps
//! the open / close / chain logic testable on the host.
//!
//! Invariants:
//!
//! * at most one modal is active (opening, open or closing);
//! * at most one transition is in flight and it always belongs to the
//!   active modal;
//! * a transition completes at most once, because completion consumes it.
//!
//! Requests that arrive mid-transition are never run in parallel: an open
//! during a close becomes the close's chained `next`, anything arriving
//! during an open is deferred until the open has completed.

use crate::debug_log;
use crate::error::ModalError;
use crate::error_log;
use crate::messages::{Command, LifecycleEvent, ModalPhase, TransitionClass};
use crate::registry::ModalRegistry;
use crate::constants::DEFAULT_CANCEL_KEY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Opening,
    Closing,
}

/// Modal to open once the current close has finished.
#[derive(Debug, Clone)]
struct Chained<T> {
    id: String,
    trigger: Option<T>,
}

#[derive(Debug, Clone)]
struct Transition<T> {
    id: String,
    direction: Direction,
    trigger: Option<T>,
    next: Option<Chained<T>>,
}

/// Request parked while an open transition is running.
#[derive(Debug, Clone)]
enum Request<T> {
    Open {
        id: String,
        trigger: Option<T>,
    },
    Close {
        id: String,
        trigger: Option<T>,
        next: Option<Chained<T>>,
    },
}

pub type Commands<T> = Vec<Command<T>>;

#[derive(Debug, Clone)]
pub struct ModalCoordinator<T> {
    active: Option<String>,
    transition: Option<Transition<T>>,
    deferred: Option<Request<T>>,
    cancel_key: String,
}

impl<T: Clone> Default for ModalCoordinator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> ModalCoordinator<T> {
    pub fn new() -> Self {
        Self {
            active: None,
            transition: None,
            deferred: None,
            cancel_key: DEFAULT_CANCEL_KEY.to_string(),
        }
    }

    /// Use a different `KeyboardEvent.key` value as the cancel key.
    pub fn with_cancel_key(mut self, key: impl Into<String>) -> Self {
        self.cancel_key = key.into();
        self
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Id of the modal currently open or mid-transition.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn phase(&self, id: &str) -> ModalPhase {
        match &self.transition {
            Some(t) if t.id == id => match t.direction {
                Direction::Opening => ModalPhase::Opening,
                Direction::Closing => ModalPhase::Closing,
            },
            _ if self.active.as_deref() == Some(id) => ModalPhase::Open,
            _ => ModalPhase::Closed,
        }
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Open `id`, closing whichever modal is active first.
    pub fn open<R: ModalRegistry + ?Sized>(
        &mut self,
        registry: &R,
        id: &str,
        trigger: Option<T>,
    ) -> Result<Commands<T>, ModalError> {
        let mut commands = Vec::new();
        self.plan_open(registry, id, trigger, &mut commands)?;
        Ok(commands)
    }

    /// Close `id` and, once it is hidden, open `next` if given.
    pub fn close<R: ModalRegistry + ?Sized>(
        &mut self,
        registry: &R,
        id: &str,
        trigger: Option<T>,
        next: Option<&str>,
    ) -> Result<Commands<T>, ModalError> {
        let mut commands = Vec::new();
        self.plan_close(registry, id, trigger, next, &mut commands)?;
        Ok(commands)
    }

    pub fn toggle<R: ModalRegistry + ?Sized>(
        &mut self,
        registry: &R,
        id: &str,
        trigger: Option<T>,
    ) -> Result<Commands<T>, ModalError> {
        ensure_exists(registry, id)?;
        match self.phase(id) {
            ModalPhase::Opening | ModalPhase::Open => self.close(registry, id, trigger, None),
            ModalPhase::Closed | ModalPhase::Closing => self.open(registry, id, trigger),
        }
    }

    /// Resolve a click on an element carrying the open-target attribute
    /// (`open_target`) and/or the close marker.  An open target wins since
    /// opening already closes whatever is active.
    pub fn click<R: ModalRegistry + ?Sized>(
        &mut self,
        registry: &R,
        open_target: Option<&str>,
        close_marker: bool,
        trigger: T,
    ) -> Result<Commands<T>, ModalError> {
        if let Some(target) = open_target {
            return self.open(registry, target, Some(trigger));
        }
        if !close_marker {
            return Ok(Vec::new());
        }
        match self.active.clone() {
            Some(active) => self.close(registry, &active, Some(trigger), None),
            None => Err(ModalError::NoActiveModal),
        }
    }

    /// Handle a key press.  Returns whether the platform default must be
    /// suppressed.
    pub fn key_down<R: ModalRegistry + ?Sized>(
        &mut self,
        registry: &R,
        key: &str,
        trigger: T,
    ) -> Result<(bool, Commands<T>), ModalError> {
        if key != self.cancel_key {
            return Ok((false, Vec::new()));
        }
        let Some(active) = self.active.clone() else {
            return Ok((false, Vec::new()));
        };
        let commands = self.close(registry, &active, Some(trigger), None)?;
        Ok((true, commands))
    }

    /// Native dismissal (`cancel` event) of the dialog `id`.  Returns whether
    /// the platform default must be suppressed.
    pub fn cancel<R: ModalRegistry + ?Sized>(
        &mut self,
        registry: &R,
        id: &str,
        cancelable: bool,
    ) -> Result<(bool, Commands<T>), ModalError> {
        if self.active.as_deref() != Some(id) {
            return Ok((false, Vec::new()));
        }
        if cancelable {
            let commands = self.close(registry, id, None, None)?;
            return Ok((true, commands));
        }

        // The platform hides the dialog on its own, no animation to wait for.
        let mut commands = Vec::new();
        self.release(registry, id, &mut commands);
        Ok((false, commands))
    }

    /// The platform closed `id` without going through the coordinator: a
    /// `<form method="dialog">` submit, a direct `dialog.close()`, or a
    /// forced dismissal while a close was running.  Releases the modal
    /// without animation and runs whatever was queued behind it.
    pub fn dialog_closed<R: ModalRegistry + ?Sized>(
        &mut self,
        registry: &R,
        id: &str,
    ) -> Commands<T> {
        if self.active.as_deref() != Some(id) {
            return Vec::new();
        }
        let mut commands = Vec::new();
        self.release(registry, id, &mut commands);
        commands
    }

    /// Completion signal for the transition running on `id`.
    ///
    /// Signals for any other element (stale ids, animations of child nodes)
    /// and repeated signals are ignored.
    pub fn animation_ended<R: ModalRegistry + ?Sized>(
        &mut self,
        registry: &R,
        id: &str,
    ) -> Commands<T> {
        let transition = match self.transition.take() {
            Some(t) if t.id == id => t,
            other => {
                self.transition = other;
                return Vec::new();
            }
        };

        let mut commands = Vec::new();
        match transition.direction {
            Direction::Opening => {
                commands.push(Command::RemoveClass {
                    id: id.to_string(),
                    class: TransitionClass::Opening,
                });
                commands.push(Command::Dispatch {
                    id: id.to_string(),
                    event: LifecycleEvent::AfterOpen,
                    trigger: transition.trigger,
                });
                commands.push(Command::WatchCancel(id.to_string()));

                if let Some(request) = self.deferred.take() {
                    if let Err(err) = self.replay(registry, request, &mut commands) {
                        error_log!("deferred modal request failed: {}", err);
                    }
                }
            }
            Direction::Closing => {
                commands.push(Command::RemoveClass {
                    id: id.to_string(),
                    class: TransitionClass::Closing,
                });
                commands.push(Command::CloseDialog(id.to_string()));
                commands.push(Command::Dispatch {
                    id: id.to_string(),
                    event: LifecycleEvent::AfterClose,
                    trigger: transition.trigger,
                });
                self.active = None;

                if let Some(next) = transition.next {
                    if let Err(err) = self.plan_open(registry, &next.id, next.trigger, &mut commands) {
                        error_log!("chained open of '{}' failed: {}", next.id, err);
                    }
                }
            }
        }
        commands
    }

    // -----------------------------------------------------------------------
    // Planning
    // -----------------------------------------------------------------------

    fn plan_open<R: ModalRegistry + ?Sized>(
        &mut self,
        registry: &R,
        id: &str,
        trigger: Option<T>,
        commands: &mut Commands<T>,
    ) -> Result<(), ModalError> {
        ensure_exists(registry, id)?;

        if let Some(t) = self.transition.as_mut() {
            match t.direction {
                Direction::Closing => {
                    debug_log!("'{}' is closing, chaining open of '{}'", t.id, id);
                    t.next = Some(Chained {
                        id: id.to_string(),
                        trigger,
                    });
                }
                Direction::Opening if t.id == id => {}
                Direction::Opening => {
                    self.deferred = Some(Request::Open {
                        id: id.to_string(),
                        trigger,
                    });
                }
            }
            return Ok(());
        }

        match self.active.clone() {
            Some(active) if active == id => Ok(()),
            Some(active) => {
                let next = Chained {
                    id: id.to_string(),
                    trigger: trigger.clone(),
                };
                self.begin_close(&active, trigger, Some(next), commands);
                Ok(())
            }
            None => {
                self.begin_open(registry, id, trigger, commands);
                Ok(())
            }
        }
    }

    fn plan_close<R: ModalRegistry + ?Sized>(
        &mut self,
        registry: &R,
        id: &str,
        trigger: Option<T>,
        next: Option<&str>,
        commands: &mut Commands<T>,
    ) -> Result<(), ModalError> {
        ensure_exists(registry, id)?;
        if let Some(next) = next {
            ensure_exists(registry, next)?;
        }
        let next = next.map(|n| Chained {
            id: n.to_string(),
            trigger: trigger.clone(),
        });

        if let Some(t) = self.transition.as_mut() {
            if t.id == id {
                match t.direction {
                    Direction::Closing => {
                        if next.is_some() {
                            t.next = next;
                        }
                    }
                    Direction::Opening => {
                        self.deferred = Some(Request::Close {
                            id: id.to_string(),
                            trigger,
                            next,
                        });
                    }
                }
                return Ok(());
            }
        }

        if self.active.as_deref() != Some(id) {
            return match next {
                Some(next) => self.plan_open(registry, &next.id, next.trigger, commands),
                None => Ok(()),
            };
        }

        self.begin_close(id, trigger, next, commands);
        Ok(())
    }

    /// Drop the active modal on the spot: no transition, no animation.  A
    /// chained `next` or a deferred request still runs afterwards.
    fn release<R: ModalRegistry + ?Sized>(
        &mut self,
        registry: &R,
        id: &str,
        commands: &mut Commands<T>,
    ) {
        debug_log!("modal '{}' closed by the platform", id);
        let mut trigger = None;
        let mut pending = self.deferred.take();

        if let Some(t) = self.transition.take() {
            commands.push(Command::RemoveClass {
                id: t.id.clone(),
                class: class_for(t.direction),
            });
            if t.direction == Direction::Closing {
                trigger = t.trigger;
                if let Some(next) = t.next {
                    pending = Some(Request::Open {
                        id: next.id,
                        trigger: next.trigger,
                    });
                }
            }
        }
        self.active = None;

        commands.push(Command::UnwatchCancel(id.to_string()));
        commands.push(Command::Dispatch {
            id: id.to_string(),
            event: LifecycleEvent::AfterClose,
            trigger,
        });

        if let Some(request) = pending {
            if let Err(err) = self.replay(registry, request, commands) {
                error_log!("request queued behind '{}' failed: {}", id, err);
            }
        }
    }

    fn replay<R: ModalRegistry + ?Sized>(
        &mut self,
        registry: &R,
        request: Request<T>,
        commands: &mut Commands<T>,
    ) -> Result<(), ModalError> {
        match request {
            Request::Open { id, trigger } => self.plan_open(registry, &id, trigger, commands),
            Request::Close { id, trigger, next } => {
                let next_id = next.as_ref().map(|n| n.id.clone());
                self.plan_close(registry, &id, trigger, next_id.as_deref(), commands)
            }
        }
    }

    fn begin_open<R: ModalRegistry + ?Sized>(
        &mut self,
        registry: &R,
        id: &str,
        trigger: Option<T>,
        commands: &mut Commands<T>,
    ) {
        debug_log!("opening modal '{}'", id);
        commands.push(Command::Dispatch {
            id: id.to_string(),
            event: LifecycleEvent::BeforeOpen,
            trigger: trigger.clone(),
        });
        commands.push(Command::AddClass {
            id: id.to_string(),
            class: TransitionClass::Opening,
        });
        commands.push(Command::ShowModal(id.to_string()));
        if registry.scrolls_to_top(id) {
            commands.push(Command::ScrollToTop(id.to_string()));
        }

        self.active = Some(id.to_string());
        self.transition = Some(Transition {
            id: id.to_string(),
            direction: Direction::Opening,
            trigger,
            next: None,
        });
        commands.push(Command::AwaitAnimation(id.to_string()));
    }

    fn begin_close(
        &mut self,
        id: &str,
        trigger: Option<T>,
        next: Option<Chained<T>>,
        commands: &mut Commands<T>,
    ) {
        debug_log!("closing modal '{}'", id);
        commands.push(Command::UnwatchCancel(id.to_string()));
        commands.push(Command::Dispatch {
            id: id.to_string(),
            event: LifecycleEvent::BeforeClose,
            trigger: trigger.clone(),
        });
        commands.push(Command::AddClass {
            id: id.to_string(),
            class: TransitionClass::Closing,
        });

        self.transition = Some(Transition {
            id: id.to_string(),
            direction: Direction::Closing,
            trigger,
            next,
        });
        commands.push(Command::AwaitAnimation(id.to_string()));
    }
}

fn ensure_exists<R: ModalRegistry + ?Sized>(registry: &R, id: &str) -> Result<(), ModalError> {
    if registry.contains(id) {
        Ok(())
    } else {
        Err(ModalError::NotFound(id.to_string()))
    }
}

fn class_for(direction: Direction) -> TransitionClass {
    match direction {
        Direction::Opening => TransitionClass::Opening,
        Direction::Closing => TransitionClass::Closing,
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host target, no browser required)
// ---------------------------------------------------------------------------
