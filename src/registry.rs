//! Read-only view of the modals present on the page.

use std::collections::HashMap;

/// Lookups the coordinator needs before it can plan a transition.
pub trait ModalRegistry {
    /// Whether a modal with this id exists.
    fn contains(&self, id: &str) -> bool;

    /// Whether the modal asked for its content to be scrolled to the top
    /// whenever it opens.
    fn scrolls_to_top(&self, id: &str) -> bool;
}

/// In-memory registry keyed by modal id; the value is the scroll-to-top flag.
///
/// Used by native tests and by callers that manage modals without a DOM.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    modals: HashMap<String, bool>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_modal(mut self, id: &str, scroll_to_top: bool) -> Self {
        self.modals.insert(id.to_string(), scroll_to_top);
        self
    }
}

impl ModalRegistry for StaticRegistry {
    fn contains(&self, id: &str) -> bool {
        self.modals.contains_key(id)
    }

    fn scrolls_to_top(&self, id: &str) -> bool {
        self.modals.get(id).copied().unwrap_or(false)
    }
}
