// Markup conventions - these are the single source of truth for defaults
pub const DEFAULT_OPEN_ATTRIBUTE: &str = "data-open-modal";
pub const DEFAULT_CLOSE_ATTRIBUTE: &str = "data-close-modal";
pub const DEFAULT_SCROLL_ATTRIBUTE: &str = "data-scroll-to";
pub const DEFAULT_SCROLL_TOP_VALUE: &str = "top";
pub const DEFAULT_CONTENT_SELECTOR: &str = ".modal-content";

// Animation hooks (the stylesheet binds keyframes to these)
pub const DEFAULT_OPENING_CLASS: &str = "modal-is-opening";
pub const DEFAULT_CLOSING_CLASS: &str = "modal-is-closing";

// Lifecycle notifications dispatched on the dialog element
pub const EVENT_BEFORE_OPEN: &str = "onModalOpen";
pub const EVENT_AFTER_OPEN: &str = "onModalOpened";
pub const EVENT_BEFORE_CLOSE: &str = "onModalClose";
pub const EVENT_AFTER_CLOSE: &str = "onModalClosed";

pub const DEFAULT_CANCEL_KEY: &str = "Escape";
