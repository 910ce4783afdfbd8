//! Small crate-wide convenience macros.

/// Log a formatted line to the browser console.
///
/// On non-wasm targets (native unit tests) the arguments are still
/// type-checked but nothing is emitted, since `web_sys::console` is only
/// callable inside a JS host.
///
/// ```rust,ignore
/// debug_log!("opening modal '{}'", id);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::log_1(&format!($($arg)*).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format!($($arg)*);
        }
    }};
}

/// Report an error to the console; mirrors `debug_log!` but uses
/// `console.error` so failures stand out in devtools.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::error_1(&format!($($arg)*).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format!($($arg)*);
        }
    }};
}
