//! Browser Logging
//!
//! Routes the `log` facade (used by the core crate) to the devtools console.

/// Install the console logger; later calls are ignored
pub fn init() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"[LOG] Logger already installed".into());
    }
}
