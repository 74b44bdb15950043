//! Browser logging bootstrap.
//!
//! Library events go through `tracing`; with no subscriber installed they are
//! forwarded to the `log` facade, which `console_log` prints to the devtools
//! console. Native binaries install their own `tracing-subscriber` instead.

/// Install the panic hook and console logger. Safe to call more than once.
pub fn init_browser() {
    #[cfg(feature = "hydrate")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Debug);
    }
}
