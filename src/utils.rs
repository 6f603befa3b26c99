pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    //
    // For more details see
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Route `log` records to the browser console. Later calls leave the first
/// logger in place.
pub fn init_console_logging(level: log::Level) {
    if console_log::init_with_level(level).is_err() {
        web_sys::console::log_1(&"console logger already installed".into());
    }
}
