use std::{io, panic};

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, LeaveAlternateScreen},
};

/// Leaves raw mode and the alternate screen. Harmless when neither is active.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Restores the terminal before the default hook prints the panic, so the
/// message lands on the user's normal screen.
pub fn install_terminal_restore_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();

        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic payload omitted".to_owned());

        match panic_info.location() {
            Some(location) => tracing::error!(
                code = "APP_PANIC",
                payload = %payload,
                file = location.file(),
                line = location.line(),
                "sockchat panicked"
            ),
            None => tracing::error!(code = "APP_PANIC", payload = %payload, "sockchat panicked"),
        }

        default_hook(panic_info);
    }));
}
