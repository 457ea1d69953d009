#![deny(missing_docs)]
//! Shared logging utilities for the timeline workspace.
//!
//! This crate provides the `timeline_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger.
//!
//! Every line is prefixed with the current event turn. The application loop bumps
//! the turn once per processed message, so the log shows the order in which
//! responses were actually applied to the collection.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the current event turn.
    static EVENT_TURN: Cell<u64> = const { Cell::new(0) };
}

/// Sets the event turn for the current thread.
/// This should be called by the event loop once per dispatched message.
pub fn set_event_turn(turn: u64) {
    EVENT_TURN.with(|v| v.set(turn));
}

/// Retrieves the event turn for the current thread.
/// Returns 0 outside the event loop (engine threads, tests).
pub fn event_turn() -> u64 {
    EVENT_TURN.with(|v| v.get())
}

/// Logs a trace-level message tagged with the current event turn.
#[macro_export]
macro_rules! timeline_trace {
    ($($arg:tt)*) => {{
        log::trace!("[turn {}] {}", $crate::event_turn(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current event turn.
#[macro_export]
macro_rules! timeline_debug {
    ($($arg:tt)*) => {{
        log::debug!("[turn {}] {}", $crate::event_turn(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current event turn.
#[macro_export]
macro_rules! timeline_info {
    ($($arg:tt)*) => {{
        log::info!("[turn {}] {}", $crate::event_turn(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current event turn.
#[macro_export]
macro_rules! timeline_warn {
    ($($arg:tt)*) => {{
        log::warn!("[turn {}] {}", $crate::event_turn(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current event turn.
#[macro_export]
macro_rules! timeline_error {
    ($($arg:tt)*) => {{
        log::error!("[turn {}] {}", $crate::event_turn(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may have installed the logger already.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_turn_is_per_thread() {
        set_event_turn(7);
        assert_eq!(event_turn(), 7);

        let other = std::thread::spawn(event_turn).join().unwrap();
        assert_eq!(other, 0);
    }
}
