//! Domain layer: channel lifecycle, conversation entries, and UI state types.

pub mod channel;
pub mod chat_entry;
pub mod conversation_log;
pub mod events;
pub mod input_buffer;
pub mod shell_state;
pub mod viewport;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
