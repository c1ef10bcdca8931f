//! Channel layer: the WebSocket connection to the chat server.

mod ws_client;

pub use ws_client::WsConnectionManager;

/// Returns the channel module name for smoke checks.
pub fn module_name() -> &'static str {
    "channel"
}
