use chrono::{DateTime, Local};

/// Where a conversation entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Typed and submitted by the user of this client.
    Local,
    /// Received from the server as an inbound frame.
    Remote,
}

impl Origin {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Local => "you",
            Self::Remote => "server",
        }
    }
}

/// One line of the conversation.
///
/// `at` is stamped by this client when the entry is appended; the server does
/// not send timestamps, so it is display-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub text: String,
    pub origin: Origin,
    pub at: DateTime<Local>,
}

impl ChatEntry {
    pub fn local(text: impl Into<String>) -> Self {
        Self::new(text, Origin::Local)
    }

    pub fn remote(text: impl Into<String>) -> Self {
        Self::new(text, Origin::Remote)
    }

    fn new(text: impl Into<String>, origin: Origin) -> Self {
        Self {
            text: text.into(),
            origin,
            at: Local::now(),
        }
    }
}
