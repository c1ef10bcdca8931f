//! Lifecycle of the single text channel to the chat server.

/// Connection state of the chat channel.
///
/// Transitions only move forward: `Disconnected -> Connecting -> Open -> Closed`,
/// with `Connecting -> Closed` when the handshake fails. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelState {
    #[default]
    Disconnected,
    Connecting,
    Open,
    Closed,
}

impl ChannelState {
    pub fn is_open(self) -> bool {
        self == Self::Open
    }

    pub fn as_label(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// Events reported by the network side of the channel, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// Handshake finished and the greeting went out.
    Opened,
    /// One inbound text frame, verbatim.
    Frame(String),
    /// The channel is gone, either after being open or because it never opened.
    Closed,
}

/// State machine shared by every channel implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelLifecycle {
    state: ChannelState,
    has_opened: bool,
}

impl ChannelLifecycle {
    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// Whether the channel reached `Open` at any point in this session.
    pub fn has_opened(&self) -> bool {
        self.has_opened
    }

    /// Moves `Disconnected -> Connecting`. Returns false for every other state,
    /// which makes repeated connect attempts no-ops.
    pub fn begin_connect(&mut self) -> bool {
        if self.state != ChannelState::Disconnected {
            return false;
        }

        self.state = ChannelState::Connecting;
        true
    }

    pub fn apply(&mut self, event: &ChannelEvent) {
        self.state = match (self.state, event) {
            (ChannelState::Closed, _) => ChannelState::Closed,
            (_, ChannelEvent::Closed) => ChannelState::Closed,
            (ChannelState::Connecting, ChannelEvent::Opened) => {
                self.has_opened = true;
                ChannelState::Open
            }
            (state, _) => state,
        };
    }

    /// Moves to `Closed`. Returns false when already closed.
    pub fn close(&mut self) -> bool {
        if self.state == ChannelState::Closed {
            return false;
        }

        self.state = ChannelState::Closed;
        true
    }

    /// Outbound frames go out only while open, and never empty.
    pub fn can_send(&self, text: &str) -> bool {
        self.state.is_open() && !text.is_empty()
    }
}
