//! Conversation view: the log of chat entries and the channel feeding it.

use crate::domain::{
    channel::ChannelEvent,
    chat_entry::ChatEntry,
    conversation_log::ConversationLog,
    viewport::Viewport,
};

use super::contracts::TextChannel;

const LOCAL_APPEND_REJECTED: &str = "CONVERSATION_LOCAL_APPEND_REJECTED";
const REMOTE_FRAME_RECEIVED: &str = "CONVERSATION_REMOTE_FRAME_RECEIVED";

/// Owns the conversation log and the channel handle it talks through.
///
/// Local entries are appended before the frame is handed to the channel; remote
/// entries are appended in the order their frames were queued.
pub struct ConversationView<C: TextChannel> {
    log: ConversationLog,
    viewport: Viewport,
    channel: C,
}

impl<C: TextChannel> ConversationView<C> {
    pub fn new(channel: C) -> Self {
        Self {
            log: ConversationLog::default(),
            viewport: Viewport::default(),
            channel,
        }
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Entries in insertion order. Each call starts a fresh pass, and the
    /// iterator knows its length and can be walked from either end.
    pub fn entries(&self) -> std::slice::Iter<'_, ChatEntry> {
        self.log.iter()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Appends text typed by the user and sends it.
    ///
    /// Returns false, with no entry and no frame, when `text` is empty or the
    /// channel is not open.
    pub fn append_local(&mut self, text: &str) -> bool {
        let state = self.channel.state();
        if text.is_empty() || !state.is_open() {
            tracing::debug!(
                code = LOCAL_APPEND_REJECTED,
                channel_state = state.as_label(),
                empty = text.is_empty(),
                "local message dropped"
            );
            return false;
        }

        self.push(ChatEntry::local(text));
        self.channel.send(text);
        true
    }

    /// Appends a received frame. No trimming, no filtering.
    pub fn append_remote(&mut self, text: impl Into<String>) {
        self.push(ChatEntry::remote(text));
    }

    /// Folds one queued channel event into the channel state and the log.
    pub fn handle_channel_event(&mut self, event: ChannelEvent) {
        self.channel.apply(&event);

        match event {
            ChannelEvent::Opened => {
                tracing::info!(endpoint = ?self.channel.endpoint(), "chat channel open");
            }
            ChannelEvent::Frame(text) => {
                tracing::debug!(
                    code = REMOTE_FRAME_RECEIVED,
                    bytes = text.len(),
                    text = %text,
                    "message received"
                );
                self.append_remote(text);
            }
            ChannelEvent::Closed => {
                tracing::info!(
                    was_open = self.channel.has_opened(),
                    "chat channel closed"
                );
            }
        }
    }

    fn push(&mut self, entry: ChatEntry) {
        self.log.push(entry);
        self.viewport.follow_latest();
    }
}
