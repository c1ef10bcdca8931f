use anyhow::Result;
use url::Url;

use crate::domain::{
    channel::{ChannelEvent, ChannelState},
    chat_entry::ChatEntry,
    events::AppEvent,
    shell_state::ShellState,
    viewport::Viewport,
};

pub trait AppEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

/// The single text channel to the chat server.
///
/// Network-side progress arrives as `ChannelEvent`s on the shell's event
/// queue and is folded in through `apply`, so state only changes on the
/// thread that owns the handle.
pub trait TextChannel {
    /// Starts connecting to `endpoint`. Only the first call has any effect.
    fn connect(&mut self, endpoint: &Url);
    fn state(&self) -> ChannelState;
    fn has_opened(&self) -> bool;
    fn endpoint(&self) -> Option<&str>;
    fn apply(&mut self, event: &ChannelEvent);
    /// Sends `text` as one frame. Silently dropped unless open and non-empty.
    fn send(&mut self, text: &str);
    /// Releases the channel. Safe to call any number of times.
    fn close(&mut self);
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct Screen<'a> {
    pub shell: &'a ShellState,
    pub channel_state: ChannelState,
    pub has_opened: bool,
    pub endpoint: Option<&'a str>,
    /// The conversation, oldest entry first.
    pub entries: std::slice::Iter<'a, ChatEntry>,
    pub viewport: Viewport,
}

pub trait ShellOrchestrator {
    fn state(&self) -> &ShellState;
    fn screen(&self) -> Screen<'_>;
    fn handle_event(&mut self, event: AppEvent) -> Result<()>;
}
