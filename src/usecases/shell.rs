use anyhow::Result;

use crate::domain::{
    events::{AppEvent, KeyInput},
    shell_state::ShellState,
};

use super::{
    contracts::{Screen, ShellOrchestrator, TextChannel},
    conversation::ConversationView,
};

/// Entries moved per PageUp/PageDown.
const PAGE_SCROLL: usize = 5;

pub struct DefaultShellOrchestrator<C>
where
    C: TextChannel,
{
    state: ShellState,
    conversation: ConversationView<C>,
}

impl<C> DefaultShellOrchestrator<C>
where
    C: TextChannel,
{
    pub fn new(channel: C) -> Self {
        Self {
            state: ShellState::default(),
            conversation: ConversationView::new(channel),
        }
    }

    fn handle_key(&mut self, key: KeyInput) {
        if key.ctrl {
            return;
        }

        let entry_count = self.conversation.log().len();
        match key.key.as_str() {
            "enter" => self.submit(),
            "backspace" => self.state.input_mut().backspace(),
            "delete" => self.state.input_mut().delete(),
            "left" => self.state.input_mut().move_left(),
            "right" => self.state.input_mut().move_right(),
            "home" => self.state.input_mut().move_home(),
            "end" => self.state.input_mut().move_end(),
            "up" => self.conversation.viewport_mut().scroll_up(1, entry_count),
            "down" => self.conversation.viewport_mut().scroll_down(1, entry_count),
            "pageup" => self
                .conversation
                .viewport_mut()
                .scroll_up(PAGE_SCROLL, entry_count),
            "pagedown" => self
                .conversation
                .viewport_mut()
                .scroll_down(PAGE_SCROLL, entry_count),
            other => {
                let mut chars = other.chars();
                if let (Some(ch), None) = (chars.next(), chars.next()) {
                    self.state.input_mut().insert(ch);
                }
            }
        }
    }

    /// Input is cleared only when the entry was accepted.
    fn submit(&mut self) {
        let text = self.state.input().text().to_owned();
        if self.conversation.append_local(&text) {
            self.state.input_mut().clear();
        }
    }
}

impl<C> ShellOrchestrator for DefaultShellOrchestrator<C>
where
    C: TextChannel,
{
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn screen(&self) -> Screen<'_> {
        let channel = self.conversation.channel();
        Screen {
            shell: &self.state,
            channel_state: channel.state(),
            has_opened: channel.has_opened(),
            endpoint: channel.endpoint(),
            entries: self.conversation.entries(),
            viewport: self.conversation.viewport(),
        }
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Tick => self.state.tick(),
            AppEvent::QuitRequested => {
                self.conversation.channel_mut().close();
                self.state.stop();
            }
            AppEvent::InputKey(key) => self.handle_key(key),
            AppEvent::Channel(channel_event) => {
                self.conversation.handle_channel_event(channel_event);
            }
        }

        Ok(())
    }
}
