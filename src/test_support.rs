use std::sync::{Mutex, MutexGuard};

use url::Url;

use crate::{
    domain::channel::{ChannelEvent, ChannelLifecycle, ChannelState},
    usecases::contracts::TextChannel,
};

static ENV_LOCK: Mutex<()> = Mutex::new(());

pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().expect("env lock should not be poisoned")
}

/// In-memory channel that records every frame it would put on the wire.
#[derive(Debug, Default)]
pub struct FakeChannel {
    lifecycle: ChannelLifecycle,
    endpoint: Option<Url>,
    pub sent: Vec<String>,
    pub close_calls: usize,
}

impl FakeChannel {
    pub fn endpoint_url() -> Url {
        Url::parse("ws://localhost:8080").expect("test endpoint should parse")
    }

    pub fn open() -> Self {
        let mut channel = Self::default();
        channel.connect(&Self::endpoint_url());
        channel.apply(&ChannelEvent::Opened);
        channel
    }
}

impl TextChannel for FakeChannel {
    fn connect(&mut self, endpoint: &Url) {
        if self.lifecycle.begin_connect() {
            self.endpoint = Some(endpoint.clone());
        }
    }

    fn state(&self) -> ChannelState {
        self.lifecycle.state()
    }

    fn has_opened(&self) -> bool {
        self.lifecycle.has_opened()
    }

    fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_ref().map(Url::as_str)
    }

    fn apply(&mut self, event: &ChannelEvent) {
        self.lifecycle.apply(event);
    }

    fn send(&mut self, text: &str) {
        if self.lifecycle.can_send(text) {
            self.sent.push(text.to_owned());
        }
    }

    fn close(&mut self) {
        self.close_calls += 1;
        self.lifecycle.close();
    }
}
