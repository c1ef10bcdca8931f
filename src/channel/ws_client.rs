use std::{sync::mpsc::Sender, time::Duration};

use futures::{SinkExt, StreamExt};
use tokio::{
    runtime::{Builder, Runtime},
    sync::{mpsc, watch},
};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use url::Url;

use crate::{
    domain::channel::{ChannelEvent, ChannelLifecycle, ChannelState},
    infra::error::AppError,
    usecases::contracts::TextChannel,
};

const CHANNEL_CONNECT_STARTED: &str = "WS_CHANNEL_CONNECT_STARTED";
const CHANNEL_CONNECT_IGNORED: &str = "WS_CHANNEL_CONNECT_IGNORED";
const CHANNEL_CONNECT_FAILED: &str = "WS_CHANNEL_CONNECT_FAILED";
const CHANNEL_GREETING_FAILED: &str = "WS_CHANNEL_GREETING_FAILED";
const CHANNEL_SEND_DROPPED: &str = "WS_CHANNEL_SEND_DROPPED";
const CHANNEL_SEND_FAILED: &str = "WS_CHANNEL_SEND_FAILED";
const CHANNEL_READ_FAILED: &str = "WS_CHANNEL_READ_FAILED";
const CHANNEL_EVENT_QUEUE_CLOSED: &str = "WS_CHANNEL_EVENT_QUEUE_CLOSED";
const CHANNEL_STOPPED: &str = "WS_CHANNEL_STOPPED";

/// Time given to the network task to flush a close frame on shutdown.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

/// Owns the WebSocket to the chat server.
///
/// The socket itself lives in a task on a private tokio runtime. That task
/// reports progress as `ChannelEvent`s on `events_tx`; the owner of this
/// handle applies them back through `TextChannel::apply`.
#[derive(Debug)]
pub struct WsConnectionManager {
    runtime: Option<Runtime>,
    events_tx: Sender<ChannelEvent>,
    greeting: String,
    lifecycle: ChannelLifecycle,
    endpoint: Option<Url>,
    outbound_tx: Option<mpsc::UnboundedSender<String>>,
    stop_tx: Option<watch::Sender<bool>>,
}

impl WsConnectionManager {
    pub fn new(events_tx: Sender<ChannelEvent>, greeting: String) -> Result<Self, AppError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("sockchat-ws")
            .enable_all()
            .build()
            .map_err(AppError::RuntimeStart)?;

        Ok(Self {
            runtime: Some(runtime),
            events_tx,
            greeting,
            lifecycle: ChannelLifecycle::default(),
            endpoint: None,
            outbound_tx: None,
            stop_tx: None,
        })
    }
}

impl TextChannel for WsConnectionManager {
    fn connect(&mut self, endpoint: &Url) {
        let Some(runtime) = self.runtime.as_ref() else {
            return;
        };

        if !self.lifecycle.begin_connect() {
            tracing::debug!(
                code = CHANNEL_CONNECT_IGNORED,
                state = self.lifecycle.state().as_label(),
                "connect called more than once"
            );
            return;
        }

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = watch::channel(false);

        runtime.spawn(run_channel(
            endpoint.clone(),
            self.greeting.clone(),
            self.events_tx.clone(),
            outbound_rx,
            stop_rx,
        ));

        tracing::info!(
            code = CHANNEL_CONNECT_STARTED,
            endpoint = %endpoint,
            "connecting chat channel"
        );

        self.endpoint = Some(endpoint.clone());
        self.outbound_tx = Some(outbound_tx);
        self.stop_tx = Some(stop_tx);
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

        if matches!(event, ChannelEvent::Closed) {
            self.outbound_tx = None;
        }
    }

    fn send(&mut self, text: &str) {
        if !self.lifecycle.can_send(text) {
            tracing::debug!(
                code = CHANNEL_SEND_DROPPED,
                state = self.lifecycle.state().as_label(),
                "outbound frame dropped"
            );
            return;
        }

        if let Some(outbound_tx) = &self.outbound_tx {
            if outbound_tx.send(text.to_owned()).is_err() {
                tracing::debug!(
                    code = CHANNEL_SEND_DROPPED,
                    "network task gone; outbound frame dropped"
                );
            }
        }
    }

    fn close(&mut self) {
        if !self.lifecycle.close() {
            return;
        }

        self.outbound_tx = None;
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(true);
        }

        tracing::info!(endpoint = ?self.endpoint(), "chat channel close requested");
    }
}

impl Drop for WsConnectionManager {
    fn drop(&mut self) {
        self.close();

        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_timeout(SHUTDOWN_GRACE);
        }
    }
}

async fn run_channel(
    endpoint: Url,
    greeting: String,
    events_tx: Sender<ChannelEvent>,
    mut outbound_rx: mpsc::UnboundedReceiver<String>,
    mut stop_rx: watch::Receiver<bool>,
) {
    let connected = tokio::select! {
        result = connect_async(endpoint.as_str()) => result,
        _ = stop_rx.changed() => {
            let _ = events_tx.send(ChannelEvent::Closed);
            return;
        }
    };

    let socket = match connected {
        Ok((socket, _response)) => socket,
        Err(error) => {
            tracing::warn!(
                code = CHANNEL_CONNECT_FAILED,
                endpoint = %endpoint,
                error = %error,
                "chat channel handshake failed; not retrying"
            );
            let _ = events_tx.send(ChannelEvent::Closed);
            return;
        }
    };

    let (mut sink, mut stream) = socket.split();

    if let Err(error) = sink.send(Message::Text(greeting.into())).await {
        tracing::warn!(
            code = CHANNEL_GREETING_FAILED,
            error = %error,
            "greeting frame could not be sent"
        );
        let _ = events_tx.send(ChannelEvent::Closed);
        return;
    }

    if events_tx.send(ChannelEvent::Opened).is_err() {
        tracing::warn!(
            code = CHANNEL_EVENT_QUEUE_CLOSED,
            "event queue dropped before channel opened"
        );
        let _ = sink.send(Message::Close(None)).await;
        return;
    }

    loop {
        tokio::select! {
            changed = stop_rx.changed() => {
                let stop = changed.is_err() || *stop_rx.borrow();
                if stop {
                    let _ = sink.send(Message::Close(None)).await;
                    break;
                }
            }
            outbound = outbound_rx.recv() => {
                let Some(text) = outbound else {
                    let _ = sink.send(Message::Close(None)).await;
                    break;
                };

                if let Err(error) = sink.send(Message::Text(text.into())).await {
                    tracing::warn!(
                        code = CHANNEL_SEND_FAILED,
                        error = %error,
                        "outbound frame failed; channel is done"
                    );
                    break;
                }
            }
            inbound = stream.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        let frame = ChannelEvent::Frame(text.as_str().to_owned());
                        if events_tx.send(frame).is_err() {
                            tracing::warn!(
                                code = CHANNEL_EVENT_QUEUE_CLOSED,
                                "event queue dropped; stopping reader"
                            );
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(error)) => {
                        tracing::warn!(
                            code = CHANNEL_READ_FAILED,
                            error = %error,
                            "inbound read failed; channel is done"
                        );
                        break;
                    }
                }
            }
        }
    }

    tracing::info!(code = CHANNEL_STOPPED, endpoint = %endpoint, "chat channel stopped");
    let _ = events_tx.send(ChannelEvent::Closed);
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use tokio::net::TcpListener;

    use super::*;

    const GREETING: &str = "Hello Server!";
    const WAIT: Duration = Duration::from_secs(5);

    fn server_runtime() -> Runtime {
        Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("server runtime should start")
    }

    fn manager() -> (WsConnectionManager, Receiver<ChannelEvent>) {
        let (events_tx, events_rx) = mpsc::channel();
        let manager =
            WsConnectionManager::new(events_tx, GREETING.to_owned()).expect("manager should start");
        (manager, events_rx)
    }

    fn next_event(
        manager: &mut WsConnectionManager,
        events_rx: &Receiver<ChannelEvent>,
    ) -> ChannelEvent {
        let event = events_rx
            .recv_timeout(WAIT)
            .expect("channel event should arrive");
        manager.apply(&event);
        event
    }

    /// Accepts one client, records the text frames it sends, and pushes
    /// `replies` after the first frame arrives. With `then_close` the server
    /// starts the closing handshake right after its replies.
    fn spawn_server(
        runtime: &Runtime,
        replies: &'static [&'static str],
        then_close: bool,
    ) -> (Url, Receiver<String>) {
        let listener = runtime
            .block_on(TcpListener::bind("127.0.0.1:0"))
            .expect("listener should bind");
        let address = listener.local_addr().expect("listener has an address");
        let (seen_tx, seen_rx) = mpsc::channel();

        runtime.spawn(async move {
            let (stream, _) = listener.accept().await.expect("client should connect");
            let mut socket = tokio_tungstenite::accept_async(stream)
                .await
                .expect("handshake should succeed");

            let mut replied = false;
            while let Some(Ok(message)) = socket.next().await {
                if let Message::Text(text) = message {
                    let _ = seen_tx.send(text.as_str().to_owned());

                    if !replied {
                        replied = true;
                        for reply in replies {
                            socket
                                .send(Message::Text(reply.to_string().into()))
                                .await
                                .expect("reply should send");
                        }
                        if then_close {
                            let _ = socket.close(None).await;
                        }
                    }
                }
            }
        });

        let url = Url::parse(&format!("ws://{address}")).expect("url should parse");
        (url, seen_rx)
    }

    #[test]
    fn greets_on_open_and_relays_frames_in_order() {
        let server = server_runtime();
        let (url, seen_rx) = spawn_server(&server, &["first", "second", ""], false);
        let (mut manager, events_rx) = manager();

        manager.connect(&url);
        assert_eq!(manager.state(), ChannelState::Connecting);

        assert_eq!(next_event(&mut manager, &events_rx), ChannelEvent::Opened);
        assert_eq!(manager.state(), ChannelState::Open);
        assert_eq!(seen_rx.recv_timeout(WAIT).expect("greeting"), GREETING);

        assert_eq!(
            next_event(&mut manager, &events_rx),
            ChannelEvent::Frame("first".to_owned())
        );
        assert_eq!(
            next_event(&mut manager, &events_rx),
            ChannelEvent::Frame("second".to_owned())
        );
        assert_eq!(
            next_event(&mut manager, &events_rx),
            ChannelEvent::Frame(String::new())
        );
    }

    #[test]
    fn send_forwards_text_verbatim_only_while_open() {
        let server = server_runtime();
        let (url, seen_rx) = spawn_server(&server, &[], false);
        let (mut manager, events_rx) = manager();

        manager.send("too early");
        manager.connect(&url);
        manager.send("still too early");

        assert_eq!(next_event(&mut manager, &events_rx), ChannelEvent::Opened);
        manager.send("");
        manager.send("  hi  ");

        assert_eq!(seen_rx.recv_timeout(WAIT).expect("greeting"), GREETING);
        assert_eq!(seen_rx.recv_timeout(WAIT).expect("frame"), "  hi  ");
    }

    #[test]
    fn close_is_idempotent_and_silences_send() {
        let server = server_runtime();
        let (url, seen_rx) = spawn_server(&server, &[], false);
        let (mut manager, events_rx) = manager();

        manager.connect(&url);
        assert_eq!(next_event(&mut manager, &events_rx), ChannelEvent::Opened);
        assert_eq!(seen_rx.recv_timeout(WAIT).expect("greeting"), GREETING);

        manager.close();
        manager.close();
        manager.send("after close");

        assert_eq!(manager.state(), ChannelState::Closed);
        assert!(manager.has_opened());
        assert_eq!(next_event(&mut manager, &events_rx), ChannelEvent::Closed);
        assert_eq!(manager.state(), ChannelState::Closed);
        assert!(seen_rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn server_close_after_open_ends_channel() {
        let server = server_runtime();
        let (url, seen_rx) = spawn_server(&server, &["bye"], true);
        let (mut manager, events_rx) = manager();

        manager.connect(&url);
        assert_eq!(next_event(&mut manager, &events_rx), ChannelEvent::Opened);
        assert_eq!(seen_rx.recv_timeout(WAIT).expect("greeting"), GREETING);
        assert_eq!(
            next_event(&mut manager, &events_rx),
            ChannelEvent::Frame("bye".to_owned())
        );
        assert_eq!(next_event(&mut manager, &events_rx), ChannelEvent::Closed);

        assert_eq!(manager.state(), ChannelState::Closed);
        assert!(manager.has_opened());

        manager.send("after");
        manager.close();

        assert_eq!(manager.state(), ChannelState::Closed);
        assert!(seen_rx.recv_timeout(Duration::from_millis(200)).is_err());
        assert!(events_rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn failed_handshake_closes_without_opening() {
        let server = server_runtime();
        let address = server
            .block_on(async {
                let listener = TcpListener::bind("127.0.0.1:0").await?;
                listener.local_addr()
            })
            .expect("free port should be found");
        let url = Url::parse(&format!("ws://{address}")).expect("url should parse");
        let (mut manager, events_rx) = manager();

        manager.connect(&url);

        assert_eq!(next_event(&mut manager, &events_rx), ChannelEvent::Closed);
        assert_eq!(manager.state(), ChannelState::Closed);
        assert!(!manager.has_opened());

        manager.connect(&url);
        assert_eq!(manager.state(), ChannelState::Closed);
    }

    #[test]
    fn second_connect_is_ignored() {
        let server = server_runtime();
        let (url, _seen_rx) = spawn_server(&server, &[], false);
        let (mut manager, events_rx) = manager();
        let other = Url::parse("ws://127.0.0.1:9").expect("url should parse");

        manager.connect(&url);
        manager.connect(&other);

        assert_eq!(manager.endpoint(), Some(url.as_str()));
        assert_eq!(next_event(&mut manager, &events_rx), ChannelEvent::Opened);
    }
}
