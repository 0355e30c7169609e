//! Chat Message Bus
//!
//! A STOMP session over a raw WebSocket, run as one task on the app's
//! tokio runtime. The UI thread talks to it through two channels:
//!
//! - outbound frames go in through a tokio unbounded channel
//! - [`ChatSignal`]s come back through a std channel the UI polls each frame
//!
//! A `MESSAGE` frame on the channel topic is only a change signal. The
//! receiver re-fetches the full history over REST instead of appending the
//! payload. There is no reconnect; a dropped socket ends with
//! [`ChatSignal::Closed`].

use super::stomp::{self, Command, Frame};
use crate::shared::channel::ChannelName;
use crate::shared::error::ApiError;
use crate::shared::models::OutgoingMessage;
use futures_util::{SinkExt, Stream, StreamExt};
use std::fmt::Display;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::{self, Message};

const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);
const SUBSCRIPTION_ID: &str = "sub-0";

/// What the transport reports back to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatSignal {
    /// CONNECTED received and the topic subscription sent
    Connected,
    /// The channel has new content; re-fetch the history
    Changed,
    /// The session ended; `None` for a clean close
    Closed(Option<String>),
}

fn transport_error(e: impl Display) -> ApiError {
    ApiError::Transport(e.to_string())
}

/// Live connection to one chat channel.
///
/// Dropping the transport ends the session with a `DISCONNECT` frame.
#[derive(Debug)]
pub struct ChatTransport {
    channel: ChannelName,
    outbound: UnboundedSender<String>,
    signals: Receiver<ChatSignal>,
    task: JoinHandle<()>,
}

impl ChatTransport {
    /// Connect to `url` and subscribe to `channel`'s topic.
    pub fn open(
        handle: &Handle,
        url: &str,
        authorization: Option<String>,
        channel: ChannelName,
    ) -> Self {
        let (outbound_tx, outbound_rx) = unbounded_channel();
        let (signal_tx, signal_rx) = mpsc::channel();

        tracing::info!("[CHAT] Opening {} for {}", url, channel);
        let task = handle.spawn(run(
            url.to_string(),
            authorization,
            channel.clone(),
            outbound_rx,
            signal_tx,
        ));

        Self {
            channel,
            outbound: outbound_tx,
            signals: signal_rx,
            task,
        }
    }

    pub fn channel(&self) -> &ChannelName {
        &self.channel
    }

    /// Publish a message to the channel destination. Blank content is
    /// never sent. Returns whether the frame was queued.
    pub fn send(&self, sender: &str, content: &str) -> bool {
        if content.trim().is_empty() {
            return false;
        }
        let json = match serde_json::to_string(&OutgoingMessage::new(sender, content)) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("[CHAT] Could not encode message: {}", e);
                return false;
            }
        };
        let frame = stomp::send(&self.channel.destination(), json);
        self.outbound.send(frame.encode()).is_ok()
    }

    /// Drain pending signals without blocking
    pub fn poll(&self) -> Vec<ChatSignal> {
        self.signals.try_iter().collect()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

async fn run(
    url: String,
    authorization: Option<String>,
    channel: ChannelName,
    outbound: UnboundedReceiver<String>,
    signals: Sender<ChatSignal>,
) {
    let reason = match session(&url, authorization.as_deref(), &channel, outbound, &signals).await {
        Ok(()) => {
            tracing::info!("[CHAT] Session for {} closed", channel);
            None
        }
        Err(e) => {
            tracing::warn!("[CHAT] Session for {} failed: {}", channel, e);
            Some(e.to_string())
        }
    };
    let _ = signals.send(ChatSignal::Closed(reason));
}

/// Next STOMP frame from the socket, skipping heart-beats and control
/// messages. `None` once the socket is closed.
async fn next_frame<S>(stream: &mut S) -> Result<Option<Frame>, ApiError>
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    while let Some(message) = stream.next().await {
        let text = match message.map_err(transport_error)? {
            Message::Text(text) => text,
            Message::Binary(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Message::Close(_) => return Ok(None),
            _ => continue,
        };
        if let Some(frame) = Frame::decode(&text).map_err(transport_error)? {
            return Ok(Some(frame));
        }
    }
    Ok(None)
}

fn rejection(frame: &Frame) -> ApiError {
    let message = frame.get_header("message").unwrap_or(&frame.body);
    ApiError::Transport(format!("server sent ERROR: {}", message))
}

async fn session(
    url: &str,
    authorization: Option<&str>,
    channel: &ChannelName,
    mut outbound: UnboundedReceiver<String>,
    signals: &Sender<ChatSignal>,
) -> Result<(), ApiError> {
    let host = reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .ok_or_else(|| ApiError::Transport(format!("invalid chat url: {}", url)))?;

    let (socket, _) = tokio::time::timeout(HANDSHAKE_TIMEOUT, tokio_tungstenite::connect_async(url))
        .await
        .map_err(|_| ApiError::Transport("connection timed out".to_string()))?
        .map_err(transport_error)?;
    let (mut sink, mut stream) = socket.split();

    sink.send(Message::Text(stomp::connect(&host, authorization).encode()))
        .await
        .map_err(transport_error)?;

    let reply = tokio::time::timeout(HANDSHAKE_TIMEOUT, next_frame(&mut stream))
        .await
        .map_err(|_| ApiError::Transport("no CONNECTED frame".to_string()))??;
    match reply {
        Some(frame) if frame.command == Command::Connected => {}
        Some(frame) if frame.command == Command::Error => return Err(rejection(&frame)),
        Some(frame) => {
            return Err(ApiError::Transport(format!(
                "expected CONNECTED, got {}",
                frame.command.as_str()
            )))
        }
        None => return Err(ApiError::Transport("closed before CONNECTED".to_string())),
    }

    sink.send(Message::Text(
        stomp::subscribe(SUBSCRIPTION_ID, &channel.topic()).encode(),
    ))
    .await
    .map_err(transport_error)?;
    tracing::info!("[CHAT] Subscribed to {}", channel.topic());
    if signals.send(ChatSignal::Connected).is_err() {
        return Ok(());
    }

    loop {
        tokio::select! {
            outgoing = outbound.recv() => match outgoing {
                Some(text) => {
                    tracing::debug!("[CHAT] Publishing to {}", channel.destination());
                    sink.send(Message::Text(text)).await.map_err(transport_error)?;
                }
                None => {
                    let _ = sink.send(Message::Text(stomp::disconnect().encode())).await;
                    let _ = sink.close().await;
                    return Ok(());
                }
            },
            incoming = next_frame(&mut stream) => match incoming? {
                Some(frame) => match frame.command {
                    Command::Message => {
                        tracing::debug!("[CHAT] Change signal on {}", channel);
                        if signals.send(ChatSignal::Changed).is_err() {
                            return Ok(());
                        }
                    }
                    Command::Error => return Err(rejection(&frame)),
                    other => tracing::debug!("[CHAT] Ignoring {} frame", other.as_str()),
                },
                None => return Ok(()),
            },
        }
    }
}
