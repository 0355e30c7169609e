//! Chat transport against a local STOMP-speaking WebSocket server

use futures_util::{SinkExt, StreamExt};
use instaclone::egui_app::chat::stomp::{Command, Frame};
use instaclone::egui_app::chat::{ChatSignal, ChatTransport};
use instaclone::shared::{ChannelName, Participant};
use pretty_assertions::assert_eq;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

const WAIT: Duration = Duration::from_secs(5);

/// What the fake broker does once CONNECT arrives
#[derive(Clone, Copy)]
enum Broker {
    Accept,
    Reject,
}

struct FakeBroker {
    url: String,
    frames: UnboundedReceiver<Frame>,
    push: UnboundedSender<()>,
}

/// Start a one-connection broker. Every frame it receives is forwarded to
/// the test; each `push` publishes one MESSAGE on the subscribed topic.
async fn start_broker(mode: Broker) -> FakeBroker {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (frames_tx, frames_rx) = unbounded_channel();
    let (push_tx, mut push_rx) = unbounded_channel::<()>();

    tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(tcp).await.unwrap();
        let mut topic = String::new();
        loop {
            tokio::select! {
                incoming = ws.next() => {
                    let text = match incoming {
                        Some(Ok(Message::Text(text))) => text,
                        Some(Ok(_)) => continue,
                        _ => break,
                    };
                    let Some(frame) = Frame::decode(&text).unwrap() else { continue };
                    let command = frame.command;
                    if command == Command::Subscribe {
                        topic = frame.get_header("destination").unwrap_or_default().to_string();
                    }
                    let _ = frames_tx.send(frame);
                    match (command, mode) {
                        (Command::Connect, Broker::Accept) => {
                            let reply = Frame::new(Command::Connected).header("version", "1.2");
                            ws.send(Message::Text(reply.encode())).await.unwrap();
                        }
                        (Command::Connect, Broker::Reject) => {
                            let reply = Frame::new(Command::Error).header("message", "Bad credentials");
                            ws.send(Message::Text(reply.encode())).await.unwrap();
                            break;
                        }
                        (Command::Disconnect, _) => break,
                        _ => {}
                    }
                }
                Some(()) = push_rx.recv() => {
                    let message = Frame::new(Command::Message)
                        .header("destination", topic.as_str())
                        .header("subscription", "sub-0")
                        .header("message-id", "1")
                        .body("{\"sender\":\"ola\"}");
                    ws.send(Message::Text(message.encode())).await.unwrap();
                }
            }
        }
    });

    FakeBroker {
        url: format!("ws://{}/chat/websocket", addr),
        frames: frames_rx,
        push: push_tx,
    }
}

async fn next_frame(broker: &mut FakeBroker) -> Frame {
    tokio::time::timeout(WAIT, broker.frames.recv())
        .await
        .expect("broker frame")
        .expect("broker alive")
}

/// Poll the transport the way the UI does until a signal shows up
async fn next_signal(transport: &ChatTransport) -> ChatSignal {
    tokio::time::timeout(WAIT, async {
        loop {
            if let Some(signal) = transport.poll().into_iter().next() {
                return signal;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("transport signal")
}

fn channel() -> ChannelName {
    ChannelName::between(Participant::new(2, "kari"), Participant::new(5, "ola"))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_session_lifecycle() {
    let mut broker = start_broker(Broker::Accept).await;
    let transport = ChatTransport::open(
        &Handle::current(),
        &broker.url,
        Some("Bearer abc".to_string()),
        channel(),
    );

    let connect = next_frame(&mut broker).await;
    assert_eq!(connect.command, Command::Connect);
    assert_eq!(connect.get_header("accept-version"), Some("1.1,1.2"));
    assert_eq!(connect.get_header("host"), Some("127.0.0.1"));
    assert_eq!(connect.get_header("Authorization"), Some("Bearer abc"));

    assert_eq!(next_signal(&transport).await, ChatSignal::Connected);
    let subscribe = next_frame(&mut broker).await;
    assert_eq!(subscribe.command, Command::Subscribe);
    assert_eq!(subscribe.get_header("id"), Some("sub-0"));
    assert_eq!(subscribe.get_header("destination"), Some("/topic/messages/ola&kari"));

    broker.push.send(()).unwrap();
    assert_eq!(next_signal(&transport).await, ChatSignal::Changed);

    assert!(!transport.send("kari", "   "));
    assert!(transport.send("kari", "hei"));
    let send = next_frame(&mut broker).await;
    assert_eq!(send.command, Command::Send);
    assert_eq!(send.get_header("destination"), Some("/app/chat/ola&kari"));
    let body: serde_json::Value = serde_json::from_str(&send.body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "sender": "kari",
            "t_stamp": "to be defined in server",
            "content": "hei"
        })
    );

    drop(transport);
    let disconnect = next_frame(&mut broker).await;
    assert_eq!(disconnect.command, Command::Disconnect);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_rejected_connect_closes_with_reason() {
    let mut broker = start_broker(Broker::Reject).await;
    let transport = ChatTransport::open(&Handle::current(), &broker.url, None, channel());

    let connect = next_frame(&mut broker).await;
    assert_eq!(connect.get_header("Authorization"), None);

    match next_signal(&transport).await {
        ChatSignal::Closed(Some(reason)) => assert!(reason.contains("Bad credentials"), "{}", reason),
        other => panic!("expected Closed with reason, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_server_closes() {
    // Bind and drop to get a port nobody listens on.
    let addr = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap()
        .local_addr()
        .unwrap();
    let url = format!("ws://{}/chat/websocket", addr);
    let transport = ChatTransport::open(&Handle::current(), &url, None, channel());

    assert!(matches!(next_signal(&transport).await, ChatSignal::Closed(Some(_))));

    // The session task is gone once it has reported the close.
    let finished = tokio::time::timeout(Duration::from_secs(5), async {
        while !transport.is_finished() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(finished.is_ok());
}
