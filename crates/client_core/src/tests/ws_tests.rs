use super::*;
use axum::{
    extract::{
        ws::{Message as AxumMessage, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use shared::protocol::IncomingMessage;
use std::time::Duration;
use tokio::{net::TcpListener, time::timeout};

const WAIT: Duration = Duration::from_secs(5);

#[derive(Clone)]
struct ServerState {
    received: mpsc::UnboundedSender<String>,
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<ServerState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| serve_socket(socket, state))
}

async fn serve_socket(mut socket: WebSocket, state: ServerState) {
    for frame in [
        r#"{"event":"typing","data":"Bob"}"#,
        "not json at all",
        r#"{"event":"message","data":{"message":"hello","author":"Bob"}}"#,
    ] {
        if socket
            .send(AxumMessage::Text(frame.to_string()))
            .await
            .is_err()
        {
            return;
        }
    }
    while let Some(Ok(msg)) = socket.recv().await {
        if let AxumMessage::Text(text) = msg {
            let _ = state.received.send(text);
        }
    }
}

async fn close_handler(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(|mut socket| async move {
        if socket.send(AxumMessage::Close(None)).await.is_err() {
            return;
        }
        // Wait for the client's close reply before dropping the socket.
        while let Some(Ok(_)) = socket.recv().await {}
    })
}

async fn spawn_server() -> (String, mpsc::UnboundedReceiver<String>) {
    let (received, received_rx) = mpsc::unbounded_channel();
    let app = Router::new()
        .route("/ws", get(ws_handler))
        .route("/close", get(close_handler))
        .with_state(ServerState { received });
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (format!("http://{addr}/ws"), received_rx)
}

async fn connect_to_closing_server() -> (WsChannel, mpsc::UnboundedReceiver<ServerEvent>) {
    let (url, _received) = spawn_server().await;
    let url = url.replace("/ws", "/close");
    WsChannel::connect(&url).await.expect("connect")
}

#[test]
fn rewrites_http_schemes_to_websocket_schemes() {
    assert_eq!(
        websocket_url("http://localhost:5000/ws").expect("http").as_str(),
        "ws://localhost:5000/ws"
    );
    assert_eq!(
        websocket_url("https://chat.example.com/socket")
            .expect("https")
            .as_str(),
        "wss://chat.example.com/socket"
    );
    assert_eq!(
        websocket_url("ws://127.0.0.1:9000/").expect("ws").as_str(),
        "ws://127.0.0.1:9000/"
    );
}

#[test]
fn rejects_non_websocket_urls() {
    assert!(matches!(
        websocket_url("ftp://example.com"),
        Err(ChannelError::InvalidUrl { .. })
    ));
    assert!(matches!(
        websocket_url("not a url"),
        Err(ChannelError::InvalidUrl { .. })
    ));
}

#[tokio::test]
async fn delivers_inbound_events_and_skips_invalid_frames() {
    let (url, _received) = spawn_server().await;
    let (channel, mut inbound) = WsChannel::connect(&url).await.expect("connect");

    assert_eq!(
        inbound.recv().await,
        Some(ServerEvent::Typing("Bob".to_string()))
    );
    assert_eq!(
        inbound.recv().await,
        Some(ServerEvent::Message(IncomingMessage {
            message: "hello".to_string(),
            author: "Bob".to_string(),
        }))
    );

    channel.close().await;
}

#[tokio::test]
async fn emitted_events_arrive_as_json_frames() {
    let (url, mut received) = spawn_server().await;
    let (channel, _inbound) = WsChannel::connect(&url).await.expect("connect");

    channel
        .emit(ClientEvent::Typing("Alice".to_string()))
        .expect("typing");
    channel.emit(ClientEvent::StopTyping).expect("stop typing");

    assert_eq!(
        received.recv().await.as_deref(),
        Some(r#"{"event":"typing","data":"Alice"}"#)
    );
    assert_eq!(
        received.recv().await.as_deref(),
        Some(r#"{"event":"stop-typing"}"#)
    );

    channel.close().await;
}

#[tokio::test]
async fn connect_fails_for_unreachable_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = WsChannel::connect(&format!("ws://{addr}/ws"))
        .await
        .err()
        .expect("connect should fail");
    assert!(matches!(err, ChannelError::Connect { .. }));
}

#[tokio::test]
async fn inbound_ends_when_server_closes() {
    let (channel, mut inbound) = connect_to_closing_server().await;

    let next = timeout(WAIT, inbound.recv()).await.expect("reader ends");
    assert_eq!(next, None);

    channel.close().await;
}

#[tokio::test]
async fn emit_fails_after_server_closes() {
    let (channel, mut inbound) = connect_to_closing_server().await;
    assert_eq!(timeout(WAIT, inbound.recv()).await.expect("reader ends"), None);

    timeout(WAIT, async {
        while !channel.is_closed() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("writer stops after the reader");

    let err = channel
        .emit(ClientEvent::Typing("Alice".to_string()))
        .expect_err("emit on a closed channel");
    assert!(matches!(err, ChannelError::Closed));

    channel.close().await;
}
