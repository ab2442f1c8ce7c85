//! In-process mock of the chatbot backend.
//!
//! `POST /chat` answers with a canned JSON body; `/ws/chat` answers every
//! inbound turn with a canned list of text frames.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::Response,
    routing::{get, post},
};
use retail_chatbot::ChatRequest;

/// What the mock backend sends back and what it has seen.
#[derive(Debug, Default)]
pub struct MockBackend {
    /// Status and body returned by `POST /chat`.
    pub http_reply: Mutex<(u16, String)>,
    /// Raw request bodies received on `POST /chat`.
    pub http_bodies: Mutex<Vec<String>>,
    /// Text frames sent for every inbound WebSocket turn.
    pub frames: Mutex<Vec<String>>,
    /// Send a close frame after replying to a turn.
    pub close_after_reply: Mutex<bool>,
    /// Turns received over WebSocket.
    pub ws_turns: Mutex<Vec<ChatRequest>>,
    /// Number of WebSocket connections ever accepted.
    pub opened: AtomicUsize,
    /// Number of WebSocket connections currently alive.
    pub active: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Arc<Self> {
        let backend = Self::default();
        *backend.http_reply.lock().unwrap() = (200, r#"{"answer":"Hello!"}"#.to_string());
        Arc::new(backend)
    }

    pub fn reply_http(&self, status: u16, body: &str) {
        *self.http_reply.lock().unwrap() = (status, body.to_string());
    }

    pub fn reply_frames(&self, frames: &[&str]) {
        *self.frames.lock().unwrap() = frames.iter().map(|f| (*f).to_string()).collect();
    }

    pub fn http_bodies(&self) -> Vec<String> {
        self.http_bodies.lock().unwrap().clone()
    }

    pub fn ws_turns(&self) -> Vec<ChatRequest> {
        self.ws_turns.lock().unwrap().clone()
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Poll until `active()` equals `expected`, for at most two seconds.
    pub async fn wait_active(&self, expected: usize) -> bool {
        for _ in 0..200 {
            if self.active() == expected {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }
}

/// Bind the mock on an ephemeral port and serve it in the background.
pub async fn spawn(backend: Arc<MockBackend>) -> SocketAddr {
    let app = Router::new()
        .route("/chat", post(chat))
        .route("/ws/chat", get(ws_chat))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// An address nothing is listening on.
pub async fn dead_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

async fn chat(State(backend): State<Arc<MockBackend>>, body: String) -> (StatusCode, String) {
    backend.http_bodies.lock().unwrap().push(body);
    let (status, reply) = backend.http_reply.lock().unwrap().clone();
    (StatusCode::from_u16(status).unwrap(), reply)
}

async fn ws_chat(ws: WebSocketUpgrade, State(backend): State<Arc<MockBackend>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, backend))
}

async fn handle_socket(mut socket: WebSocket, backend: Arc<MockBackend>) {
    backend.opened.fetch_add(1, Ordering::SeqCst);
    backend.active.fetch_add(1, Ordering::SeqCst);

    while let Some(Ok(msg)) = socket.recv().await {
        let Message::Text(text) = msg else {
            continue;
        };
        let turn: ChatRequest = serde_json::from_str(text.as_str()).unwrap();
        backend.ws_turns.lock().unwrap().push(turn);

        let frames = backend.frames.lock().unwrap().clone();
        for frame in frames {
            if socket.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }

        let close = *backend.close_after_reply.lock().unwrap();
        if close {
            let _ = socket.send(Message::Close(None)).await;
            break;
        }
    }

    backend.active.fetch_sub(1, Ordering::SeqCst);
}
