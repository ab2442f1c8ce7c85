//! Collapsible streaming chat widget.
//!
//! The widget opens its WebSocket lazily on first expand and closes it on
//! collapse. Each submitted turn pushes a user record and an empty bot
//! placeholder; inbound fragments are appended to that placeholder until
//! the next turn replaces the held index. There is no completion marker.

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use url::Url;

use crate::error::Error;
use crate::protocol::{ChatRequest, StreamFrame};
use crate::socket::ChatSocket;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One record in the widget transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetMessage {
    pub sender: Sender,
    pub text: String,
    /// Local wall-clock time of the push, `HH:MM`.
    pub timestamp: String,
}

impl WidgetMessage {
    fn now(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: Local::now().format("%H:%M").to_string(),
        }
    }
}

/// Transcript, input buffer and flags of the widget. No I/O.
#[derive(Debug, Clone, Default)]
pub struct WidgetState {
    messages: Vec<WidgetMessage>,
    input: String,
    open: bool,
    typing: bool,
    /// Index of the bot record currently receiving fragments.
    placeholder: Option<usize>,
}

impl WidgetState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn messages(&self) -> &[WidgetMessage] {
        &self.messages
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Start a turn from the current input.
    ///
    /// Blank input is a no-op and returns `None`. Otherwise pushes the user
    /// record and an empty bot placeholder, raises `typing`, clears the input
    /// and returns the trimmed message.
    pub fn begin_turn(&mut self) -> Option<String> {
        let message = self.input.trim();
        if message.is_empty() {
            return None;
        }
        let message = message.to_string();

        self.messages
            .push(WidgetMessage::now(Sender::User, message.clone()));
        self.messages.push(WidgetMessage::now(Sender::Bot, ""));
        self.placeholder = Some(self.messages.len() - 1);
        self.typing = true;
        self.input.clear();

        Some(message)
    }

    /// Apply one inbound frame. Returns whether the frame carried a fragment.
    ///
    /// `typing` is cleared by the first non-empty fragment, not by the end of
    /// the reply. Empty answers (role-only stream chunks) carry no text and
    /// are ignored like frames without an answer.
    pub fn apply_frame(&mut self, frame: &StreamFrame) -> bool {
        let Some(fragment) = frame.answer.as_deref().filter(|f| !f.is_empty()) else {
            return false;
        };
        if let Some(message) = self.placeholder.and_then(|i| self.messages.get_mut(i)) {
            message.text.push_str(fragment);
        }
        self.typing = false;
        true
    }
}

/// Widget controller: state plus the lazily opened socket.
#[derive(Debug)]
pub struct ChatWidget {
    state: WidgetState,
    ws_url: Url,
    session_id: String,
    socket: Option<ChatSocket>,
}

impl ChatWidget {
    /// Create a collapsed widget with no socket.
    pub fn new(ws_url: Url, session_id: impl Into<String>) -> Self {
        Self {
            state: WidgetState::new(),
            ws_url,
            session_id: session_id.into(),
            socket: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.set_input(text);
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.socket.is_some()
    }

    /// Expand if collapsed, collapse if open.
    pub async fn toggle(&mut self) {
        if self.state.is_open() {
            self.collapse().await;
        } else {
            self.expand().await;
        }
    }

    /// Open the panel, connecting if no socket is active.
    pub async fn expand(&mut self) {
        self.state.set_open(true);
        if self.socket.is_some() {
            return;
        }
        match ChatSocket::connect(&self.ws_url).await {
            Ok(socket) => {
                info!(name: "widget.socket.opened", url = %self.ws_url, "WebSocket connected");
                self.socket = Some(socket);
            }
            Err(e) => {
                error!(name: "widget.socket.failed", url = %self.ws_url, error = %e, "WebSocket error: {e}");
            }
        }
    }

    /// Close the panel and tear down the socket.
    pub async fn collapse(&mut self) {
        self.state.set_open(false);
        if let Some(socket) = self.socket.take() {
            if let Err(e) = socket.close().await {
                warn!(name: "widget.socket.close_failed", error = %e, "WebSocket close error: {e}");
            }
            info!(name: "widget.socket.closed", "WebSocket disconnected");
        }
    }

    /// Submit the current input over the socket.
    ///
    /// The turn is recorded even when the send fails; the failure is logged.
    pub async fn submit(&mut self) {
        let Some(message) = self.state.begin_turn() else {
            return;
        };
        let request = ChatRequest::new(self.session_id.clone(), message);

        let result = match self.socket.as_mut() {
            Some(socket) => socket.send(&request).await,
            None => Err(Error::NotConnected),
        };
        if let Err(e) = result {
            error!(name: "widget.submit.failed", error = %e, "Error: {e}");
        }
    }

    /// Parse and apply one inbound text frame. Unparseable frames are dropped.
    pub fn on_frame(&mut self, text: &str) -> bool {
        match StreamFrame::parse(text) {
            Ok(frame) => self.state.apply_frame(&frame),
            Err(e) => {
                error!(name: "widget.frame.invalid", error = %e, "Dropped malformed frame");
                false
            }
        }
    }

    /// Wait for the next inbound frame and apply it.
    ///
    /// Returns `false` once the socket is gone (never opened, closed by the
    /// peer, or failed). The panel stays open; the next expand reconnects.
    pub async fn pump(&mut self) -> bool {
        let Some(socket) = self.socket.as_mut() else {
            return false;
        };
        match socket.next_text().await {
            Ok(Some(text)) => {
                self.on_frame(&text);
                true
            }
            Ok(None) => {
                info!(name: "widget.socket.ended", "WebSocket closed by server");
                self.socket = None;
                false
            }
            Err(e) => {
                error!(name: "widget.socket.error", error = %e, "WebSocket error: {e}");
                self.socket = None;
                false
            }
        }
    }
}
