//! Request/response chat panel.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::client::ChatTransport;
use crate::protocol::{ChatRequest, ChatResponse};

/// Reply text shown until the backend answers.
pub const PLACEHOLDER: &str = "...";

/// Product the backend matched for a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedProduct {
    pub title: String,
    pub description: Option<String>,
}

/// One turn in the panel transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelMessage {
    pub user: String,
    /// [`PLACEHOLDER`] until the response arrives.
    pub bot: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<RelatedProduct>,
}

impl PanelMessage {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.bot == PLACEHOLDER
    }
}

/// Transcript and input buffer of the panel.
///
/// Append-only, except that a response overwrites the reply of the **last**
/// turn. Nothing correlates a response with the turn that caused it.
#[derive(Debug, Clone, Default)]
pub struct PanelState {
    messages: Vec<PanelMessage>,
    input: String,
    /// A request is in flight.
    waiting: bool,
}

impl PanelState {
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
    pub fn messages(&self) -> &[PanelMessage] {
        &self.messages
    }

    /// Whether a submitted turn is still waiting for its request to finish.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    /// Mark the in-flight request as finished without a reply.
    pub fn settle(&mut self) {
        self.waiting = false;
    }

    /// Start a turn from the current input.
    ///
    /// Blank input is a no-op and returns `None`. Otherwise the trimmed text
    /// is appended with a placeholder reply, the input is cleared, and the
    /// request to send is returned.
    pub fn begin_turn(&mut self, session_id: &str) -> Option<ChatRequest> {
        let message = self.input.trim();
        if message.is_empty() {
            return None;
        }
        let message = message.to_string();

        self.messages.push(PanelMessage {
            user: message.clone(),
            bot: PLACEHOLDER.to_string(),
            product: None,
        });
        self.input.clear();
        self.waiting = true;

        Some(ChatRequest::new(session_id, message))
    }

    /// Overwrite the last turn's reply with the response.
    pub fn resolve_last(&mut self, response: ChatResponse) {
        self.waiting = false;
        let Some(last) = self.messages.last_mut() else {
            return;
        };
        last.bot = response.answer;
        last.product = response.product_title.map(|title| RelatedProduct {
            title,
            description: response.product_description,
        });
    }
}

/// Panel controller: state plus the transport that answers it.
#[derive(Debug)]
pub struct ChatPanel<T> {
    state: PanelState,
    transport: T,
    session_id: String,
}

impl<T: ChatTransport> ChatPanel<T> {
    pub fn new(transport: T, session_id: impl Into<String>) -> Self {
        Self {
            state: PanelState::new(),
            transport,
            session_id: session_id.into(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.set_input(text);
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submit the current input and wait for the reply.
    ///
    /// Failures are logged and dropped; the placeholder stays in place.
    pub async fn submit(&mut self) {
        if let Some(request) = self.begin_submit() {
            self.deliver(request).await;
        }
    }

    /// First half of [`submit`](Self::submit): record the turn and clear the
    /// input, without touching the network.
    pub fn begin_submit(&mut self) -> Option<ChatRequest> {
        self.state.begin_turn(&self.session_id)
    }

    /// Second half of [`submit`](Self::submit): send the request and resolve
    /// the last turn with the reply.
    pub async fn deliver(&mut self, request: ChatRequest) {
        match self.transport.send(&request).await {
            Ok(response) => {
                info!(
                    name: "panel.reply",
                    session_id = %request.session_id,
                    chars = response.answer.len(),
                    "Reply received"
                );
                self.state.resolve_last(response);
            }
            Err(e) => {
                error!(name: "panel.submit.failed", error = %e, "Error: {e}");
                self.state.settle();
            }
        }
    }
}
