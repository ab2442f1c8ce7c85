//! Wire types shared by the HTTP and WebSocket transports.
//!
//! Both endpoints take the same `{session_id, message}` body. The HTTP
//! endpoint answers once with a full [`ChatResponse`]; the WebSocket endpoint
//! answers with any number of [`StreamFrame`]s, each optionally carrying a
//! text fragment.

use serde::{Deserialize, Serialize};

/// Session identifier used when none is configured.
pub const DEFAULT_SESSION_ID: &str = "session-001";

// =============================================================================
// Outbound
// =============================================================================

/// One user turn, as sent over either transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Opaque session identifier.
    pub session_id: String,
    /// The trimmed user message.
    pub message: String,
}

impl ChatRequest {
    pub fn new(session_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Inbound
// =============================================================================

/// Response from `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Echo of the request session ID.
    #[serde(default)]
    pub session_id: Option<String>,
    /// The complete reply text.
    pub answer: String,
    /// Title of the product the backend matched, if any.
    #[serde(default)]
    pub product_title: Option<String>,
    /// Description of the matched product, if any.
    #[serde(default)]
    pub product_description: Option<String>,
}

/// A single inbound WebSocket frame.
///
/// Every field is optional: frames without an `answer` carry no text and are
/// ignored by the widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamFrame {
    #[serde(default)]
    pub session_id: Option<String>,
    /// Text fragment to append to the running reply.
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub product_title: Option<String>,
    #[serde(default)]
    pub product_description: Option<String>,
}

impl StreamFrame {
    /// Parse a text frame.
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
