//! HTTP client for the request/response chat endpoint.

use async_trait::async_trait;
use url::Url;

use crate::{
    error::{Error, Result},
    protocol::{ChatRequest, ChatResponse},
};

/// Anything that can answer one chat turn with one complete response.
///
/// The panel controller is written against this trait so it can be driven by
/// the HTTP [`Client`] or by an in-memory fake.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse>;
}

/// HTTP client for the chat backend.
///
/// # Example
///
/// ```rust,no_run
/// use retail_chatbot::{ChatRequest, Client};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new("http://localhost:8000")?;
/// let reply = client
///     .chat()
///     .send(&ChatRequest::new("session-001", "Do you sell drills?"))
///     .await?;
/// println!("{}", reply.answer);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    chat_path: String,
    http: reqwest::Client,
}

impl Client {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the backend (e.g., "http://localhost:8000")
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a new client with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self {
            base_url,
            chat_path: "/chat".to_string(),
            http,
        })
    }

    /// Override the path of the chat endpoint (default `/chat`).
    #[must_use]
    pub fn with_chat_path(mut self, path: impl Into<String>) -> Self {
        self.chat_path = path.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Access the Chat API.
    pub fn chat(&self) -> ChatApi<'_> {
        ChatApi { client: self }
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            // Decode from text so a malformed body surfaces as a JSON error.
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            Err(Error::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl ChatTransport for Client {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.chat().send(request).await
    }
}

// =============================================================================
// Chat API
// =============================================================================

/// Chat API client.
#[derive(Debug)]
pub struct ChatApi<'a> {
    client: &'a Client,
}

impl ChatApi<'_> {
    /// Send one chat turn and wait for the complete answer.
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = self.client.url(&self.client.chat_path)?;
        tracing::debug!(name: "http.chat.request", %url, session_id = %request.session_id);
        let response = self.client.http.post(url).json(request).send().await?;
        Client::handle_response(response).await
    }
}
