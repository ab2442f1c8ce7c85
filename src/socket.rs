//! WebSocket transport for the streaming chat endpoint.

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message as WsMessage,
};
use tracing::debug;
use url::Url;

use crate::{error::Result, protocol::ChatRequest};

/// One open connection to `/ws/chat`.
///
/// Outbound turns are written as JSON text frames. Inbound frames are handed
/// back as raw text; parsing is left to the caller. Pings are answered by
/// tungstenite while the stream is being read.
pub struct ChatSocket {
    url: Url,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl std::fmt::Debug for ChatSocket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSocket").field("url", &self.url).finish()
    }
}

impl ChatSocket {
    /// Open a connection.
    pub async fn connect(url: &Url) -> Result<Self> {
        let (stream, response) = connect_async(url.as_str()).await?;
        debug!(
            name: "ws.connected",
            url = %url,
            status = response.status().as_u16(),
            "WebSocket handshake complete"
        );
        Ok(Self {
            url: url.clone(),
            stream,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Send one turn as a JSON text frame.
    pub async fn send(&mut self, request: &ChatRequest) -> Result<()> {
        let text = serde_json::to_string(request)?;
        self.stream.send(WsMessage::text(text)).await?;
        Ok(())
    }

    /// Wait for the next inbound text frame.
    ///
    /// Returns `Ok(None)` once the peer closes the connection. Binary and
    /// control frames are skipped. Cancel safe: the only await point is the
    /// underlying stream read.
    pub async fn next_text(&mut self) -> Result<Option<String>> {
        loop {
            match self.stream.next().await {
                Some(Ok(WsMessage::Text(text))) => return Ok(Some(text.as_str().to_owned())),
                Some(Ok(WsMessage::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }

    /// Send a close frame and drop the connection.
    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}
