use clap::{Parser, Subcommand};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use url::Url;

use crate::error::Result;
use crate::protocol::DEFAULT_SESSION_ID;

/// Config file picked up from the working directory when none is given.
const DEFAULT_CONFIG_FILE: &str = "chatbot.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE", global = true)]
    pub config: Option<String>,

    /// Backend host
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Backend port
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Session identifier sent with every message
    #[arg(long, global = true)]
    pub session_id: Option<String>,

    #[command(subcommand)]
    pub command: Option<Mode>,
}

/// Which chat surface to run.
#[derive(Subcommand, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Request/response panel: one POST per message
    #[default]
    Panel,
    /// Streaming widget over a WebSocket, toggled open with `/toggle`
    Widget,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Use https/wss instead of http/ws.
    pub secure: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    pub session_id: String,
    pub http_path: String,
    pub ws_path: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args).map_err(|e| crate::Error::Config(e.to_string()))?;
        Self::from_cli(&cli)
    }

    /// Layer defaults, config file, `CHATBOT_*` env vars and CLI flags.
    ///
    /// Priority: CLI flag > env var > config file > defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("server.host", "localhost")?
            .set_default("server.port", 8000)?
            .set_default("server.secure", false)?
            .set_default("chat.session_id", DEFAULT_SESSION_ID)?
            .set_default("chat.http_path", "/chat")?
            .set_default("chat.ws_path", "/ws/chat")?;

        if let Some(path) = &cli.config {
            builder = builder.add_source(File::from(Path::new(path)));
        } else {
            builder =
                builder.add_source(File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false));
        }

        // E.g. CHATBOT_SERVER__PORT=9000
        builder = builder.add_source(
            Environment::with_prefix("CHATBOT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(host) = &cli.host {
            builder = builder.set_override("server.host", host.as_str())?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(session_id) = &cli.session_id {
            builder = builder.set_override("chat.session_id", session_id.as_str())?;
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Base URL for HTTP requests, e.g. `http://localhost:8000/`.
    pub fn http_base_url(&self) -> Result<Url> {
        let scheme = if self.server.secure { "https" } else { "http" };
        self.base_url(scheme)
    }

    /// Full URL of the streaming endpoint, e.g. `ws://localhost:8000/ws/chat`.
    pub fn ws_url(&self) -> Result<Url> {
        let scheme = if self.server.secure { "wss" } else { "ws" };
        Ok(self.base_url(scheme)?.join(&self.chat.ws_path)?)
    }

    fn base_url(&self, scheme: &str) -> Result<Url> {
        Ok(Url::parse(&format!(
            "{scheme}://{}:{}/",
            self.server.host, self.server.port
        ))?)
    }
}
