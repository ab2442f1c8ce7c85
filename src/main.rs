//! Retail Chatbot terminal client.
//!
//! `retail-chatbot panel` (default) or `retail-chatbot widget`.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::io::Write;

use clap::Parser;
use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use retail_chatbot::{
    Client,
    chat::{ChatPanel, ChatWidget},
    config::{AppConfig, Cli, Mode},
    ui::chat::{PROMPT, input_hint, render_panel, render_widget},
};

const QUIT: &str = "/quit";
const TOGGLE: &str = "/toggle";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present) so RUST_LOG and CHATBOT_* apply below
    let _ = dotenv();

    // Initialize tracing (M-LOG-STRUCTURED); stderr keeps stdout for the transcript
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli)?;
    let mode = cli.command.unwrap_or_default();

    info!(
        name: "config.loaded",
        host = %config.server.host,
        port = config.server.port,
        session_id = %config.chat.session_id,
        ?mode,
        "Configuration loaded"
    );

    println!("{}", input_hint(mode));
    match mode {
        Mode::Panel => run_panel(&config).await,
        Mode::Widget => run_widget(&config).await,
    }
}

/// Request/response loop: one POST per line.
async fn run_panel(config: &AppConfig) -> anyhow::Result<()> {
    let client = Client::new(config.http_base_url()?)?.with_chat_path(config.chat.http_path.clone());
    let mut panel = ChatPanel::new(client, config.chat.session_id.clone());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    show(&render_panel(panel.state()));
    show(PROMPT);
    while let Some(line) = lines.next_line().await? {
        if line.trim() == QUIT {
            break;
        }

        panel.set_input(line);
        if let Some(request) = panel.begin_submit() {
            show(&render_panel(panel.state()));
            panel.deliver(request).await;
            show(&render_panel(panel.state()));
        }
        show(PROMPT);
    }

    Ok(())
}

/// Streaming loop: stdin and the socket share one task.
async fn run_widget(config: &AppConfig) -> anyhow::Result<()> {
    let mut widget = ChatWidget::new(config.ws_url()?, config.chat.session_id.clone());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    show(&render_widget(widget.state(), widget.is_connected()));
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.trim() {
                    QUIT => break,
                    TOGGLE => widget.toggle().await,
                    _ if !widget.state().is_open() => {
                        println!("Chat is collapsed; type {TOGGLE} to open it.");
                        continue;
                    }
                    _ => {
                        widget.set_input(line);
                        widget.submit().await;
                    }
                }
            }
            _ = widget.pump(), if widget.is_connected() => {}
        }
        show(&render_widget(widget.state(), widget.is_connected()));
    }

    widget.collapse().await;
    Ok(())
}

/// Print without a trailing newline and flush, so the prompt shows up.
fn show(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}
