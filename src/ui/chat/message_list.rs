//! Transcript views.

use std::fmt::Write;

use crate::chat::{PanelMessage, Sender, WidgetMessage};

/// Panel turns as `You:` / `Bot:` pairs, with the related product if any.
#[must_use]
pub fn panel_transcript(messages: &[PanelMessage]) -> String {
    let mut out = String::new();
    for msg in messages {
        let _ = writeln!(out, "You: {}", msg.user);
        let _ = writeln!(out, "Bot: {}", msg.bot);
        if let Some(product) = &msg.product {
            let _ = match &product.description {
                Some(description) => {
                    writeln!(out, "     Related product: {} - {description}", product.title)
                }
                None => writeln!(out, "     Related product: {}", product.title),
            };
        }
    }
    out
}

/// Widget records as `[HH:MM] You: ...` lines.
#[must_use]
pub fn widget_transcript(messages: &[WidgetMessage]) -> String {
    let mut out = String::new();
    for msg in messages {
        let who = match msg.sender {
            Sender::User => "You",
            Sender::Bot => "Bot",
        };
        let _ = writeln!(out, "[{}] {who}: {}", msg.timestamp, msg.text);
    }
    out
}
