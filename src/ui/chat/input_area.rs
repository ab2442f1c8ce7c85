//! Input prompt and key hints.

use crate::config::Mode;

pub const PROMPT: &str = "> ";

/// One-line usage hint printed under the header.
#[must_use]
pub fn input_hint(mode: Mode) -> &'static str {
    match mode {
        Mode::Panel => "Ask our chatbot. Press Enter to send, /quit to exit.",
        Mode::Widget => "Type /toggle to open or close the chat, Enter to send, /quit to exit.",
    }
}
