//! Chat header line.

/// Title shown above both variants.
pub const TITLE: &str = "Retail Chatbot";

/// Status shown next to the title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChatStatus {
    /// Waiting for input.
    #[default]
    Ready,
    /// A streamed reply has been requested and no fragment has arrived yet.
    Typing,
    /// Widget is collapsed.
    Collapsed,
    /// Widget is open but has no socket.
    Offline,
}

impl ChatStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Typing => "Bot is typing...",
            Self::Collapsed => "Collapsed",
            Self::Offline => "Offline",
        }
    }
}

/// `== Retail Chatbot [Ready] ==`
#[must_use]
pub fn chat_header(status: ChatStatus) -> String {
    format!("== {TITLE} [{}] ==", status.label())
}
