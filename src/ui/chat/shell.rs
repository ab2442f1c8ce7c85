//! Full-screen views of each variant.

use super::{ChatStatus, chat_header, panel_transcript, widget_transcript};
use crate::chat::{PanelState, WidgetState};

/// Header plus panel transcript.
#[must_use]
pub fn render_panel(state: &PanelState) -> String {
    let status = if state.is_waiting() {
        ChatStatus::Typing
    } else {
        ChatStatus::Ready
    };
    format!(
        "{}\n{}",
        chat_header(status),
        panel_transcript(state.messages())
    )
}

/// Header plus widget transcript; only the header while collapsed.
#[must_use]
pub fn render_widget(state: &WidgetState, connected: bool) -> String {
    let status = if !state.is_open() {
        ChatStatus::Collapsed
    } else if !connected {
        ChatStatus::Offline
    } else if state.is_typing() {
        ChatStatus::Typing
    } else {
        ChatStatus::Ready
    };

    let header = chat_header(status);
    if state.is_open() {
        format!("{header}\n{}", widget_transcript(state.messages()))
    } else {
        format!("{header}\n")
    }
}
