//! Chat-specific text views.
//!
//! [`render_panel`] and [`render_widget`] compose the header and transcript
//! of each variant; the pieces are exported for callers that print them
//! separately.

mod header;
mod input_area;
mod message_list;
mod shell;

pub use header::{ChatStatus, chat_header};
pub use input_area::{PROMPT, input_hint};
pub use message_list::{panel_transcript, widget_transcript};
pub use shell::{render_panel, render_widget};
