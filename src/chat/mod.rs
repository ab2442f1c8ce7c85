//! Chat surfaces.
//!
//! Two independent variants of the same chat box:
//!
//! - [`ChatPanel`]: request/response. One POST per turn; the answer
//!   overwrites a `"..."` placeholder.
//! - [`ChatWidget`]: streaming. A WebSocket opened on expand; fragments are
//!   appended to an empty placeholder as they arrive.
//!
//! Each variant keeps its transcript in a plain state type
//! ([`PanelState`], [`WidgetState`]) that does no I/O, so the rules for
//! placeholders and input handling can be tested without a backend.
//!
//! # Example
//!
//! ```rust
//! use retail_chatbot::chat::PanelState;
//!
//! let mut state = PanelState::new();
//! state.set_input("hi");
//! let request = state.begin_turn("session-001").unwrap();
//!
//! assert_eq!(request.message, "hi");
//! assert_eq!(state.messages()[0].bot, "...");
//! assert_eq!(state.input(), "");
//! ```

mod panel;
mod widget;

pub use panel::{ChatPanel, PLACEHOLDER, PanelMessage, PanelState, RelatedProduct};
pub use widget::{ChatWidget, Sender, WidgetMessage, WidgetState};
