//! Terminal rendering for the chat surfaces.
//!
//! Everything here turns state into plain text; nothing reads input or
//! touches the network.
//!
//! # Structure
//!
//! - [`chat`]: header, transcript and input hint for both variants

pub mod chat;
