//! Retail Chatbot terminal client
//!
//! A chat client for the retail chatbot backend, in two flavours that share
//! nothing but their wire types:
//!
//! - **Panel**: request/response over `POST /chat`
//! - **Widget**: collapsible, streaming over `ws://.../ws/chat`
//!
//! # Modules
//!
//! - [`chat`]: transcript state and controllers for both variants
//! - [`client`]: HTTP transport
//! - [`socket`]: WebSocket transport
//! - [`protocol`]: request/response/frame DTOs
//! - [`config`]: CLI + file + environment configuration
//! - [`ui`]: plain-text rendering

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]

pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod socket;
pub mod ui;

pub use client::{ChatTransport, Client};
pub use error::{Error, Result};
pub use protocol::{ChatRequest, ChatResponse, StreamFrame};
