#![warn(missing_docs)]
//! `ragelang-lsp` - LSP integration for `ragelang`.
//!
//! This crate contains the wire side of the stdio bridge: JSON-RPC stdio framing, parsing of
//! host notifications into [`HostEvent`]s (diagnostics, document sync, cursor moves, commands),
//! and builders for the notifications sent back to the host.

pub mod client_messages;
pub mod host_events;
pub mod lsp_transport;

pub use client_messages::{
    MessageType, clear_ghost_comment, ghost_comment, output, server_capabilities, show_message,
};
pub use host_events::{
    HostCommand, HostEvent, command_ids, diagnostic_from_value, severity_from_u64,
};
pub use lsp_transport::{
    MAX_MESSAGE_LEN, METHOD_NOT_FOUND, error_response, notification, read_lsp_message, response,
    write_lsp_message,
};
