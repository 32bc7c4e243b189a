#![warn(missing_docs)]
//! `ragelang-runtime` - the async half of ragelang.
//!
//! The trigger engine in `ragelang-core` is synchronous and clock-driven. This crate adds what
//! happens after a fire decision:
//!
//! - [`provider`] - roast text from a remote generative API, with a mandatory local fallback
//! - [`session`] - one editor session: document and diagnostics bookkeeping, dispatch of roast
//!   acquisition onto tokio, ghost comments with cancellable expiry
//!
//! Rendering is abstracted behind [`DecorationSink`] and [`OutputSink`]; the `ragelang` binary
//! implements them as LSP notifications.

pub mod error;
pub mod provider;
pub mod session;

pub use error::ProviderError;
pub use provider::{FallbackRoaster, GeminiProvider, RoastProvider};
pub use session::{DecorationSink, NoticeLevel, OutputSink, RoastSession};
