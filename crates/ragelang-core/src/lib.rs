#![warn(missing_docs)]
//! RageLang Core - headless error-to-roast trigger pipeline
//!
//! # Overview
//!
//! `ragelang-core` decides *when* an editor should roast the user for a compile/lint error, and
//! which errors the roast is about. It does not talk to an editor, a network or a terminal:
//! hosts feed it diagnostics, cursor moves and document edits, and it answers with
//! [`RoastRequest`]s for the renderers.
//!
//! The rule: errors arm the line they are on; when the cursor *leaves* an armed line and the
//! cooldown has elapsed, the line fires once and is disarmed. Document edits reconcile the armed
//! lines with the latest full diagnostics snapshot.
//!
//! # Quick Start
//!
//! ```rust
//! use ragelang_core::{Diagnostic, DiagnosticSeverity, DocumentId, TriggerEngine};
//!
//! let doc = DocumentId::new("file:///src/lib.rs");
//! let mut engine = TriggerEngine::new();
//! engine.set_active_document(doc.clone());
//!
//! engine.on_diagnostics_changed(
//!     &doc,
//!     &[
//!         Diagnostic::error(4, "expected `;`"),
//!         Diagnostic::new(6, DiagnosticSeverity::Warning, "unused variable"),
//!     ],
//! );
//!
//! engine.on_cursor_moved(4);
//! let roast = engine.on_cursor_moved(5).unwrap();
//! assert_eq!(roast.line, 4);
//! assert_eq!(roast.error_messages(), vec!["expected `;`".to_string()]);
//! ```
//!
//! # Module Description
//!
//! - [`trigger`] - the trigger engine state machine
//! - [`pending`] - per-line pending error index
//! - [`cooldown`] - cooldown clock and time sources
//! - [`diagnostics`] - line-keyed diagnostics model
//! - [`document`] - open documents (rope-backed text, language id)
//! - [`decorations`] - ghost-comment store
//! - [`roasts`] - fallback roasts, prompt building, text normalization
//! - [`art`] - ASCII art faces
//! - [`config`] - configuration and persistence
//! - [`commands`] - user command interface

pub mod art;
pub mod commands;
pub mod config;
pub mod cooldown;
pub mod decorations;
pub mod diagnostics;
pub mod document;
pub mod pending;
pub mod roasts;
pub mod trigger;

pub use art::{ArtCategory, ArtSelector, COMPILER_ART, CompilerArt, art_for};
pub use commands::{CommandError, CommandExecutor, CommandResult, RoastCommand};
pub use config::{ConfigError, RoastConfig, parse_cooldown_input};
pub use cooldown::{Clock, CooldownClock, DEFAULT_COOLDOWN, ManualClock, SystemClock};
pub use decorations::{DEFAULT_DISPLAY_DURATION, DecorationAnchor, DecorationStore, GhostComment};
pub use diagnostics::{Diagnostic, DiagnosticSeverity, errors_only};
pub use document::{Document, DocumentId};
pub use pending::PendingErrorIndex;
pub use roasts::{
    FALLBACK_ROASTS, MAX_ROAST_WIDTH, ROAST_MARKER, RoastContext, RoastPicker, normalize_roast,
};
pub use trigger::{RoastRequest, TriggerEngine, TriggerKind};
