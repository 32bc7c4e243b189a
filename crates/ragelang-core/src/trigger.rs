//! The trigger engine: decides when a roast fires.
//!
//! # Overview
//!
//! The engine owns three pieces of state for one editor session:
//!
//! - a [`PendingErrorIndex`] (line -> error diagnostics not yet roasted)
//! - the last observed cursor line
//! - a [`CooldownClock`]
//!
//! Diagnostics arriving never fire anything; they only arm lines. A roast fires when the cursor
//! *leaves* an armed line and the cooldown has elapsed. Firing consumes the line's entry. A gated
//! departure (cooldown still running) leaves the entry armed, so the next departure from that
//! line after the cooldown fires.
//!
//! # Example
//!
//! ```rust
//! use ragelang_core::{Diagnostic, DocumentId, ManualClock, TriggerEngine};
//! use std::time::Duration;
//!
//! let doc = DocumentId::new("file:///main.rs");
//! let mut engine = TriggerEngine::with_clock(ManualClock::new(), Duration::from_secs(3));
//! engine.set_active_document(doc.clone());
//!
//! engine.on_diagnostics_changed(&doc, &[Diagnostic::error(2, "x undefined")]);
//! assert!(engine.on_cursor_moved(2).is_none());
//! assert!(engine.on_cursor_moved(2).is_none());
//!
//! let fire = engine.on_cursor_moved(9).expect("departing line 2 fires");
//! assert_eq!(fire.line, 2);
//! assert!(!engine.pending().contains(2));
//! ```

use crate::cooldown::{Clock, CooldownClock, DEFAULT_COOLDOWN, SystemClock};
use crate::diagnostics::Diagnostic;
use crate::document::DocumentId;
use crate::pending::PendingErrorIndex;
use std::time::Duration;
use tracing::{debug, info};

/// What caused a roast request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    /// The cursor left a line with pending errors.
    Automatic,
    /// The user explicitly asked for a roast.
    Manual,
}

/// A decision to roast a line, handed to the renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoastRequest {
    /// Document the line belongs to.
    pub document: DocumentId,
    /// Zero-based line being roasted (the line the cursor just left, for automatic fires).
    pub line: usize,
    /// Error diagnostics that were pending on the line (empty for some manual triggers).
    pub errors: Vec<Diagnostic>,
    /// What caused the request.
    pub trigger: TriggerKind,
}

impl RoastRequest {
    /// Error messages in append order.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|d| d.message.clone()).collect()
    }
}

/// Per-session trigger state machine.
#[derive(Debug)]
pub struct TriggerEngine<C: Clock = SystemClock> {
    clock: C,
    cooldown: CooldownClock,
    pending: PendingErrorIndex,
    cursor_line: Option<usize>,
    active_document: Option<DocumentId>,
    enabled: bool,
}

impl TriggerEngine<SystemClock> {
    /// Create an engine using the system clock and the default cooldown.
    pub fn new() -> Self {
        Self::with_clock(SystemClock, DEFAULT_COOLDOWN)
    }
}

impl Default for TriggerEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TriggerEngine<C> {
    /// Create an engine with an explicit clock and cooldown interval.
    pub fn with_clock(clock: C, cooldown: Duration) -> Self {
        Self {
            clock,
            cooldown: CooldownClock::new(cooldown),
            pending: PendingErrorIndex::new(),
            cursor_line: None,
            active_document: None,
            enabled: true,
        }
    }

    /// Whether automatic roasts are enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable automatic roasts. Pending state is kept.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Current cooldown interval.
    pub fn cooldown(&self) -> Duration {
        self.cooldown.interval()
    }

    /// Change the cooldown interval.
    pub fn set_cooldown(&mut self, interval: Duration) {
        self.cooldown.set_interval(interval);
    }

    /// Read access to the cooldown clock.
    pub fn cooldown_clock(&self) -> &CooldownClock {
        &self.cooldown
    }

    /// Pending errors per line.
    pub fn pending(&self) -> &PendingErrorIndex {
        &self.pending
    }

    /// The last observed cursor line, if any.
    pub fn cursor_line(&self) -> Option<usize> {
        self.cursor_line
    }

    /// The document the engine currently tracks.
    pub fn active_document(&self) -> Option<&DocumentId> {
        self.active_document.as_ref()
    }

    /// Returns `true` if `document` is the active document.
    pub fn is_active(&self, document: &DocumentId) -> bool {
        self.active_document.as_ref() == Some(document)
    }

    /// Track `document` as the active one.
    ///
    /// Switching to a different document drops pending errors and forgets the cursor line, since
    /// both are only meaningful for the document they were observed in. Returns `true` if the
    /// active document changed.
    pub fn set_active_document(&mut self, document: DocumentId) -> bool {
        if self.is_active(&document) {
            return false;
        }
        debug!(%document, "active document changed");
        self.pending.clear();
        self.cursor_line = None;
        self.active_document = Some(document);
        true
    }

    /// Stop tracking any document.
    pub fn clear_active_document(&mut self) {
        self.pending.clear();
        self.cursor_line = None;
        self.active_document = None;
    }

    /// Record error diagnostics reported for `document`.
    ///
    /// Errors are appended to their line's entry (merge). Nothing fires here. Returns the number
    /// of errors indexed; diagnostics for another document, or a disabled engine, index nothing.
    pub fn on_diagnostics_changed(
        &mut self,
        document: &DocumentId,
        diagnostics: &[Diagnostic],
    ) -> usize {
        if !self.enabled || !self.is_active(document) {
            return 0;
        }
        let indexed = self.pending.merge(diagnostics);
        if indexed > 0 {
            debug!(%document, indexed, lines = self.pending.len(), "errors armed");
        }
        indexed
    }

    /// Observe a cursor move to `new_line`.
    ///
    /// Fires for the *previous* line when it differs from `new_line`, has pending errors, and the
    /// cooldown has elapsed. The cursor line is updated unconditionally afterwards.
    pub fn on_cursor_moved(&mut self, new_line: usize) -> Option<RoastRequest> {
        let previous = self.cursor_line.replace(new_line);

        if !self.enabled {
            return None;
        }
        let document = self.active_document.clone()?;
        let line = previous.filter(|&line| line != new_line)?;
        if !self.pending.contains(line) {
            return None;
        }

        let now = self.clock.now();
        if !self.cooldown.is_ready(now) {
            debug!(
                line,
                remaining_ms = self.cooldown.remaining(now).as_millis() as u64,
                "roast gated by cooldown"
            );
            return None;
        }

        self.cooldown.record_fire(now);
        let errors = self.pending.take(line).unwrap_or_default();
        info!(%document, line, errors = errors.len(), "roast fired");
        Some(RoastRequest {
            document,
            line,
            errors,
            trigger: TriggerKind::Automatic,
        })
    }

    /// Reconcile pending errors with the current full diagnostics snapshot of `document`.
    ///
    /// This replaces the index rather than merging into it, so lines whose errors were fixed
    /// disappear and repeated snapshots do not pile up duplicates.
    pub fn on_document_changed(&mut self, document: &DocumentId, snapshot: &[Diagnostic]) {
        if !self.enabled || !self.is_active(document) {
            return;
        }
        self.pending.replace(snapshot);
        debug!(%document, lines = self.pending.len(), "pending errors reconciled");
    }

    /// Force a roast for `line` of the active document.
    ///
    /// Skips the departure, pending and cooldown checks and never touches the cooldown clock or
    /// the pending entry. Carries whatever errors are indexed for `line`, possibly none. Returns
    /// `None` only when there is no active document.
    pub fn manual_trigger(&self, line: usize) -> Option<RoastRequest> {
        let document = self.active_document.clone()?;
        let errors = self.pending.errors_at(line).to_vec();
        info!(%document, line, errors = errors.len(), "manual roast requested");
        Some(RoastRequest {
            document,
            line,
            errors,
            trigger: TriggerKind::Manual,
        })
    }

    /// Forget pending errors, cursor line and cooldown history.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.cursor_line = None;
        self.cooldown = CooldownClock::new(self.cooldown.interval());
    }
}
