//! One editor session: host events in, roasts out.
//!
//! [`RoastSession`] owns the [`CommandExecutor`] (configuration plus trigger engine), the open
//! documents and their latest diagnostics snapshots, and the ghost comments currently shown.
//! Event handlers run to completion synchronously. When the engine fires, the ASCII art is shown
//! right away and roast acquisition is spawned onto the tokio runtime; the ghost comment appears
//! when the text arrives and is removed by a cancellable expiry task.
//!
//! Event handlers spawn tasks, so they must be called from within a tokio runtime.

use crate::provider::FallbackRoaster;
use ragelang_core::{
    ArtSelector, Clock, CommandError, CommandExecutor, CommandResult, DecorationAnchor,
    DecorationStore, Diagnostic, Document, DocumentId, GhostComment, RoastCommand, RoastConfig,
    RoastContext, RoastPicker, RoastRequest, SystemClock,
};
use ragelang_lang::ghost_comment_text;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

/// Where ghost comments are rendered.
pub trait DecorationSink: Send + Sync {
    /// Show `comment` after its line for `duration`.
    fn show(&self, document: &DocumentId, comment: &GhostComment, duration: Duration);

    /// Remove the ghost comment matching `comment` exactly.
    fn clear(&self, document: &DocumentId, comment: &GhostComment);
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Confirmation of a user action.
    Info,
    /// Degraded but working.
    Warning,
    /// A rejected user action.
    Error,
}

/// The output pane and user notices.
pub trait OutputSink: Send + Sync {
    /// Replace the output pane content with `text` and reveal it.
    fn show_output(&self, text: &str);

    /// Show a transient notice.
    fn notify(&self, level: NoticeLevel, message: &str);
}

fn lock_store(store: &Mutex<DecorationStore>) -> MutexGuard<'_, DecorationStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Routes host events to the trigger engine and renders fired roasts.
pub struct RoastSession<C: Clock = SystemClock> {
    executor: CommandExecutor<C>,
    documents: HashMap<DocumentId, Document>,
    snapshots: HashMap<DocumentId, Vec<Diagnostic>>,
    roaster: Arc<FallbackRoaster>,
    art: ArtSelector,
    picker: RoastPicker,
    decorations: Arc<Mutex<DecorationStore>>,
    document_tokens: HashMap<DocumentId, CancellationToken>,
    shutdown: CancellationToken,
    roasts: TaskTracker,
    decoration_sink: Arc<dyn DecorationSink>,
    output_sink: Arc<dyn OutputSink>,
}

impl RoastSession<SystemClock> {
    /// Start a session from `config`, building the roast provider from its API key.
    pub fn new(
        config: RoastConfig,
        decoration_sink: Arc<dyn DecorationSink>,
        output_sink: Arc<dyn OutputSink>,
    ) -> Self {
        let roaster = FallbackRoaster::from_config(&config);
        Self::with_parts(
            CommandExecutor::new(config),
            roaster,
            decoration_sink,
            output_sink,
        )
    }
}

impl<C: Clock> RoastSession<C> {
    /// Assemble a session from an executor and a roaster.
    pub fn with_parts(
        executor: CommandExecutor<C>,
        roaster: FallbackRoaster,
        decoration_sink: Arc<dyn DecorationSink>,
        output_sink: Arc<dyn OutputSink>,
    ) -> Self {
        Self {
            executor,
            documents: HashMap::new(),
            snapshots: HashMap::new(),
            roaster: Arc::new(roaster),
            art: ArtSelector::new(),
            picker: RoastPicker::new(),
            decorations: Arc::new(Mutex::new(DecorationStore::new())),
            document_tokens: HashMap::new(),
            shutdown: CancellationToken::new(),
            roasts: TaskTracker::new(),
            decoration_sink,
            output_sink,
        }
    }

    /// Use a seeded picker for ASCII art choices.
    pub fn with_picker(mut self, picker: RoastPicker) -> Self {
        self.picker = picker;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &RoastConfig {
        self.executor.config()
    }

    /// The command executor and its engine.
    pub fn executor(&self) -> &CommandExecutor<C> {
        &self.executor
    }

    /// Open document by URI.
    pub fn document(&self, document: &DocumentId) -> Option<&Document> {
        self.documents.get(document)
    }

    /// Latest diagnostics snapshot for `document` (empty if none was published).
    pub fn diagnostics(&self, document: &DocumentId) -> &[Diagnostic] {
        self.snapshots
            .get(document)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Ghost comments currently shown for `document`.
    pub fn ghost_comments(&self, document: &DocumentId) -> Vec<GhostComment> {
        lock_store(&self.decorations).for_document(document).to_vec()
    }

    /// Whether the roast provider is remote.
    pub fn has_remote_provider(&self) -> bool {
        self.roaster.has_provider()
    }

    /// A document was opened.
    pub fn did_open(&mut self, uri: &str, language_id: &str, text: &str) {
        let id = DocumentId::new(uri);
        debug!(%id, language_id, "document opened");
        self.documents
            .insert(id.clone(), Document::new(id, language_id, text));
    }

    /// A document's text changed; `text` is the new full text when the host sent it.
    ///
    /// The pending index of the active document is rebuilt from its latest diagnostics snapshot.
    pub fn did_change(&mut self, uri: &str, text: Option<&str>) {
        let id = DocumentId::new(uri);
        if let Some(text) = text {
            match self.documents.get_mut(&id) {
                Some(document) => document.set_text(text),
                None => {
                    self.documents
                        .insert(id.clone(), Document::new(id.clone(), "", text));
                }
            }
        }
        let snapshot = self.snapshots.get(&id).cloned().unwrap_or_default();
        self.executor
            .engine_mut()
            .on_document_changed(&id, &snapshot);
    }

    /// A document was closed: its ghost comments and pending roasts are dropped.
    pub fn did_close(&mut self, uri: &str) {
        let id = DocumentId::new(uri);
        debug!(%id, "document closed");
        self.documents.remove(&id);
        self.snapshots.remove(&id);
        if let Some(token) = self.document_tokens.remove(&id) {
            token.cancel();
        }
        let removed = lock_store(&self.decorations).clear_document(&id);
        for comment in &removed {
            self.decoration_sink.clear(&id, comment);
        }
        if self.executor.engine().is_active(&id) {
            self.executor.engine_mut().clear_active_document();
        }
    }

    /// The host published the full diagnostic set for a document.
    ///
    /// The snapshot is kept for reconciliation; errors of the active document are merged into
    /// the pending index. Nothing fires here.
    pub fn publish_diagnostics(&mut self, uri: &str, diagnostics: Vec<Diagnostic>) {
        let id = DocumentId::new(uri);
        self.executor
            .engine_mut()
            .on_diagnostics_changed(&id, &diagnostics);
        self.snapshots.insert(id, diagnostics);
    }

    /// The cursor of `uri` is now on `line`. Returns the roast request if one fired.
    pub fn cursor_moved(&mut self, uri: &str, line: usize) -> Option<RoastRequest> {
        let id = DocumentId::new(uri);
        self.activate(&id);
        let request = self.executor.engine_mut().on_cursor_moved(line)?;
        self.dispatch(&request);
        Some(request)
    }

    /// Roast `line` of `uri` now. Missing values default to the active document and the cursor
    /// line. Works while automatic roasts are disabled.
    pub fn trigger_roast(&mut self, uri: Option<&str>, line: Option<usize>) -> Option<RoastRequest> {
        if let Some(uri) = uri {
            self.activate(&DocumentId::new(uri));
        }
        let line = line
            .or_else(|| self.executor.engine().cursor_line())
            .unwrap_or(0);
        match self.execute(RoastCommand::TriggerRoast { line }) {
            Ok(CommandResult::Roast(request)) => Some(request),
            _ => {
                debug!("manual roast ignored: no active document");
                None
            }
        }
    }

    /// Execute a user command. Results and errors are also reported through the output sink.
    pub fn execute(&mut self, command: RoastCommand) -> Result<CommandResult, CommandError> {
        let result = match self.executor.execute(command) {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "command rejected");
                self.output_sink.notify(NoticeLevel::Error, &err.to_string());
                return Err(err);
            }
        };

        match &result {
            CommandResult::Roast(request) => self.dispatch(request),
            CommandResult::ApiKeySet => {
                self.roaster = Arc::new(FallbackRoaster::from_config(self.executor.config()));
            }
            _ => {}
        }
        if let Some(message) = result.message() {
            self.output_sink.notify(NoticeLevel::Info, &message);
        }
        Ok(result)
    }

    /// Wait until every in-flight roast acquisition has rendered (or been cancelled).
    pub async fn settle(&self) {
        self.roasts.close();
        self.roasts.wait().await;
        self.roasts.reopen();
    }

    /// End the session: cancel pending roasts and expiries, clear every ghost comment and forget
    /// all engine state.
    pub async fn shutdown(&mut self) {
        info!("session shutting down");
        self.shutdown.cancel();
        self.settle().await;

        let shown: Vec<(DocumentId, Vec<GhostComment>)> = {
            let mut store = lock_store(&self.decorations);
            let ids: Vec<DocumentId> = store.documents().cloned().collect();
            ids.into_iter()
                .map(|id| {
                    let comments = store.clear_document(&id);
                    (id, comments)
                })
                .collect()
        };
        for (id, comments) in &shown {
            for comment in comments {
                self.decoration_sink.clear(id, comment);
            }
        }

        self.document_tokens.clear();
        self.documents.clear();
        self.snapshots.clear();
        let engine = self.executor.engine_mut();
        engine.clear_active_document();
        engine.reset();
    }

    // Switching documents re-arms the new document from its latest snapshot.
    fn activate(&mut self, id: &DocumentId) {
        if !self.executor.engine_mut().set_active_document(id.clone()) {
            return;
        }
        if let Some(snapshot) = self.snapshots.get(id) {
            self.executor
                .engine_mut()
                .on_diagnostics_changed(id, snapshot);
        }
    }

    fn document_token(&mut self, id: &DocumentId) -> CancellationToken {
        self.document_tokens
            .entry(id.clone())
            .or_insert_with(|| self.shutdown.child_token())
            .clone()
    }

    fn dispatch(&mut self, request: &RoastRequest) {
        let messages = request.error_messages();
        let art = self.art.select(&messages, &mut self.picker).render();
        self.output_sink.show_output(&art);

        let (language_id, line_text, column) = match self.documents.get(&request.document) {
            Some(document) => (
                document.language_id().to_string(),
                document.line_text(request.line).unwrap_or_default(),
                document.line_end_column(request.line).unwrap_or(0),
            ),
            None => (String::new(), String::new(), 0),
        };
        let context = RoastContext {
            language_id,
            errored_line_text: line_text,
            error_messages: messages,
        };

        let task = RoastTask {
            document: request.document.clone(),
            anchor: DecorationAnchor::new(request.line, column),
            context,
            duration: self.executor.config().display_duration(),
            token: self.document_token(&request.document),
            roaster: Arc::clone(&self.roaster),
            store: Arc::clone(&self.decorations),
            sink: Arc::clone(&self.decoration_sink),
        };
        self.roasts.spawn(task.run());
    }
}

struct RoastTask {
    document: DocumentId,
    anchor: DecorationAnchor,
    context: RoastContext,
    duration: Duration,
    token: CancellationToken,
    roaster: Arc<FallbackRoaster>,
    store: Arc<Mutex<DecorationStore>>,
    sink: Arc<dyn DecorationSink>,
}

impl RoastTask {
    async fn run(self) {
        let roast = tokio::select! {
            _ = self.token.cancelled() => {
                debug!(document = %self.document, "roast dropped: document closed");
                return;
            }
            roast = self.roaster.roast(&self.context) => roast,
        };
        info!(document = %self.document, line = self.anchor.line, %roast, "roast ready");

        let comment = GhostComment::new(
            self.anchor,
            ghost_comment_text(&self.context.language_id, &roast),
        );
        {
            let mut store = lock_store(&self.store);
            // Checked under the lock so a concurrent close either sees this comment or stops it.
            if self.token.is_cancelled() {
                return;
            }
            store.add(&self.document, comment.clone());
        }
        self.sink.show(&self.document, &comment, self.duration);

        tokio::spawn(expire(
            self.document,
            comment,
            self.duration,
            self.token,
            self.store,
            self.sink,
        ));
    }
}

async fn expire(
    document: DocumentId,
    comment: GhostComment,
    duration: Duration,
    token: CancellationToken,
    store: Arc<Mutex<DecorationStore>>,
    sink: Arc<dyn DecorationSink>,
) {
    tokio::select! {
        _ = token.cancelled() => {}
        _ = tokio::time::sleep(duration) => {
            let removed = lock_store(&store).remove_exact(&document, &comment);
            if removed {
                sink.clear(&document, &comment);
            }
        }
    }
}
