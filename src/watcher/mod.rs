//! Submission watcher core.
//!
//! [`Watcher`] is the coordinating component: it owns the two mutable
//! registries (monitored tabs, pending candidate requests) and wires the
//! external collaborators together. Everything else in this module tree
//! is an `impl Watcher` facet or a state type it owns:
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`registry`] | active-tab set, attach gate |
//! | [`session`] | attach/detach state machine, monitoring triggers |
//! | [`correlator`] | responseReceived/loadingFinished correlation |
//! | [`verdict`] | body fetch + verdict parse + acceptance gate |
//! | [`reporter`] | slug derivation, credential, collector delivery |
//!
//! # Event model
//!
//! The embedder drives the watcher from its browser event loop: each
//! inbound event (`begin_monitoring`, `on_navigation_complete`,
//! `on_network_event`, `on_session_detached`) is dispatched as its own
//! task, and the watcher awaits each continuation chain inline. Handlers
//! for the same process never run concurrently over the shared state:
//! the registries are locked per step, never across an await point. A
//! detach stops further event delivery for that tab, but a body fetch or
//! report already in flight runs to completion on its own.

// ============================================================================
// Submodules
// ============================================================================

/// Request correlation between response and finish events.
pub mod correlator;

/// Tab registry (active monitoring set).
pub mod registry;

/// Submission reporting to the collector.
pub mod reporter;

/// Session attach/detach lifecycle.
pub mod session;

/// Verdict fetching and interpretation.
pub mod verdict;

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::collector::Collector;
use crate::config::WatcherConfig;
use crate::identifiers::TabId;
use crate::instrumentation::{CredentialStore, Instrumentation, NetworkEvent, TabContext};

// ============================================================================
// Re-exports
// ============================================================================

pub use correlator::{PendingRequest, RequestCorrelator};
pub use registry::TabRegistry;
pub use session::MonitorOutcome;
pub use verdict::SubmissionVerdict;

// ============================================================================
// Watcher
// ============================================================================

/// Submission-detection coordinator.
///
/// Cheap to clone; all clones share the same state and collaborators.
#[derive(Clone)]
pub struct Watcher {
    pub(crate) inner: Arc<WatcherInner>,
}

/// Shared state behind a [`Watcher`].
pub(crate) struct WatcherInner {
    /// Site and collector configuration.
    pub(crate) config: WatcherConfig,

    /// Tabs with an active monitoring session.
    pub(crate) registry: Mutex<TabRegistry>,

    /// Candidate verdict requests awaiting their finish event.
    pub(crate) correlator: Mutex<RequestCorrelator>,

    /// Debugging-protocol collaborator.
    pub(crate) instrumentation: Arc<dyn Instrumentation>,

    /// Tab lookup collaborator.
    pub(crate) tabs: Arc<dyn TabContext>,

    /// Credential store collaborator.
    pub(crate) credentials: Arc<dyn CredentialStore>,

    /// Report delivery collaborator.
    pub(crate) collector: Arc<dyn Collector>,
}

impl Watcher {
    /// Creates a watcher over the given collaborators.
    #[must_use]
    pub fn new(
        config: WatcherConfig,
        instrumentation: Arc<dyn Instrumentation>,
        tabs: Arc<dyn TabContext>,
        credentials: Arc<dyn CredentialStore>,
        collector: Arc<dyn Collector>,
    ) -> Self {
        Self {
            inner: Arc::new(WatcherInner {
                config,
                registry: Mutex::new(TabRegistry::new()),
                correlator: Mutex::new(RequestCorrelator::new()),
                instrumentation,
                tabs,
                credentials,
                collector,
            }),
        }
    }

    /// Returns the watcher configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &WatcherConfig {
        &self.inner.config
    }

    /// Returns `true` if `tab_id` has an active monitoring session.
    #[inline]
    #[must_use]
    pub fn is_monitoring(&self, tab_id: TabId) -> bool {
        self.inner.registry.lock().is_active(tab_id)
    }

    /// Returns the number of actively monitored tabs.
    #[inline]
    #[must_use]
    pub fn monitored_tab_count(&self) -> usize {
        self.inner.registry.lock().len()
    }

    /// Returns the number of candidate requests awaiting a finish event.
    #[inline]
    #[must_use]
    pub fn pending_request_count(&self) -> usize {
        self.inner.correlator.lock().len()
    }

    /// Handles a network lifecycle event from the session on `tab_id`.
    ///
    /// `ResponseReceived` buffers the request when its URL matches the
    /// submission-detail marker; everything else is dropped unstored.
    /// `LoadingFinished` consumes the pending entry, if any, and runs
    /// the interpretation chain. A finish event for an identifier that
    /// was never observed (or arrived before its response event) is a
    /// no-op.
    pub async fn on_network_event(&self, tab_id: TabId, event: NetworkEvent) {
        match event {
            NetworkEvent::ResponseReceived { request_id, url } => {
                if self.inner.config.is_submission_detail(&url) {
                    trace!(%tab_id, %request_id, %url, "Buffering candidate verdict response");
                    self.inner.correlator.lock().observe_response(request_id, url);
                }
            }

            NetworkEvent::LoadingFinished { request_id } => {
                let pending = self.inner.correlator.lock().finish(&request_id);
                if pending.is_some() {
                    self.interpret(tab_id, request_id).await;
                }
            }
        }
    }

    /// Fire-and-forget variant of [`on_network_event`](Self::on_network_event).
    ///
    /// Spawns the handler as its own task so the caller returns
    /// immediately; the continuation (body fetch, verdict parse, report)
    /// interleaves with other events on the runtime. A session detach
    /// does not abort a chain already in flight.
    pub fn dispatch_network_event(
        &self,
        tab_id: TabId,
        event: NetworkEvent,
    ) -> tokio::task::JoinHandle<()> {
        let watcher = self.clone();
        tokio::spawn(async move { watcher.on_network_event(tab_id, event).await })
    }
}

// ============================================================================
// Tests
// ============================================================================
