//! Instrumentation session lifecycle.
//!
//! Per-tab state machine: `UNMONITORED → ATTACHING → ATTACHED →
//! UNMONITORED`, with `ATTACHING → UNMONITORED` directly on attach
//! failure. Two triggers start a session: an explicit request for the
//! active tab, and a completed navigation to a problem page. The sole
//! removal paths are the detach event and [`Watcher::end_monitoring`].

// ============================================================================
// Imports
// ============================================================================

use serde_json::json;
use tracing::{debug, error};

use crate::error::Result;
use crate::identifiers::TabId;
use crate::instrumentation::DetachReason;

use super::Watcher;

// ============================================================================
// Constants
// ============================================================================

/// Protocol command enabling network observation on a session.
const NETWORK_ENABLE: &str = "Network.enable";

// ============================================================================
// MonitorOutcome
// ============================================================================

/// Result of an explicit start-monitoring request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorOutcome {
    /// The tab passed the gate and an attach was initiated.
    ///
    /// The attach itself may still fail; that surfaces as a diagnostic
    /// and unregisters the tab, never as a different outcome.
    Started,

    /// The tab already has an active session; nothing was changed.
    AlreadyActive,

    /// The tab URL is not a recognized problem page.
    NotProblemPage,
}

// ============================================================================
// Watcher - Session Lifecycle
// ============================================================================

impl Watcher {
    /// Explicit trigger: begin monitoring `tab_id` currently showing `url`.
    ///
    /// Validates the URL against the problem-page marker, gates on the
    /// tab registry, then runs the attach chain.
    pub async fn begin_monitoring(&self, tab_id: TabId, url: &str) -> MonitorOutcome {
        if !self.inner.config.is_problem_page(url) {
            debug!(%tab_id, url, "Not a recognized problem page");
            return MonitorOutcome::NotProblemPage;
        }

        if self.inner.registry.lock().try_begin(tab_id) {
            debug!(%tab_id, "Monitoring already active");
            return MonitorOutcome::AlreadyActive;
        }

        self.attach(tab_id).await;
        MonitorOutcome::Started
    }

    /// Implicit trigger: a tab finished loading a navigation to `url`.
    ///
    /// Attaches automatically when the URL is a problem page and the tab
    /// is not already monitored.
    pub async fn on_navigation_complete(&self, tab_id: TabId, url: &str) {
        if !self.inner.config.is_problem_page(url) {
            return;
        }

        if self.inner.registry.lock().try_begin(tab_id) {
            return;
        }

        debug!(%tab_id, url, "Auto-attaching after navigation");
        self.attach(tab_id).await;
    }

    /// Detach event listener.
    ///
    /// Any detach for a monitored tab (voluntary, user action, tab close
    /// or navigation away) returns it to the unmonitored state. A later
    /// [`begin_monitoring`](Self::begin_monitoring) may attach it again.
    pub fn on_session_detached(&self, tab_id: TabId, reason: &DetachReason) {
        debug!(%tab_id, reason = reason.as_str(), "Instrumentation session detached");
        self.inner.registry.lock().end(tab_id);
    }

    /// Explicitly stops monitoring `tab_id`.
    ///
    /// Removes the tab from the registry unconditionally, then requests
    /// a session detach.
    ///
    /// # Errors
    ///
    /// Propagates the detach failure; the registry removal has already
    /// happened regardless.
    pub async fn end_monitoring(&self, tab_id: TabId) -> Result<()> {
        self.inner.registry.lock().end(tab_id);
        self.inner.instrumentation.detach_session(tab_id).await
    }

    /// Attach chain: session attach, then enable network observation.
    ///
    /// Attach failure unregisters the tab and stops the chain. A failed
    /// `Network.enable` is surfaced but leaves the session attached in a
    /// degraded state; the tab stays nominally monitored though it will
    /// never see submission events.
    async fn attach(&self, tab_id: TabId) {
        let result = self
            .inner
            .instrumentation
            .attach_session(tab_id, &self.inner.config.protocol_version)
            .await;

        if let Err(err) = result {
            error!(%tab_id, error = %err, "Failed to attach instrumentation session");
            self.inner.registry.lock().end(tab_id);
            return;
        }

        debug!(%tab_id, "Instrumentation session attached");

        match self
            .inner
            .instrumentation
            .send_command(tab_id, NETWORK_ENABLE, json!({}))
            .await
        {
            Ok(_) => debug!(%tab_id, "Network monitoring enabled"),
            Err(err) => {
                error!(%tab_id, error = %err, "Failed to enable network monitoring");
            }
        }
    }
}
