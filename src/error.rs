//! Error types for the submission watcher.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use submission_watcher::{Result, Error};
//!
//! async fn example(watcher: &Watcher) -> Result<()> {
//!     watcher.end_monitoring(TabId::new(1)).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Session | [`Error::Attach`], [`Error::Command`] |
//! | Tab context | [`Error::TabNotFound`], [`Error::MalformedProblemUrl`] |
//! | Verdict | [`Error::BodyUnavailable`] |
//! | Reporting | [`Error::MissingCredential`], [`Error::Delivery`], [`Error::Rejected`] |
//! | External | [`Error::Json`], [`Error::Url`] |
//!
//! Several variants describe conditions the watcher treats as expected
//! rather than failures (a body evicted before fetch, an anonymous
//! session); [`Error::is_benign`] identifies those so callers can drop
//! them without a diagnostic.

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

use crate::identifiers::{RequestId, TabId};

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Session Errors
    // ========================================================================
    /// Instrumentation session could not be attached to a tab.
    ///
    /// Terminal for that monitoring attempt: the tab is unregistered
    /// and no network observation is ever enabled.
    #[error("Failed to attach to tab {tab_id}: {message}")]
    Attach {
        /// Tab the attach targeted.
        tab_id: TabId,
        /// Failure reason reported by the instrumentation collaborator.
        message: String,
    },

    /// An instrumentation command failed after the session was attached.
    ///
    /// Non-terminal: the session stays nominally attached in a degraded
    /// state (it may never observe submission traffic).
    #[error("Command {method} failed on tab {tab_id}: {message}")]
    Command {
        /// Tab the command targeted.
        tab_id: TabId,
        /// Protocol method name (e.g. `Network.enable`).
        method: String,
        /// Failure reason.
        message: String,
    },

    // ========================================================================
    // Tab Context Errors
    // ========================================================================
    /// Tab no longer exists.
    ///
    /// Returned when tab context cannot be resolved at report time.
    #[error("Tab not found: {tab_id}")]
    TabNotFound {
        /// The missing tab ID.
        tab_id: TabId,
    },

    /// Tab URL does not contain a parseable problem identifier.
    ///
    /// The `problems` path segment is absent or is the final segment.
    #[error("Could not parse problem slug from URL: {url}")]
    MalformedProblemUrl {
        /// The URL that failed to parse.
        url: String,
    },

    // ========================================================================
    // Verdict Errors
    // ========================================================================
    /// Response body could not be retrieved for a finished request.
    ///
    /// Expected when the browser has already evicted the body; never
    /// surfaced as a diagnostic.
    #[error("Response body unavailable for request {request_id}")]
    BodyUnavailable {
        /// The request whose body was requested.
        request_id: RequestId,
    },

    // ========================================================================
    // Reporting Errors
    // ========================================================================
    /// No stored credential.
    ///
    /// Expected for anonymous sessions; reports are skipped silently.
    #[error("No stored credential")]
    MissingCredential,

    /// Report could not be delivered to the collector.
    ///
    /// Transport-level failure; there is no retry.
    #[error("Failed to deliver report: {message}")]
    Delivery {
        /// Description of the transport failure.
        message: String,
    },

    /// Collector rejected the report at the application level.
    ///
    /// Carries the `detail` field from the collector response.
    #[error("Collector rejected report: {detail}")]
    Rejected {
        /// Error detail from the collector.
        detail: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parse error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates an attach failure error.
    #[inline]
    pub fn attach(tab_id: TabId, message: impl Into<String>) -> Self {
        Self::Attach {
            tab_id,
            message: message.into(),
        }
    }

    /// Creates a command failure error.
    #[inline]
    pub fn command(tab_id: TabId, method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Command {
            tab_id,
            method: method.into(),
            message: message.into(),
        }
    }

    /// Creates a tab not found error.
    #[inline]
    pub fn tab_not_found(tab_id: TabId) -> Self {
        Self::TabNotFound { tab_id }
    }

    /// Creates a malformed problem URL error.
    #[inline]
    pub fn malformed_problem_url(url: impl Into<String>) -> Self {
        Self::MalformedProblemUrl { url: url.into() }
    }

    /// Creates a body unavailable error.
    #[inline]
    pub fn body_unavailable(request_id: RequestId) -> Self {
        Self::BodyUnavailable { request_id }
    }

    /// Creates a delivery failure error.
    #[inline]
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }

    /// Creates an application-level rejection error.
    #[inline]
    pub fn rejected(detail: impl Into<String>) -> Self {
        Self::Rejected {
            detail: detail.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this error is an expected condition that should
    /// be dropped without a diagnostic.
    ///
    /// Covers evicted response bodies and anonymous sessions.
    #[inline]
    #[must_use]
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::BodyUnavailable { .. } | Self::MissingCredential)
    }

    /// Returns `true` if this is a session-level error.
    #[inline]
    #[must_use]
    pub fn is_session_error(&self) -> bool {
        matches!(self, Self::Attach { .. } | Self::Command { .. })
    }

    /// Returns `true` if this is a reporting error.
    #[inline]
    #[must_use]
    pub fn is_report_error(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential
                | Self::Delivery { .. }
                | Self::Rejected { .. }
                | Self::TabNotFound { .. }
                | Self::MalformedProblemUrl { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::attach(TabId::new(7), "target closed");
        assert_eq!(err.to_string(), "Failed to attach to tab 7: target closed");
    }

    #[test]
    fn test_command_error_display() {
        let err = Error::command(TabId::new(1), "Network.enable", "session gone");
        assert_eq!(
            err.to_string(),
            "Command Network.enable failed on tab 1: session gone"
        );
    }

    #[test]
    fn test_is_benign() {
        let body = Error::body_unavailable(RequestId::from("r1"));
        let cred = Error::MissingCredential;
        let attach = Error::attach(TabId::new(1), "nope");

        assert!(body.is_benign());
        assert!(cred.is_benign());
        assert!(!attach.is_benign());
    }

    #[test]
    fn test_is_session_error() {
        let attach = Error::attach(TabId::new(1), "nope");
        let cmd = Error::command(TabId::new(1), "Network.enable", "nope");
        let other = Error::delivery("timeout");

        assert!(attach.is_session_error());
        assert!(cmd.is_session_error());
        assert!(!other.is_session_error());
    }

    #[test]
    fn test_is_report_error() {
        assert!(Error::MissingCredential.is_report_error());
        assert!(Error::rejected("duplicate").is_report_error());
        assert!(Error::malformed_problem_url("https://x/").is_report_error());
        assert!(!Error::attach(TabId::new(1), "nope").is_report_error());
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
