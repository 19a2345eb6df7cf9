//! Collaborator interfaces at the browser boundary.
//!
//! The watcher core never talks to a browser directly. It consumes three
//! narrow traits, each wrapping one browser facility:
//!
//! | Trait | Facility |
//! |-------|----------|
//! | [`Instrumentation`] | debugger attach/detach and protocol commands |
//! | [`TabContext`] | tab lookup (current URL) |
//! | [`CredentialStore`] | scoped extension storage |
//!
//! Implementations adapt whatever transport reaches the browser (a CDP
//! WebSocket, a WebExtension bridge). Tests substitute recording mocks.
//!
//! Inbound traffic arrives as [`NetworkEvent`] values, which the embedder
//! feeds into [`Watcher::on_network_event`](crate::Watcher::on_network_event).

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64Standard;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::identifiers::{RequestId, TabId};

// ============================================================================
// Instrumentation
// ============================================================================

/// Debugging-protocol access to a browser tab.
///
/// Mirrors the three primitives the watcher needs: session attach,
/// session detach, and command dispatch. Every call may fail with a
/// last-error condition which implementations surface as [`crate::Error`].
#[async_trait]
pub trait Instrumentation: Send + Sync {
    /// Attaches a debugging session to `tab_id` at `protocol_version`.
    async fn attach_session(&self, tab_id: TabId, protocol_version: &str) -> Result<()>;

    /// Detaches the debugging session from `tab_id`.
    async fn detach_session(&self, tab_id: TabId) -> Result<()>;

    /// Sends a protocol command (`method` + `params`) to the session on
    /// `tab_id` and returns the raw result payload.
    async fn send_command(&self, tab_id: TabId, method: &str, params: Value) -> Result<Value>;
}

// ============================================================================
// TabContext
// ============================================================================

/// Tab lookup facility.
#[async_trait]
pub trait TabContext: Send + Sync {
    /// Returns the current URL of `tab_id`.
    ///
    /// # Errors
    ///
    /// [`crate::Error::TabNotFound`] if the tab no longer exists.
    async fn tab_url(&self, tab_id: TabId) -> Result<String>;
}

// ============================================================================
// CredentialStore
// ============================================================================

/// Scoped key/value credential storage.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the stored value for `key`, or `None` if absent.
    ///
    /// Absence is an expected state (anonymous session), not an error.
    async fn get(&self, key: &str) -> Result<Option<String>>;
}

// ============================================================================
// NetworkEvent
// ============================================================================

/// A network lifecycle event delivered by an instrumentation session.
///
/// Only the two events the watcher correlates are modeled; the embedder
/// drops everything else before it reaches the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkEvent {
    /// Response headers received for a request.
    ResponseReceived {
        /// Protocol-assigned request identifier.
        request_id: RequestId,
        /// URL of the response.
        url: String,
    },

    /// Request finished loading; its body is now retrievable.
    LoadingFinished {
        /// Protocol-assigned request identifier.
        request_id: RequestId,
    },
}

// ============================================================================
// DetachReason
// ============================================================================

/// Why an instrumentation session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetachReason {
    /// The tab was closed or navigated away.
    TargetClosed,

    /// The user cancelled debugging (e.g. dismissed the infobar).
    CanceledByUser,

    /// Any other protocol-reported reason.
    Other(String),
}

impl DetachReason {
    /// Parses a protocol reason string.
    #[must_use]
    pub fn from_protocol(reason: &str) -> Self {
        match reason {
            "target_closed" => Self::TargetClosed,
            "canceled_by_user" => Self::CanceledByUser,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the protocol-facing reason string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::TargetClosed => "target_closed",
            Self::CanceledByUser => "canceled_by_user",
            Self::Other(reason) => reason,
        }
    }
}

// ============================================================================
// ResponseBody
// ============================================================================

/// Result payload of a `Network.getResponseBody` command.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseBody {
    /// Body content, possibly base64-encoded.
    pub body: String,

    /// Whether `body` is base64-encoded.
    #[serde(rename = "base64Encoded", default)]
    pub base64_encoded: bool,
}

impl ResponseBody {
    /// Parses a `Network.getResponseBody` result payload.
    pub fn from_command_result(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Returns the decoded body text.
    ///
    /// Base64-encoded bodies that do not decode to valid UTF-8 yield
    /// `None`; such bodies can never carry a JSON verdict.
    #[must_use]
    pub fn decode(&self) -> Option<String> {
        if self.base64_encoded {
            let bytes = Base64Standard.decode(&self.body).ok()?;
            String::from_utf8(bytes).ok()
        } else {
            Some(self.body.clone())
        }
    }
}

// ============================================================================
// Command Helpers
// ============================================================================

/// Builds `Network.getResponseBody` params for `request_id`.
#[inline]
#[must_use]
pub(crate) fn response_body_params(request_id: &RequestId) -> Value {
    serde_json::json!({ "requestId": request_id })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detach_reason_roundtrip() {
        assert_eq!(
            DetachReason::from_protocol("target_closed"),
            DetachReason::TargetClosed
        );
        assert_eq!(
            DetachReason::from_protocol("canceled_by_user"),
            DetachReason::CanceledByUser
        );
        assert_eq!(
            DetachReason::from_protocol("replaced_with_devtools"),
            DetachReason::Other("replaced_with_devtools".to_string())
        );
        assert_eq!(DetachReason::TargetClosed.as_str(), "target_closed");
    }

    #[test]
    fn test_response_body_plain() {
        let value = serde_json::json!({ "body": "{\"status_code\":10}", "base64Encoded": false });
        let body = ResponseBody::from_command_result(value).expect("parse");
        assert_eq!(body.decode().as_deref(), Some("{\"status_code\":10}"));
    }

    #[test]
    fn test_response_body_base64() {
        // "hello" base64-encoded
        let value = serde_json::json!({ "body": "aGVsbG8=", "base64Encoded": true });
        let body = ResponseBody::from_command_result(value).expect("parse");
        assert_eq!(body.decode().as_deref(), Some("hello"));
    }

    #[test]
    fn test_response_body_invalid_base64() {
        let value = serde_json::json!({ "body": "!!!not-base64!!!", "base64Encoded": true });
        let body = ResponseBody::from_command_result(value).expect("parse");
        assert_eq!(body.decode(), None);
    }

    #[test]
    fn test_response_body_default_encoding_flag() {
        let value = serde_json::json!({ "body": "plain" });
        let body = ResponseBody::from_command_result(value).expect("parse");
        assert!(!body.base64_encoded);
        assert_eq!(body.decode().as_deref(), Some("plain"));
    }

    #[test]
    fn test_response_body_params() {
        let params = response_body_params(&RequestId::from("req-9"));
        assert_eq!(params["requestId"], "req-9");
    }
}
