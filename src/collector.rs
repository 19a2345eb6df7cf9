//! Outbound reporting to the submission collector.
//!
//! The collector is a remote service recording accepted submissions. Its
//! contract is a single authenticated call:
//!
//! ```text
//! POST {endpoint}
//! Content-Type: application/json
//! Authorization: Bearer <token>
//!
//! { "problem_slug": "...", "contest_id": "..." }
//! ```
//!
//! The response is JSON; a `detail` field signals an application-level
//! rejection, its absence signals acceptance. Delivery is best-effort
//! with no retry.
//!
//! [`Collector`] is the seam; [`HttpCollector`] is the `reqwest`-backed
//! production implementation.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

// ============================================================================
// SubmissionReport
// ============================================================================

/// Wire body of a submission report.
///
/// Exactly two fields; the collector contract permits no others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReport {
    /// Problem identifier parsed from the tab URL.
    pub problem_slug: String,

    /// Contest the submission belongs to.
    pub contest_id: String,
}

impl SubmissionReport {
    /// Creates a report for `problem_slug` in `contest_id`.
    #[inline]
    #[must_use]
    pub fn new(problem_slug: impl Into<String>, contest_id: impl Into<String>) -> Self {
        Self {
            problem_slug: problem_slug.into(),
            contest_id: contest_id.into(),
        }
    }
}

// ============================================================================
// CollectorResponse
// ============================================================================

/// Parsed collector response.
///
/// Only the `detail` field matters to the watcher; everything else in
/// the response payload is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectorResponse {
    /// Application-level error detail, if the report was rejected.
    #[serde(default)]
    pub detail: Option<String>,
}

impl CollectorResponse {
    /// Returns `true` if the collector accepted the report.
    #[inline]
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.detail.is_none()
    }

    /// Converts a rejection into [`Error::Rejected`], passing acceptance
    /// through unchanged.
    pub fn into_result(self) -> Result<()> {
        match self.detail {
            Some(detail) => Err(Error::rejected(detail)),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Collector
// ============================================================================

/// Transport seam for submission delivery.
#[async_trait]
pub trait Collector: Send + Sync {
    /// Delivers `report` authenticated with `token`.
    ///
    /// # Errors
    ///
    /// [`Error::Delivery`] on transport failure; the parsed response is
    /// returned for application-level triage by the caller.
    async fn submit(&self, report: &SubmissionReport, token: &str) -> Result<CollectorResponse>;
}

// ============================================================================
// HttpCollector
// ============================================================================

/// HTTP collector client.
///
/// Owns a connection-pooled [`reqwest::Client`]; cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpCollector {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCollector {
    /// Creates a collector client for `endpoint`.
    #[inline]
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Returns the configured endpoint.
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Collector for HttpCollector {
    async fn submit(&self, report: &SubmissionReport, token: &str) -> Result<CollectorResponse> {
        debug!(
            endpoint = %self.endpoint,
            problem_slug = %report.problem_slug,
            "Delivering submission report"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(report)
            .send()
            .await
            .map_err(|e| Error::delivery(e.to_string()))?;

        let parsed: CollectorResponse = response
            .json()
            .await
            .map_err(|e| Error::delivery(e.to_string()))?;

        Ok(parsed)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_wire_shape() {
        let report = SubmissionReport::new("two-sum", "default-contest");
        let json = serde_json::to_value(&report).expect("serialize");

        assert_eq!(
            json,
            serde_json::json!({
                "problem_slug": "two-sum",
                "contest_id": "default-contest"
            })
        );
        // Exactly two fields on the wire.
        assert_eq!(json.as_object().expect("object").len(), 2);
    }

    #[test]
    fn test_response_accepted() {
        let response: CollectorResponse =
            serde_json::from_str(r#"{"id": 7, "recorded_at": "2024-01-01T00:00:00Z"}"#)
                .expect("parse");
        assert!(response.is_accepted());
        assert!(response.into_result().is_ok());
    }

    #[test]
    fn test_response_rejected() {
        let response: CollectorResponse =
            serde_json::from_str(r#"{"detail": "Submission already recorded"}"#).expect("parse");
        assert!(!response.is_accepted());

        let err = response.into_result().unwrap_err();
        assert!(matches!(err, Error::Rejected { .. }));
        assert_eq!(
            err.to_string(),
            "Collector rejected report: Submission already recorded"
        );
    }

    #[test]
    fn test_http_collector_endpoint() {
        let collector = HttpCollector::new("http://127.0.0.1:8000/api/v1/submissions");
        assert_eq!(
            collector.endpoint(),
            "http://127.0.0.1:8000/api/v1/submissions"
        );
    }
}
