//! Verdict interpretation.
//!
//! Once a candidate request finishes loading, its body is fetched from
//! the instrumentation session and parsed as a judge verdict. The judge
//! polls the same endpoint while a submission is being evaluated, so
//! most bodies are intermediate states: retrieval failures and parse
//! failures are expected and swallowed. Only a final accepted verdict
//! triggers a report.

// ============================================================================
// Imports
// ============================================================================

use serde::Deserialize;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::identifiers::{RequestId, TabId};
use crate::instrumentation::{ResponseBody, response_body_params};

use super::Watcher;

// ============================================================================
// Constants
// ============================================================================

/// Protocol command retrieving a finished request's body.
const GET_RESPONSE_BODY: &str = "Network.getResponseBody";

/// Judge status code for an accepted submission.
const ACCEPTED_STATUS_CODE: i64 = 10;

// ============================================================================
// SubmissionVerdict
// ============================================================================

/// Parsed judge verdict.
///
/// Only the two gating fields are modeled; the payload carries many more
/// (runtime, memory, test counts) that the watcher ignores. Both fields
/// are optional because intermediate polling payloads omit them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmissionVerdict {
    /// Judge status code; `10` is "Accepted".
    #[serde(default)]
    pub status_code: Option<i64>,

    /// Whether the run itself completed successfully.
    #[serde(default)]
    pub run_success: Option<bool>,
}

impl SubmissionVerdict {
    /// Parses a response body as a verdict.
    ///
    /// Returns `None` for anything that is not a JSON object with the
    /// expected shape — an expected transient state while the submission
    /// is still pending server-side evaluation, not an error.
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Returns `true` if this verdict is a confirmed acceptance.
    ///
    /// Requires both `status_code == 10` and `run_success == true`; any
    /// other combination, including absent fields, is "not yet a
    /// success".
    #[inline]
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.status_code == Some(ACCEPTED_STATUS_CODE) && self.run_success == Some(true)
    }
}

// ============================================================================
// Watcher - Verdict Interpretation
// ============================================================================

impl Watcher {
    /// Fetches and interprets the body of a finished candidate request.
    ///
    /// Stage policy, each failure short-circuiting the chain:
    ///
    /// 1. body fetch fails → benign, abort silently (body evicted)
    /// 2. body does not decode or parse → benign, abort silently
    ///    (intermediate polling payload)
    /// 3. verdict not accepted → no action
    /// 4. verdict accepted → hand off to the reporter with the tab only;
    ///    problem identity is re-derived from tab context, not from the
    ///    consumed request
    pub(crate) async fn interpret(&self, tab_id: TabId, request_id: RequestId) {
        let body = match self.fetch_body(tab_id, &request_id).await {
            Ok(body) => body,
            Err(_) => {
                trace!(%tab_id, %request_id, "Response body unavailable");
                return;
            }
        };

        let Some(text) = body.decode() else {
            return;
        };
        let Some(verdict) = SubmissionVerdict::parse(&text) else {
            return;
        };

        if verdict.is_accepted() {
            debug!(%tab_id, %request_id, "Submission accepted");
            self.report(tab_id).await;
        }
    }

    /// Retrieves the response body for `request_id` from the session.
    async fn fetch_body(&self, tab_id: TabId, request_id: &RequestId) -> Result<ResponseBody> {
        let payload = self
            .inner
            .instrumentation
            .send_command(tab_id, GET_RESPONSE_BODY, response_body_params(request_id))
            .await
            .map_err(|_| Error::body_unavailable(request_id.clone()))?;

        ResponseBody::from_command_result(payload)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_verdict() {
        let verdict = SubmissionVerdict::parse(
            r#"{"status_code":10,"run_success":true,"status_msg":"Accepted","runtime":"4 ms"}"#,
        )
        .expect("parse");
        assert!(verdict.is_accepted());
    }

    #[test]
    fn test_wrong_status_code() {
        let verdict = SubmissionVerdict::parse(r#"{"status_code":11,"run_success":true}"#)
            .expect("parse");
        assert!(!verdict.is_accepted());
    }

    #[test]
    fn test_run_not_successful() {
        let verdict = SubmissionVerdict::parse(r#"{"status_code":10,"run_success":false}"#)
            .expect("parse");
        assert!(!verdict.is_accepted());
    }

    #[test]
    fn test_missing_fields_not_accepted() {
        let verdict = SubmissionVerdict::parse(r#"{"state":"PENDING"}"#).expect("parse");
        assert_eq!(verdict.status_code, None);
        assert_eq!(verdict.run_success, None);
        assert!(!verdict.is_accepted());
    }

    #[test]
    fn test_invalid_json_is_none() {
        assert_eq!(SubmissionVerdict::parse("not json"), None);
        assert_eq!(SubmissionVerdict::parse(""), None);
        assert_eq!(SubmissionVerdict::parse("[1,2,3]"), None);
    }
}
