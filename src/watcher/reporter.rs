//! Submission reporting.
//!
//! On a confirmed acceptance the watcher re-derives the problem identity
//! from the tab's current URL, reads the stored credential, and delivers
//! one report to the collector. Every failure is terminal for the event:
//! there is no retry, no queueing, at most one delivery attempt per
//! confirmed success.

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, error, trace};
use url::Url;

use crate::collector::SubmissionReport;
use crate::error::{Error, Result};
use crate::identifiers::TabId;

use super::Watcher;

// ============================================================================
// Slug Extraction
// ============================================================================

/// Extracts the problem slug from a problem-page URL.
///
/// The slug is the path segment following `marker_segment`:
/// `https://leetcode.com/problems/two-sum/` yields `two-sum`.
///
/// # Errors
///
/// [`Error::MalformedProblemUrl`] if the marker segment is absent, is
/// the final segment, or is followed only by an empty segment.
pub(crate) fn problem_slug(url: &str, marker_segment: &str) -> Result<String> {
    let parsed = Url::parse(url)?;
    let mut segments = parsed
        .path_segments()
        .ok_or_else(|| Error::malformed_problem_url(url))?;

    while let Some(segment) = segments.next() {
        if segment == marker_segment {
            return match segments.next() {
                Some(slug) if !slug.is_empty() => Ok(slug.to_string()),
                _ => Err(Error::malformed_problem_url(url)),
            };
        }
    }

    Err(Error::malformed_problem_url(url))
}

// ============================================================================
// Watcher - Reporting
// ============================================================================

impl Watcher {
    /// Reports a confirmed acceptance for `tab_id` to the collector.
    ///
    /// Best-effort: failures are surfaced as diagnostics and dropped.
    /// An anonymous session (no stored credential) skips the report
    /// silently.
    pub(crate) async fn report(&self, tab_id: TabId) {
        match self.try_report(tab_id).await {
            Ok(()) => {}
            Err(err) if err.is_benign() => {
                trace!(%tab_id, "Skipping report: no stored credential");
            }
            Err(Error::Rejected { detail }) => {
                error!(%tab_id, %detail, "Collector rejected submission");
            }
            Err(err) => {
                error!(%tab_id, error = %err, "Failed to report submission");
            }
        }
    }

    /// Runs the reporting chain, short-circuiting on the first failure.
    async fn try_report(&self, tab_id: TabId) -> Result<()> {
        let config = &self.inner.config;

        let url = self.inner.tabs.tab_url(tab_id).await?;
        let slug = problem_slug(&url, &config.problem_path_segment)?;

        let token = self
            .inner
            .credentials
            .get(&config.credential_key)
            .await?
            .ok_or(Error::MissingCredential)?;

        debug!(%tab_id, problem_slug = %slug, "Sending submission report");

        let report = SubmissionReport::new(slug, config.contest_id.clone());
        let response = self.inner.collector.submit(&report, &token).await?;
        response.into_result()?;

        debug!(%tab_id, "Collector recorded submission");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
