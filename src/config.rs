//! Watcher configuration.
//!
//! [`WatcherConfig`] carries the constants that tie the watcher to a
//! specific judge site and collector deployment: URL markers, the
//! instrumentation protocol version, the collector endpoint, and the
//! credential store key. Defaults match the LeetCode deployment the
//! watcher was built against.
//!
//! # Example
//!
//! ```ignore
//! use submission_watcher::WatcherConfig;
//!
//! let config = WatcherConfig::new()
//!     .with_collector_endpoint("https://collector.internal/api/v1/submissions")
//!     .with_contest_id("weekly-412");
//! ```

// ============================================================================
// Constants
// ============================================================================

/// URL marker identifying a submission-verdict response.
///
/// Containment check, scheme included: matches the polling endpoint the
/// judge site uses to deliver verdicts.
pub const SUBMISSION_URL_MARKER: &str = "https://leetcode.com/submissions/detail/";

/// URL marker identifying a problem page eligible for monitoring.
pub const PROBLEM_URL_MARKER: &str = "leetcode.com/problems/";

/// Path segment preceding the problem slug in a problem-page URL.
pub const PROBLEM_PATH_SEGMENT: &str = "problems";

/// Instrumentation protocol version requested on attach.
pub const PROTOCOL_VERSION: &str = "1.3";

/// Default collector endpoint for submission reports.
pub const DEFAULT_COLLECTOR_ENDPOINT: &str = "http://127.0.0.1:8000/api/v1/submissions";

/// Contest identifier attached to every report.
pub const DEFAULT_CONTEST_ID: &str = "default-contest";

/// Credential store key holding the bearer token.
pub const CREDENTIAL_KEY: &str = "token";

// ============================================================================
// WatcherConfig
// ============================================================================

/// Configuration for a [`Watcher`](crate::Watcher) instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherConfig {
    /// URL marker identifying submission-verdict responses.
    pub submission_url_marker: String,

    /// URL marker identifying monitorable problem pages.
    pub problem_url_marker: String,

    /// Path segment preceding the problem slug.
    pub problem_path_segment: String,

    /// Instrumentation protocol version requested on attach.
    pub protocol_version: String,

    /// Collector endpoint receiving submission reports.
    pub collector_endpoint: String,

    /// Contest identifier sent with every report.
    pub contest_id: String,

    /// Credential store key holding the bearer token.
    pub credential_key: String,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            submission_url_marker: SUBMISSION_URL_MARKER.to_string(),
            problem_url_marker: PROBLEM_URL_MARKER.to_string(),
            problem_path_segment: PROBLEM_PATH_SEGMENT.to_string(),
            protocol_version: PROTOCOL_VERSION.to_string(),
            collector_endpoint: DEFAULT_COLLECTOR_ENDPOINT.to_string(),
            contest_id: DEFAULT_CONTEST_ID.to_string(),
            credential_key: CREDENTIAL_KEY.to_string(),
        }
    }
}

// ============================================================================
// Constructors & Builder Methods
// ============================================================================

impl WatcherConfig {
    /// Creates a config with default (LeetCode) settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the submission-verdict URL marker.
    #[inline]
    #[must_use]
    pub fn with_submission_url_marker(mut self, marker: impl Into<String>) -> Self {
        self.submission_url_marker = marker.into();
        self
    }

    /// Sets the problem-page URL marker.
    #[inline]
    #[must_use]
    pub fn with_problem_url_marker(mut self, marker: impl Into<String>) -> Self {
        self.problem_url_marker = marker.into();
        self
    }

    /// Sets the collector endpoint.
    #[inline]
    #[must_use]
    pub fn with_collector_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.collector_endpoint = endpoint.into();
        self
    }

    /// Sets the contest identifier.
    #[inline]
    #[must_use]
    pub fn with_contest_id(mut self, contest_id: impl Into<String>) -> Self {
        self.contest_id = contest_id.into();
        self
    }

    /// Sets the credential store key.
    #[inline]
    #[must_use]
    pub fn with_credential_key(mut self, key: impl Into<String>) -> Self {
        self.credential_key = key.into();
        self
    }
}

// ============================================================================
// Predicates
// ============================================================================

impl WatcherConfig {
    /// Returns `true` if `url` points at a monitorable problem page.
    #[inline]
    #[must_use]
    pub fn is_problem_page(&self, url: &str) -> bool {
        url.contains(&self.problem_url_marker)
    }

    /// Returns `true` if `url` is a submission-verdict response URL.
    #[inline]
    #[must_use]
    pub fn is_submission_detail(&self, url: &str) -> bool {
        url.contains(&self.submission_url_marker)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WatcherConfig::new();
        assert_eq!(config.protocol_version, "1.3");
        assert_eq!(config.contest_id, "default-contest");
        assert_eq!(config.credential_key, "token");
        assert_eq!(
            config.collector_endpoint,
            "http://127.0.0.1:8000/api/v1/submissions"
        );
    }

    #[test]
    fn test_is_problem_page() {
        let config = WatcherConfig::new();
        assert!(config.is_problem_page("https://leetcode.com/problems/two-sum/"));
        assert!(!config.is_problem_page("https://leetcode.com/contest/"));
        assert!(!config.is_problem_page("https://example.com/"));
    }

    #[test]
    fn test_is_submission_detail() {
        let config = WatcherConfig::new();
        assert!(
            config.is_submission_detail("https://leetcode.com/submissions/detail/12345/check/")
        );
        assert!(!config.is_submission_detail("https://leetcode.com/problems/two-sum/"));
    }

    #[test]
    fn test_builder_methods() {
        let config = WatcherConfig::new()
            .with_collector_endpoint("https://collector.internal/api/v1/submissions")
            .with_contest_id("weekly-412")
            .with_credential_key("session");

        assert_eq!(
            config.collector_endpoint,
            "https://collector.internal/api/v1/submissions"
        );
        assert_eq!(config.contest_id, "weekly-412");
        assert_eq!(config.credential_key, "session");
    }
}
