//! Request correlation.
//!
//! The instrumentation protocol splits a response across two events:
//! `responseReceived` (headers, URL) and `loadingFinished` (body now
//! retrievable). [`RequestCorrelator`] bridges them for the requests the
//! watcher cares about — only responses whose URL matches the
//! submission-detail marker are ever buffered, so memory stays bounded
//! by in-flight verdict polls.
//!
//! # Ordering precondition
//!
//! [`finish`](RequestCorrelator::finish) only resolves a request whose
//! `responseReceived` was recorded first. A `loadingFinished` that
//! arrives for an unknown identifier (never observed, already consumed,
//! or delivered out of order) resolves to `None` and is dropped.

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashMap;

use crate::identifiers::RequestId;

// ============================================================================
// PendingRequest
// ============================================================================

/// Metadata buffered between `responseReceived` and `loadingFinished`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    /// URL of the matched response.
    pub url: String,
}

// ============================================================================
// RequestCorrelator
// ============================================================================

/// Transient map of candidate verdict requests.
///
/// Keys are request identifiers scoped to one instrumentation session.
/// Entries are consumed exactly once, before the body-fetch outcome is
/// known, so a failed fetch or a duplicate finish event can never
/// reprocess the same request.
#[derive(Debug, Default)]
pub struct RequestCorrelator {
    pending: FxHashMap<RequestId, PendingRequest>,
}

impl RequestCorrelator {
    /// Creates an empty correlator.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a candidate response.
    ///
    /// The caller has already matched `url` against the submission-detail
    /// marker; non-matching responses must never reach the correlator.
    pub fn observe_response(&mut self, request_id: RequestId, url: impl Into<String>) {
        self.pending
            .insert(request_id, PendingRequest { url: url.into() });
    }

    /// Consumes a pending request on its `loadingFinished` event.
    ///
    /// Returns the buffered metadata if `request_id` was pending, `None`
    /// otherwise. Removal is unconditional and happens here, before any
    /// body retrieval is attempted.
    pub fn finish(&mut self, request_id: &RequestId) -> Option<PendingRequest> {
        self.pending.remove(request_id)
    }

    /// Returns `true` if `request_id` is awaiting its finish event.
    #[inline]
    #[must_use]
    pub fn is_pending(&self, request_id: &RequestId) -> bool {
        self.pending.contains_key(request_id)
    }

    /// Returns the number of pending candidates.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if no candidates are pending.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_then_finish() {
        let mut correlator = RequestCorrelator::new();
        let id = RequestId::from("req-1");

        correlator.observe_response(
            id.clone(),
            "https://leetcode.com/submissions/detail/123/check/",
        );
        assert!(correlator.is_pending(&id));

        let pending = correlator.finish(&id).expect("pending entry");
        assert_eq!(
            pending.url,
            "https://leetcode.com/submissions/detail/123/check/"
        );
        assert!(correlator.is_empty());
    }

    #[test]
    fn test_finish_unknown_is_none() {
        let mut correlator = RequestCorrelator::new();
        assert_eq!(correlator.finish(&RequestId::from("never-seen")), None);
    }

    #[test]
    fn test_finish_consumes_exactly_once() {
        let mut correlator = RequestCorrelator::new();
        let id = RequestId::from("req-2");

        correlator.observe_response(id.clone(), "https://leetcode.com/submissions/detail/9/");
        assert!(correlator.finish(&id).is_some());
        assert_eq!(correlator.finish(&id), None);
    }

    #[test]
    fn test_finish_before_observe_is_ignored() {
        // Out-of-order delivery: the finish event resolves nothing, and a
        // later observe starts a fresh pending entry.
        let mut correlator = RequestCorrelator::new();
        let id = RequestId::from("req-3");

        assert_eq!(correlator.finish(&id), None);

        correlator.observe_response(id.clone(), "https://leetcode.com/submissions/detail/5/");
        assert!(correlator.is_pending(&id));
    }

    #[test]
    fn test_re_observe_overwrites_url() {
        let mut correlator = RequestCorrelator::new();
        let id = RequestId::from("req-4");

        correlator.observe_response(id.clone(), "https://leetcode.com/submissions/detail/1/");
        correlator.observe_response(id.clone(), "https://leetcode.com/submissions/detail/2/");

        assert_eq!(correlator.len(), 1);
        let pending = correlator.finish(&id).expect("pending entry");
        assert_eq!(pending.url, "https://leetcode.com/submissions/detail/2/");
    }
}
