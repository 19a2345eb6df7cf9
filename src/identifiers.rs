//! Type-safe identifiers for monitored entities.
//!
//! Newtype wrappers prevent mixing incompatible IDs at compile time:
//! a tab handle from the browser can never be passed where a network
//! request identifier is expected.
//!
//! | Type | Underlying | Scope |
//! |------|-----------|-------|
//! | [`TabId`] | `u32` | one browser tab |
//! | [`RequestId`] | `String` | one network request within one instrumentation session |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// TabId
// ============================================================================

/// Identifier for a browser tab.
///
/// Assigned by the browser; opaque to this crate beyond equality and
/// hashing. Tabs are the unit of monitoring: at most one instrumentation
/// session exists per `TabId` at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u32);

impl TabId {
    /// Creates a tab ID from a raw browser handle.
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw numeric handle.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TabId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

// ============================================================================
// RequestId
// ============================================================================

/// Identifier for a network request observed by an instrumentation session.
///
/// Assigned by the instrumentation protocol; only meaningful within the
/// session that produced it. Used to correlate `responseReceived` with the
/// matching `loadingFinished` event and the subsequent body fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub String);

impl RequestId {
    /// Creates a request ID from the protocol-assigned string.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    #[inline]
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RequestId {
    #[inline]
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_id_display() {
        let id = TabId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.as_u32(), 42);
    }

    #[test]
    fn test_tab_id_equality() {
        assert_eq!(TabId::new(1), TabId::from(1));
        assert_ne!(TabId::new(1), TabId::new(2));
    }

    #[test]
    fn test_request_id_from_str() {
        let id = RequestId::from("1000012345.67");
        assert_eq!(id.as_str(), "1000012345.67");
        assert_eq!(id.to_string(), "1000012345.67");
    }

    #[test]
    fn test_request_id_serde_transparent() {
        let id = RequestId::new("req-1");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, r#""req-1""#);

        let back: RequestId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
