//! Tab registry.
//!
//! Tracks which tabs currently have an active monitoring session. The
//! registry is the attach gate: a tab already present is never attached
//! a second time.
//!
//! Owned by the [`Watcher`](super::Watcher) behind a `parking_lot::Mutex`;
//! handlers borrow it for the duration of one event only.

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashSet;

use crate::identifiers::TabId;

// ============================================================================
// TabRegistry
// ============================================================================

/// Set of tabs with an active monitoring session.
#[derive(Debug, Default)]
pub struct TabRegistry {
    tabs: FxHashSet<TabId>,
}

impl TabRegistry {
    /// Creates an empty registry.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `tab_id` for monitoring.
    ///
    /// Returns `true` if the tab was already active, in which case the
    /// registry is left untouched. Returns `false` if the tab was newly
    /// registered.
    pub fn try_begin(&mut self, tab_id: TabId) -> bool {
        !self.tabs.insert(tab_id)
    }

    /// Removes `tab_id` unconditionally.
    ///
    /// Idempotent: removing an absent tab is a no-op.
    pub fn end(&mut self, tab_id: TabId) {
        self.tabs.remove(&tab_id);
    }

    /// Returns `true` if `tab_id` has an active session.
    #[inline]
    #[must_use]
    pub fn is_active(&self, tab_id: TabId) -> bool {
        self.tabs.contains(&tab_id)
    }

    /// Returns the number of actively monitored tabs.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Returns `true` if no tabs are monitored.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_begin_twice() {
        let mut registry = TabRegistry::new();
        let tab = TabId::new(1);

        assert!(!registry.try_begin(tab));
        assert!(registry.try_begin(tab));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_end_is_idempotent() {
        let mut registry = TabRegistry::new();
        let tab = TabId::new(1);

        registry.try_begin(tab);
        registry.end(tab);
        registry.end(tab);

        assert!(!registry.is_active(tab));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_end_permits_re_begin() {
        let mut registry = TabRegistry::new();
        let tab = TabId::new(3);

        assert!(!registry.try_begin(tab));
        registry.end(tab);
        assert!(!registry.try_begin(tab));
    }

    #[test]
    fn test_independent_tabs() {
        let mut registry = TabRegistry::new();

        assert!(!registry.try_begin(TabId::new(1)));
        assert!(!registry.try_begin(TabId::new(2)));
        assert_eq!(registry.len(), 2);

        registry.end(TabId::new(1));
        assert!(!registry.is_active(TabId::new(1)));
        assert!(registry.is_active(TabId::new(2)));
    }
}
