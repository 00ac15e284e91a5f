//! Per-role storage of the locator last proven to work against the page.
//!
//! A role maps to at most one locator per scope; page-level and
//! element-scoped lookups keep independent namespaces. Entries are written
//! only by discovery commits, never persisted, and never expire on time —
//! they are dropped explicitly when an access through them fails or when a
//! caller invalidates them.

use std::collections::HashMap;
use tracing::debug;
use trawl_common::Locator;

/// Cache namespace for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Whole-page lookups.
    Page,
    /// Lookups scoped to a parent element.
    Element,
}

/// Mapping from scope and role to the proven locator.
#[derive(Debug, Default)]
pub struct LocatorCache {
    entries: HashMap<(Scope, String), Locator>,
}

impl LocatorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, scope: Scope, role: &str) -> Option<&Locator> {
        self.entries.get(&(scope, role.to_string()))
    }

    /// Record `locator` as the proven choice for `(scope, role)`.
    pub fn commit(&mut self, scope: Scope, role: &str, locator: Locator) {
        debug!(
            target: "browser.locator",
            role,
            ?scope,
            %locator,
            "caching proven locator"
        );
        self.entries.insert((scope, role.to_string()), locator);
    }

    /// Drop the entry for `(scope, role)`, forcing rediscovery on the next
    /// lookup. Returns whether an entry existed.
    pub fn invalidate(&mut self, scope: Scope, role: &str) -> bool {
        let removed = self.entries.remove(&(scope, role.to_string())).is_some();
        if removed {
            debug!(target: "browser.locator", role, ?scope, "invalidated cached locator");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scopes_are_independent_namespaces() {
        let mut cache = LocatorCache::new();
        cache.commit(Scope::Page, "price", Locator::css(".price"));
        cache.commit(Scope::Element, "price", Locator::css("[data-price]"));

        assert_eq!(
            cache.get(Scope::Page, "price"),
            Some(&Locator::css(".price"))
        );
        assert_eq!(
            cache.get(Scope::Element, "price"),
            Some(&Locator::css("[data-price]"))
        );
    }

    #[test]
    fn commit_replaces_previous_entry_for_role() {
        let mut cache = LocatorCache::new();
        cache.commit(Scope::Page, "price", Locator::css(".price"));
        cache.commit(Scope::Page, "price", Locator::css("[data-price]"));

        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get(Scope::Page, "price"),
            Some(&Locator::css("[data-price]"))
        );
    }

    #[test]
    fn invalidate_reports_whether_entry_existed() {
        let mut cache = LocatorCache::new();
        cache.commit(Scope::Page, "price", Locator::css(".price"));

        assert!(cache.invalidate(Scope::Page, "price"));
        assert!(!cache.invalidate(Scope::Page, "price"));
        assert!(cache.is_empty());
    }
}
