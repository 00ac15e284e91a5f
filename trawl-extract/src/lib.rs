//! Static extraction over an already-parsed page snapshot.
//!
//! Once dynamic content has been captured, find/find-all operate on the
//! immutable parsed tree: no waiting, no retries, no caching — static
//! content does not change underneath the call. Total failure yields an
//! inert [`StaticNode::placeholder`] instead of an absent value, so callers
//! can chain further extraction without presence checks.

use scraper::{ElementRef, Html, Selector};
use std::iter;
use tracing::debug;
use trawl_common::Locator;

/// Immutable parsed snapshot of page markup at one point in time.
///
/// Independent lifecycle from the live session; a snapshot never re-queries
/// the browser.
pub struct StaticDocument {
    html: Html,
}

impl StaticDocument {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// The document root as a queryable node.
    pub fn root(&self) -> StaticNode<'_> {
        StaticNode {
            inner: Some(self.html.root_element()),
        }
    }

    /// Find the first node matching `primary`, falling back to `secondary`.
    /// `name` is diagnostic only.
    pub fn extract_one(
        &self,
        name: &str,
        primary: &Locator,
        secondary: Option<&Locator>,
    ) -> StaticNode<'_> {
        self.root().extract_one(name, primary, secondary)
    }

    /// Find all nodes matching `primary`, falling back to `secondary`. Never
    /// empty: total failure yields a single placeholder.
    pub fn extract_all(
        &self,
        name: &str,
        primary: &Locator,
        secondary: Option<&Locator>,
    ) -> Vec<StaticNode<'_>> {
        self.root().extract_all(name, primary, secondary)
    }
}

/// A node in the parsed tree, or the inert placeholder.
///
/// The placeholder is a recognizable empty-content marker: its text is
/// empty, it has no attributes, and extraction through it yields further
/// placeholders. This keeps downstream extraction code branch-free.
#[derive(Debug, Clone, Copy)]
pub struct StaticNode<'a> {
    inner: Option<ElementRef<'a>>,
}

impl<'a> StaticNode<'a> {
    pub fn placeholder() -> Self {
        Self { inner: None }
    }

    pub fn is_placeholder(&self) -> bool {
        self.inner.is_none()
    }

    /// Concatenated text content; empty for the placeholder.
    pub fn text(&self) -> String {
        self.inner
            .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
            .unwrap_or_default()
    }

    /// Attribute value, if the node carries one.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.inner.and_then(|el| el.value().attr(name))
    }

    /// The node's own markup; empty for the placeholder.
    pub fn html(&self) -> String {
        self.inner.map(|el| el.html()).unwrap_or_default()
    }

    /// First descendant matching `primary`, else `secondary`, else the
    /// placeholder.
    pub fn extract_one(
        &self,
        name: &str,
        primary: &Locator,
        secondary: Option<&Locator>,
    ) -> StaticNode<'a> {
        for candidate in iter::once(primary).chain(secondary) {
            if let Some(found) = self.select_first(candidate) {
                return StaticNode { inner: Some(found) };
            }
            debug!(
                target: "extract.static",
                name,
                locator = %candidate,
                "candidate matched nothing in snapshot"
            );
        }
        StaticNode::placeholder()
    }

    /// All descendants matching `primary`, else `secondary`. Never empty:
    /// total failure yields a single placeholder, preserving the
    /// always-indexable guarantee.
    pub fn extract_all(
        &self,
        name: &str,
        primary: &Locator,
        secondary: Option<&Locator>,
    ) -> Vec<StaticNode<'a>> {
        for candidate in iter::once(primary).chain(secondary) {
            let matches = self.select_all(candidate);
            if !matches.is_empty() {
                return matches;
            }
            debug!(
                target: "extract.static",
                name,
                locator = %candidate,
                "candidate matched nothing in snapshot"
            );
        }
        vec![StaticNode::placeholder()]
    }

    fn select_first(&self, locator: &Locator) -> Option<ElementRef<'a>> {
        let scope = self.inner?;
        let selector = parse_selector(locator)?;
        scope.select(&selector).next()
    }

    fn select_all(&self, locator: &Locator) -> Vec<StaticNode<'a>> {
        let Some(scope) = self.inner else {
            return Vec::new();
        };
        let Some(selector) = parse_selector(locator) else {
            return Vec::new();
        };
        scope
            .select(&selector)
            .map(|el| StaticNode { inner: Some(el) })
            .collect()
    }
}

/// Compile a locator into a CSS selector, where its strategy has one.
/// XPath and link-text locators match nothing statically.
fn parse_selector(locator: &Locator) -> Option<Selector> {
    let css = match locator.static_css() {
        Some(css) => css,
        None => {
            debug!(
                target: "extract.static",
                locator = %locator,
                "strategy has no CSS equivalent; treating as no match"
            );
            return None;
        }
    };
    let parsed = Selector::parse(&css);
    match parsed {
        Ok(selector) => Some(selector),
        Err(err) => {
            debug!(
                target: "extract.static",
                locator = %locator,
                ?err,
                "selector failed to parse; treating as no match"
            );
            None
        }
    }
}
