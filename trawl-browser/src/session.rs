//! The seam between the resolution engine and a controllable browser session.
//!
//! The engine never talks to fantoccini directly; it drives any
//! [`LiveSession`], which keeps the probing and caching logic testable
//! against scripted fakes.

use async_trait::async_trait;
use std::time::Duration;
use trawl_common::Locator;

/// Why a single lookup attempt did not produce an element.
///
/// `NotPresent` and `Stale` are retryable and fully absorbed by the engine;
/// `Session` means the browser itself is gone and retrying is pointless.
#[derive(thiserror::Error, Debug)]
pub enum LookupError {
    /// Element absent (or not displayed) within the bounded wait.
    #[error("element not present within the bounded wait")]
    NotPresent,

    /// Element reference was detached from the DOM before inspection.
    #[error("stale element reference")]
    Stale,

    /// The underlying browser session cannot be reached.
    #[error("session failure: {0}")]
    Session(#[from] anyhow::Error),
}

impl LookupError {
    /// Stale references are retried exactly like elements that have not
    /// rendered yet; only session loss is terminal.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NotPresent | Self::Stale)
    }
}

/// Capabilities the engine requires from a live browser session.
#[async_trait]
pub trait LiveSession: Send + Sync {
    type Element: Clone + Send + Sync;

    /// Wait until an element matching `locator` is present and displayed,
    /// up to `timeout`.
    async fn wait_for(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Self::Element, LookupError>;

    /// Immediately find all page-level matches, without waiting.
    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self::Element>, LookupError>;

    /// Immediately find all matching descendants of `parent`.
    async fn find_within(
        &self,
        parent: &Self::Element,
        locator: &Locator,
    ) -> Result<Vec<Self::Element>, LookupError>;

    /// Scroll the viewport by the given offsets.
    async fn scroll_by(&self, dx: i64, dy: i64) -> Result<(), LookupError>;

    /// Current rendered page markup, for handoff to static extraction.
    async fn page_source(&self) -> Result<String, LookupError>;
}
