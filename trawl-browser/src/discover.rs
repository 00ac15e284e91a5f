//! Locator discovery: probe candidates against the live page until one is
//! proven to work, then commit it to the cache.
//!
//! Probing cost (a full bounded wait) is expensive, so it is paid once per
//! role per scope; subsequent lookups reuse the proven locator directly.
//! Candidates are tried in a deterministic order, primary before secondary,
//! every round. Between failed rounds the page is scrolled down and back up
//! to force lazy content to render.

use crate::behavior::HumanBehavior;
use crate::cache::{LocatorCache, Scope};
use crate::resolve::ResolverConfig;
use crate::session::LiveSession;
use tracing::{debug, warn};
use trawl_common::Locator;

fn candidates<'a>(
    primary: &'a Locator,
    secondary: Option<&'a Locator>,
) -> impl Iterator<Item = &'a Locator> {
    std::iter::once(primary).chain(secondary)
}

/// Probe page-level candidates for `role`. The first candidate confirmed
/// present and displayed is committed to the page-scope cache and returned
/// together with the confirming element. Exhaustion yields `None`, never an
/// error.
pub(crate) async fn discover_page<S: LiveSession>(
    session: &S,
    behavior: &HumanBehavior,
    cache: &mut LocatorCache,
    role: &str,
    primary: &Locator,
    secondary: Option<&Locator>,
    config: &ResolverConfig,
) -> Option<(Locator, S::Element)> {
    for attempt in 1..=config.max_attempts {
        for candidate in candidates(primary, secondary) {
            match session.wait_for(candidate, config.probe_timeout).await {
                Ok(element) => {
                    debug!(
                        target: "browser.locator",
                        role,
                        locator = %candidate,
                        attempt,
                        "candidate confirmed"
                    );
                    cache.commit(Scope::Page, role, candidate.clone());
                    return Some((candidate.clone(), element));
                }
                Err(err) if err.is_retryable() => {
                    debug!(
                        target: "browser.locator",
                        role,
                        locator = %candidate,
                        attempt,
                        %err,
                        "candidate probe failed"
                    );
                }
                Err(err) => {
                    warn!(
                        target: "browser.locator",
                        role,
                        locator = %candidate,
                        %err,
                        "session failure during discovery; abandoning lookup"
                    );
                    return None;
                }
            }
        }
        nudge_lazy_content(session, behavior, config).await;
    }

    warn!(
        target: "browser.locator",
        role,
        attempts = config.max_attempts,
        "discovery exhausted all candidates"
    );
    None
}

/// Probe candidates scoped to `parent`. Scoped finds are immediate, so a
/// candidate is confirmed by matching at least one descendant. The winner is
/// committed to the element-scope cache.
pub(crate) async fn discover_within<S: LiveSession>(
    session: &S,
    behavior: &HumanBehavior,
    cache: &mut LocatorCache,
    parent: &S::Element,
    role: &str,
    primary: &Locator,
    secondary: Option<&Locator>,
    config: &ResolverConfig,
) -> Option<(Locator, Vec<S::Element>)> {
    for attempt in 1..=config.max_attempts {
        for candidate in candidates(primary, secondary) {
            match session.find_within(parent, candidate).await {
                Ok(elements) if !elements.is_empty() => {
                    debug!(
                        target: "browser.locator",
                        role,
                        locator = %candidate,
                        attempt,
                        matched = elements.len(),
                        "scoped candidate confirmed"
                    );
                    cache.commit(Scope::Element, role, candidate.clone());
                    return Some((candidate.clone(), elements));
                }
                Ok(_) => {
                    debug!(
                        target: "browser.locator",
                        role,
                        locator = %candidate,
                        attempt,
                        "scoped candidate matched no descendants"
                    );
                }
                Err(err) if err.is_retryable() => {
                    debug!(
                        target: "browser.locator",
                        role,
                        locator = %candidate,
                        attempt,
                        %err,
                        "scoped candidate probe failed"
                    );
                }
                Err(err) => {
                    warn!(
                        target: "browser.locator",
                        role,
                        locator = %candidate,
                        %err,
                        "session failure during scoped discovery; abandoning lookup"
                    );
                    return None;
                }
            }
        }
        nudge_lazy_content(session, behavior, config).await;
    }

    warn!(
        target: "browser.locator",
        role,
        attempts = config.max_attempts,
        "scoped discovery exhausted all candidates"
    );
    None
}

/// Scroll a full step down then back up: surfaces lazily rendered content
/// without losing place.
async fn nudge_lazy_content<S: LiveSession>(
    session: &S,
    behavior: &HumanBehavior,
    config: &ResolverConfig,
) {
    for dy in [config.scroll_step, -config.scroll_step] {
        if let Err(err) = behavior.human_scroll(session, 0, dy).await {
            warn!(target: "browser.locator", %err, "scroll interaction failed");
            return;
        }
    }
}
