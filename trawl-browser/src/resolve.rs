//! The public-facing lookup API.
//!
//! A [`Resolver`] consults the locator cache on every lookup, falls back to
//! discovery on a miss or when the cached locator is no longer among the
//! supplied candidates, and returns typed results or empty values on total
//! failure. No lookup failure ever crosses this boundary as an error, so
//! extraction pipelines built on top can treat "element absent" as ordinary
//! data.

use crate::behavior::HumanBehavior;
use crate::cache::{LocatorCache, Scope};
use crate::discover;
use crate::session::{LiveSession, LookupError};
use std::time::Duration;
use tracing::{debug, warn};
use trawl_common::{Locator, TrawlConfig};

/// Tunables for resolution and discovery.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Bounded wait used per probe and per cached-locator use.
    pub probe_timeout: Duration,
    /// Rounds of probing before discovery gives up.
    pub max_attempts: u32,
    /// Vertical pixels of the lazy-content scroll between failed rounds.
    pub scroll_step: i64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(20),
            max_attempts: 3,
            scroll_step: 1000,
        }
    }
}

impl From<&TrawlConfig> for ResolverConfig {
    fn from(config: &TrawlConfig) -> Self {
        Self {
            probe_timeout: config.short_wait(),
            max_attempts: config.max_attempts,
            ..Self::default()
        }
    }
}

/// Resolution engine over one live browser session.
///
/// Owns the session and its locator cache; the cache lives exactly as long
/// as the session it was learned against.
pub struct Resolver<S: LiveSession> {
    session: S,
    cache: LocatorCache,
    behavior: HumanBehavior,
    config: ResolverConfig,
}

impl<S: LiveSession> Resolver<S> {
    pub fn new(session: S) -> Self {
        Self::with_config(session, ResolverConfig::default(), HumanBehavior::new())
    }

    pub fn with_config(session: S, config: ResolverConfig, behavior: HumanBehavior) -> Self {
        Self {
            session,
            cache: LocatorCache::new(),
            behavior,
            config,
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn into_session(self) -> S {
        self.session
    }

    /// The locator currently proven for `(scope, role)`, if any.
    pub fn cached(&self, scope: Scope, role: &str) -> Option<&Locator> {
        self.cache.get(scope, role)
    }

    /// Drop the cached locator for `(scope, role)`, forcing rediscovery on
    /// the next lookup.
    pub fn invalidate(&mut self, scope: Scope, role: &str) -> bool {
        self.cache.invalidate(scope, role)
    }

    /// Find a single element for `role`, trying `primary` then `secondary`.
    ///
    /// Returns `None` when nothing can be found; never an error.
    pub async fn find_one(
        &mut self,
        role: &str,
        primary: &Locator,
        secondary: Option<&Locator>,
    ) -> Option<S::Element> {
        let role = usable_role(role)?;

        if let Some(cached) = self.cached_candidate(Scope::Page, role, primary, secondary) {
            let outcome = self.session.wait_for(&cached, self.config.probe_timeout).await;
            return match outcome {
                Ok(element) => Some(element),
                Err(err) => {
                    self.report_cached_failure(Scope::Page, role, &cached, &err);
                    None
                }
            };
        }

        discover::discover_page(
            &self.session,
            &self.behavior,
            &mut self.cache,
            role,
            primary,
            secondary,
            &self.config,
        )
        .await
        .map(|(_, element)| element)
    }

    /// Find all page-level elements for `role`. The sequence may be empty.
    pub async fn find_all(
        &mut self,
        role: &str,
        primary: &Locator,
        secondary: Option<&Locator>,
    ) -> Vec<S::Element> {
        let Some(role) = usable_role(role) else {
            return Vec::new();
        };

        if let Some(cached) = self.cached_candidate(Scope::Page, role, primary, secondary) {
            let outcome = self.session.wait_for(&cached, self.config.probe_timeout).await;
            match outcome {
                Ok(_) => return self.fetch_all(role, &cached).await,
                Err(err) => {
                    self.report_cached_failure(Scope::Page, role, &cached, &err);
                    return Vec::new();
                }
            }
        }

        let Some((locator, _)) = discover::discover_page(
            &self.session,
            &self.behavior,
            &mut self.cache,
            role,
            primary,
            secondary,
            &self.config,
        )
        .await
        else {
            return Vec::new();
        };

        self.fetch_all(role, &locator).await
    }

    /// Find all elements for `role` scoped to `parent`. Uses the
    /// element-scope cache, which is independent of the page-scope one.
    pub async fn find_all_within(
        &mut self,
        parent: &S::Element,
        role: &str,
        primary: &Locator,
        secondary: Option<&Locator>,
    ) -> Vec<S::Element> {
        let Some(role) = usable_role(role) else {
            return Vec::new();
        };

        if let Some(cached) = self.cached_candidate(Scope::Element, role, primary, secondary) {
            let outcome = self.session.find_within(parent, &cached).await;
            match outcome {
                Ok(elements) if !elements.is_empty() => return elements,
                Ok(_) => {
                    debug!(
                        target: "browser.locator",
                        role,
                        locator = %cached,
                        "cached scoped locator matched no descendants"
                    );
                    self.cache.invalidate(Scope::Element, role);
                    return Vec::new();
                }
                Err(err) => {
                    self.report_cached_failure(Scope::Element, role, &cached, &err);
                    return Vec::new();
                }
            }
        }

        discover::discover_within(
            &self.session,
            &self.behavior,
            &mut self.cache,
            parent,
            role,
            primary,
            secondary,
            &self.config,
        )
        .await
        .map(|(_, elements)| elements)
        .unwrap_or_default()
    }

    /// The cached locator for `(scope, role)`, but only when it is still one
    /// of the currently supplied candidates. A mismatch means the caller
    /// changed its candidates and the entry must be re-proven.
    fn cached_candidate(
        &self,
        scope: Scope,
        role: &str,
        primary: &Locator,
        secondary: Option<&Locator>,
    ) -> Option<Locator> {
        let cached = self.cache.get(scope, role)?;
        if cached == primary || secondary == Some(cached) {
            return Some(cached.clone());
        }
        debug!(
            target: "browser.locator",
            role,
            ?scope,
            cached = %cached,
            "cached locator no longer among supplied candidates; rediscovering"
        );
        None
    }

    /// A failed access through a cached locator invalidates the entry so the
    /// next lookup rediscovers; the current call still reports empty.
    fn report_cached_failure(&mut self, scope: Scope, role: &str, cached: &Locator, err: &LookupError) {
        warn!(
            target: "browser.locator",
            role,
            ?scope,
            locator = %cached,
            %err,
            "cached locator failed; invalidating"
        );
        self.cache.invalidate(scope, role);
    }

    async fn fetch_all(&self, role: &str, locator: &Locator) -> Vec<S::Element> {
        match self.session.find_all(locator).await {
            Ok(elements) => elements,
            Err(err) => {
                warn!(
                    target: "browser.locator",
                    role,
                    locator = %locator,
                    %err,
                    "collecting matches failed"
                );
                Vec::new()
            }
        }
    }
}

/// A role is mandatory: an unnamed lookup cannot be cached, and uncached
/// probing is too costly to repeat per call, so it short-circuits to empty.
fn usable_role(role: &str) -> Option<&str> {
    let trimmed = role.trim();
    if trimmed.is_empty() {
        warn!(
            target: "browser.locator",
            "lookup without a role is a no-op; refusing uncached probe"
        );
        return None;
    }
    Some(trimmed)
}
