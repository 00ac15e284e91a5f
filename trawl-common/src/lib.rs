//! Common types shared across the Trawl workspace.
//!
//! This crate defines configuration, locator types, observability helpers,
//! and shared error types used by both the live-browser and static-extraction
//! crates. It is intentionally lightweight so that all crates can depend on
//! it without heavy transitive costs.
//!
//! # Overview
//!
//! - [`TrawlConfig`]: Top-level runtime configuration
//! - [`locator`]: [`Locator`](locator::Locator) and its search strategies
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`TrawlError`] and [`Result`]: Shared error handling

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod locator;
pub mod observability;

pub use locator::{Locator, Strategy};

/// Browser automation stealth level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StealthLevel {
    Lightweight,
    Balanced,
    Maximum,
}

/// Configuration for a scraping session.
///
/// Passed to the driver and resolver entrypoints to configure
/// runtime behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrawlConfig {
    /// Whether to run browser automation without a visible window.
    pub headless: bool,
    /// Browser automation stealth level.
    pub stealth_level: StealthLevel,
    /// WebDriver endpoint to connect to.
    pub webdriver_url: String,
    /// Bounded wait used per locator probe, in seconds.
    pub short_wait_secs: u64,
    /// Wait available for navigation-level settling, in seconds.
    pub long_wait_secs: u64,
    /// Rounds of probing before a lookup gives up.
    pub max_attempts: u32,
}

impl TrawlConfig {
    /// Bounded wait applied to each individual locator probe.
    pub fn short_wait(&self) -> Duration {
        Duration::from_secs(self.short_wait_secs)
    }

    /// Bounded wait applied to navigation-level settling.
    pub fn long_wait(&self) -> Duration {
        Duration::from_secs(self.long_wait_secs)
    }
}

impl Default for TrawlConfig {
    fn default() -> Self {
        Self {
            headless: false,
            stealth_level: StealthLevel::Balanced,
            webdriver_url: "http://localhost:9515".to_string(),
            short_wait_secs: 20,
            long_wait_secs: 120,
            max_attempts: 3,
        }
    }
}

/// Error types used across the Trawl system.
///
/// Lookup-level absence is never an error: resolution and extraction report
/// "not found" as ordinary data. These variants cover the conditions that
/// genuinely cannot be absorbed, chiefly session bootstrap failures.
#[derive(thiserror::Error, Debug)]
pub enum TrawlError {
    /// The underlying browser session could not be reached or created.
    #[error("Session error: {0}")]
    Session(#[from] anyhow::Error),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenient alias for results that use [`TrawlError`].
pub type Result<T> = std::result::Result<T, TrawlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_horizons_are_independently_configurable() {
        let config = TrawlConfig {
            short_wait_secs: 5,
            long_wait_secs: 90,
            ..TrawlConfig::default()
        };
        assert_eq!(config.short_wait(), Duration::from_secs(5));
        assert_eq!(config.long_wait(), Duration::from_secs(90));
    }

    #[test]
    fn default_horizons_keep_probes_short_and_settling_long() {
        let config = TrawlConfig::default();
        assert!(config.short_wait() < config.long_wait());
    }
}
