//! Human-like interaction primitives.
//!
//! Scrolling and pausing serve two purposes during failed lookups: they
//! trigger viewport-based lazy rendering so below-the-fold elements attach
//! to the DOM before a retry, and they keep interaction timing from looking
//! mechanically regular.

use crate::session::{LiveSession, LookupError};
use rand::rngs::OsRng;
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

/// Pixels of the corrective nudge after a scroll.
const SCROLL_CORRECTION: i64 = 50;

/// Produces human-like delays and scrolling to reduce automation signals.
#[derive(Debug, Clone)]
pub struct HumanBehavior {
    /// Milliseconds slept between a scroll and its corrective nudge.
    scroll_pause_ms: (u64, u64),
}

impl Default for HumanBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanBehavior {
    pub fn new() -> Self {
        Self {
            scroll_pause_ms: (400, 900),
        }
    }

    /// Override the scroll pause window. Tests use a near-zero window.
    pub fn with_scroll_pause_ms(min: u64, max: u64) -> Self {
        Self {
            scroll_pause_ms: (min, max),
        }
    }

    /// Sleep for a uniformly sampled duration between `min_s` and `max_s`
    /// seconds.
    pub async fn random_pause(&self, min_s: f64, max_s: f64) {
        let mut rng = OsRng;
        let secs = rng.gen_range(min_s..=max_s);
        sleep(Duration::from_secs_f64(secs)).await;
    }

    /// Scroll by `(dx, dy)`, pause briefly, then apply a small corrective
    /// scroll opposite in vertical direction.
    pub async fn human_scroll<S: LiveSession>(
        &self,
        session: &S,
        dx: i64,
        dy: i64,
    ) -> Result<(), LookupError> {
        session.scroll_by(dx, dy).await?;

        let (min, max) = self.scroll_pause_ms;
        self.random_pause(min as f64 / 1000.0, max as f64 / 1000.0)
            .await;

        let correction = if dy >= 0 {
            -SCROLL_CORRECTION
        } else {
            SCROLL_CORRECTION
        };
        session.scroll_by(dx, correction).await
    }
}
