//! Plausible desktop fingerprints, one chosen per session.

use rand::prelude::SliceRandom;
use serde::{Deserialize, Serialize};

/// Snapshot of user agent, viewport, and locale characteristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAgentProfile {
    pub user_agent: String,
    pub viewport: (u32, u32),
    pub platform: String,
    pub languages: Vec<String>,
    pub timezone: String,
}

/// Small pool of desktop profiles a session draws from.
#[derive(Debug, Clone)]
pub struct UserAgentPool {
    profiles: Vec<UserAgentProfile>,
}

impl Default for UserAgentPool {
    fn default() -> Self {
        Self::new()
    }
}

impl UserAgentPool {
    pub fn new() -> Self {
        Self {
            profiles: vec![
                UserAgentProfile {
                    user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string(),
                    viewport: (1920, 1080),
                    platform: "Win32".to_string(),
                    languages: vec!["en-US".to_string(), "en".to_string()],
                    timezone: "America/New_York".to_string(),
                },
                UserAgentProfile {
                    user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string(),
                    viewport: (1440, 900),
                    platform: "MacIntel".to_string(),
                    languages: vec!["en-US".to_string(), "en".to_string()],
                    timezone: "America/Los_Angeles".to_string(),
                },
                UserAgentProfile {
                    user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string(),
                    viewport: (1920, 1080),
                    platform: "Linux x86_64".to_string(),
                    languages: vec!["en-US".to_string(), "en".to_string()],
                    timezone: "Europe/Berlin".to_string(),
                },
            ],
        }
    }

    /// Pick a profile at random for the lifetime of one session.
    pub fn pick(&self) -> &UserAgentProfile {
        let mut rng = rand::thread_rng();
        // the built-in pool is never empty
        self.profiles
            .choose(&mut rng)
            .expect("user agent pool is non-empty")
    }
}
