//! Browser session bootstrap and teardown.
//!
//! The session is the one shared mutable resource: acquired once at startup,
//! released exactly once at shutdown, on all exit paths.

use crate::behavior::HumanBehavior;
use crate::fingerprint::{UserAgentPool, UserAgentProfile};
use crate::page::TrawlPage;
use crate::stealth::build_stealth_arguments;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;
use tracing::info;
use trawl_common::{Result, StealthLevel, TrawlConfig, TrawlError};
use webdriver::capabilities::Capabilities;

/// Thin wrapper around a fantoccini WebDriver client with stealth and
/// behavioral helpers.
pub struct TrawlDriver {
    client: Client,
    behavior: HumanBehavior,
    profile: UserAgentProfile,
    stealth_level: StealthLevel,
    settle_timeout: Duration,
}

fn validate_webdriver_url(url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(TrawlError::Config(format!(
            "webdriver url must be http(s): {url:?}"
        )))
    }
}

impl TrawlDriver {
    /// Connect to a running WebDriver service with anti-detection arguments
    /// and a fingerprint profile chosen for the session's lifetime.
    pub async fn connect(config: &TrawlConfig) -> Result<Self> {
        validate_webdriver_url(&config.webdriver_url)?;
        let profile = UserAgentPool::new().pick().clone();
        let args = build_stealth_arguments(&config.stealth_level, &profile, config.headless);

        let mut chrome_opts = HashMap::new();
        chrome_opts.insert("args".to_string(), json!(args));
        let mut caps = Capabilities::new();
        caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&config.webdriver_url)
            .await
            .map_err(|err| TrawlError::Session(err.into()))?;

        info!(
            target: "browser.driver",
            url = %config.webdriver_url,
            platform = %profile.platform,
            "session acquired"
        );

        Ok(Self {
            client,
            behavior: HumanBehavior::new(),
            profile,
            stealth_level: config.stealth_level.clone(),
            settle_timeout: config.long_wait(),
        })
    }

    /// Connect and navigate in one step. If navigation fails the session is
    /// closed before the error propagates, so a half-initialised bootstrap
    /// never leaks a browser process.
    pub async fn start(config: &TrawlConfig, url: &str) -> Result<(Self, TrawlPage)> {
        let driver = Self::connect(config).await?;
        match driver.open(url).await {
            Ok(page) => Ok((driver, page)),
            Err(err) => {
                let _ = driver.close().await;
                Err(err)
            }
        }
    }

    /// Navigate to `url` and return a [`TrawlPage`] with stealth and
    /// fingerprint scripts applied.
    pub async fn open(&self, url: &str) -> Result<TrawlPage> {
        let mut page = TrawlPage::new(
            self.client.clone(),
            self.stealth_level.clone(),
            self.profile.clone(),
            self.behavior.clone(),
            self.settle_timeout,
        );
        page.goto(url).await.map_err(TrawlError::Session)?;
        Ok(page)
    }

    /// Close the underlying browser session. Consumes the driver so release
    /// happens at most once.
    pub async fn close(self) -> Result<()> {
        self.client
            .close()
            .await
            .map_err(|err| TrawlError::Session(err.into()))?;
        info!(target: "browser.driver", "session released");
        Ok(())
    }
}
