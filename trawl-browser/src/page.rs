//! Fantoccini-backed page wrapper implementing [`LiveSession`].

use crate::behavior::HumanBehavior;
use crate::fingerprint::UserAgentProfile;
use crate::session::{LiveSession, LookupError};
use crate::stealth::StealthScripts;
use anyhow::Result;
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::{CmdError, ErrorStatus};
use fantoccini::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;
use trawl_common::locator::WireSelector;
use trawl_common::{Locator, StealthLevel};

/// One navigated page on a live session, with stealth scripts applied.
pub struct TrawlPage {
    client: Client,
    stealth_level: StealthLevel,
    profile: UserAgentProfile,
    behavior: HumanBehavior,
    settle_timeout: Duration,
}

impl TrawlPage {
    pub fn new(
        client: Client,
        stealth_level: StealthLevel,
        profile: UserAgentProfile,
        behavior: HumanBehavior,
        settle_timeout: Duration,
    ) -> Self {
        Self {
            client,
            stealth_level,
            profile,
            behavior,
            settle_timeout,
        }
    }

    /// Navigate to `url` and apply the stealth and fingerprint scripts.
    pub async fn goto(&mut self, url: &str) -> Result<()> {
        self.behavior.random_pause(0.3, 1.2).await;
        self.client.goto(url).await?;
        // Heavy pages keep rendering after the navigation command returns;
        // wait for the document body to attach before injecting scripts.
        self.client
            .wait()
            .at_most(self.settle_timeout)
            .for_element(fantoccini::Locator::Css("body"))
            .await?;
        self.apply_stealth_and_fingerprint().await?;
        debug!(target: "browser.page", url, "navigation complete");
        Ok(())
    }

    async fn apply_stealth_and_fingerprint(&mut self) -> Result<()> {
        self.client
            .execute(StealthScripts::core_evasions(), vec![])
            .await?;

        match self.stealth_level {
            StealthLevel::Lightweight => {}
            StealthLevel::Balanced => {
                self.client
                    .execute(StealthScripts::canvas_evasions(), vec![])
                    .await?;
            }
            StealthLevel::Maximum => {
                self.client
                    .execute(StealthScripts::canvas_evasions(), vec![])
                    .await?;
                self.client
                    .execute(StealthScripts::webgl_evasions(), vec![])
                    .await?;
                self.client
                    .execute(
                        &format!(
                            "Object.defineProperty(navigator, 'platform', {{ get: () => '{}' }});",
                            self.profile.platform
                        ),
                        vec![],
                    )
                    .await?;
            }
        }
        Ok(())
    }

    /// Return the full page HTML source.
    pub async fn source(&self) -> Result<String> {
        self.client.source().await.map_err(anyhow::Error::from)
    }

    /// Return the page title.
    pub async fn title(&self) -> Result<String> {
        self.client.title().await.map_err(anyhow::Error::from)
    }

    /// Return the current page URL.
    pub async fn url(&self) -> Result<String> {
        self.client
            .current_url()
            .await
            .map(|url| url.to_string())
            .map_err(anyhow::Error::from)
    }
}

fn as_webdriver(wire: &WireSelector) -> fantoccini::Locator<'_> {
    match wire {
        WireSelector::Css(s) => fantoccini::Locator::Css(s),
        WireSelector::Id(s) => fantoccini::Locator::Id(s),
        WireSelector::XPath(s) => fantoccini::Locator::XPath(s),
        WireSelector::LinkText(s) => fantoccini::Locator::LinkText(s),
    }
}

/// Map wire-level failures onto the engine's retry taxonomy.
fn classify(err: CmdError) -> LookupError {
    match err {
        CmdError::WaitTimeout => LookupError::NotPresent,
        CmdError::Standard(ref w) if matches!(w.error, ErrorStatus::NoSuchElement) => {
            LookupError::NotPresent
        }
        CmdError::Standard(ref w) if matches!(w.error, ErrorStatus::StaleElementReference) => {
            LookupError::Stale
        }
        other => LookupError::Session(other.into()),
    }
}

#[async_trait]
impl LiveSession for TrawlPage {
    type Element = Element;

    async fn wait_for(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Element, LookupError> {
        let wire = locator.to_wire();
        let element = self
            .client
            .wait()
            .at_most(timeout)
            .for_element(as_webdriver(&wire))
            .await
            .map_err(classify)?;

        match element.is_displayed().await {
            Ok(true) => Ok(element),
            Ok(false) => Err(LookupError::NotPresent),
            Err(err) => Err(classify(err)),
        }
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<Element>, LookupError> {
        let wire = locator.to_wire();
        self.client
            .find_all(as_webdriver(&wire))
            .await
            .map_err(classify)
    }

    async fn find_within(
        &self,
        parent: &Element,
        locator: &Locator,
    ) -> Result<Vec<Element>, LookupError> {
        let wire = locator.to_wire();
        parent.find_all(as_webdriver(&wire)).await.map_err(classify)
    }

    async fn scroll_by(&self, dx: i64, dy: i64) -> Result<(), LookupError> {
        self.client
            .execute(
                "window.scrollBy(arguments[0], arguments[1]);",
                vec![json!(dx), json!(dy)],
            )
            .await
            .map(|_| ())
            .map_err(classify)
    }

    async fn page_source(&self) -> Result<String, LookupError> {
        self.client.source().await.map_err(classify)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fantoccini::error::WebDriver;

    fn wire_failure(status: ErrorStatus) -> CmdError {
        CmdError::Standard(WebDriver::new(status, "wire failure"))
    }

    #[test]
    fn timeouts_and_missing_elements_classify_as_not_present() {
        let timed_out = classify(CmdError::WaitTimeout);
        assert!(matches!(timed_out, LookupError::NotPresent));
        assert!(timed_out.is_retryable());

        let missing = classify(CmdError::Standard(WebDriver::new(
            ErrorStatus::NoSuchElement,
            "no such element",
        )));
        assert!(matches!(missing, LookupError::NotPresent));
        assert!(missing.is_retryable());
    }

    #[test]
    fn stale_references_classify_as_stale_and_stay_retryable() {
        let stale = classify(wire_failure(ErrorStatus::StaleElementReference));
        assert!(matches!(stale, LookupError::Stale));
        assert!(stale.is_retryable());
    }

    #[test]
    fn unrelated_wire_failures_become_session_errors() {
        let unknown = classify(wire_failure(ErrorStatus::UnknownError));
        assert!(matches!(unknown, LookupError::Session(_)));
        assert!(!unknown.is_retryable());

        let malformed = classify(CmdError::NotW3C(serde_json::Value::Null));
        assert!(matches!(malformed, LookupError::Session(_)));
        assert!(!malformed.is_retryable());
    }
}
