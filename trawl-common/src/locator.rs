//! Candidate locators: an immutable description of how to find an element.
//!
//! A [`Locator`] pairs a search [`Strategy`] with a selector string. Both the
//! live (WebDriver) and static (parsed snapshot) backends consume the same
//! request shape; each normalises it into the form its engine understands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a locator's value should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    Id,
    Css,
    XPath,
    TagName,
    ClassName,
    LinkText,
}

/// An immutable strategy + selector pair. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    strategy: Strategy,
    value: String,
}

impl Locator {
    pub fn new(strategy: Strategy, value: impl Into<String>) -> Self {
        Self {
            strategy,
            value: value.into(),
        }
    }

    pub fn id(value: impl Into<String>) -> Self {
        Self::new(Strategy::Id, value)
    }

    pub fn css(value: impl Into<String>) -> Self {
        Self::new(Strategy::Css, value)
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Self::new(Strategy::XPath, value)
    }

    pub fn tag_name(value: impl Into<String>) -> Self {
        Self::new(Strategy::TagName, value)
    }

    pub fn class_name(value: impl Into<String>) -> Self {
        Self::new(Strategy::ClassName, value)
    }

    pub fn link_text(value: impl Into<String>) -> Self {
        Self::new(Strategy::LinkText, value)
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Normalise into the owned form the WebDriver backend can borrow from.
    pub fn to_wire(&self) -> WireSelector {
        match self.strategy {
            Strategy::Id => WireSelector::Id(self.value.clone()),
            Strategy::Css => WireSelector::Css(self.value.clone()),
            Strategy::XPath => WireSelector::XPath(self.value.clone()),
            Strategy::TagName => WireSelector::Css(self.value.clone()),
            Strategy::ClassName => WireSelector::Css(format!(".{}", self.value)),
            Strategy::LinkText => WireSelector::LinkText(self.value.clone()),
        }
    }

    /// CSS form for querying a parsed static snapshot.
    ///
    /// XPath and link-text locators have no CSS equivalent; they yield `None`
    /// and the static helpers treat them as matching nothing.
    pub fn static_css(&self) -> Option<String> {
        match self.strategy {
            Strategy::Id => Some(format!("#{}", self.value)),
            Strategy::Css => Some(self.value.clone()),
            Strategy::TagName => Some(self.value.clone()),
            Strategy::ClassName => Some(format!(".{}", self.value)),
            Strategy::XPath | Strategy::LinkText => None,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.strategy {
            Strategy::Id => "id",
            Strategy::Css => "css",
            Strategy::XPath => "xpath",
            Strategy::TagName => "tag",
            Strategy::ClassName => "class",
            Strategy::LinkText => "link-text",
        };
        write!(f, "{}:{}", tag, self.value)
    }
}

/// A locator normalised into one of the shapes the wire protocol accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireSelector {
    Id(String),
    Css(String),
    XPath(String),
    LinkText(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_structural() {
        assert_eq!(Locator::css(".price"), Locator::css(".price"));
        assert_ne!(Locator::css(".price"), Locator::xpath(".price"));
        assert_ne!(Locator::css(".price"), Locator::css(".cost"));
    }

    #[test]
    fn class_and_tag_normalise_to_css() {
        assert_eq!(
            Locator::class_name("price").to_wire(),
            WireSelector::Css(".price".into())
        );
        assert_eq!(
            Locator::tag_name("article").to_wire(),
            WireSelector::Css("article".into())
        );
        assert_eq!(
            Locator::id("total").to_wire(),
            WireSelector::Id("total".into())
        );
    }

    #[test]
    fn static_css_covers_css_like_strategies_only() {
        assert_eq!(Locator::id("total").static_css().as_deref(), Some("#total"));
        assert_eq!(
            Locator::class_name("price").static_css().as_deref(),
            Some(".price")
        );
        assert_eq!(Locator::xpath("//div").static_css(), None);
        assert_eq!(Locator::link_text("next").static_css(), None);
    }
}
