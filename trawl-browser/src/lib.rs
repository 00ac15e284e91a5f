//! Live-browser side of the Trawl workspace.
//!
//! This crate owns the resilient locator resolution engine: given one or two
//! candidate ways to find an element, it determines which one works against
//! the live page, remembers that choice per role, detects when the cached
//! choice has gone stale, and degrades to empty results instead of raising.
//!
//! - [`driver::TrawlDriver`]: WebDriver session bootstrap with stealth arguments
//! - [`page::TrawlPage`]: fantoccini-backed [`session::LiveSession`]
//! - [`resolve::Resolver`]: the public lookup API (one / all / scoped)
//! - [`discover`]: candidate probing with retry, backoff scrolling, and cache commit
//! - [`cache::LocatorCache`]: per-role proven locators, page and element scoped
//! - [`behavior::HumanBehavior`]: human-like pauses and corrective scrolling
//! - [`stealth`] / [`fingerprint`]: anti-detection arguments, scripts, and
//!   user-agent profiles

pub mod behavior;
pub mod cache;
pub mod discover;
pub mod driver;
pub mod fingerprint;
pub mod page;
pub mod resolve;
pub mod session;
pub mod stealth;

pub use cache::{LocatorCache, Scope};
pub use driver::TrawlDriver;
pub use page::TrawlPage;
pub use resolve::{Resolver, ResolverConfig};
pub use session::{LiveSession, LookupError};
