//! Bootstrap validation tests that need no running WebDriver service.

use trawl_browser::TrawlDriver;
use trawl_common::{TrawlConfig, TrawlError};

#[tokio::test]
async fn connect_rejects_a_webdriver_url_without_a_scheme() {
    let config = TrawlConfig {
        webdriver_url: "localhost:9515".to_string(),
        ..TrawlConfig::default()
    };

    let err = TrawlDriver::connect(&config)
        .await
        .err()
        .expect("a schemeless endpoint must be rejected before connecting");
    assert!(matches!(err, TrawlError::Config(_)));
}

#[tokio::test]
async fn connect_rejects_an_empty_webdriver_url() {
    let config = TrawlConfig {
        webdriver_url: String::new(),
        ..TrawlConfig::default()
    };

    let err = TrawlDriver::connect(&config)
        .await
        .err()
        .expect("an empty endpoint must be rejected before connecting");
    assert!(matches!(err, TrawlError::Config(_)));
}
