use trawl_common::Locator;
use trawl_extract::StaticDocument;

const PRODUCT_PAGE: &str = r#"
<html>
  <body>
    <div class="listing">
      <article class="card">
        <h2 class="title">Widget</h2>
        <span data-price="19.99">19.99</span>
      </article>
      <article class="card">
        <h2 class="title">Gadget</h2>
        <span data-price="24.50">24.50</span>
      </article>
    </div>
  </body>
</html>
"#;

#[test]
fn secondary_candidate_is_used_when_primary_matches_nothing() {
    let doc = StaticDocument::parse(PRODUCT_PAGE);
    let node = doc.extract_one(
        "product-price",
        &Locator::css(".price"),
        Some(&Locator::css("[data-price]")),
    );

    assert!(!node.is_placeholder());
    assert_eq!(node.text(), "19.99");
    assert_eq!(node.attr("data-price"), Some("19.99"));
}

#[test]
fn primary_wins_when_both_candidates_match() {
    let doc = StaticDocument::parse(PRODUCT_PAGE);
    let node = doc.extract_one(
        "product-title",
        &Locator::class_name("title"),
        Some(&Locator::css("[data-price]")),
    );

    assert_eq!(node.text(), "Widget");
}

#[test]
fn extract_all_returns_every_match() {
    let doc = StaticDocument::parse(PRODUCT_PAGE);
    let cards = doc.extract_all("product-card", &Locator::css(".card"), None);

    assert_eq!(cards.len(), 2);
    assert!(cards.iter().all(|c| !c.is_placeholder()));
}

#[test]
fn extract_all_total_failure_yields_single_placeholder() {
    let doc = StaticDocument::parse(PRODUCT_PAGE);
    let nodes = doc.extract_all(
        "missing",
        &Locator::css(".absent"),
        Some(&Locator::id("also-absent")),
    );

    assert_eq!(nodes.len(), 1);
    assert!(nodes[0].is_placeholder());
    assert_eq!(nodes[0].text(), "");
}

#[test]
fn placeholder_is_inert_under_nesting() {
    let doc = StaticDocument::parse(PRODUCT_PAGE);
    let missing = doc.extract_one("missing", &Locator::css(".absent"), None);
    assert!(missing.is_placeholder());

    // chained extraction on a placeholder stays branch-free
    let nested = missing.extract_one("deeper", &Locator::css(".card"), None);
    assert!(nested.is_placeholder());
    assert_eq!(nested.attr("data-price"), None);
    assert_eq!(nested.html(), "");

    let nested_all = missing.extract_all("deeper", &Locator::css(".card"), None);
    assert_eq!(nested_all.len(), 1);
    assert!(nested_all[0].is_placeholder());
}

#[test]
fn nested_extraction_is_scoped_to_the_parent_node() {
    let doc = StaticDocument::parse(PRODUCT_PAGE);
    let cards = doc.extract_all("product-card", &Locator::css(".card"), None);

    let price = cards[1].extract_one("product-price", &Locator::css("[data-price]"), None);
    assert_eq!(price.text(), "24.50");
}

#[test]
fn tag_and_id_strategies_query_the_snapshot() {
    let html = r#"<html><body><main id="content"><p>hello</p></main></body></html>"#;
    let doc = StaticDocument::parse(html);

    assert_eq!(
        doc.extract_one("content", &Locator::id("content"), None)
            .attr("id"),
        Some("content")
    );
    assert_eq!(
        doc.extract_one("para", &Locator::tag_name("p"), None).text(),
        "hello"
    );
}

#[test]
fn xpath_strategy_matches_nothing_statically() {
    let doc = StaticDocument::parse(PRODUCT_PAGE);
    let node = doc.extract_one("product-card", &Locator::xpath("//article"), None);
    assert!(node.is_placeholder());
}

#[test]
fn repeated_extraction_is_idempotent() {
    let doc = StaticDocument::parse(PRODUCT_PAGE);
    let first = doc.extract_all("product-card", &Locator::css(".card"), None);
    let second = doc.extract_all("product-card", &Locator::css(".card"), None);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.html(), b.html());
    }
}
