//! Page-level product location
//!
//! Listing pages differ wildly in markup, so products are located by a
//! cascade of strategies tried in a fixed order. The first strategy that
//! yields any records wins and the rest never run. Cheap and precise
//! comes first, expensive and fuzzy last.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use crate::extract::extract_product;
use crate::fetch::resolve_url;
use crate::price::parse_price;
use crate::record::ProductRecord;

/// Known product-container selectors, most common first. The first
/// selector that matches anything claims the page.
const CONTAINER_SELECTORS: &[&str] = &[
    ".product",
    ".product-item",
    ".product-card",
    ".item",
    ".product-container",
    "[data-product]",
    "[data-product-id]",
    ".grid-item",
    ".shop-item",
    ".catalog-item",
    ".listing-item",
    ".merchandise",
    ".goods",
];

/// Class-name fragments that mark an element as a product container
const PRODUCT_CLASS_KEYWORDS: &[&str] = &["product", "item", "goods", "merchandise", "catalog"];

/// Text nodes matching any of these anchor the backtracking strategy
static PRICE_ANCHOR_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\$\d+(?:\.\d{2})?",
        r"USD\s*\d+(?:\.\d{2})?",
        r"\d+(?:\.\d{2})?\s*USD",
        r"€\d+(?:\.\d{2})?",
        r"£\d+(?:\.\d{2})?",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid price anchor regex"))
    .collect()
});

/// Loose "this text talks about money" check used when walking ancestors
/// and when sniffing around images
static PRICE_HINT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\d+|\d+\s*USD|€\d+|£\d+").expect("Invalid price hint regex"));

/// Cap on price anchors examined per page; busy listing pages repeat the
/// same handful of containers hundreds of times
const MAX_PRICE_ANCHORS: usize = 20;

/// How far up from a price text node the backtracking strategy will climb
const MAX_ANCESTOR_HOPS: usize = 5;

/// The locator strategies, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateStrategy {
    /// Known container class names
    Containers,
    /// JSON-LD Product entries
    StructuredData,
    /// Backtrack from price-looking text nodes
    PriceAnchored,
    /// Images whose parent mentions a price
    ImageProximity,
}

pub const STRATEGY_ORDER: &[LocateStrategy] = &[
    LocateStrategy::Containers,
    LocateStrategy::StructuredData,
    LocateStrategy::PriceAnchored,
    LocateStrategy::ImageProximity,
];

impl LocateStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            LocateStrategy::Containers => "product containers",
            LocateStrategy::StructuredData => "structured data",
            LocateStrategy::PriceAnchored => "price anchors",
            LocateStrategy::ImageProximity => "image proximity",
        }
    }

    /// Run this single strategy against a parsed page
    pub fn run(&self, document: &Html, page_url: &str, base_url: &str) -> Vec<ProductRecord> {
        match self {
            LocateStrategy::Containers => locate_containers(document, page_url, base_url),
            LocateStrategy::StructuredData => locate_structured_data(document, page_url, base_url),
            LocateStrategy::PriceAnchored => locate_price_anchored(document, page_url, base_url),
            LocateStrategy::ImageProximity => locate_image_proximity(document, page_url, base_url),
        }
    }
}

/// Locate all products on a page.
///
/// Returns the records plus the strategy that produced them, or an empty
/// vec and None when the page yielded nothing.
pub fn locate_products(
    document: &Html,
    page_url: &str,
    base_url: &str,
) -> (Vec<ProductRecord>, Option<LocateStrategy>) {
    for strategy in STRATEGY_ORDER {
        let records = strategy.run(document, page_url, base_url);
        if !records.is_empty() {
            return (records, Some(*strategy));
        }
    }
    (Vec::new(), None)
}

/// Strategy 1: the first container selector that matches anything claims
/// the page, and every match becomes a record, useful or not.
fn locate_containers(document: &Html, page_url: &str, base_url: &str) -> Vec<ProductRecord> {
    for selector_str in CONTAINER_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        let fragments: Vec<ElementRef> = document.select(&selector).collect();
        if fragments.is_empty() {
            continue;
        }
        return fragments
            .into_iter()
            .map(|fragment| extract_product(fragment, page_url, base_url))
            .collect();
    }
    Vec::new()
}

/// Strategy 2: JSON-LD Product entries. Malformed script blocks are
/// skipped without sinking the page.
fn locate_structured_data(document: &Html, page_url: &str, base_url: &str) -> Vec<ProductRecord> {
    let Ok(selector) = Selector::parse(r#"script[type="application/ld+json"]"#) else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for script in document.select(&selector) {
        let text: String = script.text().collect();
        let Ok(json) = serde_json::from_str::<Value>(&text) else {
            continue;
        };
        for item in flatten_jsonld(&json) {
            if let Some(record) = record_from_jsonld(item, page_url, base_url) {
                records.push(record);
            }
        }
    }
    records
}

/// Flatten JSON-LD into individual entries (handles @graph and arrays)
fn flatten_jsonld(json: &Value) -> Vec<&Value> {
    let mut items = Vec::new();
    match json {
        Value::Object(map) => {
            if let Some(Value::Array(graph)) = map.get("@graph") {
                for item in graph {
                    items.extend(flatten_jsonld(item));
                }
            } else {
                items.push(json);
            }
        }
        Value::Array(arr) => {
            for item in arr {
                items.extend(flatten_jsonld(item));
            }
        }
        _ => {}
    }
    items
}

/// Map one JSON-LD entry to a record if its @type is product-ish
fn record_from_jsonld(item: &Value, page_url: &str, base_url: &str) -> Option<ProductRecord> {
    if !is_product_type(item.get("@type")) {
        return None;
    }

    let name = item
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string();
    let description = item
        .get("description")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let offers = item.get("offers");
    let price = offers.and_then(offer_price);
    let availability = offers
        .and_then(|o| o.get("availability"))
        .or_else(|| item.get("availability"))
        .and_then(Value::as_str)
        .map(String::from);

    let image_url = match item.get("image") {
        Some(Value::String(s)) => resolve_url(base_url, s),
        Some(Value::Array(arr)) => arr
            .first()
            .and_then(Value::as_str)
            .and_then(|s| resolve_url(base_url, s)),
        _ => None,
    };

    let brand = match item.get("brand") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Object(map)) => map.get("name").and_then(Value::as_str).map(String::from),
        _ => None,
    };

    let sku = item.get("sku").and_then(Value::as_str).map(String::from);

    Some(ProductRecord {
        name,
        price,
        description,
        image_url,
        product_url: page_url.to_string(),
        brand,
        sku,
        availability,
        ..Default::default()
    })
}

fn is_product_type(type_value: Option<&Value>) -> bool {
    match type_value {
        Some(Value::String(s)) => s.to_lowercase().contains("product"),
        Some(Value::Array(arr)) => arr.iter().any(|t| {
            t.as_str()
                .map(|s| s.to_lowercase().contains("product"))
                .unwrap_or(false)
        }),
        _ => false,
    }
}

/// Price from an offers object or the first entry of an offers array
fn offer_price(offers: &Value) -> Option<f64> {
    let offer = match offers {
        Value::Array(arr) => arr.first()?,
        other => other,
    };
    match offer.get("price")? {
        Value::String(s) => parse_price(s),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Strategy 3: find price-looking text nodes and climb toward a
/// product-ish ancestor to extract from.
fn locate_price_anchored(document: &Html, page_url: &str, base_url: &str) -> Vec<ProductRecord> {
    let mut anchors = Vec::new();
    for node in document.tree.nodes() {
        if let Some(text) = node.value().as_text() {
            if PRICE_ANCHOR_RES.iter().any(|re| re.is_match(text)) {
                anchors.push(node);
                if anchors.len() >= MAX_PRICE_ANCHORS {
                    break;
                }
            }
        }
    }

    let mut records = Vec::new();
    for anchor in anchors {
        let mut current = anchor.parent();
        for _ in 0..MAX_ANCESTOR_HOPS {
            let Some(node) = current else {
                break;
            };
            if let Some(element) = ElementRef::wrap(node) {
                if is_product_container(element) {
                    let record = extract_product(element, page_url, base_url);
                    if !records.contains(&record) {
                        records.push(record);
                    }
                    break;
                }
            }
            current = node.parent();
        }
    }
    records
}

/// Product-ish: a container keyword in the class list, or a small block
/// of text that mentions money.
fn is_product_container(element: ElementRef) -> bool {
    let classes = element
        .value()
        .classes()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    if PRODUCT_CLASS_KEYWORDS.iter().any(|kw| classes.contains(kw)) {
        return true;
    }

    let text: String = element.text().map(str::trim).collect();
    let len = text.chars().count();
    PRICE_HINT_RE.is_match(&text) && len > 10 && len < 500
}

/// Strategy 4: last resort. Any image whose parent mentions a price is
/// treated as a product tile.
fn locate_image_proximity(document: &Html, page_url: &str, base_url: &str) -> Vec<ProductRecord> {
    let Ok(selector) = Selector::parse("img") else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for img in document.select(&selector) {
        let Some(parent) = img.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        let text: String = parent.text().collect::<Vec<_>>().join(" ");
        if PRICE_HINT_RE.is_match(&text) {
            let record = extract_product(parent, page_url, base_url);
            if !records.contains(&record) {
                records.push(record);
            }
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://store.example";
    const PAGE: &str = "https://store.example/shop";

    #[test]
    fn test_container_strategy_finds_grid() {
        let document = Html::parse_document(
            r#"
            <html><body>
                <div class="product"><h3>Speaker A</h3><span class="price">₵1,200.00</span><img alt="Speaker A" src="/a.jpg"></div>
                <div class="product"><h3>Speaker B</h3><span class="price">₵1,200.00</span><img alt="Speaker B" src="/b.jpg"></div>
                <div class="product"><h3>Speaker C</h3><span class="price">₵1,200.00</span><img alt="Speaker C" src="/c.jpg"></div>
            </body></html>
        "#,
        );
        let (records, strategy) = locate_products(&document, PAGE, BASE);
        assert_eq!(strategy, Some(LocateStrategy::Containers));
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "Speaker A");
        assert!(records.iter().all(|r| r.price == Some(1200.0)));
    }

    #[test]
    fn test_container_selector_order() {
        let document = Html::parse_document(
            r#"
            <html><body>
                <div class="product-card"><h4>Mouse</h4><span class="price">₵100</span></div>
            </body></html>
        "#,
        );
        let (records, strategy) = locate_products(&document, PAGE, BASE);
        assert_eq!(strategy, Some(LocateStrategy::Containers));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Mouse");
    }

    #[test]
    fn test_first_matching_selector_claims_page_even_when_empty() {
        // a matched container with nothing in it still short-circuits the
        // cascade; filtering out useless records is the caller's job
        let document = Html::parse_document(
            r#"
            <html><body>
                <div class="product"></div>
                <script type="application/ld+json">
                  {"@type": "Product", "name": "Ghost", "offers": {"price": "10"}}
                </script>
            </body></html>
        "#,
        );
        let (records, strategy) = locate_products(&document, PAGE, BASE);
        assert_eq!(strategy, Some(LocateStrategy::Containers));
        assert_eq!(records.len(), 1);
        assert!(!records[0].is_useful());
    }

    #[test]
    fn test_structured_data_strategy() {
        let document = Html::parse_document(
            r#"
            <html><body>
                <script type="application/ld+json">
                {
                    "@context": "https://schema.org",
                    "@type": "Product",
                    "name": "Akai 43\" TV",
                    "description": "Full HD LED television",
                    "brand": {"@type": "Brand", "name": "Akai"},
                    "sku": "AK-43FHD",
                    "image": "/img/akai43.jpg",
                    "offers": {"@type": "Offer", "price": "2199.00", "availability": "https://schema.org/InStock"}
                }
                </script>
            </body></html>
        "#,
        );
        let (records, strategy) = locate_products(&document, PAGE, BASE);
        assert_eq!(strategy, Some(LocateStrategy::StructuredData));
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.name, "Akai 43\" TV");
        assert_eq!(record.price, Some(2199.0));
        assert_eq!(record.brand.as_deref(), Some("Akai"));
        assert_eq!(record.sku.as_deref(), Some("AK-43FHD"));
        assert_eq!(
            record.availability.as_deref(),
            Some("https://schema.org/InStock")
        );
        assert_eq!(
            record.image_url.as_deref(),
            Some("https://store.example/img/akai43.jpg")
        );
    }

    #[test]
    fn test_structured_data_skips_malformed_blocks() {
        let document = Html::parse_document(
            r#"
            <html><body>
                <script type="application/ld+json">{not json at all</script>
                <script type="application/ld+json">
                  {"@type": "Product", "name": "Survivor", "offers": {"price": 55}}
                </script>
            </body></html>
        "#,
        );
        let (records, strategy) = locate_products(&document, PAGE, BASE);
        assert_eq!(strategy, Some(LocateStrategy::StructuredData));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Survivor");
        assert_eq!(records[0].price, Some(55.0));
    }

    #[test]
    fn test_structured_data_graph_and_offer_list() {
        let document = Html::parse_document(
            r#"
            <html><body>
                <script type="application/ld+json">
                {
                    "@context": "https://schema.org",
                    "@graph": [
                        {"@type": "WebSite", "name": "Store"},
                        {"@type": "Product", "name": "Hub", "offers": [{"price": "150.00"}, {"price": "175.00"}]}
                    ]
                }
                </script>
            </body></html>
        "#,
        );
        let (records, _) = locate_products(&document, PAGE, BASE);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Hub");
        assert_eq!(records[0].price, Some(150.0));
    }

    #[test]
    fn test_non_product_types_ignored() {
        let document = Html::parse_document(
            r#"
            <html><body>
                <script type="application/ld+json">
                  {"@type": "Organization", "name": "Store Inc"}
                </script>
            </body></html>
        "#,
        );
        let (records, strategy) = locate_products(&document, PAGE, BASE);
        assert!(records.is_empty());
        assert_eq!(strategy, None);
    }

    #[test]
    fn test_price_anchored_strategy() {
        let document = Html::parse_document(
            r#"
            <html><body>
                <div class="goods-row">
                    <h4>USB Hub</h4>
                    <span>$25.00</span>
                </div>
            </body></html>
        "#,
        );
        let (records, strategy) = locate_products(&document, PAGE, BASE);
        assert_eq!(strategy, Some(LocateStrategy::PriceAnchored));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "USB Hub");
        assert_eq!(records[0].price, Some(25.0));
    }

    #[test]
    fn test_price_anchored_dedupes_same_container() {
        let document = Html::parse_document(
            r#"
            <html><body>
                <div class="goods-row">
                    <h4>USB Hub</h4>
                    <span>$25.00</span>
                    <span>$30.00</span>
                </div>
            </body></html>
        "#,
        );
        let (records, strategy) = locate_products(&document, PAGE, BASE);
        assert_eq!(strategy, Some(LocateStrategy::PriceAnchored));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_image_proximity_strategy() {
        let document = Html::parse_document(
            r#"
            <html><body>
                <div><img src="/i/lamp.jpg" alt="Desk Lamp"><span>$9.99</span></div>
            </body></html>
        "#,
        );
        let (records, strategy) = locate_products(&document, PAGE, BASE);
        assert_eq!(strategy, Some(LocateStrategy::ImageProximity));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Desk Lamp");
        assert_eq!(records[0].price, Some(9.99));
    }

    #[test]
    fn test_no_strategy_matches() {
        let document = Html::parse_document(
            r#"<html><body><p>About our company history.</p></body></html>"#,
        );
        let (records, strategy) = locate_products(&document, PAGE, BASE);
        assert!(records.is_empty());
        assert_eq!(strategy, None);
    }
}
