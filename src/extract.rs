//! Field extraction from product HTML
//!
//! Two extractors share the same selector-family machinery: one reads a
//! listing-page fragment (a grid tile), the other reads a full product
//! detail page. Each field walks an ordered selector list and takes the
//! first hit; a miss leaves the field empty rather than failing.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::fetch::resolve_url;
use crate::price::{find_price_in_text, parse_price};
use crate::record::ProductRecord;

/// Name selectors for listing fragments, headings before class names
const NAME_SELECTORS: &[&str] = &[
    "h1",
    "h2",
    "h3",
    "h4",
    ".title",
    ".name",
    ".product-title",
    ".product-name",
    "[data-title]",
];

const PRICE_SELECTORS: &[&str] = &[".price", ".cost", ".amount", ".money", "[data-price]"];

const ORIGINAL_PRICE_SELECTORS: &[&str] = &[
    ".original-price",
    ".regular-price",
    ".was-price",
    ".price-original",
    ".compare-price",
    ".old-price",
];

const DESCRIPTION_SELECTORS: &[&str] = &[
    ".description",
    ".product-description",
    ".summary",
    ".details",
];

/// Selector families for full product pages
const DETAIL_NAME_SELECTORS: &[&str] = &[
    "h1.product-title",
    "h1",
    ".product-name",
    ".product-title",
    "[data-product-title]",
];

const DETAIL_PRICE_SELECTORS: &[&str] = &[
    ".price",
    ".product-price",
    "[data-price]",
    ".current-price",
    ".sale-price",
    ".price-current",
    ".product-price-current",
    ".money",
    ".amount",
];

const DETAIL_DESCRIPTION_SELECTORS: &[&str] = &[
    ".description",
    ".product-description",
    ".product-details",
    ".product-info p",
    ".details",
];

const AVAILABILITY_SELECTORS: &[&str] = &[
    ".availability",
    ".stock-status",
    ".in-stock",
    ".out-of-stock",
    "[data-availability]",
];

const MAX_DESCRIPTION_CHARS: usize = 300;

/// Price-looking substrings stripped from anchor text before it can
/// stand in as a product name
static PRICE_TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"₵\d+|GHS\s*\d+|\$\d+").expect("Invalid price text regex"));

/// Extract a product record from a listing-page fragment.
///
/// Field order is fixed: name, price, original price, description, image,
/// link. Always returns a record; emptiness is the caller's concern.
pub fn extract_product(fragment: ElementRef, page_url: &str, base_url: &str) -> ProductRecord {
    let name = extract_name(fragment);
    let price = select_price(fragment, PRICE_SELECTORS)
        .or_else(|| find_price_in_text(&fragment_text(fragment)));
    let original_price = select_price(fragment, ORIGINAL_PRICE_SELECTORS);
    let description = select_description(fragment, DESCRIPTION_SELECTORS, 20);
    let image_url = first_image_url(fragment, base_url);
    let product_url = first_link_url(fragment, base_url).unwrap_or_else(|| page_url.to_string());

    ProductRecord {
        name,
        price,
        original_price,
        description,
        image_url,
        product_url,
        ..Default::default()
    }
}

/// Extract a product record from a full product detail page.
pub fn extract_detail(document: &Html, page_url: &str, base_url: &str) -> ProductRecord {
    let root = document.root_element();

    let name = select_first_text(root, DETAIL_NAME_SELECTORS).unwrap_or_default();
    let price = select_price(root, DETAIL_PRICE_SELECTORS);
    let original_price = select_price(root, ORIGINAL_PRICE_SELECTORS);
    let description = select_description(root, DETAIL_DESCRIPTION_SELECTORS, 10);
    let availability = select_first_text(root, AVAILABILITY_SELECTORS);
    let image_url = first_image_url(root, base_url);

    ProductRecord {
        name,
        price,
        original_price,
        description,
        image_url,
        product_url: page_url.to_string(),
        availability,
        ..Default::default()
    }
}

/// Name lookup with fallbacks: heading/class selectors, then image
/// alt/title, then anchor title or de-priced anchor text.
fn extract_name(fragment: ElementRef) -> String {
    if let Some(name) = select_first_text(fragment, NAME_SELECTORS) {
        return name;
    }

    if let Ok(img_selector) = Selector::parse("img") {
        if let Some(img) = fragment.select(&img_selector).next() {
            for attr in ["alt", "title"] {
                if let Some(value) = img.value().attr(attr) {
                    let value = value.trim();
                    if !value.is_empty() {
                        return value.to_string();
                    }
                }
            }
        }
    }

    if let Ok(link_selector) = Selector::parse("a") {
        if let Some(link) = fragment.select(&link_selector).next() {
            if let Some(title) = link.value().attr("title") {
                let title = title.trim();
                if !title.is_empty() {
                    return title.to_string();
                }
            }
            let text: String = link.text().collect();
            let stripped = PRICE_TEXT_RE.replace_all(&text, "");
            let stripped = stripped.trim();
            if stripped.chars().count() > 2 {
                return stripped.to_string();
            }
        }
    }

    String::new()
}

/// First selector whose first match has non-empty text
fn select_first_text(el: ElementRef, selectors: &[&str]) -> Option<String> {
    for selector_str in selectors {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(found) = el.select(&selector).next() {
            let text: String = found.text().collect();
            let text = text.trim();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}

/// First selector whose first match parses to a price
fn select_price(el: ElementRef, selectors: &[&str]) -> Option<f64> {
    for selector_str in selectors {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(found) = el.select(&selector).next() {
            let text: String = found.text().collect();
            if let Some(price) = parse_price(&text) {
                return Some(price);
            }
        }
    }
    None
}

/// First selector whose text clears `min_chars`, truncated for display
fn select_description(el: ElementRef, selectors: &[&str], min_chars: usize) -> Option<String> {
    for selector_str in selectors {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(found) = el.select(&selector).next() {
            let text: String = found.text().collect();
            let text = text.trim();
            if text.chars().count() > min_chars {
                return Some(truncate_description(text));
            }
        }
    }
    None
}

fn truncate_description(text: &str) -> String {
    if text.chars().count() > MAX_DESCRIPTION_CHARS {
        let head: String = text.chars().take(MAX_DESCRIPTION_CHARS).collect();
        format!("{}...", head.trim_end())
    } else {
        text.to_string()
    }
}

/// First image URL from src or the common lazy-load attributes
fn first_image_url(el: ElementRef, base_url: &str) -> Option<String> {
    let selector = Selector::parse("img").ok()?;
    let img = el.select(&selector).next()?;
    for attr in ["src", "data-src", "data-lazy-src"] {
        if let Some(value) = img.value().attr(attr) {
            let value = value.trim();
            if !value.is_empty() {
                return resolve_url(base_url, value);
            }
        }
    }
    None
}

/// First anchor href, resolved absolute
fn first_link_url(el: ElementRef, base_url: &str) -> Option<String> {
    let selector = Selector::parse("a[href]").ok()?;
    let link = el.select(&selector).next()?;
    let href = link.value().attr("href")?;
    resolve_url(base_url, href)
}

/// Full visible text of a fragment
fn fragment_text(el: ElementRef) -> String {
    el.text().collect::<Vec<_>>().join(" ")
}
