//! Page discovery and the sequential crawl loop.
//!
//! Discovery runs once against the origin page: fixed listing paths, nav
//! links, pagination links, and absolute URLs mined from script bodies, in
//! that order with duplicates dropped. The crawl itself is strictly
//! sequential with a politeness delay between requests, a page cap, and a
//! content-hash check so two paths serving identical markup are extracted
//! once.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::config::Config;
use crate::dedupe::dedupe_records;
use crate::error::Result;
use crate::extract;
use crate::fetch::{self, PageContent};
use crate::locate;
use crate::record::{category_from_url, ProductRecord};

/// Paths storefronts commonly hang their listings off
const COMMON_PATHS: &[&str] = &[
    "/",
    "/products",
    "/shop",
    "/catalog",
    "/store",
    "/collections",
    "/categories",
    "/items",
    "/browse",
    "/all-products",
];

/// href substrings that mark a link as listing-like
const NAV_HREF_KEYWORDS: &[&str] = &[
    "product",
    "category",
    "collection",
    "shop",
    "catalog",
    "item",
];

const PAGINATION_SELECTORS: &str = r#"a[href*="page"], a[href*="p="], .pagination a, .pager a"#;

/// Quoted absolute URLs inside script bodies (JSON blobs, JS config)
static SCRIPT_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"["'](https?://[^"']+)["']"#).expect("Invalid script URL regex"));

/// Outcome of a crawl run. Records are already deduplicated.
#[derive(Debug)]
pub struct CrawlReport {
    pub records: Vec<ProductRecord>,
    pub pages_visited: usize,
    pub pages_with_products: usize,
}

/// Collect candidate listing pages from the origin page, in discovery
/// order with duplicates dropped.
pub fn discover_pages(origin: &PageContent, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(&origin.html);
    let mut seen: HashSet<String> = HashSet::new();
    let mut pages: Vec<String> = Vec::new();

    let mut push = |url: String| {
        if seen.insert(url.clone()) {
            pages.push(url);
        }
    };

    for path in COMMON_PATHS {
        if let Some(url) = fetch::resolve_url(base_url, path) {
            push(url);
        }
    }

    if let Ok(anchor) = Selector::parse("a[href]") {
        for element in document.select(&anchor) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let lower = href.to_lowercase();
            if NAV_HREF_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
                if let Some(url) = fetch::resolve_url(base_url, href) {
                    push(url);
                }
            }
        }
    }

    if let Ok(pagination) = Selector::parse(PAGINATION_SELECTORS) {
        for element in document.select(&pagination) {
            if let Some(href) = element.value().attr("href") {
                if let Some(url) = fetch::resolve_url(base_url, href) {
                    push(url);
                }
            }
        }
    }

    if let Ok(script) = Selector::parse("script") {
        for element in document.select(&script) {
            let body: String = element.text().collect();
            for cap in SCRIPT_URL_RE.captures_iter(&body) {
                let url = &cap[1];
                if url.contains("product") || url.contains("api") {
                    push(url.to_string());
                }
            }
        }
    }

    pages
}

/// Crawl a store: discover pages from the origin, then fetch each one and
/// run the locator cascade over it. `running` is flipped by the Ctrl+C
/// handler; the loop checks it between fetches and keeps partial results.
pub fn crawl_site(config: &Config, base_url: &str, running: &AtomicBool) -> Result<CrawlReport> {
    let origin = fetch::fetch_page(base_url, base_url)?;

    let mut pages = discover_pages(&origin, &origin.url);
    pages.truncate(config.max_pages);
    println!("Discovered {} pages to scrape", pages.len());

    let delay = Duration::from_secs_f64(config.request_delay_secs);
    let mut visited: HashSet<String> = HashSet::new();
    let mut seen_hashes: HashSet<String> = HashSet::new();
    let mut records: Vec<ProductRecord> = Vec::new();
    let mut pages_visited = 0;
    let mut pages_with_products = 0;

    for (i, url) in pages.iter().enumerate() {
        if !running.load(Ordering::SeqCst) {
            break;
        }
        if !visited.insert(url.clone()) {
            continue;
        }
        if i > 0 {
            std::thread::sleep(delay);
        }

        println!("[{}/{}] {}", i + 1, pages.len(), url);
        let page = match fetch::fetch_page(url, base_url) {
            Ok(page) => page,
            Err(e) => {
                eprintln!("  failed: {}", e);
                continue;
            }
        };
        pages_visited += 1;

        if !seen_hashes.insert(fetch::content_hash(&page.html)) {
            println!("  identical to an earlier page, skipping");
            continue;
        }

        let document = Html::parse_document(&page.html);
        let (found, strategy) = locate::locate_products(&document, &page.url, base_url);
        let mut useful: Vec<ProductRecord> = found.into_iter().filter(|r| r.is_useful()).collect();

        match strategy {
            Some(strategy) if !useful.is_empty() => {
                println!("  found {} products via {}", useful.len(), strategy.name());
            }
            _ => {
                println!("  no products found");
                continue;
            }
        }
        pages_with_products += 1;

        let page_category = category_from_url(&page.url);
        for record in &mut useful {
            if record.category.is_none() {
                record.category = page_category.clone();
            }
        }

        enrich_records(&mut useful, &page.url, base_url, delay, running);
        records.extend(useful);
    }

    let records = dedupe_records(records);
    Ok(CrawlReport {
        records,
        pages_visited,
        pages_with_products,
    })
}

/// Fetch detail pages for records whose listing fragment was too thin to
/// name them, filling gaps without overwriting listing values.
fn enrich_records(
    records: &mut [ProductRecord],
    page_url: &str,
    base_url: &str,
    delay: Duration,
    running: &AtomicBool,
) {
    for record in records.iter_mut() {
        if !running.load(Ordering::SeqCst) {
            return;
        }
        if !record.needs_detail_fetch(page_url) {
            continue;
        }
        std::thread::sleep(delay);
        match fetch::fetch_page(&record.product_url, page_url) {
            Ok(detail_page) => {
                let detail_doc = Html::parse_document(&detail_page.html);
                let detail = extract::extract_detail(&detail_doc, &detail_page.url, base_url);
                record.fill_from(detail);
            }
            Err(e) => eprintln!("  detail fetch failed for {}: {}", record.product_url, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin(html: &str) -> PageContent {
        PageContent {
            url: "https://shopdydy.com/".to_string(),
            html: html.to_string(),
        }
    }

    #[test]
    fn test_common_paths_come_first() {
        let pages = discover_pages(&origin("<html><body></body></html>"), "https://shopdydy.com");
        assert_eq!(pages.len(), COMMON_PATHS.len());
        assert_eq!(pages[0], "https://shopdydy.com/");
        assert_eq!(pages[1], "https://shopdydy.com/products");
    }

    #[test]
    fn test_nav_links_filtered_by_keyword() {
        let html = r#"
            <nav>
                <a href="/category/laptops">Laptops</a>
                <a href="/about-us">About</a>
                <a href="/contact">Contact</a>
            </nav>
        "#;
        let pages = discover_pages(&origin(html), "https://shopdydy.com");
        assert!(pages.contains(&"https://shopdydy.com/category/laptops".to_string()));
        assert!(!pages.iter().any(|p| p.contains("about-us")));
        assert!(!pages.iter().any(|p| p.contains("contact")));
    }

    #[test]
    fn test_pagination_links_discovered() {
        let html = r#"
            <div class="pagination">
                <a href="?page=2">2</a>
                <a href="?page=3">3</a>
            </div>
        "#;
        let pages = discover_pages(&origin(html), "https://shopdydy.com");
        assert!(pages.contains(&"https://shopdydy.com/?page=2".to_string()));
        assert!(pages.contains(&"https://shopdydy.com/?page=3".to_string()));
    }

    #[test]
    fn test_script_urls_kept_only_for_product_or_api() {
        let html = r#"
            <script>
                var endpoint = "https://api.shopdydy.com/v1/items";
                var listing = 'https://shopdydy.com/product/neo-123';
                var font = "https://cdn.example.com/font.woff2";
            </script>
        "#;
        let pages = discover_pages(&origin(html), "https://shopdydy.com");
        assert!(pages.contains(&"https://api.shopdydy.com/v1/items".to_string()));
        assert!(pages.contains(&"https://shopdydy.com/product/neo-123".to_string()));
        assert!(!pages.iter().any(|p| p.contains("font.woff2")));
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        // /products is both a common path and a nav link; it must appear
        // once, at its common-path position
        let html = r#"<a href="/products">All products</a>"#;
        let pages = discover_pages(&origin(html), "https://shopdydy.com");
        let occurrences = pages
            .iter()
            .filter(|p| *p == "https://shopdydy.com/products")
            .count();
        assert_eq!(occurrences, 1);
        assert_eq!(pages[1], "https://shopdydy.com/products");
    }
}
