//! Scraping commands: full crawl and single-page preview

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use scraper::Html;

use shopcat::config::Config;
use shopcat::error::Result;
use shopcat::record::ProductRecord;
use shopcat::{crawl, export, fetch, locate, report, ShopcatError};

use crate::utils::normalize_store_url;

/// Crawl a store, print the inventory table, and write CSV/JSON outputs
pub fn cmd_scrape(
    url: Option<String>,
    out: &Path,
    max_pages: Option<usize>,
    delay: Option<f64>,
) -> Result<()> {
    let mut config = Config::load()?;

    // Seed the config file on first use so there is something to edit
    let config_path = Config::config_path()?;
    if !config_path.exists() {
        config.save()?;
        println!("Created config file: {}\n", config_path.display());
    }

    if let Some(max_pages) = max_pages {
        config.max_pages = max_pages;
    }
    if let Some(delay) = delay {
        config.request_delay_secs = delay;
    }

    let base_url = match url {
        Some(raw) => normalize_store_url(&raw)
            .ok_or_else(|| ShopcatError::ConfigError(format!("Invalid store URL: {}", raw)))?,
        None => config.base_url.clone(),
    };

    // Ctrl+C stops between requests; partial results are kept
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        println!("\n\nStopping after current request...");
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| ShopcatError::ConfigError(format!("Failed to set Ctrl+C handler: {}", e)))?;

    println!("Scraping {}\n", base_url);
    let crawl_report = crawl::crawl_site(&config, &base_url, &running)?;

    if !running.load(Ordering::SeqCst) {
        println!("\nScrape interrupted; keeping partial results");
    }

    if crawl_report.records.is_empty() {
        println!("\nNo products found");
        return Ok(());
    }

    println!(
        "\nScraping completed! Found {} unique products across {} pages",
        crawl_report.records.len(),
        crawl_report.pages_with_products
    );
    report::print_product_table(&crawl_report.records);
    report::print_scrape_stats(&crawl_report.records);

    std::fs::create_dir_all(out)?;
    let csv_path = out.join("products.csv");
    export::write_scrape_csv(&crawl_report.records, &csv_path)?;
    let json_path = out.join("products.json");
    export::write_scrape_json(&crawl_report.records, &json_path)?;
    let summary = export::summarize(&crawl_report.records);
    let summary_path = out.join("summary.json");
    export::write_summary_json(&summary, &summary_path)?;

    println!("\nFiles written:");
    println!("  {}", csv_path.display());
    println!("  {}", json_path.display());
    println!("  {}", summary_path.display());
    Ok(())
}

/// Fetch one page, run the locator cascade, and show what it finds.
/// Writes nothing.
pub fn cmd_preview(url: &str, json: bool, limit: Option<usize>) -> Result<()> {
    let url = normalize_store_url(url)
        .ok_or_else(|| ShopcatError::ConfigError(format!("Invalid URL: {}", url)))?;

    let page = fetch::fetch_page(&url, &url)?;
    let document = Html::parse_document(&page.html);
    let (found, strategy) = locate::locate_products(&document, &page.url, &url);
    let mut records: Vec<ProductRecord> = found.into_iter().filter(|r| r.is_useful()).collect();
    if let Some(limit) = limit {
        records.truncate(limit);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    match strategy {
        Some(strategy) => println!("Strategy: {}", strategy.name()),
        None => println!("No extraction strategy matched this page"),
    }
    report::print_product_table(&records);
    Ok(())
}
