//! Console reporting: the scraped-inventory table, price statistics, and
//! stored-catalog summaries.

use std::collections::HashMap;

use colored::Colorize;

use crate::catalog::CatalogEntry;
use crate::db::CatalogStats;
use crate::record::ProductRecord;

const TABLE_WIDTH: usize = 120;
const NAME_CLIP: usize = 40;
const DESCRIPTION_CLIP: usize = 60;

/// Print the scraped products as a table sorted by price, highest first.
/// Records without a price sink to the bottom.
pub fn print_product_table(records: &[ProductRecord]) {
    if records.is_empty() {
        println!("No products found");
        return;
    }

    let mut sorted: Vec<&ProductRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        b.price
            .unwrap_or(f64::NEG_INFINITY)
            .total_cmp(&a.price.unwrap_or(f64::NEG_INFINITY))
    });

    // Check if terminal supports colors
    let use_color = atty::is(atty::Stream::Stdout);

    println!("\n{}", "=".repeat(TABLE_WIDTH));
    println!("{}", "PRODUCT INVENTORY".bold());
    println!("{}", "=".repeat(TABLE_WIDTH));

    let header = format!(
        "{:<45}{:<14}{:<18}{}",
        "Product Name", "Price (GHS)", "Category", "Description"
    );
    println!("{}", header.bold());
    println!("{}", "-".repeat(TABLE_WIDTH));

    for record in sorted {
        let name = format!("{:<45}", clip(record.name.trim(), NAME_CLIP));
        let price = format!(
            "{:<14}",
            match record.price {
                Some(p) => format_ghs(p),
                None => "N/A".to_string(),
            }
        );
        let category = format!("{:<18}", record.category.as_deref().unwrap_or("General"));
        let description = clip(record.description.as_deref().unwrap_or(""), DESCRIPTION_CLIP);

        println!(
            "{}{}{}{}",
            name.bold(),
            if use_color { price.green().to_string() } else { price },
            if use_color { category.cyan().to_string() } else { category },
            description.dimmed()
        );
    }
    println!("{}", "=".repeat(TABLE_WIDTH));
}

/// Print summary statistics for a scrape run
pub fn print_scrape_stats(records: &[ProductRecord]) {
    println!("{}", "INVENTORY SUMMARY".bold());
    println!("{}", "-".repeat(50));
    println!("Total Products: {}", records.len());

    let mut prices: Vec<f64> = records.iter().filter_map(|r| r.price).collect();
    if !prices.is_empty() {
        prices.sort_by(f64::total_cmp);
        let min = prices[0];
        let max = prices[prices.len() - 1];
        let average = prices.iter().sum::<f64>() / prices.len() as f64;
        println!("Price Range: {} - {}", format_ghs(min), format_ghs(max));
        println!("Average Price: {}", format_ghs(average));
        println!("Median Price: {}", format_ghs(median_of_sorted(&prices)));
    }

    let ranked = top_categories(records);
    if !ranked.is_empty() {
        println!("\nTop Categories:");
        for (category, count) in ranked.into_iter().take(5) {
            println!("  • {}: {} products", category, count);
        }
    }
}

/// Print stored catalog entries as a table
pub fn print_catalog_table(entries: &[CatalogEntry]) {
    if entries.is_empty() {
        println!("No products in the catalog. Run `shopcat generate` first.");
        return;
    }

    let header = format!(
        "{:<14}{:<34}{:<14}{:<18}{:<14}{}",
        "SKU", "Product Name", "Brand", "Category", "Price (GHS)", "Date Added"
    );
    println!("{}", header.bold());
    println!("{}", "-".repeat(108));

    for entry in entries {
        println!(
            "{:<14}{:<34}{:<14}{:<18}{:<14}{}",
            entry.sku,
            clip(&entry.name, 30),
            clip(&entry.brand, 10),
            clip(&entry.category, 14),
            format_ghs(entry.price_ghs as f64),
            entry.date_added
        );
    }
    println!("\n{} products", entries.len());
}

/// Print catalog aggregates from the store
pub fn print_catalog_stats(stats: &CatalogStats) {
    println!("{}", "CATALOG STATISTICS".bold());
    println!("{}", "-".repeat(50));
    println!("Total Products:  {}", stats.total_products);
    println!("Categories:      {}", stats.total_categories);
    println!("Brands:          {}", stats.total_brands);
    println!("Inventory Value: {}", format_ghs(stats.total_value_ghs));
    println!("Average Price:   {}", format_ghs(stats.avg_price_ghs));

    if !stats.by_category.is_empty() {
        println!("\nBy Category:");
        for row in &stats.by_category {
            println!(
                "  {:<20} {:>4} products, avg {}",
                row.category,
                row.count,
                format_ghs(row.avg_price)
            );
        }
    }
}

/// Format a non-negative amount as "₵12,345.67"
pub fn format_ghs(amount: f64) -> String {
    format!("₵{}", group_thousands(amount))
}

fn group_thousands(amount: f64) -> String {
    let formatted = format!("{:.2}", amount);
    let Some((int_part, frac_part)) = formatted.split_once('.') else {
        return formatted;
    };
    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    format!("{}.{}", grouped, frac_part)
}

/// Categories ranked by product count, ties broken alphabetically
fn top_categories(records: &[ProductRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        if let Some(category) = record.category.as_deref() {
            *counts.entry(category).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(category, count)| (category.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

/// First `max` chars with "..." appended when over; char-safe
fn clip(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
