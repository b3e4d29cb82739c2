//! Catalog generation commands

use std::path::Path;

use inquire::Confirm;

use shopcat::config::Config;
use shopcat::db::Database;
use shopcat::error::Result;
use shopcat::{catalog, classify, export, ShopcatError};

/// Build a full catalog from a directory of product images: CSV, JSON,
/// Excel workbook, and the SQLite store.
pub fn cmd_generate(image_dir: &Path, out: &Path, yes: bool) -> Result<()> {
    if !image_dir.is_dir() {
        return Err(ShopcatError::ConfigError(format!(
            "Image directory not found: {}",
            image_dir.display()
        )));
    }

    let config = Config::load()?;
    let files = catalog::collect_image_files(image_dir)?;
    if files.is_empty() {
        return Err(ShopcatError::NoImagesFound(image_dir.display().to_string()));
    }
    println!("Found {} product images", files.len());

    let mut db = Database::open()?;
    let existing = db.count_products()?;
    if existing > 0 && !yes {
        let confirm = Confirm::new(&format!(
            "Replace the existing catalog ({} products)?",
            existing
        ))
        .with_default(false)
        .prompt()
        .map_err(|e| ShopcatError::ConfigError(e.to_string()))?;

        if !confirm {
            println!("Aborted.");
            return Ok(());
        }
    }

    let today = catalog::today_stamp();
    let mut entries = Vec::with_capacity(files.len());
    for (i, file) in files.iter().enumerate() {
        entries.push(catalog::build_entry(file, i + 1, config.usd_rate, &today));
        if (i + 1) % 10 == 0 {
            println!("Processed {} products...", i + 1);
        }
    }

    std::fs::create_dir_all(out)?;
    let csv_path = out.join("catalog.csv");
    export::write_catalog_csv(&entries, &csv_path)?;
    let json_path = out.join("catalog.json");
    export::write_catalog_json(&entries, &json_path)?;
    let xlsx_path = out.join("catalog.xlsx");
    export::write_catalog_xlsx(&entries, &xlsx_path)?;

    let inserted = db.replace_all(&entries)?;

    println!("\nProcessing complete!");
    println!("Processed {} products", inserted);
    println!("Excel catalog: {}", xlsx_path.display());
    println!("CSV export:    {}", csv_path.display());
    println!("JSON export:   {}", json_path.display());
    println!("Database:      {}", Config::db_path()?.display());
    Ok(())
}

/// Print the classification for one product name
pub fn cmd_classify(name: &str) -> Result<()> {
    let config = Config::load()?;
    let classification = classify::classify(name);
    println!("Name:        {}", name);
    println!("Category:    {}", classification.category);
    println!("Subcategory: {}", classification.subcategory);
    println!("Brand:       {}", classification.brand);
    println!(
        "Est. price:  {}{}",
        config.currency_symbol, classification.price_ghs
    );
    println!(
        "SKU pattern: {}",
        classify::make_sku(classification.category, classification.subcategory, 1)
    );
    Ok(())
}
