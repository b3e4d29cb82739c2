//! Read-side commands over the stored catalog: list, stats, export

use std::path::Path;

use shopcat::cli::ExportFormat;
use shopcat::db::{Database, ProductFilter};
use shopcat::error::Result;
use shopcat::{export, report};

pub fn cmd_list(
    category: Option<String>,
    brand: Option<String>,
    search: Option<String>,
    sort: Option<String>,
    desc: bool,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let db = Database::open()?;
    let filter = ProductFilter {
        category,
        brand,
        search,
        sort,
        descending: desc,
        limit,
    };
    let entries = db.query_products(&filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    report::print_catalog_table(&entries);
    Ok(())
}

pub fn cmd_stats(json: bool) -> Result<()> {
    let db = Database::open()?;
    let stats = db.stats()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }
    report::print_catalog_stats(&stats);
    Ok(())
}

/// Re-emit the stored catalog as CSV, JSON, or Excel
pub fn cmd_export(format: ExportFormat, out: &Path) -> Result<()> {
    let db = Database::open()?;
    let entries = db.query_products(&ProductFilter::default())?;
    if entries.is_empty() {
        println!("No products in the catalog. Run `shopcat generate` first.");
        return Ok(());
    }

    std::fs::create_dir_all(out)?;
    let path = match format {
        ExportFormat::Csv => {
            let path = out.join("catalog.csv");
            export::write_catalog_csv(&entries, &path)?;
            path
        }
        ExportFormat::Json => {
            let path = out.join("catalog.json");
            export::write_catalog_json(&entries, &path)?;
            path
        }
        ExportFormat::Xlsx => {
            let path = out.join("catalog.xlsx");
            export::write_catalog_xlsx(&entries, &path)?;
            path
        }
    };

    println!("Exported {} products to {}", entries.len(), path.display());
    Ok(())
}
