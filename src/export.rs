//! File outputs: scrape results (CSV, JSON, summary) and catalog exports
//! (CSV, JSON, styled Excel workbook with embedded thumbnails).

use std::collections::HashSet;
use std::path::Path;

use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Image, Workbook};
use serde::Serialize;

use crate::catalog::{self, CatalogEntry};
use crate::error::Result;
use crate::record::ProductRecord;

const CATALOG_CSV_HEADERS: &[&str] = &[
    "SKU",
    "Product Name",
    "Brand",
    "Category",
    "Subcategory",
    "Description",
    "Key Features",
    "Price (GHS)",
    "Price (USD)",
    "Condition",
    "Stock Status",
    "Image Path",
    "Date Added",
];

/// Spreadsheet column order after the thumbnail column
const XLSX_COLUMNS: &[&str] = &[
    "Product Name",
    "Category",
    "Subcategory",
    "Brand",
    "Description",
    "Key Features",
    "Condition",
    "Price (GHS)",
    "Price (USD)",
    "Stock Status",
    "File Path",
    "SKU",
    "Date Added",
];

/// Run summary written alongside scrape results
#[derive(Debug, Serialize)]
pub struct ScrapeSummary {
    pub total_products: usize,
    /// Count of distinct categories seen
    pub categories: usize,
    pub price_range: PriceRange,
    pub scraping_timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

/// Summarize a scrape run. Price figures cover only records that carried
/// a price; all zeros when none did.
pub fn summarize(records: &[ProductRecord]) -> ScrapeSummary {
    let prices: Vec<f64> = records.iter().filter_map(|r| r.price).collect();
    let (min, max, average) = if prices.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let average = prices.iter().sum::<f64>() / prices.len() as f64;
        (min, max, average)
    };

    let categories = records
        .iter()
        .filter_map(|r| r.category.as_deref())
        .collect::<HashSet<_>>()
        .len();

    ScrapeSummary {
        total_products: records.len(),
        categories,
        price_range: PriceRange { min, max, average },
        scraping_timestamp: Local::now().to_rfc3339(),
    }
}

/// Write scraped records as CSV. Headers come from the record fields:
/// name, price, original_price, description, image_url, product_url,
/// category, subcategory, brand, sku, availability.
pub fn write_scrape_csv(records: &[ProductRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_scrape_json(records: &[ProductRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn write_summary_json(summary: &ScrapeSummary, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn write_catalog_csv(entries: &[CatalogEntry], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CATALOG_CSV_HEADERS)?;
    for entry in entries {
        let price_ghs = entry.price_ghs.to_string();
        let price_usd = entry.price_usd.to_string();
        writer.write_record([
            entry.sku.as_str(),
            entry.name.as_str(),
            entry.brand.as_str(),
            entry.category.as_str(),
            entry.subcategory.as_str(),
            entry.description.as_str(),
            entry.features.as_str(),
            price_ghs.as_str(),
            price_usd.as_str(),
            entry.condition.as_str(),
            entry.stock_status.as_str(),
            entry.image_path.as_str(),
            entry.date_added.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// JSON export row; the newline-joined features string becomes an array
#[derive(Debug, Serialize)]
struct CatalogJsonEntry<'a> {
    sku: &'a str,
    name: &'a str,
    brand: &'a str,
    category: &'a str,
    subcategory: &'a str,
    description: &'a str,
    features: Vec<&'a str>,
    price_ghs: i64,
    price_usd: f64,
    condition: &'a str,
    stock_status: &'a str,
    image_path: &'a str,
    date_added: &'a str,
}

pub fn write_catalog_json(entries: &[CatalogEntry], path: &Path) -> Result<()> {
    let rows: Vec<CatalogJsonEntry> = entries
        .iter()
        .map(|e| CatalogJsonEntry {
            sku: &e.sku,
            name: &e.name,
            brand: &e.brand,
            category: &e.category,
            subcategory: &e.subcategory,
            description: &e.description,
            features: e.features.split('\n').collect(),
            price_ghs: e.price_ghs,
            price_usd: e.price_usd,
            condition: &e.condition,
            stock_status: &e.stock_status,
            image_path: &e.image_path,
            date_added: &e.date_added,
        })
        .collect();
    let json = serde_json::to_string_pretty(&rows)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Write the styled Excel workbook. Each data row gets an embedded 80x80
/// thumbnail; an unreadable image produces a warning and the row is
/// written without one.
pub fn write_catalog_xlsx(entries: &[CatalogEntry], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Product Catalog")?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x2F75B5))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);
    let wrap_format = Format::new().set_text_wrap().set_align(FormatAlign::Top);
    let price_ghs_format = Format::new().set_num_format("[$GHS] #,##0.00");
    let price_usd_format = Format::new().set_num_format("$#,##0.00");
    let center_format = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    worksheet.write_string_with_format(0, 0, "Thumbnail", &header_format)?;
    for (i, header) in XLSX_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, i as u16 + 1, *header, &header_format)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (i, entry) in entries.iter().enumerate() {
        let row = i as u32 + 1;

        match catalog::make_thumbnail(Path::new(&entry.image_path)) {
            Ok(png) => {
                let image = Image::new_from_buffer(&png)?;
                worksheet.insert_image_with_offset(row, 0, &image, 2, 2)?;
            }
            Err(e) => {
                eprintln!("Warning: could not process image {}: {}", entry.image_path, e);
            }
        }
        worksheet.set_row_height(row, 80)?;

        worksheet.write_string(row, 1, entry.name.as_str())?;
        worksheet.write_string_with_format(row, 2, entry.category.as_str(), &center_format)?;
        worksheet.write_string_with_format(row, 3, entry.subcategory.as_str(), &center_format)?;
        worksheet.write_string(row, 4, entry.brand.as_str())?;
        worksheet.write_string_with_format(row, 5, entry.description.as_str(), &wrap_format)?;
        worksheet.write_string_with_format(row, 6, entry.features.as_str(), &wrap_format)?;
        worksheet.write_string_with_format(row, 7, entry.condition.as_str(), &center_format)?;
        worksheet.write_number_with_format(row, 8, entry.price_ghs as f64, &price_ghs_format)?;
        worksheet.write_number_with_format(row, 9, entry.price_usd, &price_usd_format)?;
        worksheet.write_string_with_format(row, 10, entry.stock_status.as_str(), &center_format)?;
        worksheet.write_string(row, 11, entry.image_path.as_str())?;
        worksheet.write_string(row, 12, entry.sku.as_str())?;
        worksheet.write_string(row, 13, entry.date_added.as_str())?;
    }

    worksheet.set_column_width(0, 12)?;
    worksheet.set_column_width(1, 30)?;
    worksheet.set_column_width(2, 18)?;
    worksheet.set_column_width(3, 18)?;
    worksheet.set_column_width(4, 18)?;
    worksheet.set_column_width(5, 45)?;
    worksheet.set_column_width(6, 45)?;
    worksheet.set_column_width(7, 12)?;
    worksheet.set_column_width(8, 15)?;
    worksheet.set_column_width(9, 15)?;
    worksheet.set_column_width(10, 12)?;
    worksheet.set_column_width(11, 35)?;
    worksheet.set_column_width(12, 15)?;
    worksheet.set_column_width(13, 15)?;

    workbook.save(path)?;
    Ok(())
}
