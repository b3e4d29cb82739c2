//! Catalog generation from a directory of product images
//!
//! Each image filename stem is treated as a product name and run through
//! the classifier; the result is a full catalog row with SKU, pricing in
//! two currencies, generated copy, and a path back to the image for
//! thumbnail embedding.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::classify::{classify, description_for, features_for, make_sku};
use crate::error::Result;

/// Supported product image extensions (lowercase)
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Thumbnail bounding box for the spreadsheet, in pixels
const THUMBNAIL_SIZE: u32 = 80;

/// One generated catalog row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub subcategory: String,
    pub description: String,
    /// Newline-joined "• " bullet lines
    pub features: String,
    pub price_ghs: i64,
    pub price_usd: f64,
    pub condition: String,
    pub stock_status: String,
    pub image_path: String,
    pub date_added: String,
}

/// Collect product image files from a directory, sorted by lowercase
/// filename so SKU assignment is stable across runs.
pub fn collect_image_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
            files.push(path);
        }
    }
    files.sort_by_key(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });
    Ok(files)
}

/// Product name from a filename stem: underscores become spaces, so
/// "Dell_Inspiron_15.jpg" reads as "Dell Inspiron 15". Hyphens are kept;
/// they appear inside real product and brand names (TP-Link, D-Link).
pub fn display_name(stem: &str) -> String {
    stem.replace('_', " ")
}

/// Build one catalog entry. `index` is 1-based and feeds the SKU.
pub fn build_entry(path: &Path, index: usize, usd_rate: f64, date_added: &str) -> CatalogEntry {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let name = display_name(&stem);
    let classification = classify(&name);

    CatalogEntry {
        sku: make_sku(classification.category, classification.subcategory, index),
        description: description_for(classification.category, &name, &classification.brand),
        features: features_for(classification.category),
        price_usd: usd_price(classification.price_ghs, usd_rate),
        price_ghs: classification.price_ghs,
        category: classification.category.to_string(),
        subcategory: classification.subcategory.to_string(),
        brand: classification.brand,
        name,
        condition: "New".to_string(),
        stock_status: "In Stock".to_string(),
        image_path: path.to_string_lossy().to_string(),
        date_added: date_added.to_string(),
    }
}

/// Build entries for a whole file list, dated today.
pub fn build_entries(files: &[PathBuf], usd_rate: f64) -> Vec<CatalogEntry> {
    let today = today_stamp();
    files
        .iter()
        .enumerate()
        .map(|(i, path)| build_entry(path, i + 1, usd_rate, &today))
        .collect()
}

/// Today's date in the catalog's date format
pub fn today_stamp() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// USD price from the GHS estimate, rounded to cents
pub fn usd_price(price_ghs: i64, rate: f64) -> f64 {
    (price_ghs as f64 * rate * 100.0).round() / 100.0
}

/// PNG thumbnail bytes for spreadsheet embedding. Fits the image inside
/// an 80x80 box preserving aspect ratio.
pub fn make_thumbnail(path: &Path) -> Result<Vec<u8>> {
    let img = image::open(path)?;
    let thumb = img.thumbnail(THUMBNAIL_SIZE, THUMBNAIL_SIZE);
    let mut buf = Cursor::new(Vec::new());
    thumb.write_to(&mut buf, image::ImageFormat::Png)?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_replaces_underscores() {
        assert_eq!(
            display_name("Dell_Inspiron_15_Gaming_512GB"),
            "Dell Inspiron 15 Gaming 512GB"
        );
    }

    #[test]
    fn test_display_name_keeps_hyphens() {
        assert_eq!(display_name("TP-Link_Archer_C6"), "TP-Link Archer C6");
    }

    #[test]
    fn test_usd_price_rounding() {
        assert_eq!(usd_price(25000, 0.08), 2000.0);
        assert_eq!(usd_price(157, 0.08), 12.56);
        assert_eq!(usd_price(0, 0.08), 0.0);
    }

    #[test]
    fn test_build_entry_classifies_stem() {
        let path = PathBuf::from("/photos/Dell_Inspiron_15_Gaming_512GB.jpg");
        let entry = build_entry(&path, 1, 0.08, "2024-03-01");

        assert_eq!(entry.name, "Dell Inspiron 15 Gaming 512GB");
        assert_eq!(entry.category, "Computing");
        assert_eq!(entry.subcategory, "Laptops");
        assert_eq!(entry.brand, "Dell");
        assert_eq!(entry.price_ghs, 25000);
        assert_eq!(entry.price_usd, 2000.0);
        assert_eq!(entry.sku, "COM-LAP-0001");
        assert_eq!(entry.condition, "New");
        assert_eq!(entry.stock_status, "In Stock");
        assert_eq!(entry.date_added, "2024-03-01");
    }

    #[test]
    fn test_build_entries_sequential_skus() {
        let files = vec![
            PathBuf::from("JBL_Flip_6.jpg"),
            PathBuf::from("JBL_Go_3.jpg"),
            PathBuf::from("Sony_WH-1000XM4_Headphones.png"),
        ];
        let entries = build_entries(&files, 0.08);
        assert_eq!(entries.len(), 3);
        // index encodes position in the sorted file list, not per-category
        assert!(entries[0].sku.ends_with("-0001"));
        assert!(entries[1].sku.ends_with("-0002"));
        assert!(entries[2].sku.ends_with("-0003"));
    }

    #[test]
    fn test_collect_image_files_filters_and_sorts() {
        let dir = std::env::temp_dir().join(format!("shopcat-catalog-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        for name in ["zeta.jpg", "Alpha.PNG", "notes.txt", "beta.webp", "gamma.jpeg"] {
            std::fs::write(dir.join(name), b"x").unwrap();
        }

        let files = collect_image_files(&dir).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["Alpha.PNG", "beta.webp", "gamma.jpeg", "zeta.jpg"]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
