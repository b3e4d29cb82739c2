//! ProductRecord - the unit of scraped data
//!
//! One record per product fragment found on a page. Every field except the
//! name and source URL is optional; extraction never fails, it just leaves
//! gaps. Records flow through the pipeline as owned values.

use serde::{Deserialize, Serialize};

/// A single scraped product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product name, empty when no selector matched
    pub name: String,
    /// Current price; None means "not found", distinct from zero
    pub price: Option<f64>,
    /// Pre-sale price when a compare-at class was present
    pub original_price: Option<f64>,
    /// Short description, truncated to 300 chars
    pub description: Option<String>,
    /// Absolute image URL
    pub image_url: Option<String>,
    /// Absolute product page URL; falls back to the source page
    pub product_url: String,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub brand: Option<String>,
    pub sku: Option<String>,
    /// Availability text carried verbatim (schema.org URL or store copy)
    pub availability: Option<String>,
}

impl ProductRecord {
    /// A record is worth keeping if it has a name or a price
    pub fn is_useful(&self) -> bool {
        !self.name.trim().is_empty() || self.price.is_some()
    }

    /// Whether fetching the product's own page could fill in what the
    /// listing fragment missed. True for placeholder names that link
    /// somewhere other than the page they were found on.
    pub fn needs_detail_fetch(&self, page_url: &str) -> bool {
        self.name.trim().chars().count() < 3
            && !self.product_url.is_empty()
            && self.product_url != page_url
    }

    /// Fill empty fields from a detail-page record, never overwriting
    /// values the listing already provided.
    pub fn fill_from(&mut self, detail: ProductRecord) {
        if self.name.trim().is_empty() && !detail.name.trim().is_empty() {
            self.name = detail.name;
        }
        if self.price.is_none() {
            self.price = detail.price;
        }
        if self.original_price.is_none() {
            self.original_price = detail.original_price;
        }
        if self.description.is_none() {
            self.description = detail.description;
        }
        if self.image_url.is_none() {
            self.image_url = detail.image_url;
        }
        if self.brand.is_none() {
            self.brand = detail.brand;
        }
        if self.sku.is_none() {
            self.sku = detail.sku;
        }
        if self.availability.is_none() {
            self.availability = detail.availability;
        }
    }
}

/// Derive a display category from a `/category/...` URL path segment.
///
/// "https://store.example/category/audio-video/speakers" becomes
/// "Audio Video > Speakers".
pub fn category_from_url(url: &str) -> Option<String> {
    let tail = url.rsplit("/category/").next()?;
    if tail == url {
        return None;
    }
    let readable = tail
        .trim_matches('/')
        .replace('/', " > ")
        .replace('-', " ");
    if readable.is_empty() {
        return None;
    }
    Some(title_case(&readable))
}

/// Uppercase the first letter of each alphabetic run, lowercase the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
