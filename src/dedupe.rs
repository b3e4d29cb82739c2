//! Terminal deduplication of scraped records
//!
//! Listing pages, category pages, and pagination all show the same
//! products; the crawl accumulates every sighting and this pass keeps the
//! first. Identity is (normalized name, price) only. Later duplicates are
//! dropped whole, never merged.

use std::collections::HashSet;

use crate::record::ProductRecord;

/// Missing prices collapse to this sentinel so two unpriced sightings of
/// the same name count as duplicates
const MISSING_PRICE_SENTINEL: f64 = 0.0;

fn dedupe_key(record: &ProductRecord) -> (String, u64) {
    let name = record.name.trim().to_lowercase();
    let price = record.price.unwrap_or(MISSING_PRICE_SENTINEL);
    (name, price.to_bits())
}

/// Drop duplicate records, keeping the first occurrence and the original
/// order of everything retained.
pub fn dedupe_records(records: Vec<ProductRecord>) -> Vec<ProductRecord> {
    let mut seen: HashSet<(String, u64)> = HashSet::new();
    let mut unique = Vec::with_capacity(records.len());

    for record in records {
        if seen.insert(dedupe_key(&record)) {
            unique.push(record);
        }
    }

    unique
}
