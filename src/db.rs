use rusqlite::{params, Connection};
use serde::Serialize;

use crate::catalog::CatalogEntry;
use crate::config::Config;
use crate::error::Result;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Columns allowed in ORDER BY, guarding against injection through --sort
const SORT_COLUMNS: &[&str] = &["name", "brand", "category", "price_ghs", "date_added"];

const SELECT_COLUMNS: &str = "sku, name, brand, category, subcategory, description, features, \
     price_ghs, price_usd, condition, stock_status, image_path, date_added";

/// Database connection wrapper
pub struct Database {
    conn: Connection,
}

/// Filters and ordering for product queries
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub brand: Option<String>,
    /// Substring match over name and description
    pub search: Option<String>,
    /// Sort column; anything outside the whitelist falls back to name
    pub sort: Option<String>,
    pub descending: bool,
    pub limit: Option<usize>,
}

/// Aggregate figures over the stored catalog
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub total_products: i64,
    pub total_categories: i64,
    pub total_brands: i64,
    pub total_value_ghs: f64,
    pub avg_price_ghs: f64,
    pub by_category: Vec<CategoryCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
    pub avg_price: f64,
}

impl Database {
    /// Open or create the database
    pub fn open() -> Result<Self> {
        let db_path = Config::db_path()?;
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut conn = Connection::open(&db_path)?;

        // Run migrations
        embedded::migrations::runner().run(&mut conn)?;

        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        embedded::migrations::runner().run(&mut conn)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Insert a single catalog entry
    pub fn insert_entry(&self, entry: &CatalogEntry) -> Result<()> {
        let result = self.conn.execute(
            "INSERT INTO products (sku, name, brand, category, subcategory, description,
             features, price_ghs, price_usd, condition, stock_status, image_path, date_added)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                entry.sku,
                entry.name,
                entry.brand,
                entry.category,
                entry.subcategory,
                entry.description,
                entry.features,
                entry.price_ghs,
                entry.price_usd,
                entry.condition,
                entry.stock_status,
                entry.image_path,
                entry.date_added,
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Err(crate::ShopcatError::DuplicateSku(entry.sku.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the entire products table with a freshly generated catalog.
    /// Regeneration is delete-then-reinsert, never an upsert.
    pub fn replace_all(&mut self, entries: &[CatalogEntry]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM products", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO products (sku, name, brand, category, subcategory, description,
                 features, price_ghs, price_usd, condition, stock_status, image_path, date_added)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            )?;
            for entry in entries {
                stmt.execute(params![
                    entry.sku,
                    entry.name,
                    entry.brand,
                    entry.category,
                    entry.subcategory,
                    entry.description,
                    entry.features,
                    entry.price_ghs,
                    entry.price_usd,
                    entry.condition,
                    entry.stock_status,
                    entry.image_path,
                    entry.date_added,
                ])?;
            }
        }
        tx.commit()?;
        Ok(entries.len())
    }

    /// Number of stored products
    pub fn count_products(&self) -> Result<i64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Query products with optional filters, sorting, and limit
    pub fn query_products(&self, filter: &ProductFilter) -> Result<Vec<CatalogEntry>> {
        let mut sql = format!("SELECT {} FROM products WHERE 1=1", SELECT_COLUMNS);
        let mut bind: Vec<String> = Vec::new();

        if let Some(category) = &filter.category {
            sql.push_str(" AND category = ?");
            bind.push(category.clone());
        }
        if let Some(brand) = &filter.brand {
            sql.push_str(" AND brand = ?");
            bind.push(brand.clone());
        }
        if let Some(term) = &filter.search {
            sql.push_str(" AND (name LIKE ? OR description LIKE ?)");
            let pattern = format!("%{}%", term);
            bind.push(pattern.clone());
            bind.push(pattern);
        }

        let sort_col = filter
            .sort
            .as_deref()
            .filter(|s| SORT_COLUMNS.contains(s))
            .unwrap_or("name");
        let direction = if filter.descending { "DESC" } else { "ASC" };
        sql.push_str(&format!(" ORDER BY {} {}", sort_col, direction));

        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(bind.iter()), |row| {
            Ok(CatalogEntry {
                sku: row.get(0)?,
                name: row.get(1)?,
                brand: row.get(2)?,
                category: row.get(3)?,
                subcategory: row.get(4)?,
                description: row.get(5)?,
                features: row.get(6)?,
                price_ghs: row.get::<_, f64>(7)? as i64,
                price_usd: row.get(8)?,
                condition: row.get(9)?,
                stock_status: row.get(10)?,
                image_path: row.get(11)?,
                date_added: row.get(12)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// Distinct categories, alphabetical
    pub fn distinct_categories(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT category FROM products WHERE category IS NOT NULL ORDER BY category",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut categories = Vec::new();
        for row in rows {
            categories.push(row?);
        }
        Ok(categories)
    }

    /// Distinct brands, alphabetical
    pub fn distinct_brands(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT brand FROM products WHERE brand IS NOT NULL ORDER BY brand",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut brands = Vec::new();
        for row in rows {
            brands.push(row?);
        }
        Ok(brands)
    }

    /// Catalog aggregates: totals plus a per-category breakdown ordered
    /// by product count
    pub fn stats(&self) -> Result<CatalogStats> {
        let (total_products, total_categories, total_brands, total_value_ghs, avg_price_ghs) =
            self.conn.query_row(
                "SELECT COUNT(*), COUNT(DISTINCT category), COUNT(DISTINCT brand),
                 COALESCE(SUM(price_ghs), 0), COALESCE(AVG(price_ghs), 0) FROM products",
                [],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, f64>(3)?,
                        row.get::<_, f64>(4)?,
                    ))
                },
            )?;

        let mut stmt = self.conn.prepare(
            "SELECT category, COUNT(*) as count, AVG(price_ghs) as avg_price
             FROM products GROUP BY category ORDER BY count DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CategoryCount {
                category: row.get(0)?,
                count: row.get(1)?,
                avg_price: row.get(2)?,
            })
        })?;

        let mut by_category = Vec::new();
        for row in rows {
            by_category.push(row?);
        }

        Ok(CatalogStats {
            total_products,
            total_categories,
            total_brands,
            total_value_ghs,
            avg_price_ghs,
            by_category,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShopcatError;

    fn entry(sku: &str, name: &str, brand: &str, category: &str, price_ghs: i64) -> CatalogEntry {
        CatalogEntry {
            sku: sku.to_string(),
            name: name.to_string(),
            brand: brand.to_string(),
            category: category.to_string(),
            subcategory: "Misc".to_string(),
            description: format!("{} description", name),
            features: "• Feature one\n• Feature two".to_string(),
            price_ghs,
            price_usd: price_ghs as f64 * 0.08,
            condition: "New".to_string(),
            stock_status: "In Stock".to_string(),
            image_path: format!("/images/{}.jpg", sku),
            date_added: "2024-03-01".to_string(),
        }
    }

    #[test]
    fn test_insert_and_roundtrip() {
        let db = Database::open_in_memory().unwrap();
        db.insert_entry(&entry("COM-LAP-0001", "HP EliteBook", "HP", "Computing", 15000))
            .unwrap();

        let all = db.query_products(&ProductFilter::default()).unwrap();
        assert_eq!(all.len(), 1);
        let stored = &all[0];
        assert_eq!(stored.sku, "COM-LAP-0001");
        assert_eq!(stored.name, "HP EliteBook");
        assert_eq!(stored.price_ghs, 15000);
        assert_eq!(stored.condition, "New");
        assert_eq!(stored.date_added, "2024-03-01");
    }

    #[test]
    fn test_duplicate_sku_rejected() {
        let db = Database::open_in_memory().unwrap();
        db.insert_entry(&entry("AUD-SPE-0001", "JBL Flip", "JBL", "Audio/Video", 1200))
            .unwrap();
        let result =
            db.insert_entry(&entry("AUD-SPE-0001", "JBL Go", "JBL", "Audio/Video", 800));
        assert!(matches!(result, Err(ShopcatError::DuplicateSku(_))));
    }

    #[test]
    fn test_replace_all_clears_previous_rows() {
        let mut db = Database::open_in_memory().unwrap();
        db.insert_entry(&entry("OLD-AAA-0001", "Old Item", "X", "Electronics", 100))
            .unwrap();
        db.insert_entry(&entry("OLD-AAA-0002", "Older Item", "X", "Electronics", 200))
            .unwrap();

        let fresh = vec![entry("NEW-BBB-0001", "New Item", "Y", "Storage", 300)];
        let inserted = db.replace_all(&fresh).unwrap();
        assert_eq!(inserted, 1);
        assert_eq!(db.count_products().unwrap(), 1);

        let all = db.query_products(&ProductFilter::default()).unwrap();
        assert_eq!(all[0].sku, "NEW-BBB-0001");
    }

    #[test]
    fn test_category_and_brand_filters() {
        let db = Database::open_in_memory().unwrap();
        db.insert_entry(&entry("A-1-0001", "HP Laptop", "HP", "Computing", 12000))
            .unwrap();
        db.insert_entry(&entry("A-1-0002", "Dell Laptop", "Dell", "Computing", 14000))
            .unwrap();
        db.insert_entry(&entry("A-1-0003", "JBL Speaker", "JBL", "Audio/Video", 900))
            .unwrap();

        let computing = db
            .query_products(&ProductFilter {
                category: Some("Computing".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(computing.len(), 2);

        let dell = db
            .query_products(&ProductFilter {
                category: Some("Computing".to_string()),
                brand: Some("Dell".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(dell.len(), 1);
        assert_eq!(dell[0].name, "Dell Laptop");
    }

    #[test]
    fn test_search_covers_name_and_description() {
        let db = Database::open_in_memory().unwrap();
        db.insert_entry(&entry("S-1-0001", "Flash Drive", "SanDisk", "Storage", 150))
            .unwrap();
        db.insert_entry(&entry("S-1-0002", "External HDD", "Seagate", "Storage", 600))
            .unwrap();

        // "Flash" appears in the first name; "HDD" in the second name;
        // "description" appears in every generated description
        let by_name = db
            .query_products(&ProductFilter {
                search: Some("Flash".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_name.len(), 1);

        let by_description = db
            .query_products(&ProductFilter {
                search: Some("External HDD description".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].sku, "S-1-0002");
    }

    #[test]
    fn test_sort_and_limit() {
        let db = Database::open_in_memory().unwrap();
        db.insert_entry(&entry("P-1-0001", "Cheap", "X", "Electronics", 100))
            .unwrap();
        db.insert_entry(&entry("P-1-0002", "Pricey", "X", "Electronics", 9000))
            .unwrap();
        db.insert_entry(&entry("P-1-0003", "Middle", "X", "Electronics", 4000))
            .unwrap();

        let by_price_desc = db
            .query_products(&ProductFilter {
                sort: Some("price_ghs".to_string()),
                descending: true,
                limit: Some(2),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_price_desc.len(), 2);
        assert_eq!(by_price_desc[0].name, "Pricey");
        assert_eq!(by_price_desc[1].name, "Middle");
    }

    #[test]
    fn test_unknown_sort_column_falls_back_to_name() {
        let db = Database::open_in_memory().unwrap();
        db.insert_entry(&entry("P-1-0001", "Zulu", "X", "Electronics", 100))
            .unwrap();
        db.insert_entry(&entry("P-1-0002", "Alpha", "X", "Electronics", 200))
            .unwrap();

        let sorted = db
            .query_products(&ProductFilter {
                sort: Some("; DROP TABLE products --".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(sorted[0].name, "Alpha");
        assert_eq!(db.count_products().unwrap(), 2);
    }

    #[test]
    fn test_distinct_lists() {
        let db = Database::open_in_memory().unwrap();
        db.insert_entry(&entry("D-1-0001", "A", "HP", "Computing", 1))
            .unwrap();
        db.insert_entry(&entry("D-1-0002", "B", "HP", "Computing", 2))
            .unwrap();
        db.insert_entry(&entry("D-1-0003", "C", "JBL", "Audio/Video", 3))
            .unwrap();

        assert_eq!(
            db.distinct_categories().unwrap(),
            vec!["Audio/Video", "Computing"]
        );
        assert_eq!(db.distinct_brands().unwrap(), vec!["HP", "JBL"]);
    }

    #[test]
    fn test_stats() {
        let db = Database::open_in_memory().unwrap();
        db.insert_entry(&entry("T-1-0001", "A", "HP", "Computing", 1000))
            .unwrap();
        db.insert_entry(&entry("T-1-0002", "B", "Dell", "Computing", 3000))
            .unwrap();
        db.insert_entry(&entry("T-1-0003", "C", "JBL", "Audio/Video", 500))
            .unwrap();

        let stats = db.stats().unwrap();
        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.total_categories, 2);
        assert_eq!(stats.total_brands, 3);
        assert_eq!(stats.total_value_ghs, 4500.0);
        assert_eq!(stats.avg_price_ghs, 1500.0);

        assert_eq!(stats.by_category.len(), 2);
        // ordered by count, Computing first
        assert_eq!(stats.by_category[0].category, "Computing");
        assert_eq!(stats.by_category[0].count, 2);
        assert_eq!(stats.by_category[0].avg_price, 2000.0);
    }

    #[test]
    fn test_empty_database_stats() {
        let db = Database::open_in_memory().unwrap();
        let stats = db.stats().unwrap();
        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.total_value_ghs, 0.0);
        assert!(stats.by_category.is_empty());
    }
}
