use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Shell types for completion generation
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Output formats for the stored catalog
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

#[derive(Parser)]
#[command(name = "shopcat")]
#[command(author, version, about = "Store scraper and product catalog generator", long_about = None)]
#[command(after_help = r#"Examples:
  shopcat scrape                                Scrape the configured store
  shopcat scrape https://shop.example.com       Scrape another storefront
  shopcat preview https://shop.example.com      Show what one page yields
  shopcat generate ./product-images             Build a catalog from images
  shopcat list --category Computing             Browse the stored catalog
  shopcat stats                                 Catalog totals and breakdown

Quick Start:
  1. shopcat scrape --out ./scraped
  2. shopcat generate ./product-images
  3. shopcat list
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape a store and write products to CSV/JSON
    #[command(after_help = r#"Examples:
  shopcat scrape                           Use the configured base URL
  shopcat scrape https://shop.example.com  Scrape a different store
  shopcat scrape shop.example.com          Bare domains get https://
  shopcat scrape --out ./data              Write outputs into ./data
  shopcat scrape --max-pages 10            Visit at most 10 pages
  shopcat scrape --delay 2                 Wait 2 seconds between requests
"#)]
    Scrape {
        /// Store URL (defaults to base_url from config)
        #[arg(value_name = "URL")]
        url: Option<String>,

        /// Output directory for products.csv, products.json, summary.json
        #[arg(long, default_value = "scraped")]
        out: PathBuf,

        /// Maximum number of pages to visit
        #[arg(long)]
        max_pages: Option<usize>,

        /// Seconds to wait between requests
        #[arg(long)]
        delay: Option<f64>,
    },

    /// Fetch one page and show which extraction strategy finds products
    #[command(after_help = r#"Examples:
  shopcat preview https://shop.example.com/products   Table of found products
  shopcat preview https://shop.example.com --json     Raw records as JSON
  shopcat preview https://shop.example.com --limit 5  First 5 records only
"#)]
    Preview {
        /// Page URL to preview
        #[arg(value_name = "URL")]
        url: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Limit output to first N records
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Generate a full catalog (CSV, JSON, Excel, database) from product images
    #[command(after_help = r#"Examples:
  shopcat generate ./product-images             Classify every image filename
  shopcat generate ./product-images --out ./catalog
  shopcat generate ./product-images --yes       Skip the overwrite prompt
"#)]
    Generate {
        /// Directory of product images (filename stems become product names)
        #[arg(value_name = "IMAGE_DIR")]
        image_dir: PathBuf,

        /// Output directory for catalog.csv, catalog.json, catalog.xlsx
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Skip the confirmation prompt when replacing an existing catalog
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show how a product name would be classified
    #[command(after_help = r#"Examples:
  shopcat classify "Dell Inspiron 15 Gaming 512GB"
  shopcat classify "JBL Flip 6 Wireless Speaker"
"#)]
    Classify {
        /// Product name to classify
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// List stored catalog products
    #[command(after_help = r#"Examples:
  shopcat list                              All products
  shopcat list --category Computing         One category
  shopcat list --brand HP --sort price_ghs  HP products, cheapest first
  shopcat list --search laptop --desc       Search, highest price first
  shopcat list --json | jq '.[].sku'        SKUs for scripting
"#)]
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,

        /// Filter by brand
        #[arg(long)]
        brand: Option<String>,

        /// Substring search over name and description
        #[arg(long)]
        search: Option<String>,

        /// Sort column: name, brand, category, price_ghs, date_added
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Limit number of rows
        #[arg(long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show catalog statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the stored catalog to a file
    #[command(after_help = r#"Examples:
  shopcat export --format csv               catalog.csv in the current dir
  shopcat export --format json              catalog.json
  shopcat export --format xlsx --out ./x    Excel workbook with thumbnails
"#)]
    Export {
        /// Output format
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Generate shell completions
    #[command(after_help = r#"Examples:
  shopcat completions bash >> ~/.bashrc
  shopcat completions zsh >> ~/.zshrc
  shopcat completions fish > ~/.config/fish/completions/shopcat.fish
"#)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}
