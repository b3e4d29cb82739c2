use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopcatError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] ureq::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] refinery::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("CSV write error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Image processing error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("No product images found in: {0}")]
    NoImagesFound(String),

    #[error("Duplicate SKU: {0}")]
    DuplicateSku(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ShopcatError {
    /// Get an actionable hint for how to resolve this error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ShopcatError::HttpError(_) => Some(
                "Check your internet connection, or test a single page first:\n  shopcat preview <url>"
            ),
            ShopcatError::DatabaseError(_) => Some(
                "Check the database with `shopcat stats`, or rebuild it:\n  shopcat generate <image-dir>"
            ),
            ShopcatError::NoImagesFound(_) => Some(
                "Supported image formats: .png, .jpg, .jpeg, .webp"
            ),
            ShopcatError::DuplicateSku(_) => Some(
                "Regenerate the catalog to rebuild SKUs from scratch:\n  shopcat generate <image-dir> --yes"
            ),
            ShopcatError::ConfigError(_) => Some(
                "Check the config file syntax, or delete it to restore defaults"
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShopcatError>;
