pub mod catalog;
pub mod classify;
pub mod cli;
pub mod config;
pub mod crawl;
pub mod db;
pub mod dedupe;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod locate;
pub mod price;
pub mod record;
pub mod report;

pub use error::{Result, ShopcatError};
