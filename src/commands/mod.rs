//! Command implementations for the shopcat CLI

mod generate;
mod misc;
mod query;
mod scrape;

pub use generate::*;
pub use misc::*;
pub use query::*;
pub use scrape::*;
