//! shopcat - store scraper and product catalog generator CLI

use clap::Parser;

use shopcat::cli::{Cli, Commands};
use shopcat::error::Result;

mod commands;
mod utils;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.hint() {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            url,
            out,
            max_pages,
            delay,
        } => commands::cmd_scrape(url, &out, max_pages, delay),

        Commands::Preview { url, json, limit } => commands::cmd_preview(&url, json, limit),

        Commands::Generate {
            image_dir,
            out,
            yes,
        } => commands::cmd_generate(&image_dir, &out, yes),

        Commands::Classify { name } => commands::cmd_classify(&name),

        Commands::List {
            category,
            brand,
            search,
            sort,
            desc,
            limit,
            json,
        } => commands::cmd_list(category, brand, search, sort, desc, limit, json),

        Commands::Stats { json } => commands::cmd_stats(json),
        Commands::Export { format, out } => commands::cmd_export(format, &out),
        Commands::Completions { shell } => commands::cmd_completions(shell),
    }
}
