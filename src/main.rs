#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod error;
mod load;
mod parse;

use std::{env, fs, path::PathBuf};

use crate::parse::Menu;
use error::Error;
pub use error::Result;

/// Default input document, relative to the working directory.
const DEFAULT_INPUT: &str = "source_menu.html";
/// The structured menu is always written here in addition to stdout.
const OUTPUT_FILE: &str = "parsed_menu.json";

fn main() -> Result<()> {
    pretty_env_logger::init();
    let path = env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_INPUT), PathBuf::from);
    let html = load::read_document(&path)?;
    let document = scraper::Html::parse_document(&html);
    let menu = Menu::from_document(&document);
    if menu.is_empty() {
        log::warn!("no categories extracted from {}", path.display());
    }
    log::info!(
        "extracted {} categories from {}",
        menu.len(),
        path.display()
    );
    let json = serde_json::to_string_pretty(&menu)?;
    fs::write(OUTPUT_FILE, &json).map_err(|source| Error::Write {
        path: PathBuf::from(OUTPUT_FILE),
        source,
    })?;
    println!("{json}");
    Ok(())
}
