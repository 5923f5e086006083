use std::sync::OnceLock;

use regex::Regex;
use scraper::ElementRef;

use crate::static_selector;

/// One category's cleaned label plus its item-card fragments, in document
/// order. Borrows the parsed document and lives only for the parse pass.
#[derive(Debug)]
pub struct CategorySection<'a> {
    pub label: String,
    pub cards: Vec<ElementRef<'a>>,
}

impl<'a> CategorySection<'a> {
    /// Builds a section from one `div.accordion-wrapper` block. Returns
    /// `None` when the wrapper has no label control; decorative wrappers
    /// are expected in the source and are dropped without an error.
    pub fn from_wrapper(wrapper: ElementRef<'a>) -> Option<Self> {
        static_selector!(LABEL_SELECTOR <- "button.cat-name p");
        static_selector!(PANEL_SELECTOR <- "div.panel");
        static_selector!(CARD_SELECTOR <- "app-item-card");

        let label_element = wrapper.select(&LABEL_SELECTOR).next()?;
        let label = clean_label(&label_element.text().collect::<String>());

        // The source markup does not always wrap the cards in a panel
        // container; fall back to scanning the wrapper itself.
        let cards = wrapper.select(&PANEL_SELECTOR).next().map_or_else(
            || wrapper.select(&CARD_SELECTOR).collect(),
            |panel| panel.select(&CARD_SELECTOR).collect(),
        );

        Some(Self { label, cards })
    }
}

/// Derives the canonical category label from the raw label text: cut off the
/// expand/collapse icon ligature and anything past the first line break, then
/// keep only letters, digits and whitespace.
fn clean_label(raw: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let re = NON_ALNUM.get_or_init(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("regex should be valid"));
    let label = raw.split("angle-up").next().unwrap_or(raw).trim();
    let label = label.split('\n').next().unwrap_or(label).trim();
    re.replace_all(label, "").trim().to_string()
}
