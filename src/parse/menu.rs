use serde::ser::{Serialize, SerializeMap, Serializer};

use super::category::CategorySection;
use super::item_card::MenuItem;
use crate::static_selector;

/// The assembled menu: category labels in first-seen document order, each
/// mapping to at least one item. Serializes as a JSON object.
#[derive(Debug, Default, PartialEq)]
pub struct Menu(Vec<(String, Vec<MenuItem>)>);

impl Menu {
    /// Runs the whole extraction pass over a parsed document. Wrappers
    /// without a label and fragments without a name are skipped silently;
    /// a category whose every fragment was dropped is omitted outright.
    pub fn from_document(document: &scraper::Html) -> Self {
        static_selector!(WRAPPER_SELECTOR <- "div.accordion-wrapper");
        let mut menu = Self::default();
        for wrapper in document.root_element().select(&WRAPPER_SELECTOR) {
            let Some(section) = CategorySection::from_wrapper(wrapper) else {
                log::debug!("skipping a category wrapper with no label control");
                continue;
            };
            let items: Vec<MenuItem> = section
                .cards
                .iter()
                .filter_map(|card| MenuItem::from_card(*card))
                .collect();
            if items.is_empty() {
                log::debug!("category {:?} produced no items, omitting it", section.label);
                continue;
            }
            menu.insert(section.label, items);
        }
        menu
    }

    /// Two differently-formatted wrappers can normalize to the same cleaned
    /// label; their items accumulate under the one existing key instead of
    /// the later section replacing the earlier one.
    fn insert(&mut self, label: String, items: Vec<MenuItem>) {
        if let Some((_, existing)) = self.0.iter_mut().find(|(key, _)| *key == label) {
            existing.extend(items);
        } else {
            self.0.push((label, items));
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    fn get(&self, label: &str) -> Option<&[MenuItem]> {
        self.0
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, items)| items.as_slice())
    }
}

impl Serialize for Menu {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, items) in &self.0 {
            map.serialize_entry(label, items)?;
        }
        map.end()
    }
}
