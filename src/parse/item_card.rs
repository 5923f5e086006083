use std::sync::OnceLock;

use regex::Regex;
use scraper::ElementRef;

use super::normalize::collapse_whitespace;
use crate::static_selector;

/// Names containing any of these are flagged non-vegetarian. This is a plain
/// substring heuristic and is known to misfire (e.g. "eggplant"); the
/// behavior is kept as-is because downstream consumers observe it.
const NON_VEG_KEYWORDS: [&str; 7] = [
    "chicken", "egg", "bacon", "turkey", "meat", "fish", "prawn",
];

/// One extracted menu item. Field names match the output schema exactly.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub img: String,
    pub price: f64,
    pub veg: bool,
    pub desc: String,
}

impl MenuItem {
    /// Extracts an item from one `app-item-card` fragment. Every field is
    /// best-effort except the name: a fragment without an extractable name
    /// returns `None` and is dropped by the caller.
    pub fn from_card(card: ElementRef<'_>) -> Option<Self> {
        static_selector!(BODY_SELECTOR <- "div.wrapper-card");
        let body = card.select(&BODY_SELECTOR).next()?;

        let img = extract_image(body);
        let name = extract_name(body)?;
        let price = extract_price(body, card).unwrap_or(0.0);
        let veg = is_veg(&name);
        let desc = extract_description(body)
            .unwrap_or_else(|| format!("Freshly prepared {name}."));

        Some(Self {
            name,
            img,
            price,
            veg,
            desc,
        })
    }
}

fn extract_image(body: ElementRef<'_>) -> String {
    static_selector!(IMG_SELECTOR <- "img.card-img");
    body.select(&IMG_SELECTOR)
        .next()
        .and_then(|img| img.value().attr("src"))
        .unwrap_or_default()
        .to_string()
}

/// The name usually sits in one of the spans directly under `p.item-name`;
/// Angular leaves empty spans and comment placeholders around it. Falls back
/// to the container's own text when no span qualifies.
fn extract_name(body: ElementRef<'_>) -> Option<String> {
    static_selector!(NAME_SELECTOR <- "p.item-name");
    let container = body.select(&NAME_SELECTOR).next()?;
    for span in container.children().filter_map(ElementRef::wrap) {
        if span.value().name() != "span" {
            continue;
        }
        let text = collapse_whitespace(&span.text().collect::<String>());
        if !text.is_empty() && text != "<!---->" {
            return Some(text);
        }
    }
    let fallback = collapse_whitespace(&container.text().collect::<String>());
    if fallback.is_empty() {
        None
    } else {
        Some(fallback)
    }
}

/// Tiered price resolution: a direct price label inside the card, then the
/// variant block next to the card. Resolving neither is not an error; the
/// caller defaults to 0.0.
fn extract_price(body: ElementRef<'_>, card: ElementRef<'_>) -> Option<f64> {
    direct_price(body).or_else(|| variant_price(card))
}

/// Tier 1: `p.item-price` in the card footer. The text may carry a currency
/// symbol, a range, or trailing words; only the first run of digits counts,
/// interpreted as whole units.
fn direct_price(body: ElementRef<'_>) -> Option<f64> {
    static_selector!(PRICE_SELECTOR <- "p.item-price");
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let re = DIGITS.get_or_init(|| Regex::new(r"\d+").expect("regex should be valid"));
    let text: String = body.select(&PRICE_SELECTOR).next()?.text().collect();
    re.find(&text)?.as_str().parse().ok()
}

/// Tier 2: some layouts render the price in a `div.single-item` variant
/// block that is a sibling of the card inside the enclosing `col` container.
fn variant_price(card: ElementRef<'_>) -> Option<f64> {
    static_selector!(VARIANT_SELECTOR <- "div.single-item");
    static_selector!(DESCRIPTION_SELECTOR <- "p.description");
    static_selector!(SPAN_SELECTOR <- "span");

    let column = card
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().classes().any(|class| class == "col"))?;
    let variant = column.select(&VARIANT_SELECTOR).next()?;
    for paragraph in variant.select(&DESCRIPTION_SELECTOR) {
        let text = collapse_whitespace(&paragraph.text().collect::<String>());
        if is_all_digits(&text) {
            return text.parse().ok();
        }
        for span in paragraph.select(&SPAN_SELECTOR) {
            let text = collapse_whitespace(&span.text().collect::<String>());
            if is_all_digits(&text) {
                return text.parse().ok();
            }
        }
    }
    None
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_veg(name: &str) -> bool {
    let lower = name.to_lowercase();
    !NON_VEG_KEYWORDS
        .iter()
        .any(|keyword| lower.contains(keyword))
}

fn extract_description(body: ElementRef<'_>) -> Option<String> {
    static_selector!(DESCRIPTION_SELECTOR <- "p.item-description");
    let text = collapse_whitespace(
        &body
            .select(&DESCRIPTION_SELECTOR)
            .next()?
            .text()
            .collect::<String>(),
    );
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn cards(document: &scraper::Html) -> Vec<ElementRef<'_>> {
        static_selector!(CARD_SELECTOR <- "app-item-card");
        document.root_element().select(&CARD_SELECTOR).collect()
    }

    fn fixture() -> scraper::Html {
        let html = fs::read_to_string("./src/parse/html_examples/item_cards.html").unwrap();
        scraper::Html::parse_document(&html)
    }

    #[test]
    fn direct_price_card_is_fully_extracted() {
        let document = fixture();
        let item = MenuItem::from_card(cards(&document)[0])
            .expect("the americano card should produce an item");
        assert_eq!(
            item,
            MenuItem {
                name: "Americano".to_string(),
                img: "https://cdn.example/a.png".to_string(),
                price: 170.0,
                veg: true,
                desc: "Freshly prepared Americano.".to_string(),
            }
        );
    }

    #[test]
    fn variant_price_is_found_in_sibling_block() {
        let document = fixture();
        let item = MenuItem::from_card(cards(&document)[1]).unwrap();
        assert_eq!(item.name, "Grilled Chicken Sandwich");
        assert_eq!(item.price, 250.0);
        assert!(!item.veg);
    }

    #[test]
    fn variant_price_inside_span_is_found() {
        let document = fixture();
        let item = MenuItem::from_card(cards(&document)[2]).unwrap();
        assert_eq!(item.name, "Iced Latte");
        assert_eq!(item.price, 190.0);
    }

    #[test]
    fn unresolvable_price_defaults_to_zero() {
        let document = fixture();
        let item = MenuItem::from_card(cards(&document)[3]).unwrap();
        assert_eq!(item.name, "Mystery Special");
        assert_eq!(item.price, 0.0);
    }

    #[test]
    fn card_without_name_container_is_dropped() {
        let document = fixture();
        assert!(MenuItem::from_card(cards(&document)[4]).is_none());
    }

    #[test]
    fn existing_description_is_kept() {
        let document = fixture();
        let item = MenuItem::from_card(cards(&document)[5]).unwrap();
        assert_eq!(item.name, "Masala Chai");
        assert_eq!(item.desc, "Spiced tea brewed with milk.");
    }

    #[test]
    fn empty_spans_are_skipped_when_resolving_the_name() {
        let document = fixture();
        // the chai card's name container starts with an empty span
        let item = MenuItem::from_card(cards(&document)[5]).unwrap();
        assert_eq!(item.name, "Masala Chai");
    }

    #[test]
    fn test_serde() {
        let item = MenuItem {
            name: "Americano".to_string(),
            img: "https://cdn.example/a.png".to_string(),
            price: 170.0,
            veg: true,
            desc: "Freshly prepared Americano.".to_string(),
        };
        let serialized = serde_json::to_string(&item).unwrap();
        let deserialized: MenuItem = serde_json::from_str(&serialized).unwrap();
        assert_eq!(item, deserialized);
    }

    #[test]
    fn veg_keywords_are_a_case_insensitive_substring_match() {
        assert!(!is_veg("Chicken Wrap"));
        assert!(!is_veg("CHICKEN wrap"));
        assert!(!is_veg("Egg Bhurji"));
        assert!(is_veg("Paneer Tikka"));
        // known limitation of the substring heuristic, preserved on purpose
        assert!(!is_veg("Eggplant Parmesan"));
    }

    #[test]
    fn currency_symbols_and_ranges_are_ignored_in_direct_prices() {
        let html = r#"<div class="wrapper-card">
            <p class="item-name"><span>Combo</span></p>
            <p class="item-price">₹120 - ₹180</p>
        </div>"#;
        let document = scraper::Html::parse_document(html);
        static_selector!(BODY_SELECTOR <- "div.wrapper-card");
        let body = document.root_element().select(&BODY_SELECTOR).next().unwrap();
        assert_eq!(direct_price(body), Some(120.0));
    }
}
