mod category;
mod item_card;
mod menu;
mod normalize;
mod static_selector;

pub use menu::Menu;
