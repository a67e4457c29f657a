//! Menu Models
//!
//! Menu books, menu items, selectable options and the nested menu
//! structure served by `GET menus/{bookId}`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Menu book (wire contract uses camelCase for this endpoint).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MenuBook {
    pub book_id: i64,
    pub book_name: String,
}

/// A single orderable menu item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuItem {
    pub menu_id: i64,
    pub menu_name: String,
    /// Price in integer currency units, fixed at add-to-cart time.
    pub price: i64,
    pub category_id: i64,
    #[serde(default)]
    pub is_sold_out: bool,
}

/// Selectable option (toppings, size changes, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MenuOption {
    pub option_id: i64,
    pub option_name: String,
    pub price: i64,
}

/// Nested menu structure: major category → minor category → items.
pub type MenuStructure = BTreeMap<String, BTreeMap<String, Vec<MenuItem>>>;

/// Lookup view over a loaded menu book.
///
/// Built once per `initialize`; resolves menu ids to names and prices for
/// history rendering without another server round-trip.
#[derive(Debug, Clone, Default)]
pub struct MenuCatalog {
    pub structure: MenuStructure,
    pub options: Vec<MenuOption>,
    items: HashMap<i64, MenuItem>,
}

impl MenuCatalog {
    pub fn new(structure: MenuStructure, options: Vec<MenuOption>) -> Self {
        let mut items = HashMap::new();
        for minor in structure.values() {
            for list in minor.values() {
                for item in list {
                    items.insert(item.menu_id, item.clone());
                }
            }
        }
        Self {
            structure,
            options,
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, menu_id: i64) -> Option<&MenuItem> {
        self.items.get(&menu_id)
    }

    /// Display name for a menu id, with an explicit fallback for ids no
    /// longer present in the loaded book.
    pub fn name_of(&self, menu_id: i64) -> String {
        self.items
            .get(&menu_id)
            .map(|i| i.menu_name.clone())
            .unwrap_or_else(|| format!("item #{menu_id}"))
    }

    pub fn price_of(&self, menu_id: i64) -> i64 {
        self.items.get(&menu_id).map(|i| i.price).unwrap_or(0)
    }

    pub fn option(&self, option_id: i64) -> Option<&MenuOption> {
        self.options.iter().find(|o| o.option_id == option_id)
    }
}
