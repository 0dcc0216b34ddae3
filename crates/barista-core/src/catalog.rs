//! # Menu Catalog
//!
//! The café's static menu. Prices are in cents; the cart freezes them at add
//! time, so editing this table never changes an already-saved bill.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// One orderable product on the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Stable catalog identifier, referenced by cart lines.
    pub id: &'static str,
    pub name: &'static str,
    /// Unit price in cents.
    pub price_cents: i64,
    pub category: Category,
}

impl MenuItem {
    /// Unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Menu sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    HotDrinks,
    ColdDrinks,
    Food,
}

/// Display order of the menu sections.
pub const CATEGORIES: [Category; 3] = [Category::HotDrinks, Category::ColdDrinks, Category::Food];

/// The full menu.
pub const MENU_ITEMS: [MenuItem; 12] = [
    // Hot Drinks
    MenuItem { id: "hd1", name: "Espresso",   price_cents: 12000, category: Category::HotDrinks },
    MenuItem { id: "hd2", name: "Latte",      price_cents: 16000, category: Category::HotDrinks },
    MenuItem { id: "hd3", name: "Cappuccino", price_cents: 15000, category: Category::HotDrinks },
    MenuItem { id: "hd4", name: "Americano",  price_cents: 13000, category: Category::HotDrinks },
    MenuItem { id: "hd5", name: "Mocha",      price_cents: 18000, category: Category::HotDrinks },
    // Cold Drinks
    MenuItem { id: "cd1", name: "Cold Brew",  price_cents: 20000, category: Category::ColdDrinks },
    MenuItem { id: "cd2", name: "Iced Latte", price_cents: 19000, category: Category::ColdDrinks },
    MenuItem { id: "cd3", name: "Frappe",     price_cents: 21000, category: Category::ColdDrinks },
    // Food
    MenuItem { id: "fo1", name: "Brownie",    price_cents: 15000, category: Category::Food },
    MenuItem { id: "fo2", name: "Croissant",  price_cents: 12000, category: Category::Food },
    MenuItem { id: "fo3", name: "Sandwich",   price_cents: 18000, category: Category::Food },
    MenuItem { id: "fo4", name: "Muffin",     price_cents: 10000, category: Category::Food },
];

/// Looks up a menu item by its catalog id.
pub fn find_item(id: &str) -> Option<&'static MenuItem> {
    MENU_ITEMS.iter().find(|item| item.id == id)
}

/// All items in one menu section, in menu order.
pub fn items_in_category(category: Category) -> impl Iterator<Item = &'static MenuItem> {
    MENU_ITEMS.iter().filter(move |item| item.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_item() {
        let espresso = find_item("hd1").unwrap();
        assert_eq!(espresso.name, "Espresso");
        assert_eq!(espresso.price().cents(), 12000);

        assert!(find_item("nope").is_none());
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        for (i, a) in MENU_ITEMS.iter().enumerate() {
            for b in &MENU_ITEMS[i + 1..] {
                assert_ne!(a.id, b.id, "duplicate catalog id {}", a.id);
            }
        }
    }

    #[test]
    fn test_every_category_has_items() {
        for category in CATEGORIES {
            assert!(items_in_category(category).next().is_some());
        }
    }
}
