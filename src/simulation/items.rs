//! Inventory items critters carry and consume

use serde::{Deserialize, Serialize};

/// What a need an item satisfies when consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Food,
    Drink,
}

/// A consumable item. `energy` is the amount the matching need drops by.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub category: ItemCategory,
    pub energy: u32,
}

impl Item {
    pub fn food(name: impl Into<String>, energy: u32) -> Self {
        Self {
            name: name.into(),
            category: ItemCategory::Food,
            energy,
        }
    }

    pub fn drink(name: impl Into<String>, energy: u32) -> Self {
        Self {
            name: name.into(),
            category: ItemCategory::Drink,
            energy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_category() {
        let apple = Item::food("apple", 30);
        assert_eq!(apple.category, ItemCategory::Food);
        assert_eq!(apple.energy, 30);

        let water = Item::drink("fresh water", 20);
        assert_eq!(water.category, ItemCategory::Drink);
    }
}
