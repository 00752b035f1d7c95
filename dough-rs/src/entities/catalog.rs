use anyhow::{Result, ensure};
use itertools::Itertools;

use crate::entities::{DefectThresholds, Item};
use crate::util::assertions;

/// Fixed set of item types available for placement. Item ids are consecutive and start at 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Result<Self> {
        ensure!(!items.is_empty(), "catalog must contain at least one item");
        ensure!(
            assertions::catalog_item_ids_correct(&items),
            "All items should have consecutive IDs starting from 0. IDs: {:?}",
            items.iter().map(|i| i.id).collect_vec()
        );
        Ok(Self { items })
    }

    /// The five biscuit types of the reference bakery, the last one being a unit-length gap filler.
    pub fn default_biscuits() -> Self {
        let items = vec![
            Item {
                id: 0,
                name: "biscuit_0".into(),
                length: 4,
                value: 3.0,
                max_defects: DefectThresholds::new(4, 2, 3),
            },
            Item {
                id: 1,
                name: "biscuit_1".into(),
                length: 8,
                value: 12.0,
                max_defects: DefectThresholds::new(5, 4, 4),
            },
            Item {
                id: 2,
                name: "biscuit_2".into(),
                length: 2,
                value: 1.0,
                max_defects: DefectThresholds::new(1, 2, 1),
            },
            Item {
                id: 3,
                name: "biscuit_3".into(),
                length: 5,
                value: 8.0,
                max_defects: DefectThresholds::new(2, 3, 2),
            },
            Item {
                id: 4,
                name: "no_biscuit".into(),
                length: 1,
                value: -1.0,
                max_defects: DefectThresholds::unbounded(),
            },
        ];
        Self { items }
    }

    pub fn item(&self, id: usize) -> &Item {
        &self.items[id]
    }

    pub fn get(&self, id: usize) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Highest value per unit of length over all items, never negative.
    pub fn max_value_density(&self) -> f32 {
        self.items
            .iter()
            .map(|i| i.value_density())
            .fold(0.0, f32::max)
    }
}
