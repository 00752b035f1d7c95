use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use crate::entities::{DefectClass, DefectCounts, N_DEFECT_CLASSES};

/// Maximum number of tolerated defects per class. `None` means the class is unconstrained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectThresholds(pub [Option<u32>; N_DEFECT_CLASSES]);

impl DefectThresholds {
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self([Some(a), Some(b), Some(c)])
    }

    /// Thresholds which tolerate any number of defects
    pub fn unbounded() -> Self {
        Self([None; N_DEFECT_CLASSES])
    }

    pub fn get(&self, class: DefectClass) -> Option<u32> {
        self.0[class.index()]
    }

    /// True iff every finite threshold is respected by `counts`.
    pub fn admits(&self, counts: &DefectCounts) -> bool {
        DefectClass::ALL
            .iter()
            .all(|c| self.get(*c).is_none_or(|max| counts[*c] <= max))
    }
}

/// Item type which can be cut out of the board
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: usize,
    pub name: String,
    /// Number of board units covered by the item
    pub length: usize,
    /// Value of a valid placement. Negative values model gap fillers.
    pub value: f32,
    pub max_defects: DefectThresholds,
}

impl Item {
    pub fn new(
        id: usize,
        name: impl Into<String>,
        length: usize,
        value: f32,
        max_defects: DefectThresholds,
    ) -> Result<Self> {
        let name = name.into();
        ensure!(length > 0, "item {name} (id {id}) must have a positive length");
        ensure!(value.is_finite(), "item {name} (id {id}) has a non-finite value");
        Ok(Self {
            id,
            name,
            length,
            value,
            max_defects,
        })
    }

    /// Value per unit of length
    pub fn value_density(&self) -> f32 {
        self.value / self.length as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_treat_missing_classes_as_unconstrained() {
        let thresholds = DefectThresholds([Some(1), None, Some(0)]);
        assert!(thresholds.admits(&DefectCounts([1, 40, 0])));
        assert!(!thresholds.admits(&DefectCounts([2, 0, 0])));
        assert!(!thresholds.admits(&DefectCounts([0, 0, 1])));
        assert!(DefectThresholds::unbounded().admits(&DefectCounts([9, 9, 9])));
    }

    #[test]
    fn zero_length_items_are_rejected() {
        assert!(Item::new(0, "empty", 0, 1.0, DefectThresholds::unbounded()).is_err());
        assert!(Item::new(0, "nan", 1, f32::NAN, DefectThresholds::unbounded()).is_err());
    }
}
