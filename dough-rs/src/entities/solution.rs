use itertools::Itertools;

use crate::entities::{Board, Catalog, Gene, Placement};

/// Ordered sequence of placements on a board, sorted by position.
/// A solution is only feasible if no two placements overlap and all lie within the board,
/// see [`validate`](crate::eval::validate).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Solution {
    pub placements: Vec<Placement>,
}

impl Solution {
    /// Builds a solution from genes, evaluating the validity of every placement.
    /// All item ids must exist in the catalog.
    pub fn from_genes(board: &Board, catalog: &Catalog, genes: &[Gene]) -> Self {
        let placements = genes
            .iter()
            .sorted_by_key(|g| g.position)
            .map(|g| Placement::evaluated(board, catalog, *g))
            .collect_vec();
        Self { placements }
    }

    pub fn genes(&self) -> Vec<Gene> {
        self.placements.iter().map(|p| p.gene()).collect_vec()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn n_valid(&self) -> usize {
        self.placements.iter().filter(|p| p.is_valid).count()
    }

    /// Sum of the values of all valid placements, without the uncovered length penalty
    pub fn valid_value(&self, catalog: &Catalog) -> f32 {
        self.placements
            .iter()
            .filter(|p| p.is_valid)
            .map(|p| catalog.item(p.item_id).value)
            .sum()
    }

    /// Total length covered by valid placements
    pub fn covered_length(&self, catalog: &Catalog) -> usize {
        self.placements
            .iter()
            .filter(|p| p.is_valid)
            .map(|p| catalog.item(p.item_id).length)
            .sum()
    }
}
