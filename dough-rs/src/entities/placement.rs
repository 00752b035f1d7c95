use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use crate::entities::{Board, Catalog};
use crate::eval;

/// Lightweight `(position, item type)` encoding of a placement, without validity information.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Gene {
    pub position: usize,
    pub item_id: usize,
}

impl Gene {
    pub fn new(position: usize, item_id: usize) -> Self {
        Self { position, item_id }
    }

    /// Exclusive end of the range covered by this gene
    pub fn end(&self, catalog: &Catalog) -> usize {
        self.position + catalog.item(self.item_id).length
    }

    /// True if the covered ranges of both genes intersect
    pub fn overlaps(&self, other: &Gene, catalog: &Catalog) -> bool {
        self.position < other.end(catalog) && other.position < self.end(catalog)
    }
}

/// An item positioned on the board, flagged with whether its defect thresholds are respected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub position: usize,
    pub item_id: usize,
    pub is_valid: bool,
}

impl Placement {
    /// Creates a placement and evaluates its validity.
    /// Positions outside `[0, board.length)` and unknown item ids are rejected.
    pub fn new(board: &Board, catalog: &Catalog, position: usize, item_id: usize) -> Result<Self> {
        ensure!(
            position < board.length,
            "placement position {position} out of board range [0, {})",
            board.length
        );
        ensure!(
            catalog.get(item_id).is_some(),
            "unknown item id {item_id} (catalog has {} items)",
            catalog.len()
        );
        Ok(Self::evaluated(board, catalog, Gene::new(position, item_id)))
    }

    /// Evaluates the validity of a gene without any range checks.
    pub(crate) fn evaluated(board: &Board, catalog: &Catalog, gene: Gene) -> Self {
        let item = catalog.item(gene.item_id);
        let counts = eval::count_defects(board, gene.position, item.length);
        Self {
            position: gene.position,
            item_id: gene.item_id,
            is_valid: eval::is_valid_placement(item, &counts),
        }
    }

    pub fn gene(&self) -> Gene {
        Gene::new(self.position, self.item_id)
    }

    pub fn end(&self, catalog: &Catalog) -> usize {
        self.position + catalog.item(self.item_id).length
    }
}

impl From<Placement> for Gene {
    fn from(p: Placement) -> Self {
        p.gene()
    }
}
