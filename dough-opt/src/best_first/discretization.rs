use anyhow::{Result, ensure};
use dough_rs::entities::{DefectCounts, Instance};
use itertools::Itertools;

/// The board divided into `n_positions` equally long cells.
/// Defects are attributed to the cell containing them and item lengths are expressed in cells,
/// rounded up so that the cells of an item always span at least its length on the board.
#[derive(Clone, Debug)]
pub struct Discretization {
    pub n_positions: usize,
    board_length: usize,
    /// Length of every item of the catalog in cells, rounded up
    item_lengths: Vec<usize>,
    /// `prefix[i]` holds the defects in cells `[0, i)`
    prefix: Vec<DefectCounts>,
    max_cell_density: f32,
}

impl Discretization {
    pub fn new(instance: &Instance, n_positions: usize) -> Result<Self> {
        ensure!(n_positions > 0, "number of positions must be positive");
        let Instance { board, catalog, .. } = instance;
        let scale = n_positions as f32 / board.length as f32;

        let mut per_cell = vec![DefectCounts::zero(); n_positions];
        for d in board.defects() {
            let cell = ((d.position * scale) as usize).min(n_positions - 1);
            per_cell[cell].increment(d.class);
        }
        let prefix = std::iter::once(DefectCounts::zero())
            .chain(per_cell.into_iter().scan(DefectCounts::zero(), |acc, c| {
                *acc += c;
                Some(*acc)
            }))
            .collect_vec();

        let item_lengths = catalog
            .items()
            .iter()
            .map(|i| (i.length * n_positions).div_ceil(board.length).max(1))
            .collect_vec();

        let max_cell_density = catalog
            .items()
            .iter()
            .zip(&item_lengths)
            .map(|(i, l)| i.value / *l as f32)
            .fold(0.0, f32::max);

        Ok(Self {
            n_positions,
            board_length: board.length,
            item_lengths,
            prefix,
            max_cell_density,
        })
    }

    pub fn item_length(&self, item_id: usize) -> usize {
        self.item_lengths[item_id]
    }

    /// Defects in cells `[start, start + length)`
    pub fn count_defects(&self, start: usize, length: usize) -> DefectCounts {
        let end = (start + length).min(self.n_positions);
        let start = start.min(end);
        self.prefix[end] - self.prefix[start]
    }

    /// Highest value per cell over all items, never negative
    pub fn max_cell_density(&self) -> f32 {
        self.max_cell_density
    }

    /// Board position at which a cell starts
    pub fn board_position(&self, cell: usize) -> usize {
        cell * self.board_length / self.n_positions
    }
}
