use std::borrow::Cow;

use itertools::Itertools;

use crate::entities::{Board, Catalog, DefectCounts, Gene, Item, Solution};

/// Fitness of a solution which overlaps itself or exceeds the board.
pub const FITNESS_INFEASIBLE: f32 = f32::NEG_INFINITY;

/// Counts the defects per class with a position in `[start, start + length)`.
pub fn count_defects(board: &Board, start: usize, length: usize) -> DefectCounts {
    board.count_defects(start, length)
}

/// True iff `counts` respects every finite threshold of the item.
pub fn is_valid_placement(item: &Item, counts: &DefectCounts) -> bool {
    item.max_defects.admits(counts)
}

/// Fitness of a solution, see [`fitness_of_genes`].
pub fn fitness(board: &Board, catalog: &Catalog, solution: &Solution) -> f32 {
    fitness_of_genes(board, catalog, &solution.genes())
}

/// Sum of the values of all valid placements minus the number of board units not covered by any
/// valid placement.
///
/// Returns [`FITNESS_INFEASIBLE`] as soon as a placement exceeds the board, overlaps another one or
/// refers to an unknown item; no penalty is computed in that case.
pub fn fitness_of_genes(board: &Board, catalog: &Catalog, genes: &[Gene]) -> f32 {
    let genes: Cow<[Gene]> = match genes.is_sorted_by_key(|g| g.position) {
        true => Cow::Borrowed(genes),
        false => Cow::Owned(genes.iter().copied().sorted_by_key(|g| g.position).collect()),
    };

    let mut value = 0.0;
    let mut covered = 0;
    let mut prev_end = 0;

    for gene in genes.iter() {
        let Some(item) = catalog.get(gene.item_id) else {
            return FITNESS_INFEASIBLE;
        };
        let end = gene.position + item.length;
        if end > board.length || gene.position < prev_end {
            return FITNESS_INFEASIBLE;
        }
        prev_end = end;

        let counts = count_defects(board, gene.position, item.length);
        if is_valid_placement(item, &counts) {
            value += item.value;
            covered += item.length;
        }
    }

    value - (board.length - covered) as f32
}

/// Number of board units not covered by a valid placement of the solution.
/// Assumes a feasible solution.
pub fn uncovered_length(board: &Board, catalog: &Catalog, solution: &Solution) -> usize {
    board
        .length
        .saturating_sub(solution.covered_length(catalog))
}
