use itertools::Itertools;
use log::error;

use crate::entities::{Board, Catalog, Gene, Item, Solution};
use crate::eval;

//Various checks to verify correctness of the state of the system
//Used in debug_assertion!() blocks

pub fn catalog_item_ids_correct(items: &[Item]) -> bool {
    items.iter().enumerate().all(|(i, item)| item.id == i)
}

/// No two genes cover a common unit and all of them lie within the board.
pub fn genes_are_feasible(board: &Board, catalog: &Catalog, genes: &[Gene]) -> bool {
    let report = eval::validate(board, catalog, genes);
    if !report.is_clean() {
        error!("infeasible genes: {}", report.anomalies.iter().join(", "));
        return false;
    }
    true
}

pub fn genes_sorted_by_position(genes: &[Gene]) -> bool {
    genes.is_sorted_by_key(|g| g.position)
}

/// Every placement flagged valid respects the thresholds of its item and vice versa.
pub fn validity_flags_correct(board: &Board, catalog: &Catalog, solution: &Solution) -> bool {
    solution.placements.iter().all(|p| {
        let item = catalog.item(p.item_id);
        let counts = eval::count_defects(board, p.position, item.length);
        let correct = p.is_valid == eval::is_valid_placement(item, &counts);
        if !correct {
            error!(
                "placement of {} at {} flagged {} but covers {counts}",
                item.name, p.position, p.is_valid
            );
        }
        correct
    })
}
