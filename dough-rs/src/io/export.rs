use std::time::Duration;

use crate::entities::{Instance, Solution};
use crate::eval;
use crate::io::ext_repr::{ExtPlacement, ExtSolution};

/// Exports a solution out of the library
pub fn export(instance: &Instance, solution: &Solution, run_time: Duration) -> ExtSolution {
    let Instance { board, catalog, .. } = instance;
    let report = eval::validate(board, catalog, &solution.genes());
    let fitness = eval::fitness(board, catalog, solution);

    let placements = solution
        .placements
        .iter()
        .map(|p| {
            let item = catalog.item(p.item_id);
            ExtPlacement {
                position: p.position,
                item_id: p.item_id as u64,
                item_name: item.name.clone(),
                length: item.length,
                valid: p.is_valid,
            }
        })
        .collect();

    ExtSolution {
        fitness: fitness.is_finite().then_some(fitness),
        valid_value: solution.valid_value(catalog),
        uncovered_length: eval::uncovered_length(board, catalog, solution),
        placements,
        anomalies: report.anomalies,
        run_time_sec: run_time.as_secs_f64(),
    }
}
