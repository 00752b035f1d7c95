use std::sync::LazyLock;
use std::time::Instant;

/// Best-first search over sequences of placements
pub mod best_first;
pub mod config;
/// Genetic optimizer and its operators
pub mod ga;
/// Randomized greedy construction and repair of solutions
pub mod greedy;
pub mod io;

pub static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);
