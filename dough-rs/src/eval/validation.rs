use std::fmt::{Display, Formatter};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::entities::{Board, Catalog, Gene};

/// A structural problem detected in a sequence of placements.
/// Indices refer to the order in which the placements were handed to [`validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "Type")]
pub enum Anomaly {
    /// Placement `second` starts before placement `first` ends
    Overlap { first: usize, second: usize },
    /// The placement ends beyond the board
    OutOfRange { index: usize, end: usize },
    /// The placement refers to an item not in the catalog
    UnknownItem { index: usize, item_id: usize },
}

impl Display for Anomaly {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Anomaly::Overlap { first, second } => {
                write!(f, "placement {second} overlaps placement {first}")
            }
            Anomaly::OutOfRange { index, end } => {
                write!(f, "placement {index} ends at {end}, beyond the board")
            }
            Anomaly::UnknownItem { index, item_id } => {
                write!(f, "placement {index} refers to unknown item {item_id}")
            }
        }
    }
}

/// Diagnostic report listing all anomalies of a set of placements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub anomalies: Vec<Anomaly>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }
}

/// Lists every overlap, out-of-range and unknown-item anomaly. Never fails.
pub fn validate(board: &Board, catalog: &Catalog, genes: &[Gene]) -> ValidationReport {
    let mut anomalies = vec![];
    // (index, end) of the placement reaching furthest so far
    let mut furthest: Option<(usize, usize)> = None;

    for idx in (0..genes.len()).sorted_by_key(|i| (genes[*i].position, *i)) {
        let gene = &genes[idx];
        let Some(item) = catalog.get(gene.item_id) else {
            anomalies.push(Anomaly::UnknownItem {
                index: idx,
                item_id: gene.item_id,
            });
            continue;
        };
        let end = gene.position + item.length;
        if end > board.length {
            anomalies.push(Anomaly::OutOfRange { index: idx, end });
        }
        if let Some((f_idx, f_end)) = furthest {
            if gene.position < f_end {
                anomalies.push(Anomaly::Overlap {
                    first: f_idx,
                    second: idx,
                });
            }
        }
        if furthest.is_none_or(|(_, f_end)| end > f_end) {
            furthest = Some((idx, end));
        }
    }

    ValidationReport { anomalies }
}
