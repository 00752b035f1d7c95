use serde::{Deserialize, Serialize};

use crate::eval::Anomaly;

/// The external representation of a problem instance
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ExtInstance {
    /// The name of the instance
    pub name: String,
    pub board: ExtBoard,
    /// Catalog of item types. If absent, the default biscuit catalog is used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ExtItem>>,
}

/// The external representation of the strip and its defects
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ExtBoard {
    pub length: usize,
    #[serde(default)]
    pub defects: Vec<ExtDefect>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ExtDefect {
    /// Position of the defect along the board
    pub x: f32,
    /// Label of the defect class, unknown labels are skipped during import
    pub class: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ExtItem {
    /// Unique identifier of the item type, ids must be consecutive starting from 0
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub length: usize,
    pub value: f32,
    /// Maximum number of defects per class, missing classes are unconstrained
    #[serde(default)]
    pub max_defects: ExtThresholds,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub struct ExtThresholds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c: Option<u32>,
}

/// The external representation of a solution
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ExtSolution {
    /// Fitness of the solution, absent if the solution is infeasible
    pub fitness: Option<f32>,
    /// Sum of the values of all valid placements
    pub valid_value: f32,
    /// Number of board units not covered by a valid placement
    pub uncovered_length: usize,
    pub placements: Vec<ExtPlacement>,
    /// Structural problems of the solution, empty for feasible solutions
    pub anomalies: Vec<Anomaly>,
    /// The time it took to generate the solution in seconds
    pub run_time_sec: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ExtPlacement {
    pub position: usize,
    pub item_id: u64,
    pub item_name: String,
    pub length: usize,
    pub valid: bool,
}
