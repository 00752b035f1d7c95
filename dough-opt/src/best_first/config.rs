use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

/// Configuration of the best-first search
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct BFConfig {
    /// Number of cells the board is divided into. If undefined, every board unit is a cell
    pub n_positions: Option<usize>,
    pub heuristic: HeuristicKind,
    pub step_cost: StepCostKind,
    /// Search gives up after this many node expansions. If undefined, it runs until the frontier is exhausted
    pub max_expansions: Option<usize>,
    /// Keep every expanded state in the report, for diagnostics
    #[serde(default)]
    pub record_expanded: bool,
}

/// Estimate of the remaining cost of a node
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicKind {
    /// Accumulated value divided by the cursor position, zero at the start of the board
    ValueDensity,
    Zero,
}

/// Cost of a single placement
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum StepCostKind {
    /// Every placement costs 1
    Unit,
    /// Value lost compared to covering the same cells at the best value density of the catalog
    ValueDeficit,
}

impl Default for BFConfig {
    fn default() -> Self {
        Self {
            n_positions: None,
            heuristic: HeuristicKind::ValueDensity,
            step_cost: StepCostKind::Unit,
            max_expansions: Some(2_000_000),
            record_expanded: false,
        }
    }
}

impl BFConfig {
    /// Step costs and heuristic under which the first goal reached has the highest value
    pub fn exact() -> Self {
        Self {
            heuristic: HeuristicKind::Zero,
            step_cost: StepCostKind::ValueDeficit,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.n_positions != Some(0),
            "number of positions must be positive"
        );
        ensure!(
            self.max_expansions != Some(0),
            "expansion limit must be positive"
        );
        Ok(())
    }
}
