use dough_rs::io::svg::SvgDrawOptions;
use serde::{Deserialize, Serialize};

use crate::best_first::BFConfig;
use crate::ga::GAConfig;

/// Configuration of the optimizers
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OptConfig {
    /// Seed for the PRNG. If undefined, the algorithm will run in non-deterministic mode using entropy
    pub prng_seed: Option<u64>,
    /// Configuration of the genetic optimizer
    #[serde(default)]
    pub ga: GAConfig,
    /// Configuration of the best-first search
    #[serde(default)]
    pub bf: BFConfig,
    /// Optional SVG drawing options
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}

impl Default for OptConfig {
    fn default() -> Self {
        Self {
            prng_seed: Some(0),
            ga: GAConfig::default(),
            bf: BFConfig::default(),
            svg_draw_options: SvgDrawOptions::default(),
        }
    }
}
