use dough_rs::io::ext_repr::{ExtInstance, ExtSolution};
use serde::{Deserialize, Serialize};

use crate::config::OptConfig;
use crate::io::cli::Engine;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OptOutput {
    #[serde(flatten)]
    pub instance: ExtInstance,
    pub solution: ExtSolution,
    pub engine: Engine,
    pub config: OptConfig,
}
