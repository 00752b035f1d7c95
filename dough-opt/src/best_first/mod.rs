mod config;
mod discretization;
mod search;

#[doc(inline)]
pub use config::{BFConfig, HeuristicKind, StepCostKind};
#[doc(inline)]
pub use discretization::Discretization;
#[doc(inline)]
pub use search::{BFPath, BFReport, BFSearch, BFState};
