mod config;
mod crossover;
mod mutation;
mod optimizer;
mod selection;
mod strategy;

#[doc(inline)]
pub use config::{CrossoverKind, GAConfig, MutationKind, SelectionKind};
#[doc(inline)]
pub use crossover::{Crossover, CutPoint, Interleaved};
#[doc(inline)]
pub use mutation::{Mutation, NoMutation, Perturb, Swap};
#[doc(inline)]
pub use optimizer::{GAOptimizer, GAResult};
#[doc(inline)]
pub use selection::{RouletteWheel, Selection, Tournament};
#[doc(inline)]
pub use strategy::Strategy;
