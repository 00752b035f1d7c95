use anyhow::Result;

use crate::ga::config::{CrossoverKind, GAConfig, MutationKind, SelectionKind};
use crate::ga::crossover::{Crossover, CutPoint, Interleaved};
use crate::ga::mutation::{Mutation, NoMutation, Perturb, Swap};
use crate::ga::selection::{RouletteWheel, Selection, Tournament};

/// The set of genetic operators used by a [`GAOptimizer`](crate::ga::GAOptimizer).
/// Variants of the genetic algorithm only differ in the operators bundled here.
pub struct Strategy {
    pub selection: Box<dyn Selection>,
    pub crossover: Box<dyn Crossover>,
    pub mutation: Box<dyn Mutation>,
}

impl Strategy {
    pub fn new(
        selection: impl Selection + 'static,
        crossover: impl Crossover + 'static,
        mutation: impl Mutation + 'static,
    ) -> Self {
        Self {
            selection: Box::new(selection),
            crossover: Box::new(crossover),
            mutation: Box::new(mutation),
        }
    }

    pub fn from_config(config: &GAConfig) -> Self {
        let selection: Box<dyn Selection> = match config.selection {
            SelectionKind::Roulette => Box::new(RouletteWheel),
            SelectionKind::Tournament => Box::new(Tournament {
                size: config.tournament_size,
            }),
        };
        let crossover: Box<dyn Crossover> = match config.crossover {
            CrossoverKind::Interleaved => Box::new(Interleaved),
            CrossoverKind::CutPoint { max_attempts } => Box::new(CutPoint { max_attempts }),
        };
        let mutation: Box<dyn Mutation> = match config.mutation {
            MutationKind::Perturb => Box::new(Perturb {
                rate: config.mutation_rate,
            }),
            MutationKind::Swap => Box::new(Swap {
                rate: config.mutation_rate,
            }),
            MutationKind::None => Box::new(NoMutation),
        };
        Self {
            selection,
            crossover,
            mutation,
        }
    }

    /// Rejects operators with out of range parameters
    pub fn validate(&self) -> Result<()> {
        self.mutation.validate()
    }
}
