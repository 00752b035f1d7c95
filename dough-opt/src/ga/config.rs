use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use crate::greedy::DEFAULT_POOL;

/// Configuration of the genetic optimizer
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GAConfig {
    /// Number of individuals in every generation
    pub population_size: usize,
    /// Number of generations to evolve
    pub generations: usize,
    /// Probability of mutation, per individual or per gene depending on [`MutationKind`]
    pub mutation_rate: f32,
    /// Probability that a selected pair of parents is recombined
    pub crossover_rate: f32,
    /// Fraction of the population copied unconditionally into the next generation
    pub elite_fraction: f32,
    /// Number of individuals competing in a tournament
    pub tournament_size: usize,
    pub selection: SelectionKind,
    pub crossover: CrossoverKind,
    pub mutation: MutationKind,
    /// Draw parents from the elite only instead of the whole generation
    #[serde(default)]
    pub parents_from_elite: bool,
    /// Probability that an offspring has its uncovered gaps filled by the greedy builder
    #[serde(default)]
    pub repair_rate: f32,
    /// Item ids from which initial individuals are built, repetitions act as weights
    #[serde(default = "default_pool")]
    pub greedy_pool: Vec<usize>,
}

fn default_pool() -> Vec<usize> {
    DEFAULT_POOL.to_vec()
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// Fitness proportionate selection
    Roulette,
    /// Best of `tournament_size` uniformly drawn individuals
    Tournament,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverKind {
    /// Alternately takes genes from both parents, skipping those which would overlap
    Interleaved,
    /// Joins the head of one parent to the tail of the other at gaps between placements
    CutPoint { max_attempts: usize },
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Changes the item type or shifts the position of a single gene
    Perturb,
    /// Swaps the positions of pairs of genes
    Swap,
    None,
}

impl Default for GAConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl GAConfig {
    /// Roulette selection, interleaved crossover, perturbation mutation and no elitism
    pub fn classic() -> Self {
        Self {
            population_size: 100,
            generations: 100,
            mutation_rate: 0.1,
            crossover_rate: 0.8,
            elite_fraction: 0.0,
            tournament_size: 5,
            selection: SelectionKind::Roulette,
            crossover: CrossoverKind::Interleaved,
            mutation: MutationKind::Perturb,
            parents_from_elite: false,
            repair_rate: 0.0,
            greedy_pool: default_pool(),
        }
    }

    /// Roulette selection on top of a 20% elite, with swap mutation
    pub fn elitism() -> Self {
        Self {
            elite_fraction: 0.2,
            mutation: MutationKind::Swap,
            ..Self::classic()
        }
    }

    /// Tournaments of 5 on top of a 20% elite, with swap mutation
    pub fn tournament() -> Self {
        Self {
            selection: SelectionKind::Tournament,
            tournament_size: 5,
            ..Self::elitism()
        }
    }

    /// 20% elite, parents picked from the elite by tournaments of 15,
    /// cut-point crossover and no mutation
    pub fn uniform_crossover() -> Self {
        Self {
            selection: SelectionKind::Tournament,
            tournament_size: 15,
            elite_fraction: 0.2,
            parents_from_elite: true,
            crossover: CrossoverKind::CutPoint { max_attempts: 500 },
            mutation: MutationKind::None,
            ..Self::classic()
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.population_size > 0, "population size must be positive");
        ensure!(
            (0.0..=1.0).contains(&self.mutation_rate),
            "mutation rate {} not in [0, 1]",
            self.mutation_rate
        );
        ensure!(
            (0.0..=1.0).contains(&self.crossover_rate),
            "crossover rate {} not in [0, 1]",
            self.crossover_rate
        );
        ensure!(
            (0.0..1.0).contains(&self.elite_fraction),
            "elite fraction {} not in [0, 1)",
            self.elite_fraction
        );
        ensure!(
            (0.0..=1.0).contains(&self.repair_rate),
            "repair rate {} not in [0, 1]",
            self.repair_rate
        );
        if self.selection == SelectionKind::Tournament {
            ensure!(
                (1..=self.population_size).contains(&self.tournament_size),
                "tournament size {} not in [1, {}]",
                self.tournament_size,
                self.population_size
            );
        }
        if let CrossoverKind::CutPoint { max_attempts } = self.crossover {
            ensure!(max_attempts > 0, "cut-point crossover needs at least one attempt");
        }
        Ok(())
    }

    /// Number of individuals carried over unconditionally, at least one if elitism is enabled
    pub fn elite_count(&self) -> usize {
        match self.elite_fraction > 0.0 {
            true => ((self.elite_fraction * self.population_size as f32) as usize)
                .clamp(1, self.population_size),
            false => 0,
        }
    }
}
