use std::cmp::Reverse;
use std::time::Instant;

use anyhow::Result;
use dough_rs::entities::{Gene, Instance, Solution};
use dough_rs::eval;
use dough_rs::util::assertions;
use itertools::Itertools;
use log::{debug, info};
use ordered_float::OrderedFloat;
use rand::Rng;
use rand::prelude::SmallRng;
use rayon::prelude::*;
use thousands::Separable;

use crate::ga::config::GAConfig;
use crate::ga::strategy::Strategy;
use crate::greedy::GreedyBuilder;

/// Generational genetic optimizer.
/// Individuals are position-sorted gene sequences, every generation replaces the previous one wholesale.
pub struct GAOptimizer {
    pub instance: Instance,
    pub config: GAConfig,
    pub strategy: Strategy,
    /// SmallRng is a fast, non-cryptographic PRNG <https://rust-random.github.io/book/guide-rngs.html>
    pub rng: SmallRng,
    builder: GreedyBuilder,
    population: Vec<Vec<Gene>>,
    /// Fitness of every individual of `population`, computed once per generation
    fitness: Vec<f32>,
    best: (Vec<Gene>, f32),
    history: Vec<f32>,
    generation: usize,
    n_evaluations: usize,
}

#[derive(Clone, Debug)]
pub struct GAResult {
    pub best: Solution,
    pub best_fitness: f32,
    /// Number of generations evolved
    pub generations: usize,
    /// Best fitness of the initial population, followed by that of every evolved generation
    pub history: Vec<f32>,
    pub n_evaluations: usize,
}

impl GAOptimizer {
    /// Creates an optimizer using the operators described by `config`,
    /// and seeds its initial population with the greedy builder.
    pub fn new(instance: Instance, config: GAConfig, rng: SmallRng) -> Result<Self> {
        let strategy = Strategy::from_config(&config);
        Self::with_strategy(instance, config, strategy, rng)
    }

    /// Creates an optimizer with a custom set of operators
    pub fn with_strategy(
        instance: Instance,
        config: GAConfig,
        strategy: Strategy,
        mut rng: SmallRng,
    ) -> Result<Self> {
        config.validate()?;
        strategy.validate()?;
        let builder = GreedyBuilder::new(config.greedy_pool.clone(), &instance.catalog)?;

        let population = (0..config.population_size)
            .map(|_| builder.build(&instance.board, &instance.catalog, &mut rng))
            .collect_vec();
        let fitness = evaluate(&instance, &population);

        let best = fittest(&fitness)
            .map(|i| (population[i].clone(), fitness[i]))
            .unwrap_or((vec![], eval::FITNESS_INFEASIBLE));

        info!(
            "[GA] initial population of {} individuals, best fitness: {:.3}",
            population.len(),
            best.1
        );

        Ok(Self {
            n_evaluations: population.len(),
            history: vec![best.1],
            instance,
            config,
            strategy,
            rng,
            builder,
            population,
            fitness,
            best,
            generation: 0,
        })
    }

    /// Evolves the configured number of generations and returns the best individual ever seen.
    pub fn solve(&mut self) -> GAResult {
        let start = Instant::now();

        for _ in 0..self.config.generations {
            self.step();
        }

        let (best_genes, best_fitness) = &self.best;
        let best = Solution::from_genes(&self.instance.board, &self.instance.catalog, best_genes);

        info!(
            "[GA] optimization finished in {:.3}ms ({} generations, {} evaluations)",
            start.elapsed().as_secs_f64() * 1000.0,
            self.generation.separate_with_commas(),
            self.n_evaluations.separate_with_commas()
        );
        info!(
            "[GA] best solution contains {} placements ({} valid), fitness: {:.3}",
            best.len(),
            best.n_valid(),
            best_fitness
        );

        GAResult {
            best,
            best_fitness: *best_fitness,
            generations: self.generation,
            history: self.history.clone(),
            n_evaluations: self.n_evaluations,
        }
    }

    /// Runs a single generation: elite carry-over, selection, crossover, mutation, optional repair,
    /// followed by the evaluation of the new generation.
    pub fn step(&mut self) {
        let Instance { board, catalog, .. } = &self.instance;
        let size = self.config.population_size;

        let ranking = self.ranking();
        let n_elite = self.config.elite_count();

        // elites pass through unmodified
        let mut next = ranking[..n_elite]
            .iter()
            .map(|i| self.population[*i].clone())
            .collect_vec();

        let parents = match self.config.parents_from_elite && n_elite > 0 {
            true => ranking[..n_elite].to_vec(),
            false => (0..self.population.len()).collect_vec(),
        };
        let parent_fitness = parents.iter().map(|i| self.fitness[*i]).collect_vec();

        while next.len() < size {
            let selection = &self.strategy.selection;
            let (Some(i), Some(j)) = (
                selection.pick(&parent_fitness, &mut self.rng),
                selection.pick(&parent_fitness, &mut self.rng),
            ) else {
                break;
            };
            let (p1, p2) = (&self.population[parents[i]], &self.population[parents[j]]);

            let (c1, c2) = match self.rng.random_bool(self.config.crossover_rate as f64) {
                true => self
                    .strategy
                    .crossover
                    .crossover(p1, p2, catalog, &mut self.rng),
                false => (p1.clone(), p2.clone()),
            };

            for mut child in [c1, c2] {
                self.strategy
                    .mutation
                    .mutate(&mut child, board, catalog, &mut self.rng);
                if self.config.repair_rate > 0.0
                    && self.rng.random_bool(self.config.repair_rate as f64)
                {
                    child = self.builder.repair(board, catalog, &child, &mut self.rng);
                }
                next.push(child);
            }
        }
        next.truncate(size);
        debug_assert!(next.iter().all(|g| assertions::genes_sorted_by_position(g)));

        let fitness = evaluate(&self.instance, &next);
        self.n_evaluations += next.len();
        self.population = next;
        self.fitness = fitness;
        self.generation += 1;

        let generation_best = fittest(&self.fitness);
        let generation_best_fitness = generation_best
            .map(|i| self.fitness[i])
            .unwrap_or(eval::FITNESS_INFEASIBLE);

        if let Some(i) = generation_best.filter(|i| self.fitness[*i] > self.best.1) {
            self.best = (self.population[i].clone(), self.fitness[i]);
            debug!(
                "[GA] gen {}: improved best fitness to {:.3}",
                self.generation, self.best.1
            );
        }
        self.history.push(generation_best_fitness);

        let feasible = self.fitness.iter().filter(|f| f.is_finite()).collect_vec();
        debug!(
            "[GA] gen {}: best {:.3}, mean {:.3}, {}/{} infeasible",
            self.generation,
            generation_best_fitness,
            feasible.iter().copied().sum::<f32>() / feasible.len().max(1) as f32,
            self.fitness.len() - feasible.len(),
            self.fitness.len()
        );
    }

    /// Indices of the current generation, sorted by decreasing fitness
    fn ranking(&self) -> Vec<usize> {
        (0..self.population.len())
            .sorted_by_key(|i| Reverse(OrderedFloat(self.fitness[*i])))
            .collect_vec()
    }

    pub fn population(&self) -> &[Vec<Gene>] {
        &self.population
    }

    pub fn fitness(&self) -> &[f32] {
        &self.fitness
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Best individual seen so far, with its fitness
    pub fn best(&self) -> (&[Gene], f32) {
        (&self.best.0, self.best.1)
    }

    pub fn history(&self) -> &[f32] {
        &self.history
    }
}

/// Evaluates every individual in parallel. Fitness of an individual only depends on the individual itself.
fn evaluate(instance: &Instance, population: &[Vec<Gene>]) -> Vec<f32> {
    let Instance { board, catalog, .. } = instance;
    population
        .par_iter()
        .map(|genes| eval::fitness_of_genes(board, catalog, genes))
        .collect()
}

/// Index of the fittest individual, the first one in case of ties
fn fittest(fitness: &[f32]) -> Option<usize> {
    fitness
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|(_, f)| OrderedFloat(**f))
        .map(|(i, _)| i)
}
