use rand::Rng;
use rand::rngs::SmallRng;
use rand::seq::index;

/// Picks a single individual from a generation, given a snapshot of its fitness values.
pub trait Selection: Send + Sync {
    /// Index of the picked individual, `None` only for an empty generation
    fn pick(&self, fitness: &[f32], rng: &mut SmallRng) -> Option<usize>;
}

/// Fitness proportionate selection.
///
/// Only strictly positive, finite fitness values take up room on the wheel.
/// When none do, the pick is uniformly random.
#[derive(Clone, Copy, Debug, Default)]
pub struct RouletteWheel;

impl RouletteWheel {
    fn weight(fitness: f32) -> f32 {
        match fitness.is_finite() && fitness > 0.0 {
            true => fitness,
            false => 0.0,
        }
    }
}

impl Selection for RouletteWheel {
    fn pick(&self, fitness: &[f32], rng: &mut SmallRng) -> Option<usize> {
        if fitness.is_empty() {
            return None;
        }
        let total_fitness: f32 = fitness.iter().map(|f| Self::weight(*f)).sum();
        if !(total_fitness.is_finite() && total_fitness > 0.0) {
            return Some(rng.random_range(0..fitness.len()));
        }

        let pick = rng.random_range(0.0..total_fitness);
        let mut current = 0.0;
        for (i, f) in fitness.iter().enumerate() {
            current += Self::weight(*f);
            if current > pick {
                return Some(i);
            }
        }
        // rounding left the running sum just short of `pick`
        fitness.iter().rposition(|f| Self::weight(*f) > 0.0)
    }
}

/// Picks the fittest of `size` distinct, uniformly drawn individuals.
#[derive(Clone, Copy, Debug)]
pub struct Tournament {
    pub size: usize,
}

impl Selection for Tournament {
    fn pick(&self, fitness: &[f32], rng: &mut SmallRng) -> Option<usize> {
        if fitness.is_empty() {
            return None;
        }
        let size = self.size.clamp(1, fitness.len());
        index::sample(rng, fitness.len(), size)
            .into_iter()
            .reduce(|best, i| match fitness[i] > fitness[best] {
                true => i,
                false => best,
            })
    }
}
