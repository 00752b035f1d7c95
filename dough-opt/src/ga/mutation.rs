use anyhow::{Result, ensure};
use dough_rs::entities::{Board, Catalog, Gene};
use rand::Rng;
use rand::rngs::SmallRng;

/// Modifies an offspring in place. Rejected modifications leave the genes untouched.
/// The genes are left sorted by position.
pub trait Mutation: Send + Sync {
    fn mutate(&self, genes: &mut [Gene], board: &Board, catalog: &Catalog, rng: &mut SmallRng);

    /// Checks the parameters of the operator before any offspring is mutated
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

fn validate_rate(rate: f32) -> Result<()> {
    ensure!(
        (0.0..=1.0).contains(&rate),
        "mutation rate must be in [0, 1], got {rate}"
    );
    Ok(())
}

/// With probability `rate`, picks a single gene and either changes its item type or shifts it
/// by one unit to the left or right, provided it stays on the board without overlapping the others.
#[derive(Clone, Copy, Debug)]
pub struct Perturb {
    pub rate: f32,
}

impl Perturb {
    /// Applies `candidate` at `idx` if it lies within the board and overlaps none of the other genes
    fn try_replace(
        genes: &mut [Gene],
        idx: usize,
        candidate: Gene,
        board: &Board,
        catalog: &Catalog,
    ) -> bool {
        let fits_board = candidate.end(catalog) <= board.length;
        let collides = genes
            .iter()
            .enumerate()
            .any(|(i, g)| i != idx && g.overlaps(&candidate, catalog));
        if fits_board && !collides {
            genes[idx] = candidate;
            true
        } else {
            false
        }
    }
}

impl Mutation for Perturb {
    fn mutate(&self, genes: &mut [Gene], board: &Board, catalog: &Catalog, rng: &mut SmallRng) {
        if genes.is_empty() || !rng.random_bool(self.rate as f64) {
            return;
        }
        let idx = rng.random_range(0..genes.len());
        let gene = genes[idx];

        let candidate = match rng.random_bool(0.5) {
            true if catalog.len() > 1 => {
                // any other item type, clamped to end on the board
                let mut item_id = rng.random_range(0..catalog.len() - 1);
                if item_id >= gene.item_id {
                    item_id += 1;
                }
                let length = catalog.item(item_id).length;
                board
                    .length
                    .checked_sub(length)
                    .map(|max_pos| Gene::new(gene.position.min(max_pos), item_id))
            }
            true => None,
            false => {
                let length = catalog.item(gene.item_id).length;
                board.length.checked_sub(length).map(|max_pos| {
                    let position = match rng.random_bool(0.5) {
                        true => gene.position + 1,
                        false => gene.position.saturating_sub(1),
                    };
                    Gene::new(position.min(max_pos), gene.item_id)
                })
            }
        };

        if candidate.is_some_and(|c| Self::try_replace(genes, idx, c, board, catalog)) {
            genes.sort_by_key(|g| g.position);
        }
    }

    fn validate(&self) -> Result<()> {
        validate_rate(self.rate)
    }
}

/// For every gene independently with probability `rate`, swaps its position with that of another
/// randomly chosen gene. The result may overlap, in which case its fitness is infeasible.
#[derive(Clone, Copy, Debug)]
pub struct Swap {
    pub rate: f32,
}

impl Mutation for Swap {
    fn mutate(&self, genes: &mut [Gene], _board: &Board, _catalog: &Catalog, rng: &mut SmallRng) {
        if genes.len() < 2 {
            return;
        }
        let mut swapped = false;
        for i in 0..genes.len() {
            if rng.random_bool(self.rate as f64) {
                let j = rng.random_range(0..genes.len());
                let (pos_i, pos_j) = (genes[i].position, genes[j].position);
                genes[i].position = pos_j;
                genes[j].position = pos_i;
                swapped |= i != j;
            }
        }
        if swapped {
            genes.sort_by_key(|g| g.position);
        }
    }

    fn validate(&self) -> Result<()> {
        validate_rate(self.rate)
    }
}

/// Leaves every offspring unchanged
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMutation;

impl Mutation for NoMutation {
    fn mutate(
        &self,
        _genes: &mut [Gene],
        _board: &Board,
        _catalog: &Catalog,
        _rng: &mut SmallRng,
    ) {
    }
}
