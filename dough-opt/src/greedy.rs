use anyhow::{Result, ensure};
use dough_rs::entities::{Board, Catalog, Gene};
use dough_rs::eval;
use dough_rs::util::assertions;
use rand::Rng;
use rand::seq::SliceRandom;

/// Biased pool of the reference bakery: favours `biscuit_3`, then `biscuit_0` and `biscuit_1`.
pub const DEFAULT_POOL: [usize; 9] = [3, 3, 3, 3, 0, 0, 1, 1, 2];

/// Builds solutions by scanning the board from left to right, placing at each cursor position the
/// first item of a freshly shuffled pool which fits and respects its defect thresholds.
/// Items repeated in the pool are proportionally more likely to be tried first.
#[derive(Clone, Debug)]
pub struct GreedyBuilder {
    pool: Vec<usize>,
}

impl GreedyBuilder {
    pub fn new(pool: Vec<usize>, catalog: &Catalog) -> Result<Self> {
        ensure!(!pool.is_empty(), "greedy pool must not be empty");
        ensure!(
            pool.iter().all(|id| *id < catalog.len()),
            "greedy pool {pool:?} refers to items outside the catalog (size {})",
            catalog.len()
        );
        Ok(Self { pool })
    }

    /// A pool containing every item of the catalog once
    pub fn uniform(catalog: &Catalog) -> Self {
        Self {
            pool: (0..catalog.len()).collect(),
        }
    }

    /// Builds a non-overlapping, position-sorted gene sequence covering `[0, board.length)`
    /// with placements and implicit unit gaps.
    pub fn build(&self, board: &Board, catalog: &Catalog, rng: &mut impl Rng) -> Vec<Gene> {
        let mut genes = vec![];
        let mut pool = self.pool.clone();
        self.fill(board, catalog, 0, board.length, &mut pool, &mut genes, rng);

        debug_assert!(assertions::genes_are_feasible(board, catalog, &genes));
        genes
    }

    /// Fills every uncovered gap of a feasible gene sequence using the same greedy rule.
    /// Existing genes are never moved or removed, infeasible sequences are returned unchanged.
    pub fn repair(
        &self,
        board: &Board,
        catalog: &Catalog,
        genes: &[Gene],
        rng: &mut impl Rng,
    ) -> Vec<Gene> {
        if !eval::validate(board, catalog, genes).is_clean() {
            return genes.to_vec();
        }
        let mut sorted = genes.to_vec();
        sorted.sort_by_key(|g| g.position);

        let mut pool = self.pool.clone();
        let mut repaired = Vec::with_capacity(sorted.len());
        let mut cursor = 0;
        for gene in sorted {
            self.fill(board, catalog, cursor, gene.position, &mut pool, &mut repaired, rng);
            cursor = gene.end(catalog);
            repaired.push(gene);
        }
        self.fill(board, catalog, cursor, board.length, &mut pool, &mut repaired, rng);

        debug_assert!(assertions::genes_are_feasible(board, catalog, &repaired));
        repaired
    }

    /// Greedily places items in `[from, to)`, appending them to `genes`.
    /// Every step advances the cursor by at least one unit.
    #[allow(clippy::too_many_arguments)]
    fn fill(
        &self,
        board: &Board,
        catalog: &Catalog,
        from: usize,
        to: usize,
        pool: &mut [usize],
        genes: &mut Vec<Gene>,
        rng: &mut impl Rng,
    ) {
        let mut cursor = from;
        while cursor < to {
            pool.shuffle(rng);
            let fitting = pool.iter().copied().find(|id| {
                let item = catalog.item(*id);
                cursor + item.length <= to
                    && eval::is_valid_placement(
                        item,
                        &eval::count_defects(board, cursor, item.length),
                    )
            });
            match fitting {
                Some(id) => {
                    genes.push(Gene::new(cursor, id));
                    cursor += catalog.item(id).length;
                }
                None => cursor += 1,
            }
        }
    }
}
