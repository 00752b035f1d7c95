use dough_rs::entities::{Catalog, Gene};
use itertools::Itertools;
use log::trace;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

/// Recombines two parents into two children.
/// Children of non-overlapping parents never overlap, and are sorted by position.
pub trait Crossover: Send + Sync {
    fn crossover(
        &self,
        parent_1: &[Gene],
        parent_2: &[Gene],
        catalog: &Catalog,
        rng: &mut SmallRng,
    ) -> (Vec<Gene>, Vec<Gene>);
}

/// Builds each child by alternately taking the next gene of either parent,
/// skipping genes which would overlap the ones already in the child.
#[derive(Clone, Copy, Debug, Default)]
pub struct Interleaved;

impl Interleaved {
    fn child(first: &[Gene], second: &[Gene], catalog: &Catalog) -> Vec<Gene> {
        let mut child: Vec<Gene> = Vec::with_capacity(first.len().max(second.len()));
        for gene in first.iter().interleave(second.iter()) {
            if !child.iter().any(|g| g.overlaps(gene, catalog)) {
                child.push(*gene);
            }
        }
        child.sort_by_key(|g| g.position);
        child
    }
}

impl Crossover for Interleaved {
    fn crossover(
        &self,
        parent_1: &[Gene],
        parent_2: &[Gene],
        catalog: &Catalog,
        _rng: &mut SmallRng,
    ) -> (Vec<Gene>, Vec<Gene>) {
        (
            Self::child(parent_1, parent_2, catalog),
            Self::child(parent_2, parent_1, catalog),
        )
    }
}

/// Cuts each parent at a random gap between two consecutive placements and joins the head of
/// one parent to the tail of the other. Tail genes already present in, or overlapping, the head
/// are left out. Falls back to copies of the parents when no cut is possible.
#[derive(Clone, Copy, Debug)]
pub struct CutPoint {
    pub max_attempts: usize,
}

impl CutPoint {
    /// Indices `i` where a positive gap separates gene `i - 1` from gene `i`
    fn cut_points(parent: &[Gene], catalog: &Catalog) -> Vec<usize> {
        (1..parent.len())
            .filter(|i| parent[*i].position > parent[i - 1].end(catalog))
            .collect_vec()
    }

    fn child(head: &[Gene], tail: &[Gene], catalog: &Catalog) -> Vec<Gene> {
        let mut child = head.to_vec();
        child.extend(
            tail.iter()
                .filter(|g| !head.contains(g) && !head.iter().any(|h| h.overlaps(g, catalog))),
        );
        child.sort_by_key(|g| g.position);
        child
    }
}

impl Crossover for CutPoint {
    fn crossover(
        &self,
        parent_1: &[Gene],
        parent_2: &[Gene],
        catalog: &Catalog,
        rng: &mut SmallRng,
    ) -> (Vec<Gene>, Vec<Gene>) {
        let sorted_1 = parent_1.iter().copied().sorted_by_key(|g| g.position).collect_vec();
        let sorted_2 = parent_2.iter().copied().sorted_by_key(|g| g.position).collect_vec();

        let cuts_1 = Self::cut_points(&sorted_1, catalog);
        let cuts_2 = Self::cut_points(&sorted_2, catalog);

        for _ in 0..self.max_attempts {
            let (Some(&cut_1), Some(&cut_2)) = (cuts_1.choose(rng), cuts_2.choose(rng)) else {
                break;
            };
            let child_1 = Self::child(&sorted_1[..cut_1], &sorted_2[cut_2..], catalog);
            let child_2 = Self::child(&sorted_2[..cut_2], &sorted_1[cut_1..], catalog);
            if child_1 != sorted_1 || child_2 != sorted_2 {
                return (child_1, child_2);
            }
        }

        trace!("[GA] no cut point found, parents pass through unchanged");
        (parent_1.to_vec(), parent_2.to_vec())
    }
}
