use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Instant;

use anyhow::Result;
use dough_rs::entities::{Gene, Instance, Solution};
use log::{debug, info, warn};
use ordered_float::OrderedFloat;
use thousands::Separable;

use crate::best_first::config::{BFConfig, HeuristicKind, StepCostKind};
use crate::best_first::discretization::Discretization;

/// Best-first search over sequences of placements, from the start of the board to its end.
///
/// A state consists of the cursor (in cells) and the value accumulated so far.
/// From every state, each item which fits before the end of the board and respects its
/// defect thresholds can be placed at the cursor.
/// The first node reaching the end of the board exactly is returned.
pub struct BFSearch {
    pub instance: Instance,
    pub config: BFConfig,
    discretization: Discretization,
}

/// A state popped from the frontier and expanded
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BFState {
    pub cursor: usize,
    pub value: f32,
}

/// Sequence of placements reaching the end of the board, positions in cells
#[derive(Clone, Debug, PartialEq)]
pub struct BFPath {
    pub steps: Vec<Gene>,
    pub value: f32,
    pub cost: f32,
}

#[derive(Clone, Debug)]
pub struct BFReport {
    /// `None` if the frontier was exhausted, or the expansion limit hit, before reaching the goal
    pub path: Option<BFPath>,
    pub n_expanded: usize,
    /// Expanded states in order of expansion, only recorded on request
    pub expanded: Vec<BFState>,
}

/// Node of the search tree. Nodes are stored in an arena and point to their parent,
/// so the path of a node is only materialized once it reaches the goal.
#[derive(Clone, Copy, Debug)]
struct Node {
    cursor: usize,
    value: f32,
    g: f32,
    /// Last placement on the path to this node, together with the index of the node it was made from
    parent: Option<(usize, Gene)>,
}

/// Cursor and accumulated value in units of [`VALUE_RESOLUTION`].
/// Sums of the same values in a different order end up on the same key.
type StateKey = (usize, i64);

const VALUE_RESOLUTION: f64 = 1e-3;

fn state_key(cursor: usize, value: f32) -> StateKey {
    (cursor, (value as f64 / VALUE_RESOLUTION).round() as i64)
}

impl BFSearch {
    pub fn new(instance: Instance, config: BFConfig) -> Result<Self> {
        config.validate()?;
        let n_positions = config.n_positions.unwrap_or(instance.board.length);
        let discretization = Discretization::new(&instance, n_positions)?;
        Ok(Self {
            instance,
            config,
            discretization,
        })
    }

    pub fn discretization(&self) -> &Discretization {
        &self.discretization
    }

    pub fn search(&self) -> BFReport {
        let start = Instant::now();
        let n = self.discretization.n_positions;

        let mut nodes = vec![Node {
            cursor: 0,
            value: 0.0,
            g: 0.0,
            parent: None,
        }];
        // ordered by (f, g, node index), the index breaks ties in insertion order
        let mut frontier = BinaryHeap::new();
        frontier.push(Reverse((
            OrderedFloat(self.heuristic(0, 0.0)),
            OrderedFloat(0.0),
            0,
        )));
        let mut reached: HashMap<StateKey, f32> = HashMap::new();
        let mut expanded = vec![];
        let mut n_expanded = 0;

        while let Some(Reverse((_, _, idx))) = frontier.pop() {
            let node = nodes[idx];
            if node.cursor == n {
                let path = self.trace_path(&nodes, idx);
                info!(
                    "[BF] goal reached in {:.3}ms after {} expansions: {} placements, value {:.1}",
                    start.elapsed().as_secs_f64() * 1000.0,
                    n_expanded.separate_with_commas(),
                    path.steps.len(),
                    path.value
                );
                return BFReport {
                    path: Some(path),
                    n_expanded,
                    expanded,
                };
            }

            let key = state_key(node.cursor, node.value);
            if reached.get(&key).is_some_and(|g| *g <= node.g) {
                continue;
            }
            if self.config.max_expansions.is_some_and(|max| n_expanded >= max) {
                warn!(
                    "[BF] expansion limit of {} reached, {} nodes left in the frontier",
                    n_expanded.separate_with_commas(),
                    frontier.len().separate_with_commas()
                );
                return BFReport {
                    path: None,
                    n_expanded,
                    expanded,
                };
            }
            reached.insert(key, node.g);
            n_expanded += 1;
            if self.config.record_expanded {
                expanded.push(BFState {
                    cursor: node.cursor,
                    value: node.value,
                });
            }

            for item in self.instance.catalog.items() {
                let length = self.discretization.item_length(item.id);
                if node.cursor + length > n {
                    continue;
                }
                let counts = self.discretization.count_defects(node.cursor, length);
                if !item.max_defects.admits(&counts) {
                    continue;
                }
                let child = Node {
                    cursor: node.cursor + length,
                    value: node.value + item.value,
                    g: node.g + self.step_cost(length, item.value),
                    parent: Some((idx, Gene::new(node.cursor, item.id))),
                };
                let child_key = state_key(child.cursor, child.value);
                if reached.get(&child_key).is_none_or(|g| child.g < *g) {
                    let f = child.g + self.heuristic(child.cursor, child.value);
                    frontier.push(Reverse((OrderedFloat(f), OrderedFloat(child.g), nodes.len())));
                    nodes.push(child);
                }
            }
        }

        warn!(
            "[BF] frontier exhausted after {} expansions without reaching the end of the board",
            n_expanded.separate_with_commas()
        );
        BFReport {
            path: None,
            n_expanded,
            expanded,
        }
    }

    fn heuristic(&self, cursor: usize, value: f32) -> f32 {
        match self.config.heuristic {
            HeuristicKind::ValueDensity if cursor > 0 => value / cursor as f32,
            HeuristicKind::ValueDensity | HeuristicKind::Zero => 0.0,
        }
    }

    fn step_cost(&self, length: usize, value: f32) -> f32 {
        match self.config.step_cost {
            StepCostKind::Unit => 1.0,
            StepCostKind::ValueDeficit => {
                (length as f32 * self.discretization.max_cell_density() - value).max(0.0)
            }
        }
    }

    fn trace_path(&self, nodes: &[Node], goal: usize) -> BFPath {
        let mut steps = vec![];
        let mut current = nodes[goal].parent;
        while let Some((parent, gene)) = current {
            steps.push(gene);
            current = nodes[parent].parent;
        }
        steps.reverse();
        debug!("[BF] path: {steps:?}");
        BFPath {
            steps,
            value: nodes[goal].value,
            cost: nodes[goal].g,
        }
    }
}

impl BFPath {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Converts the cell positions of the path back to board positions.
    /// Only guaranteed to be feasible when every board unit is a cell.
    pub fn to_solution(&self, instance: &Instance, discretization: &Discretization) -> Solution {
        let genes = self
            .steps
            .iter()
            .map(|g| Gene::new(discretization.board_position(g.position), g.item_id))
            .collect::<Vec<_>>();
        Solution::from_genes(&instance.board, &instance.catalog, &genes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dough_rs::entities::{Board, Catalog, Defect, DefectClass, DefectThresholds, Item};
    use dough_rs::util::assertions;
    use test_case::test_case;

    /// X: length 4, value 3, Y: length 2, value 1
    fn toy_instance(defects: Vec<Defect>) -> Instance {
        let catalog = Catalog::new(vec![
            Item::new(0, "X", 4, 3.0, DefectThresholds::unbounded()).unwrap(),
            Item::new(1, "Y", 2, 1.0, DefectThresholds::new(0, 0, 0)).unwrap(),
        ])
        .unwrap();
        Instance::new("toy", Board::new(10, defects).unwrap(), catalog)
    }

    #[test_case(BFConfig::default(); "unit cost, value density")]
    #[test_case(BFConfig::exact(); "value deficit, zero")]
    fn toy_case_reaches_the_end_exactly(config: BFConfig) {
        let instance = toy_instance(vec![]);
        let report = BFSearch::new(instance.clone(), config).unwrap().search();
        let path = report.path.unwrap();

        let end = path.steps.last().map(|g| g.position + instance.catalog.item(g.item_id).length);
        assert_eq!(end, Some(10));
        assert!(path.value >= 5.0);
        assert!(path.steps.windows(2).all(|w| {
            w[1].position == w[0].position + instance.catalog.item(w[0].item_id).length
        }));
    }

    #[test]
    fn exact_configuration_finds_the_most_valuable_path() {
        let search = BFSearch::new(toy_instance(vec![]), BFConfig::exact()).unwrap();
        let path = search.search().path.unwrap();
        // two X and one Y
        assert_eq!(path.value, 7.0);
        assert_eq!(path.cost, 0.5);
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn placements_respect_defect_thresholds() {
        // Y tolerates no defects, so the defect at 1.5 forces an X over [0, 4)
        let instance = toy_instance(vec![Defect::new(1.5, DefectClass::B)]);
        let search = BFSearch::new(instance.clone(), BFConfig::default()).unwrap();
        let path = search.search().path.unwrap();
        assert_eq!(path.steps[0], Gene::new(0, 0));

        let solution = path.to_solution(&instance, search.discretization());
        assert_eq!(solution.n_valid(), solution.len());
        assert!(assertions::genes_are_feasible(
            &instance.board,
            &instance.catalog,
            &solution.genes()
        ));
    }

    #[test]
    fn unreachable_goal_reports_no_path() {
        // only even lengths, odd board
        let catalog = Catalog::new(vec![
            Item::new(0, "even", 2, 1.0, DefectThresholds::unbounded()).unwrap(),
        ])
        .unwrap();
        let instance = Instance::new("odd", Board::new(9, []).unwrap(), catalog);
        let config = BFConfig {
            record_expanded: true,
            ..BFConfig::default()
        };
        let report = BFSearch::new(instance, config).unwrap().search();
        assert_eq!(report.path, None);
        assert_eq!(report.n_expanded, 5);
        assert_eq!(
            report.expanded.iter().map(|s| s.cursor).collect::<Vec<_>>(),
            vec![0, 2, 4, 6, 8]
        );
    }

    #[test]
    fn permuted_fractional_sums_share_a_state() {
        // odd board, so every reachable state gets expanded
        let catalog = Catalog::new(vec![
            Item::new(0, "a", 2, 0.1, DefectThresholds::unbounded()).unwrap(),
            Item::new(1, "b", 2, 0.2, DefectThresholds::unbounded()).unwrap(),
            Item::new(2, "c", 2, 0.7, DefectThresholds::unbounded()).unwrap(),
        ])
        .unwrap();
        let instance = Instance::new("fractions", Board::new(7, []).unwrap(), catalog);
        let report = BFSearch::new(instance, BFConfig::default()).unwrap().search();
        // distinct sums at cursors 0, 2, 4 and 6: 1 + 3 + 6 + 10
        assert_eq!(report.path, None);
        assert_eq!(report.n_expanded, 20);
    }

    #[test]
    fn expansion_limit_stops_the_search() {
        let config = BFConfig {
            max_expansions: Some(1),
            ..BFConfig::default()
        };
        let report = BFSearch::new(toy_instance(vec![]), config).unwrap().search();
        assert_eq!(report.path, None);
        assert_eq!(report.n_expanded, 1);
        assert!(report.expanded.is_empty());
    }

    #[test]
    fn default_catalog_on_a_reference_board() {
        let defects = (0..40).map(|i| Defect::new(i as f32 * 2.5 + 0.3, DefectClass::ALL[i % 3]));
        let instance = Instance::new(
            "ref",
            Board::new(100, defects).unwrap(),
            Catalog::default_biscuits(),
        );
        let search = BFSearch::new(instance.clone(), BFConfig::exact()).unwrap();
        let path = search.search().path.unwrap();

        let solution = path.to_solution(&instance, search.discretization());
        assert!(assertions::genes_are_feasible(
            &instance.board,
            &instance.catalog,
            &solution.genes()
        ));
        assert_eq!(solution.n_valid(), solution.len());
        assert_eq!(solution.valid_value(&instance.catalog), path.value);
    }
}
