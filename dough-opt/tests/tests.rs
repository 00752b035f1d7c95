#[cfg(test)]
mod tests {
    use std::path::Path;

    use dough_opt::best_first::{BFConfig, BFSearch};
    use dough_opt::config::OptConfig;
    use dough_opt::ga::{
        Crossover, CutPoint, GAConfig, GAOptimizer, Interleaved, Perturb, RouletteWheel,
        Selection, Strategy, Swap, Tournament,
    };
    use dough_opt::greedy::{DEFAULT_POOL, GreedyBuilder};
    use dough_opt::io;
    use dough_opt::io::cli::Engine;
    use dough_opt::io::output::OptOutput;
    use dough_rs::entities::{
        Board, Catalog, DefectThresholds, Gene, Instance, Item, Solution,
    };
    use dough_rs::eval;
    use dough_rs::io::{export, import};
    use dough_rs::util::assertions;
    use rand::SeedableRng;
    use rand::prelude::SmallRng;
    use std::time::Duration;
    use test_case::test_case;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn load(instance_path: &str) -> Instance {
        let ext_instance = io::read_instance(Path::new(instance_path)).unwrap();
        import::import(&ext_instance).unwrap()
    }

    fn small_ga(config: GAConfig) -> GAConfig {
        GAConfig {
            population_size: 30,
            generations: 25,
            ..config
        }
    }

    /// No overlap, everything on the board and validity flags matching the defect counts
    fn assert_solution_sound(instance: &Instance, solution: &Solution) {
        let Instance { board, catalog, .. } = instance;
        assert!(eval::validate(board, catalog, &solution.genes()).is_clean());
        assert!(assertions::validity_flags_correct(board, catalog, solution));
        for p in solution.placements.iter().filter(|p| p.is_valid) {
            let item = catalog.item(p.item_id);
            let counts = eval::count_defects(board, p.position, item.length);
            for (class, count) in counts.iter() {
                assert!(item.max_defects.get(class).is_none_or(|max| count <= max));
            }
        }
    }

    #[test_case("../assets/dough_500.json"; "dough_500")]
    #[test_case("../assets/bakery_120.json"; "bakery_120")]
    #[test_case("../assets/clean_60.json"; "clean_60")]
    fn ga_solutions_are_sound(instance_path: &str) {
        init_logger();
        let instance = load(instance_path);
        let config = small_ga(GAConfig::tournament());
        let mut ga =
            GAOptimizer::new(instance.clone(), config, SmallRng::seed_from_u64(0)).unwrap();
        let result = ga.solve();

        assert!(result.best_fitness.is_finite());
        assert_solution_sound(&instance, &result.best);
        assert_eq!(
            eval::fitness(&instance.board, &instance.catalog, &result.best),
            result.best_fitness
        );
    }

    #[test_case("../assets/dough_500.json", Some(100); "dough_500 coarse")]
    #[test_case("../assets/bakery_120.json", None; "bakery_120")]
    #[test_case("../assets/clean_60.json", None; "clean_60")]
    #[test_case("../assets/bakery_120.json", Some(100); "bakery_120 uneven cells")]
    #[test_case("../assets/clean_60.json", Some(50); "clean_60 uneven cells")]
    fn best_first_solutions_are_sound(instance_path: &str, n_positions: Option<usize>) {
        init_logger();
        let instance = load(instance_path);
        let config = BFConfig {
            n_positions,
            ..BFConfig::exact()
        };
        let search = BFSearch::new(instance.clone(), config).unwrap();
        let report = search.search();
        let path = report.path.expect("a unit filler makes the end of the board reachable");

        assert_eq!(
            path.steps.last().map(|g| g.position + search.discretization().item_length(g.item_id)),
            Some(search.discretization().n_positions)
        );
        let solution = path.to_solution(&instance, search.discretization());
        assert_solution_sound(&instance, &solution);
    }

    #[test_case(120, 100; "120 on 100 cells")]
    #[test_case(500, 450; "500 on 450 cells")]
    #[test_case(61, 7; "61 on 7 cells")]
    fn coarse_best_first_placements_never_overlap(length: usize, n_positions: usize) {
        let instance = Instance::new(
            "uneven",
            Board::new(length, []).unwrap(),
            Catalog::default_biscuits(),
        );
        let config = BFConfig {
            n_positions: Some(n_positions),
            ..BFConfig::exact()
        };
        let search = BFSearch::new(instance.clone(), config).unwrap();
        let path = search.search().path.unwrap();
        let solution = path.to_solution(&instance, search.discretization());

        assert!(eval::validate(&instance.board, &instance.catalog, &solution.genes()).is_clean());
        assert!(eval::fitness(&instance.board, &instance.catalog, &solution).is_finite());
    }

    #[test_case(GAConfig::elitism(); "elitism")]
    #[test_case(GAConfig::tournament(); "tournament")]
    #[test_case(GAConfig::uniform_crossover(); "uniform crossover")]
    fn elitism_never_loses_the_best(config: GAConfig) {
        init_logger();
        let instance = load("../assets/dough_500.json");
        let mut ga =
            GAOptimizer::new(instance, small_ga(config), SmallRng::seed_from_u64(1)).unwrap();
        let result = ga.solve();

        assert_eq!(result.history.len(), result.generations + 1);
        assert!(result.history.windows(2).all(|w| w[1] >= w[0]), "{:?}", result.history);
        assert_eq!(result.history.last(), Some(&result.best_fitness));
    }

    #[test]
    fn infeasible_individuals_get_the_sentinel() {
        init_logger();
        let instance = load("../assets/bakery_120.json");
        let Instance { board, catalog, .. } = &instance;
        // swapping positions of genes of different lengths creates overlaps
        let config = GAConfig {
            mutation_rate: 0.3,
            ..small_ga(GAConfig::elitism())
        };
        let mut ga =
            GAOptimizer::new(instance.clone(), config, SmallRng::seed_from_u64(2)).unwrap();
        for _ in 0..5 {
            ga.step();
            for (genes, fitness) in ga.population().iter().zip(ga.fitness()) {
                let feasible = eval::validate(board, catalog, genes).is_clean();
                assert_eq!(feasible, fitness.is_finite());
                assert_eq!(*fitness, eval::fitness_of_genes(board, catalog, genes));
            }
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let instance = load("../assets/bakery_120.json");
        let config = small_ga(GAConfig::classic());
        let run = |seed| {
            GAOptimizer::new(instance.clone(), config.clone(), SmallRng::seed_from_u64(seed))
                .unwrap()
                .solve()
        };
        let (r1, r2) = (run(3), run(3));
        assert_eq!(r1.history, r2.history);
        assert_eq!(r1.best, r2.best);
    }

    #[test]
    fn custom_strategy_with_repair() {
        init_logger();
        let instance = load("../assets/bakery_120.json");
        let strategy = Strategy::new(
            Tournament { size: 3 },
            CutPoint { max_attempts: 20 },
            Perturb { rate: 0.5 },
        );
        let config = GAConfig {
            repair_rate: 0.5,
            elite_fraction: 0.1,
            ..small_ga(GAConfig::classic())
        };
        let mut ga = GAOptimizer::with_strategy(
            instance.clone(),
            config,
            strategy,
            SmallRng::seed_from_u64(8),
        )
        .unwrap();
        let result = ga.solve();

        // cut-point crossover, perturbation and repair all keep individuals feasible
        assert!(ga.fitness().iter().all(|f| f.is_finite()));
        assert_solution_sound(&instance, &result.best);
        assert!(result.history.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test_case(1.5; "above one")]
    #[test_case(-0.5; "below zero")]
    #[test_case(f32::NAN; "nan")]
    fn out_of_range_mutation_rates_are_rejected(rate: f32) {
        let instance = load("../assets/clean_60.json");
        let strategies = [
            Strategy::new(Tournament { size: 3 }, Interleaved, Perturb { rate }),
            Strategy::new(Tournament { size: 3 }, Interleaved, Swap { rate }),
        ];
        for strategy in strategies {
            let config = GAConfig::classic();
            let rng = SmallRng::seed_from_u64(9);
            let ga = GAOptimizer::with_strategy(instance.clone(), config, strategy, rng);
            assert!(ga.is_err());
        }
    }

    #[test_case(&Interleaved; "interleaved")]
    #[test_case(&CutPoint { max_attempts: 500 }; "cut point")]
    fn crossover_children_never_overlap(crossover: &dyn Crossover) {
        let instance = load("../assets/dough_500.json");
        let Instance { board, catalog, .. } = &instance;
        let builder = GreedyBuilder::new(DEFAULT_POOL.to_vec(), catalog).unwrap();
        let mut rng = SmallRng::seed_from_u64(4);

        for _ in 0..50 {
            let p1 = builder.build(board, catalog, &mut rng);
            let p2 = builder.build(board, catalog, &mut rng);
            let (c1, c2) = crossover.crossover(&p1, &p2, catalog, &mut rng);
            assert!(assertions::genes_are_feasible(board, catalog, &c1));
            assert!(assertions::genes_are_feasible(board, catalog, &c2));
        }
    }

    #[test]
    fn roulette_survives_a_zero_fitness_generation() {
        let strategy = Strategy::from_config(&GAConfig::classic());
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..100 {
            let pick = strategy.selection.pick(&[0.0; 7], &mut rng).unwrap();
            assert!(pick < 7);
        }
        assert!(RouletteWheel.pick(&[0.0], &mut rng).is_some());
    }

    #[test_case(1; "length 1")]
    #[test_case(2; "length 2")]
    #[test_case(11; "length 11")]
    #[test_case(97; "length 97")]
    fn greedy_builder_terminates_without_fillers(length: usize) {
        // no unit item, so the builder has to skip units on its own
        let catalog = Catalog::new(vec![
            Item::new(0, "three", 3, 2.0, DefectThresholds::unbounded()).unwrap(),
            Item::new(1, "five", 5, 4.0, DefectThresholds::unbounded()).unwrap(),
        ])
        .unwrap();
        let board = Board::new(length, []).unwrap();
        let genes = GreedyBuilder::uniform(&catalog).build(
            &board,
            &catalog,
            &mut SmallRng::seed_from_u64(6),
        );

        assert!(assertions::genes_are_feasible(&board, &catalog, &genes));
        let covered: usize = genes.iter().map(|g| catalog.item(g.item_id).length).sum();
        assert!(length - covered < 3);
    }

    #[test]
    fn best_first_toy_case() {
        let catalog = Catalog::new(vec![
            Item::new(0, "X", 4, 3.0, DefectThresholds::unbounded()).unwrap(),
            Item::new(1, "Y", 2, 1.0, DefectThresholds::unbounded()).unwrap(),
        ])
        .unwrap();
        let instance = Instance::new("toy", Board::new(10, []).unwrap(), catalog);
        let search = BFSearch::new(instance.clone(), BFConfig::default()).unwrap();
        let path = search.search().path.unwrap();

        let mut cursor = 0;
        for Gene { position, item_id } in &path.steps {
            assert_eq!(*position, cursor);
            cursor += instance.catalog.item(*item_id).length;
            assert!(cursor <= 10);
        }
        assert_eq!(cursor, 10);
        assert!(path.value >= 5.0);
    }

    #[test]
    fn output_contains_instance_solution_and_config() {
        let ext_instance = io::read_instance(Path::new("../assets/clean_60.json")).unwrap();
        let instance = import::import(&ext_instance).unwrap();
        let config = OptConfig::default();
        let mut ga = GAOptimizer::new(
            instance.clone(),
            small_ga(config.ga.clone()),
            SmallRng::seed_from_u64(7),
        )
        .unwrap();
        let solution = ga.solve().best;

        let output = OptOutput {
            instance: ext_instance,
            solution: export::export(&instance, &solution, Duration::from_secs(1)),
            engine: Engine::Ga,
            config,
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["Name"], "clean_60");
        assert_eq!(json["engine"], "Ga");
        assert_eq!(
            json["solution"]["Placements"].as_array().map(|p| p.len()),
            Some(solution.len())
        );
        assert!(json["solution"]["Anomalies"].as_array().unwrap().is_empty());
    }
}
