use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use dough_opt::best_first::BFSearch;
use dough_opt::config::OptConfig;
use dough_opt::ga::GAOptimizer;
use dough_opt::io::cli::{Cli, Engine};
use dough_opt::io::output::OptOutput;
use dough_opt::{EPOCH, io};
use dough_rs::entities::{Instance, Solution};
use dough_rs::io::{export, import};
use dough_rs::io::svg::solution_to_svg;
use log::{info, warn};
use rand::SeedableRng;
use rand::prelude::SmallRng;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config: OptConfig = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            OptConfig::default()
        }
        Some(config_file) => {
            let file = File::open(config_file)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };

    info!("Successfully parsed OptConfig: {config:?}");

    let input_file_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no valid name")?;

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {:?}",
                args.solution_folder
            )
        })?;
    }

    let ext_instance = io::read_instance(args.input_file.as_path())?;
    let instance = import::import(&ext_instance)?;
    info!(
        "[MAIN] imported instance {}: board of length {} with {} defects, {} item types",
        instance.name,
        instance.board.length,
        instance.board.defects().len(),
        instance.catalog.len()
    );

    let solution = match args.engine {
        Engine::Ga => {
            let rng = match config.prng_seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_os_rng(),
            };
            GAOptimizer::new(instance.clone(), config.ga.clone(), rng)?
                .solve()
                .best
        }
        Engine::BestFirst => solve_best_first(&instance, &config)?,
    };

    {
        let output = OptOutput {
            instance: ext_instance,
            solution: export::export(&instance, &solution, EPOCH.elapsed()),
            engine: args.engine,
            config: config.clone(),
        };

        let solution_path = args.solution_folder.join(format!("sol_{input_file_stem}.json"));

        io::write_json(&output, Path::new(&solution_path))?;
    }

    {
        let svg_path = args.solution_folder.join(format!("sol_{input_file_stem}.svg"));
        let title = format!("{} ({:?})", instance.name, args.engine);
        let svg = solution_to_svg(&instance, &solution, config.svg_draw_options, &title);

        io::write_svg(&svg, Path::new(&svg_path))?;
    }

    Ok(())
}

fn solve_best_first(instance: &Instance, config: &OptConfig) -> Result<Solution> {
    let search = BFSearch::new(instance.clone(), config.bf)?;
    let report = search.search();
    match report.path {
        Some(path) => Ok(path.to_solution(instance, search.discretization())),
        None => {
            warn!("[MAIN] best-first search found no path, writing an empty solution");
            Ok(Solution::default())
        }
    }
}
