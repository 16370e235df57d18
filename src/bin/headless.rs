//! Headless runner - evolves generations without a window.
//!
//! Usage: `headless [params.json] [generations] [seed]`

use std::process::ExitCode;

use flappy_evo::simulation::error::SimError;
use flappy_evo::simulation::evolution::{Engine, TickOutcome};
use flappy_evo::simulation::params::Params;

const DEFAULT_GENERATIONS: u32 = 20;
/// Per-generation tick budget, so a perfect population cannot run forever.
const MAX_TICKS_PER_GENERATION: u64 = 100_000;

fn run(args: &[String]) -> Result<(), SimError> {
    let params = match args.get(1).map(String::as_str) {
        Some(path) if path != "-" => Params::from_json_file(path)?,
        _ => Params::default(),
    };
    let generations: u32 = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_GENERATIONS);

    let mut engine = match args.get(3).and_then(|s| s.parse::<u64>().ok()) {
        Some(seed) => Engine::new(params, seed)?,
        None => Engine::from_entropy(params)?,
    };

    while engine.generation() <= generations {
        if let TickOutcome::NewGeneration { generation } = engine.tick()? {
            if generation > generations {
                break;
            }
        }
        if engine.score() >= MAX_TICKS_PER_GENERATION {
            log::warn!(
                "generation {} hit the tick budget, ending it",
                engine.generation()
            );
            engine.nudge_all();
        }
    }

    let stats = engine.stats();
    println!(
        "generations: {}, best ever: {}",
        generations,
        stats
            .best_ever
            .map_or_else(|| "n/a".to_owned(), |f| format!("{f:.1}"))
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: {} [params.json|-] [generations] [seed]", args[0]);
        eprintln!();
        eprintln!("Evolve agents without a window and report the best fitness.");
        eprintln!("  params.json  Parameter file, '-' for defaults");
        eprintln!("  generations  Generations to harvest (default: {DEFAULT_GENERATIONS})");
        eprintln!("  seed         Random seed (default: from the OS)");
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
