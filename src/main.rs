use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use u_timetable::TimetableError;
use u_timetable::ga::ConflictEvaluator;
use u_timetable::models::Catalog;
use u_timetable::report::{ScheduleReport, build_grids, render_text};
use u_timetable::scheduler::{GeneticScheduler, SchedulerConfig};
use u_timetable::snapshot::EntitySnapshot;

/// Build a weekly course timetable with a genetic algorithm.
#[derive(Debug, Parser)]
#[command(name = "u-timetable", version, about)]
struct Cli {
    /// Catalog JSON (rooms, instructors, slots, courses, departments, sections).
    catalog: PathBuf,

    /// Scheduler settings in TOML.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the generation cap.
    #[arg(long)]
    max_generations: Option<usize>,

    /// Print the result as JSON instead of text grids.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), TimetableError> {
    let mut config = match &cli.config {
        Some(path) => SchedulerConfig::load(path)?,
        None => SchedulerConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(generations) = cli.max_generations {
        config = config.with_max_generations(generations);
    }

    let snapshot = EntitySnapshot::new(Catalog::from_json_file(&cli.catalog)?)?;
    let evaluator = ConflictEvaluator::new(&snapshot).with_capacity_check(config.count_capacity);
    let outcome = GeneticScheduler::new(&snapshot, config)?.run();

    if cli.json {
        let report = ScheduleReport::new(&evaluator, &outcome);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for grid in build_grids(&snapshot, &outcome.best) {
        println!("{}", render_text(&grid));
    }
    let breakdown = evaluator.breakdown(&outcome.best);
    println!(
        "{:?} after {} generations: fitness {:.4}, {} conflicts \
         (section {}, room {}, instructor {}, capacity {})",
        outcome.state,
        outcome.generations,
        outcome.score.fitness,
        outcome.score.conflicts,
        breakdown.section,
        breakdown.room,
        breakdown.instructor,
        breakdown.capacity,
    );
    Ok(())
}
