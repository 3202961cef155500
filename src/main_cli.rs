use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use crate::{
    config::{PlacerConfig, SliderConfig},
    placer::RandomPlacer,
    slider::TdSlider,
    statistics::Statistics,
    trainer::{Mode, Trainer},
    value_function::ValueFunction,
};

pub mod agent;
pub mod config;
pub mod data_model;
pub mod episode;
pub mod features;
pub mod game_logic;
pub mod learner;
pub mod placer;
pub mod render_board;
pub mod slider;
pub mod statistics;
pub mod trainer;
pub mod trajectory;
pub mod value_function;
pub mod weights;

#[derive(clap_derive::Parser, Debug)]
#[command(name = "threes-td-cli", about = "TD(0) n-tuple player for Threes!")]
struct Args {
    /// Number of games to play.
    #[clap(long, default_value_t = 1200)]
    total: usize,

    /// Games per summary block (0 = one summary at the end).
    #[clap(long, default_value_t = 0)]
    block: usize,

    /// Games kept in memory for statistics (0 = all).
    #[clap(long, default_value_t = 0)]
    limit: usize,

    /// Slider arguments, e.g. "name=td alpha=0.05".
    #[clap(long, alias = "play", default_value = "")]
    slide: SliderConfig,

    /// Placer arguments, e.g. "seed=42".
    #[clap(long, alias = "env", default_value = "")]
    place: PlacerConfig,

    /// Statistics checkpoint to continue from.
    #[clap(long)]
    load: Option<PathBuf>,

    /// Statistics checkpoint to write at the end.
    #[clap(long)]
    save: Option<PathBuf>,

    /// Train the weight tables instead of playing with frozen ones.
    #[clap(long)]
    learn: bool,

    /// With --learn, start from the stored weights instead of zeros.
    #[clap(long, requires = "learn")]
    resume: bool,

    /// Weight table file.
    #[clap(long, default_value = "td0.txt")]
    weights: PathBuf,

    /// Log filter used when RUST_LOG is not set.
    #[clap(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);
    info!(?args, "Threes! TD(0)");

    let mut statistics = match &args.load {
        Some(path) => {
            let mut statistics = Statistics::load(path)
                .with_context(|| format!("loading statistics from {}", path.display()))?;
            statistics.resume(args.total, args.block, args.limit);
            if statistics.is_finished() {
                warn!(games = statistics.step(), "Loaded run is already finished");
                statistics.report();
            }
            statistics
        }
        None => Statistics::new(args.total, args.block, args.limit),
    };

    let mode = if args.learn { Mode::Train } else { Mode::Evaluate };
    let value_function = if mode == Mode::Evaluate || args.resume {
        weights::load(&args.weights)
            .with_context(|| format!("loading weights from {}", args.weights.display()))?
    } else {
        ValueFunction::new()
    };

    let mut trainer = Trainer::new(
        value_function,
        TdSlider::new(args.slide.clone()),
        RandomPlacer::new(args.place.clone()),
        mode,
    );
    info!(mode = ?trainer.mode(), games = args.total, "Starting run");
    trainer.run(&mut statistics)?;

    if trainer.mode() == Mode::Train {
        weights::save(&args.weights, &trainer.value_function)
            .with_context(|| format!("saving weights to {}", args.weights.display()))?;
    }
    if let Some(path) = &args.save {
        statistics
            .save(path)
            .with_context(|| format!("saving statistics to {}", path.display()))?;
    }
    info!(games = statistics.step(), "Run complete");
    Ok(())
}
