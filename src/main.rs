use std::{fs::File, path::PathBuf, sync::Mutex};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gridsnake::config::{GameConfig, INITIAL_SPEED_MS, MIN_SPEED_MS};

mod app;

#[derive(Parser)]
#[command(name = "gridsnake")]
#[command(about = "Snake on a 20x20 grid", long_about = None)]
struct Cli {
    /// Seed for food placement, for a repeatable game
    #[arg(long)]
    seed: Option<u64>,

    /// Starting step interval in milliseconds
    #[arg(long, default_value_t = INITIAL_SPEED_MS)]
    speed: f64,

    /// Fastest step interval the speed ramp may reach, in milliseconds
    #[arg(long, default_value_t = MIN_SPEED_MS)]
    min_speed: f64,

    /// Write logs here (the terminal itself is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "gridsnake=info".into()),
            )
            .init();
    }

    let config = GameConfig {
        initial_speed_ms: cli.speed,
        min_speed_ms: cli.min_speed,
        seed: cli.seed,
        ..GameConfig::default()
    };

    let mut app = app::App::new(config).context("setting up the game")?;
    app.run().context("running the game")?;
    Ok(())
}
