//! City Builder - Entry Point
//!
//! Runs the interactive terminal game, or a headless script when `--script`
//! is given.

use city_builder::core::config::GameConfig;
use city_builder::core::error::Result;
use city_builder::simulation::{run_script, GameState};
use clap::Parser;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Default log filter when RUST_LOG is unset
const DEFAULT_FILTER: &str = "city_builder=info";

/// Log file used while the terminal UI owns the screen
const LOG_FILE: &str = "city-builder.log";

/// City Builder - place buildings, balance money, population, happiness and power
#[derive(Parser, Debug)]
#[command(name = "city-builder")]
#[command(about = "Grid city-building game in the terminal")]
struct Args {
    /// TOML config file (defaults are used for anything it omits)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Run a command script headlessly and print the final state as JSON ("-" for stdin)
    #[arg(long, short = 's')]
    script: Option<PathBuf>,

    /// Directory holding house.png, office.png, factory.png and shop.png
    #[arg(long)]
    assets: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    match &args.script {
        Some(script) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(io::stderr)
                .init();
            let config = load_config(&args)?;
            run_headless(&config, script)
        }
        None => {
            let log = File::create(LOG_FILE)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(Mutex::new(log))
                .with_ansi(false)
                .init();
            let config = load_config(&args)?;

            // Sprite decoding runs on this runtime's blocking pool
            let rt = Runtime::new()?;
            city_builder::ui::run(config, rt.handle())
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(assets) = &args.assets {
        config.assets_dir = assets.clone();
    }
    Ok(config)
}

fn run_headless(config: &GameConfig, script: &Path) -> Result<()> {
    let source = if script.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(script)?
    };

    let snapshot = run_script(GameState::new(config), &source)?;
    println!("{}", snapshot.to_json()?);
    Ok(())
}
