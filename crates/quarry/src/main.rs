mod config;
mod runner;
mod script;

use clap::Parser;
use std::path::PathBuf;

use crate::config::GameConfig;
use crate::runner::RunOptions;
use crate::script::Script;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Total ticks to run across all sessions
    #[arg(long)]
    ticks: Option<u64>,

    /// Seed of the first session
    #[arg(long)]
    seed: Option<u64>,

    /// RON input script; the built-in demo script runs without one
    #[arg(long)]
    script: Option<PathBuf>,

    /// Pace ticks at the configured tick period instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Fresh sessions to start after the player dies
    #[arg(long)]
    max_restarts: Option<u32>,

    /// Config file to use instead of ./quarry.ron
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = GameConfig::load(args.config.as_deref())?;

    let script = match &args.script {
        Some(path) => Script::load(path)?,
        None => {
            log::info!("No script given, running the demo script");
            Script::demo()
        }
    };

    let session = config.session_config(args.seed.unwrap_or(config.runner.seed));
    let options = RunOptions {
        ticks: args.ticks.unwrap_or(config.runner.ticks),
        realtime: args.realtime,
        max_restarts: args.max_restarts.unwrap_or(config.runner.max_restarts),
    };

    log::info!(
        "Starting Quarry: {} ticks, seed {}, {} script steps",
        options.ticks,
        session.seed,
        script.steps.len()
    );
    runner::run(&session, &script, &options)?;
    Ok(())
}
