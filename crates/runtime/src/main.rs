#![deny(clippy::all, clippy::pedantic)]
//! # HER runtime
//!
//! Drives a [`her::HerWrapper`] over a vectorized bit-flipping environment
//! with random actions and logs how often the relabelled goals are reached.
//!
//! Wrapper settings come from an optional JSON file (see [`her::HerConfig`])
//! and can be overridden on the command line:
//!
//! ```text
//! her_runtime --config her.json --bits 6 --envs 4 --episodes 20 --strategy random
//! ```

mod run;

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use her::HerConfig;

#[derive(Parser, Debug)]
#[command(name = "her_runtime", about = "Run random bit-flip episodes through the HER wrapper")]
struct Args {
    /// JSON file with `goal_sampling`, `reset_goal` and `seed`
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 8)]
    bits: usize,
    /// Number of sub-environments
    #[arg(long, default_value_t = 4)]
    envs: usize,
    #[arg(long, default_value_t = 10)]
    episodes: usize,
    /// Steps per episode, defaults to the number of bits
    #[arg(long)]
    max_steps: Option<usize>,
    /// Goal sampling strategy, overrides the config file
    #[arg(long)]
    strategy: Option<String>,
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            HerConfig::from_json(&json)?
        }
        None => HerConfig::default(),
    };
    if let Some(strategy) = args.strategy {
        config.goal_sampling = strategy;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    ensure!(args.bits > 0, "--bits must be positive");
    ensure!(args.envs > 0, "--envs must be positive");
    let settings = run::Settings {
        bits: args.bits,
        envs: args.envs,
        episodes: args.episodes,
        max_steps: args.max_steps.unwrap_or(args.bits),
        env_seed: config.seed.unwrap_or(0),
    };

    tracing::info!(
        "Running {} episodes on {} x {}-bit environments with `{}` goal sampling...",
        settings.episodes,
        settings.envs,
        settings.bits,
        config.goal_sampling
    );
    let summary = run::run(&settings, &config)?;
    tracing::info!(
        "Finished {} episodes ({} steps), goals reached in {} of {} sub-episodes.",
        summary.episodes,
        summary.steps,
        summary.successes,
        summary.episodes * settings.envs
    );
    Ok(())
}
