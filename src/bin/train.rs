use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use kuba_rl::ai::QLearningStrategy;
use kuba_rl::config::AppConfig;
use kuba_rl::model::ModelStore;
use kuba_rl::training::Trainer;

/// Train the Kuba Q-learning strategy through self-play.
#[derive(Debug, Parser)]
#[command(name = "train", about = "Train the Kuba Q-learning strategy")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the number of training episodes.
    #[arg(long)]
    episodes: Option<u32>,

    /// Override the model file path.
    #[arg(long)]
    model: Option<PathBuf>,

    /// Discard any saved model and start from an empty table.
    #[arg(long)]
    fresh: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(episodes) = cli.episodes {
        config.training.num_episodes = episodes;
    }
    if let Some(model) = cli.model {
        config.training.model_path = model;
    }
    config.validate().context("validating config overrides")?;

    let store = ModelStore::new(config.training.model_path.clone());
    let learner = if cli.fresh {
        QLearningStrategy::new(config.qlearning.clone())
    } else {
        let table = store
            .load_or_default()
            .with_context(|| format!("loading model from {}", store.path().display()))?;
        if !table.is_empty() {
            println!(
                "resuming from {} ({} entries)",
                store.path().display(),
                table.len()
            );
        }
        QLearningStrategy::with_table(table, config.qlearning.clone())
    };

    println!(
        "training {} episodes, model at {}",
        config.training.num_episodes,
        config.training.model_path.display()
    );

    let mut trainer = Trainer::new(config.training, learner);
    trainer.run().context("training run failed")?;

    println!("done: {} table entries", trainer.table().len());
    Ok(())
}
