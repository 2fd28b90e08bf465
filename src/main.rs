use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};

use letterverse::{Scenario, Server, ServerConfig, scenario};
use letterverse_blocks::BlockRegistry;
use letterverse_words::RewardTable;

#[derive(Parser)]
#[command(name = "letterverse")]
#[command(about = "Headless Letterverse server: bookshelf portals, letter words, floating islands")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Default log filter, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario file and print what happened.
    Run {
        scenario: PathBuf,
        /// Server config (letterverse.toml)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Block list replacing the built-in registry
        #[arg(long)]
        blocks: Option<PathBuf>,
        /// Seed for islands and wand throws
        #[arg(long, default_value = "0")]
        seed: u64,
    },
    /// List every word that pays out, and its reward.
    Words {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<ServerConfig> {
    match path {
        Some(p) => Ok(ServerConfig::load_from_path(p)?),
        None => Ok(ServerConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    match cli.command {
        Commands::Run {
            scenario: scenario_path,
            config,
            blocks,
            seed,
        } => {
            let cfg = load_config(config.as_ref())?;
            let registry = match blocks {
                Some(p) => BlockRegistry::load_from_path(&p)
                    .map_err(|e| anyhow!("failed to load blocks from {}: {e}", p.display()))?,
                None => BlockRegistry::standard(),
            };
            let scn = Scenario::load_from_path(&scenario_path)?;
            let mut server = Server::new(cfg, Arc::new(registry), seed);
            let summary = scenario::run(&mut server, &scn)
                .with_context(|| format!("scenario {}", scenario_path.display()))?;
            print!("{summary}");
        }
        Commands::Words { config } => {
            let cfg = load_config(config.as_ref())?;
            let mut table = RewardTable::standard();
            table.merge(&cfg.words);
            for (word, reward) in table.iter() {
                println!("{word:<10} {} x{}", reward.item, reward.count);
            }
        }
    }
    Ok(())
}
