mod commands;
mod render;

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use basel_drill::{
    start_drill_with_threshold, telemetry, AppConfig, ClassificationCategory, ContentStore,
    DrillMode, Topic,
};

use crate::commands::Command;

#[derive(Parser)]
#[command(name = "basel-drill", about = "Basel III liquidity and capital study drills", version)]
struct Cli {
    /// Learning mode: quiz, classification, calculation, interpretation, flashcards
    #[arg(long)]
    mode: Option<DrillMode>,

    /// Topic: lcr, nsfr, almm, capital, leverage, repos, bonds
    #[arg(long)]
    topic: Option<Topic>,

    /// Classification category: hqla, asf, rsf, outflows
    #[arg(long)]
    category: Option<ClassificationCategory>,

    /// Seed for reproducible flashcard order
    #[arg(long)]
    seed: Option<u64>,

    /// Percentage needed for a "Mastered" result
    #[arg(long)]
    pass_threshold: Option<u32>,

    /// Config file (default: $BASEL_DRILL_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extra content merged over the built-in bank
    #[arg(long)]
    content_pack: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "plain")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

impl Cli {
    /// Flags win over the config file.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(topic) = self.topic {
            config.topic = topic;
        }
        if let Some(category) = self.category {
            config.category = category;
        }
        if self.seed.is_some() {
            config.rng_seed = self.seed;
        }
        if let Some(threshold) = self.pass_threshold {
            config.pass_threshold = threshold;
        }
        if self.content_pack.is_some() {
            config.content_pack = self.content_pack.clone();
        }
    }
}

fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AppConfig::load_from_env(),
    };
    cli.apply(&mut config);

    let store = ContentStore::with_pack(config.content_pack.as_deref())
        .context("loading study content")?;
    let mut request = config.request();
    let mut drill = start_drill_with_threshold(&store, request, config.pass_threshold)?;

    let mut out = io::stdout().lock();
    render::frame(&mut out, &drill, cli.format, None)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let Some(command) = commands::parse(&line) else {
            render::prompt(&mut out, cli.format)?;
            continue;
        };
        let notice = match command {
            Command::Quit => break,
            Command::Help => Some(render::HELP.to_string()),
            Command::Switch(switch) => {
                let started = switch.apply(request).and_then(|next| {
                    start_drill_with_threshold(&store, next, config.pass_threshold).map(|d| (next, d))
                });
                match started {
                    Ok((next, fresh)) => {
                        request = next;
                        drill = fresh;
                        None
                    }
                    Err(e) => Some(e.to_string()),
                }
            }
            other => commands::apply(&mut drill, other).err().map(|r| r.to_string()),
        };
        render::frame(&mut out, &drill, cli.format, notice.as_deref())?;
    }

    info!(mode = drill.mode().key(), tally = %drill.tally(), "session ended");
    Ok(())
}
