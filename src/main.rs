mod types;
mod indicators;
mod strategies;
mod engine;
mod risk;
mod config;
mod feed;
mod web;
mod database;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::AppConfig;
use database::{SessionDatabase, SessionStore};
use engine::{PredictionService, StrategyRouter};
use feed::{GameFeed, HttpGameFeed};
use indicators::{digest_text, select_digit, HashPredictor};
use risk::BettingLadder;
use types::{outcomes, GameType, Platform};
use web::{start_server, trend_strip, AppState, TREND_STRIP_LEN};

#[derive(Parser)]
#[command(name = "wingo-predictor")]
#[command(version = "0.1.0")]
#[command(about = "Big/Small prediction service for Wingo draw feeds", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP prediction server
    Serve {
        /// Listen port (overrides the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Fetch live data and print the V5 prediction
    Predict {
        /// Platform: primary or alternate
        #[arg(short, long, default_value = "primary")]
        platform: String,
        /// Game duration: 30s or 1m
        #[arg(short, long, default_value = "30s")]
        time: String,
    },
    /// Hash a period offline and print the digit and outcome
    Hash {
        #[arg(long)]
        period: String,
        #[arg(short, long, default_value = "primary")]
        platform: String,
    },
    /// Show the stake ladder
    Ladder,
    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app_config = crate::config::load(&cli.config)?;

    match cli.command {
        Commands::Serve { port } => {
            let port = port.unwrap_or(app_config.server.port);
            run_server(app_config, port).await?;
        }
        Commands::Predict { platform, time } => {
            predict_once(app_config, Platform::from_str(&platform), GameType::from_str(&time)).await?;
        }
        Commands::Hash { period, platform } => {
            show_hash(&app_config, &period, Platform::from_str(&platform));
        }
        Commands::Ladder => {
            show_ladder(&app_config);
        }
        Commands::Config => {
            println!("{}", toml::to_string_pretty(&app_config)?);
        }
    }

    Ok(())
}

async fn run_server(app_config: AppConfig, port: u16) -> Result<()> {
    info!("Wingo Predictor v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn SessionStore> = Arc::new(SessionDatabase::new(&app_config.database.url).await?);
    let feed: Arc<dyn GameFeed> = Arc::new(HttpGameFeed::new(app_config.feed.clone())?);

    let service = PredictionService::new(
        store,
        feed,
        StrategyRouter::from_config(&app_config),
        BettingLadder::from_settings(&app_config.ladder),
    );

    start_server(AppState::new(Arc::new(service)), port).await
}

async fn predict_once(app_config: AppConfig, platform: Platform, game: GameType) -> Result<()> {
    let feed = HttpGameFeed::new(app_config.feed.clone())?;
    let router = StrategyRouter::from_config(&app_config);

    let snapshot = feed.fetch(game, platform).await;
    let Some(period) = snapshot.period.as_deref() else {
        warn!("No period available from the {} feed", platform);
        return Ok(());
    };

    let prediction = router
        .hash_confluence()
        .evaluate(period, platform, &outcomes(&snapshot.history));

    println!("\n=== {} {} ===", platform, game);
    println!("Period:     {}", period);
    println!("Prediction: {} ({})", prediction.outcome, prediction.outcome.color());
    println!("Pattern:    {}", prediction.label);
    if let Some(digit) = prediction.digit {
        println!("Digit:      {}", digit);
    }
    println!("Trend:      {}", trend_strip(&snapshot.history, TREND_STRIP_LEN).join(" "));

    Ok(())
}

fn show_hash(app_config: &AppConfig, period: &str, platform: Platform) {
    let predictor = HashPredictor::new(app_config.salts.clone());
    let digest = digest_text(period, predictor.salt(platform));
    let prediction = predictor.predict(period, platform);

    println!("Period:  {}", period);
    println!("Digest:  {}", digest);
    println!("Digit:   {}", select_digit(&digest));
    println!("Outcome: {}", prediction.outcome);
}

fn show_ladder(app_config: &AppConfig) {
    let ladder = BettingLadder::from_settings(&app_config.ladder);

    println!("\n=== Stake Ladder ===");
    for (level, stake) in ladder.levels() {
        println!("Level {:>2}: {}", level, stake);
    }
    println!("A loss at level {} restarts at level 1", ladder.max_level());
}
