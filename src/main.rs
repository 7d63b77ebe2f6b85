mod config;
mod crawler;
mod error;
mod sentiment;
mod storage;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::Config;
use crawler::service::MergeService;
use sentiment::service::SentimentService;

#[derive(Parser)]
#[command(name = "bechdel-scraper")]
#[command(about = "Bechdel test dataset merger and IMDb review sentiment pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover newly added movies and merge them into the dataset
    Merge,
    /// Score IMDb review sentiment for every movie in the merged dataset
    Sentiment,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bechdel_scraper=debug,info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = Config::from_env()?;

    match cli.command {
        Commands::Merge => {
            let summary = MergeService::new(cfg).run().await?;
            println!(
                "Merged dataset written: {} rows ({} newly added)",
                summary.total, summary.added
            );
        }
        Commands::Sentiment => {
            let known = SentimentService::new(cfg).run().await?;
            println!("Sentiment written: {} movies with known scores", known);
        }
    }

    Ok(())
}
