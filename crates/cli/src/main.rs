// ABOUTME: Command-line entry point for the newswire crawler.
// ABOUTME: Dispatches run/list/config/cleanup against environment-driven settings.

mod config;
mod report;
mod sources;

use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use newswire_listing::Crawler;
use tracing::info;

use config::Settings;
use report::ReportWriter;

#[derive(Parser)]
#[command(name = "newswire")]
#[command(about = "Crawl news sources into plain-text reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl one source and save a report
    Run {
        /// Source name; see `newswire list`
        source: String,

        /// Seconds to wait between listing requests
        #[arg(long)]
        delay: Option<u64>,

        /// Maximum number of listing pages
        #[arg(long)]
        max_pages: Option<u32>,

        /// Fetch article content for every story
        #[arg(long, default_value_t = false)]
        fetch_content: bool,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Print the crawl report as JSON instead of writing a file
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the available sources
    List,
    /// Show the resolved configuration
    Config,
    /// Delete reports older than the retention window
    Cleanup {
        /// Days of reports to keep; defaults to CLEANUP_DAYS
        #[arg(long)]
        days: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let settings = Settings::from_env();
    init_tracing(&settings);

    match cli.command {
        Commands::Run {
            source,
            delay,
            max_pages,
            fetch_content,
            timeout,
            json,
        } => {
            if sources::find(&source).is_none() {
                bail!(
                    "unknown source '{}'; run `newswire list` to see what is available",
                    source
                );
            }

            let mut config = settings.crawl_config();
            if let Some(delay) = delay {
                config.delay = Duration::from_secs(delay);
            }
            if let Some(max_pages) = max_pages {
                config.max_pages = max_pages;
            }
            if fetch_content {
                config.fetch_content = true;
            }
            if let Some(timeout) = timeout {
                config.timeout = Duration::from_secs(timeout);
            }

            info!("running {} crawler", source);
            let crawler = Crawler::new(config)?;
            let report = crawler.crawl().await;
            if !report.success {
                bail!(
                    "crawl failed: {}",
                    report.error_message.as_deref().unwrap_or("unknown error")
                );
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            let writer = ReportWriter::new(&settings.output_dir);
            match writer.save(&report)? {
                Some(path) => {
                    println!("Crawl finished. Report saved to: {}", path.display());
                    println!("Crawled {} articles", report.total_count);
                }
                None => bail!("the crawl returned no articles; nothing was saved"),
            }
            Ok(())
        }
        Commands::List => {
            println!("Available sources:");
            println!("{}", "-".repeat(50));
            for source in sources::SOURCES {
                println!("  {}: {}", source.name, source.description);
            }
            println!("{}", "-".repeat(50));
            println!("Total: {}", sources::SOURCES.len());
            Ok(())
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("{}", "-".repeat(50));
            println!("{}", settings.describe());
            println!("{}", "-".repeat(50));
            Ok(())
        }
        Commands::Cleanup { days } => {
            let days = days.unwrap_or(settings.cleanup_days);
            let writer = ReportWriter::new(&settings.output_dir);
            let removed = writer.cleanup_old(days)?;
            println!("Removed {} old report file(s)", removed);
            Ok(())
        }
    }
}

fn init_tracing(settings: &Settings) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(settings.effective_log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
