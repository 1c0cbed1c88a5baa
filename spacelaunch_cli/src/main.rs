mod commands;
mod output;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use spacelaunch_lib::cache::MemoryCache;
use spacelaunch_lib::CachedClient;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "spacelaunch")]
#[command(about = "Browse space launches from the launch GraphQL API")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// GraphQL endpoint (defaults to the public tutorial server)
    #[arg(long, env = "SPACELAUNCH_ENDPOINT", global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scroll through the launch list, loading pages as the end comes into view
    Launches(commands::launches::LaunchesArgs),
    /// Download and downsample a single image
    Thumbnail(commands::thumbnail::ThumbnailArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("spacelaunch=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    match &cli.command {
        Commands::Launches(args) => {
            let cache = MemoryCache::new(cache_ttl());
            let client = match &cli.endpoint {
                Some(endpoint) => CachedClient::with_base_url(endpoint, cache),
                None => CachedClient::new(cache),
            };
            commands::launches::run(args, client, &format).await?
        }
        Commands::Thumbnail(args) => commands::thumbnail::run(args).await?,
    }

    Ok(())
}

fn cache_ttl() -> Duration {
    let secs = std::env::var("SPACELAUNCH_CACHE_TTL_SECS")
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(300);
    Duration::from_secs(secs)
}
