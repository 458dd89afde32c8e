// ABOUTME: CLI for generating a channel feed with cmafeed-scrape and printing JSON.
// ABOUTME: Fetches one listing, resolves details concurrently, and writes the assembled feed to stdout.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cmafeed_scrape::{ChannelKind, Client};

/// Generate a JSON feed from the CMA portal's news columns.
#[derive(Parser, Debug)]
#[command(name = "cmafeed")]
#[command(about = "Scrape a CMA news column into a JSON feed", long_about = None)]
struct Args {
    /// Channel to scrape: "legal" (default) or "science".
    #[arg(long = "type", value_name = "KIND", default_value = "legal")]
    kind: String,

    /// Maximum number of items to include.
    #[arg(long, default_value_t = 10)]
    limit: usize,

    /// Override the portal base URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Output compact JSON instead of pretty.
    #[arg(long, default_value_t = false)]
    compact: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let kind = ChannelKind::from_type_param(&args.kind);

    let mut builder = Client::builder().timeout(Duration::from_secs(args.timeout));
    if let Some(base_url) = &args.base_url {
        builder = builder.base_url(base_url);
    }
    let client = builder.build()?;

    let feed = client.generate(kind, args.limit).await?;

    let output = if args.compact {
        serde_json::to_string(&feed)?
    } else {
        serde_json::to_string_pretty(&feed)?
    };
    println!("{}", output);

    Ok(())
}
