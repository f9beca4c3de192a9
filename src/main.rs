// src/main.rs
// =============================================================================
// This is the entry point of our application.
//
// What happens here:
// 1. Parse command-line arguments (and environment variables) using clap
// 2. Build the wiki fetcher from the configuration
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = some pages failed, 2 = error)
// =============================================================================

mod cli;
mod config;
mod extract;
mod logger;
mod pipeline;
mod server;
mod wiki;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, ConfigArgs};
use pipeline::{aggregate, single};
use std::time::Duration;
use tracing::{info, warn};
use wiki::{WikiFetcher, WikiHosts};

#[tokio::main]
async fn main() {
    logger::initialize_logger();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = everything fetched
//   Ok(1) = `bash` printed its output but some pages failed
//   Err = configuration or fetch error
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let fetcher = build_fetcher(&cli.config)?;
    let exclude_prefixes = config::parse_exclude_prefixes(&cli.config.exclude_prefixes);

    match cli.command {
        Commands::Serve { bind } => {
            let state = server::AppState {
                fetcher,
                wiki_pages: cli.config.wiki_pages,
                exclude_prefixes,
            };
            server::serve(&bind, state).await?;
            Ok(0)
        }
        Commands::Bash => handle_bash(&fetcher, &cli.config.wiki_pages, &exclude_prefixes).await,
        Commands::Fetch {
            provider,
            owner,
            repo,
            page,
        } => {
            let text = single::run(&fetcher, &provider, &owner, &repo, &page, &exclude_prefixes).await?;
            println!("{}", text);
            Ok(0)
        }
    }
}

fn build_fetcher(config: &ConfigArgs) -> Result<WikiFetcher> {
    let timeout = config.fetch_timeout_secs.map(Duration::from_secs);
    if timeout.is_none() {
        info!("No fetch timeout configured; a stalled upstream stalls the whole batch");
    }
    let hosts = match &config.upstream_base_url {
        Some(base) => {
            info!("Reading every wiki from {}", base);
            WikiHosts::from_base(base)?
        }
        None => WikiHosts::public()?,
    };
    Ok(WikiFetcher::new(hosts, timeout)?)
}

// Handles the 'bash' subcommand
//
// The full text is printed even when some pages failed; the failures are
// already inside it as "# Error fetching" lines.
async fn handle_bash(fetcher: &WikiFetcher, wiki_pages: &str, exclude_prefixes: &[String]) -> Result<i32> {
    // A malformed WIKI_PAGES is an error (exit code 2), not a failed page
    let configs = config::parse_wiki_pages(wiki_pages)?;

    let report = aggregate::run(fetcher, &configs, exclude_prefixes).await;
    print!("{}", report.text);

    if report.failed.is_empty() {
        Ok(0)
    } else {
        warn!("Failed page(s): {}", report.failed.join(", "));
        Ok(1)
    }
}
