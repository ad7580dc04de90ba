//! Lectern main entry point
//!
//! Command-line interface for the corpus crawler. Configuration comes from
//! the environment; the flags below override it.

use anyhow::Context;
use clap::Parser;
use lectern::config::{self, Config};
use lectern::crawler::crawl;
use lectern::output::print_stats;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Lectern: a polite single-site corpus crawler
///
/// Crawls one web site breadth-first within a page budget, extracts the
/// main content of each page, deduplicates by content, and writes JSON
/// page records for downstream chunking and indexing.
#[derive(Parser, Debug)]
#[command(name = "lectern")]
#[command(version)]
#[command(about = "Polite single-site corpus crawler", long_about = None)]
struct Cli {
    /// Crawl root URL (overrides LECTERN_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Maximum number of URLs to visit (overrides LECTERN_MAX_PAGES)
    #[arg(long)]
    max_pages: Option<usize>,

    /// Directory for per-page JSON files (overrides LECTERN_PAGES_DIR)
    #[arg(long)]
    pages_dir: Option<PathBuf>,

    /// Disable the rendered-fetch fallback
    #[arg(long)]
    no_render: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate configuration and show what would be crawled, then exit
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = config::from_env().context("Failed to read configuration")?;
    apply_overrides(&mut config, &cli);
    config::validate(&config).context("Invalid configuration")?;

    if cli.dry_run {
        print_plan(&config);
        return Ok(());
    }

    let stats = crawl(config).await.context("Crawl failed")?;
    print_stats(&stats);

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("lectern=info,warn"),
            1 => EnvFilter::new("lectern=debug,info"),
            2 => EnvFilter::new("lectern=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(base_url) = &cli.base_url {
        config.crawl.base_url = base_url.clone();
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawl.max_pages = max_pages;
    }
    if let Some(pages_dir) = &cli.pages_dir {
        config.output.pages_dir = pages_dir.clone();
    }
    if cli.no_render {
        config.render.enabled = false;
    }
}

/// Handles --dry-run: shows the effective configuration without crawling
fn print_plan(config: &Config) {
    println!("=== Lectern Dry Run ===\n");

    println!("Crawl:");
    println!("  Base URL: {}", config.crawl.base_url);
    println!("  Page budget: {}", config.crawl.max_pages);
    println!("  Request delay: {}ms", config.crawl.request_delay_ms);

    println!("\nFetch:");
    println!("  User agent: {}", config.fetch.user_agent);
    println!("  Request timeout: {}s", config.fetch.request_timeout_secs);

    println!("\nRendering:");
    println!("  Enabled: {}", config.render.enabled);
    println!("  Headless: {}", config.render.headless);
    println!("  Min static size: {} bytes", config.render.min_static_bytes);
    println!(
        "  Dynamic markers: {}",
        config.render.dynamic_markers.join(", ")
    );

    println!("\nOutput:");
    println!("  Pages dir: {}", config.output.pages_dir.display());
    println!("  Aggregate: {}", config.output.aggregate_path.display());
    println!("  Stats: {}", config.output.stats_path.display());

    println!("\n✓ Configuration is valid");
}
