//! Crawl coordination
//!
//! The coordinator owns all run state (frontier, dedup index, accumulated
//! records) and applies every state transition itself; the other components
//! only report results. One URL is fully processed before the next is
//! dequeued, and a fixed delay between processed URLs bounds the request
//! rate.

use crate::config::{validate, Config};
use crate::crawler::extractor::extract_content;
use crate::crawler::links::extract_links;
use crate::crawler::strategy::FetchStrategy;
use crate::output::{CrawlStats, OutputWriter};
use crate::record::PageRecord;
use crate::robots::RobotsPolicy;
use crate::state::{content_hash, DedupIndex, Frontier};
use crate::url::{normalize_url, same_domain};
use crate::{ConfigError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Crawl coordinator for a single run
pub struct Crawler {
    config: Config,
    base: Url,
    strategy: FetchStrategy,
    robots: RobotsPolicy,
    frontier: Frontier,
    dedup: DedupIndex,
    records: Vec<PageRecord>,
    writer: OutputWriter,
    shutdown: Arc<AtomicBool>,
}

impl Crawler {
    /// Prepares a run: validates config, sets up output locations, builds
    /// the fetch strategy (launching the browser if enabled), loads robots,
    /// and seeds the frontier with the base URL
    pub async fn new(config: Config) -> Result<Self> {
        validate(&config)?;

        let base = Url::parse(&config.crawl.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("base_url: {}", e)))?;

        let writer = OutputWriter::new(&config.output)?;
        let strategy = FetchStrategy::new(&config).await?;
        let robots = RobotsPolicy::load(strategy.client(), &base, &config.fetch.user_agent).await;

        let mut frontier = Frontier::new();
        frontier.enqueue(&normalize_url(base.as_str(), &base));

        Ok(Self {
            config,
            base,
            strategy,
            robots,
            frontier,
            dedup: DedupIndex::new(),
            records: Vec::new(),
            writer,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Returns a flag that, when set, stops the loop at the next iteration
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Runs the crawl loop until the frontier drains, the page budget is
    /// reached, or a shutdown is requested
    ///
    /// Per-page failures are recovered here (skip and continue); nothing in
    /// the loop is fatal to the run.
    pub async fn run(&mut self) {
        tracing::info!(
            "Starting crawl of {} (budget {} pages, rendering {})",
            self.base,
            self.config.crawl.max_pages,
            if self.strategy.rendering_available() {
                "on"
            } else {
                "off"
            }
        );

        let delay = Duration::from_millis(self.config.crawl.request_delay_ms);

        while !self.frontier.is_empty()
            && self.frontier.visited_count() < self.config.crawl.max_pages
        {
            if self.shutdown.load(Ordering::SeqCst) {
                tracing::info!("Shutdown requested, stopping crawl loop");
                break;
            }

            let url = match self.frontier.pop() {
                Some(url) => normalize_url(&url, &self.base),
                None => break,
            };

            if self.frontier.is_visited(&url) {
                continue;
            }
            if !same_domain(&url, self.base.as_str()) {
                continue;
            }
            self.frontier.mark_visited(&url);

            self.process_page(&url).await;

            if self.frontier.visited_count() % 10 == 0 {
                tracing::info!(
                    "Progress: {} visited, {} collected, {} pending",
                    self.frontier.visited_count(),
                    self.records.len(),
                    self.frontier.pending_count()
                );
            }

            tokio::time::sleep(delay).await;
        }

        tracing::info!(
            "Crawl loop finished: {} visited, {} records collected",
            self.frontier.visited_count(),
            self.records.len()
        );
    }

    /// Processes one dequeued, visited URL through gate → fetch → extract →
    /// dedup → persist → link discovery
    ///
    /// Robots-denied URLs still count as visited and never have links
    /// extracted, which bounds wasted work on disallowed subtrees. The same
    /// holds for content duplicates.
    async fn process_page(&mut self, url: &str) {
        if !self.robots.can_fetch(url) {
            tracing::debug!("Blocked by robots.txt: {}", url);
            return;
        }

        let html = match self.strategy.fetch(url).await {
            Some(html) => html,
            None => {
                tracing::debug!("No HTML for {}", url);
                return;
            }
        };

        let record = match extract_content(&html, url) {
            Some(record) => record,
            None => {
                tracing::debug!("No extractable content for {}", url);
                return;
            }
        };

        if !record.meets_minimum() {
            tracing::debug!(
                "Below minimum content length ({} words): {}",
                record.word_count,
                url
            );
            return;
        }

        let digest = content_hash(&record.content);
        if !self.dedup.accept(&digest) {
            tracing::debug!("Duplicate content at {}", url);
            return;
        }

        if let Err(e) = self.writer.save_page(&record) {
            tracing::warn!("Failed to save record for {}: {}", url, e);
        }

        for link in extract_links(&html, url, self.base.as_str()) {
            self.frontier.enqueue(&link);
        }

        tracing::debug!("Accepted {} ({} words)", url, record.word_count);
        self.records.push(record);
    }

    /// Releases the browser session and flushes the aggregate and stats
    /// artifacts
    ///
    /// Consumes the crawler, so the rendering resource is released exactly
    /// once on every exit route.
    pub async fn finish(mut self) -> Result<CrawlStats> {
        self.strategy.shutdown().await;

        let stats = CrawlStats::from_run(&self.records, self.frontier.visited_count());
        self.writer.write_aggregate(&self.records)?;
        self.writer.write_stats(&stats)?;
        Ok(stats)
    }
}

/// Runs a complete crawl
///
/// Installs a ctrl-c listener that requests a graceful stop. Whatever has
/// been collected when the loop exits (normally, by interrupt, or after an
/// error) is flushed to the aggregate before this returns.
pub async fn crawl(config: Config) -> Result<CrawlStats> {
    let mut crawler = Crawler::new(config).await?;

    let flag = crawler.shutdown_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, finishing current page and flushing");
            flag.store(true, Ordering::SeqCst);
        }
    });

    crawler.run().await;
    crawler.finish().await
}
