//! Rendered fetching via a headless browser
//!
//! A single browser session is owned by the run: launched once at startup
//! (when rendering is enabled), shared by every escalated fetch, and closed
//! exactly once at shutdown. Each fetch opens its own tab, scrolls to
//! trigger lazy-loaded content, and serializes the settled DOM.

use crate::config::RenderConfig;
use crate::RenderError;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};

/// Owned headless browser session
pub struct Renderer {
    browser: Browser,
    handler_task: JoinHandle<()>,
    config: RenderConfig,
}

impl Renderer {
    /// Launches the browser session
    ///
    /// The CDP event handler runs on its own task for the lifetime of the
    /// session; it stops on the first handler error or at [`shutdown`].
    ///
    /// [`shutdown`]: Renderer::shutdown
    pub async fn launch(config: &RenderConfig, user_agent: &str) -> Result<Self, RenderError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(1400, 900)
            .arg(format!("--user-agent={}", user_agent))
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");

        if !config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder.build().map_err(RenderError::Launch)?;
        let (browser, mut handler) = Browser::launch(browser_config).await?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        tracing::info!("Headless browser session started");
        Ok(Self {
            browser,
            handler_task,
            config: config.clone(),
        })
    }

    /// Fetches a fully rendered page
    ///
    /// Opens a fresh tab, navigates within the page-load timeout, scrolls to
    /// the bottom in bounded steps, waits a settle period, and returns the
    /// serialized DOM. The tab is closed on every path.
    pub async fn fetch(&self, url: &str) -> Result<String, RenderError> {
        let page = self.browser.new_page("about:blank").await?;
        let result = self.render(&page, url).await;
        if let Err(e) = page.close().await {
            tracing::debug!("Failed to close tab for {}: {}", url, e);
        }
        result
    }

    async fn render(&self, page: &Page, url: &str) -> Result<String, RenderError> {
        let load_timeout = Duration::from_secs(self.config.page_load_timeout_secs);
        let navigation = async {
            page.goto(url).await?;
            page.wait_for_navigation().await?;
            Ok::<(), chromiumoxide::error::CdpError>(())
        };
        timeout(load_timeout, navigation)
            .await
            .map_err(|_| RenderError::NavigationTimeout(self.config.page_load_timeout_secs))??;

        self.scroll_to_bottom(page).await;
        sleep(Duration::from_millis(self.config.settle_ms)).await;

        Ok(page.content().await?)
    }

    /// Scrolls in bounded steps to trigger lazy-loaded content, stopping
    /// early once the page height stabilizes
    async fn scroll_to_bottom(&self, page: &Page) {
        let mut last_height = self.body_height(page).await;
        for _ in 0..self.config.max_scrolls {
            if page
                .evaluate("window.scrollTo(0, document.body.scrollHeight)")
                .await
                .is_err()
            {
                return;
            }
            sleep(Duration::from_millis(self.config.scroll_pause_ms)).await;

            let height = self.body_height(page).await;
            if height == last_height {
                break;
            }
            last_height = height;
        }
    }

    async fn body_height(&self, page: &Page) -> i64 {
        match page.evaluate("document.body.scrollHeight").await {
            Ok(result) => result.into_value::<i64>().unwrap_or(0),
            Err(_) => 0,
        }
    }

    /// Closes the browser session
    ///
    /// Consumes the renderer so the session can only be released once.
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::debug!("Browser close failed: {}", e);
        }
        self.handler_task.abort();
        tracing::info!("Headless browser session closed");
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("headless", &self.config.headless)
            .field("max_scrolls", &self.config.max_scrolls)
            .finish()
    }
}
