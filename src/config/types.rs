use std::path::PathBuf;

/// Default user agent, a desktop Chrome string
///
/// Some university CMS installs serve bot user agents a stripped page, so
/// the default identifies as an ordinary browser. Override with
/// `LECTERN_USER_AGENT` to identify the crawler explicitly.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120 Safari/537.36";

/// Default markers whose presence in static HTML suggests client-side
/// content loading (see `crawler::strategy`)
pub const DEFAULT_DYNAMIC_MARKERS: &[&str] = &["load more", "admin-ajax", "wp-json", "infinite"];

/// Main configuration structure
///
/// Environment variables (all optional):
///
/// | Variable | Field |
/// |---|---|
/// | `LECTERN_BASE_URL` | `crawl.base_url` |
/// | `LECTERN_MAX_PAGES` | `crawl.max_pages` |
/// | `LECTERN_REQUEST_DELAY_MS` | `crawl.request_delay_ms` |
/// | `LECTERN_USER_AGENT` | `fetch.user_agent` |
/// | `LECTERN_REQUEST_TIMEOUT_SECS` | `fetch.request_timeout_secs` |
/// | `LECTERN_RENDER` | `render.enabled` |
/// | `LECTERN_HEADLESS` | `render.headless` |
/// | `LECTERN_MIN_STATIC_BYTES` | `render.min_static_bytes` |
/// | `LECTERN_DYNAMIC_MARKERS` | `render.dynamic_markers` (comma-separated) |
/// | `LECTERN_PAGES_DIR` | `output.pages_dir` |
/// | `LECTERN_AGGREGATE_PATH` | `output.aggregate_path` |
/// | `LECTERN_STATS_PATH` | `output.stats_path` |
#[derive(Debug, Clone)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub fetch: FetchConfig,
    pub render: RenderConfig,
    pub output: OutputConfig,
}

/// Crawl loop behavior
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Root of the crawl; also defines the domain boundary
    pub base_url: String,

    /// Maximum number of URLs to visit before stopping
    pub max_pages: usize,

    /// Fixed delay between iterations, applied regardless of outcome
    pub request_delay_ms: u64,
}

/// Static HTTP fetch behavior
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent sent on every request and checked against robots.txt
    pub user_agent: String,

    /// Per-request timeout for static fetches
    pub request_timeout_secs: u64,
}

/// Rendered (browser) fetch behavior
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Whether escalation to a browser fetch is available at all
    pub enabled: bool,

    /// Run the browser headless
    pub headless: bool,

    /// Static HTML shorter than this escalates to a rendered fetch
    pub min_static_bytes: usize,

    /// Lowercase substrings of static HTML that trigger escalation
    pub dynamic_markers: Vec<String>,

    /// Timeout for browser navigation to a page
    pub page_load_timeout_secs: u64,

    /// Upper bound on scroll steps used to trigger lazy loading
    pub max_scrolls: usize,

    /// Pause after each scroll step
    pub scroll_pause_ms: u64,

    /// Extra settle wait after scrolling, before serializing the DOM
    pub settle_ms: u64,
}

/// Output artifact locations
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Directory receiving one JSON file per accepted page
    pub pages_dir: PathBuf,

    /// Path of the aggregate JSON array
    pub aggregate_path: PathBuf,

    /// Path of the run statistics JSON object
    pub stats_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawl: CrawlConfig::default(),
            fetch: FetchConfig::default(),
            render: RenderConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: "https://giki.edu.pk".to_string(),
            max_pages: 500,
            request_delay_ms: 500,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 15,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            headless: true,
            min_static_bytes: 800,
            dynamic_markers: DEFAULT_DYNAMIC_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            page_load_timeout_secs: 30,
            max_scrolls: 6,
            scroll_pause_ms: 600,
            settle_ms: 1000,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pages_dir: PathBuf::from("data/raw/pages"),
            aggregate_path: PathBuf::from("data/raw/pages.json"),
            stats_path: PathBuf::from("data/raw/crawl_stats.json"),
        }
    }
}
