//! Crawler module
//!
//! The fetch pipeline (static HTTP, rendered browser, and the strategy that
//! chooses between them), content and link extraction, and the coordinator
//! that runs the frontier loop.

mod coordinator;
mod extractor;
mod fetcher;
mod links;
mod renderer;
mod strategy;

pub use coordinator::{crawl, Crawler};
pub use extractor::extract_content;
pub use fetcher::{build_http_client, fetch_static};
pub use links::extract_links;
pub use renderer::Renderer;
pub use strategy::{needs_render, FetchStrategy};
