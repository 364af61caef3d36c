//! External collaborators: web search and rendered page fetching.
//!
//! The pipeline only sees the [`SearchProvider`] and [`PageFetcher`] traits.
//! The WebDriver-backed implementations open a fresh browser session for each
//! call and close it before returning.

pub mod fetch;
pub mod search;
pub mod webdriver;

use crate::error::Result;
use crate::results::SearchHit;
use async_trait::async_trait;
use std::time::Duration;

pub use fetch::BrowserFetcher;
pub use search::DuckDuckGoSearch;

/// Runs a web search and returns ranked hits
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Return up to `max_results` hits for `query`.
    ///
    /// An empty vector is a normal outcome; `Err` means the provider itself failed.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>>;
}

/// Loads a URL in a browser and returns the rendered HTML
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url`, giving up after `timeout`.
    ///
    /// `LeadgenError::Session` means no browser could be obtained;
    /// `Navigation` and `Timeout` mean the page itself could not be loaded.
    async fn fetch(&self, url: &str, timeout: Duration, user_agent: &str) -> Result<String>;
}
