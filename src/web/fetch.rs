use crate::error::{LeadgenError, Result};
use crate::web::PageFetcher;
use crate::web::webdriver::{self, SessionOptions};
use async_trait::async_trait;
use fantoccini::Client;
use std::time::Duration;
use tokio::time::timeout;

/// Fetches rendered pages by driving a real browser
#[derive(Debug, Clone)]
pub struct BrowserFetcher {
    webdriver_url: String,
    headless: bool,
}

impl BrowserFetcher {
    /// Create a fetcher that opens sessions against `webdriver_url`
    pub fn new(webdriver_url: &str, headless: bool) -> Self {
        Self {
            webdriver_url: webdriver_url.to_string(),
            headless,
        }
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, url: &str, limit: Duration, user_agent: &str) -> Result<String> {
        let options = SessionOptions::new(&self.webdriver_url)
            .with_user_agent(user_agent)
            .with_headless(self.headless);
        let client = webdriver::connect(&options).await?;

        let started = std::time::Instant::now();
        let result = match timeout(limit, load_source(&client, url)).await {
            Ok(result) => result,
            Err(_) => Err(LeadgenError::Timeout {
                url: url.to_string(),
                secs: limit.as_secs(),
            }),
        };
        webdriver::close(client).await;

        ::log::debug!(
            "Fetched {} in {:.2} seconds",
            url,
            started.elapsed().as_secs_f64()
        );
        result
    }
}

async fn load_source(client: &Client, url: &str) -> Result<String> {
    let navigation_error = |e: fantoccini::error::CmdError| LeadgenError::Navigation {
        url: url.to_string(),
        message: e.to_string(),
    };

    client.goto(url).await.map_err(navigation_error)?;
    client.source().await.map_err(navigation_error)
}
