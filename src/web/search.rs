use crate::error::{LeadgenError, Result};
use crate::parsers::search::parse_results;
use crate::results::SearchHit;
use crate::web::SearchProvider;
use crate::web::webdriver::{self, SessionOptions};
use async_trait::async_trait;
use url::Url;

/// Searches DuckDuckGo's HTML endpoint through a browser session
#[derive(Debug, Clone)]
pub struct DuckDuckGoSearch {
    endpoint: String,
    session: SessionOptions,
}

impl DuckDuckGoSearch {
    /// Create a search provider for the HTML results page at `endpoint`
    pub fn new(endpoint: &str, session: SessionOptions) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            session,
        }
    }

    /// Results page URL for `query`
    pub fn query_url(&self, query: &str) -> Result<Url> {
        Url::parse_with_params(&self.endpoint, &[("q", query)])
            .map_err(|e| LeadgenError::Config(format!("bad search endpoint {}: {}", self.endpoint, e)))
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        let url = self.query_url(query)?;
        let client = webdriver::connect(&self.session).await?;

        let page = match client.goto(url.as_str()).await {
            Ok(_) => client.source().await,
            Err(e) => Err(e),
        };
        webdriver::close(client).await;

        let html = page.map_err(|e| LeadgenError::Search(format!("{}: {}", url, e)))?;
        Ok(parse_results(&html, max_results))
    }
}
