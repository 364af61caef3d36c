use crate::error::{LeadgenError, Result};
use crate::filter::DEFAULT_BLACKLIST;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Desktop Chrome identity sent to websites during research
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration for a lead-generation pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// HTML search results page queried by the prospector
    #[serde(default = "default_search_endpoint")]
    pub search_endpoint: String,

    /// Raw hits requested per search query
    #[serde(default = "default_search_max_results")]
    pub search_max_results: usize,

    /// Leads kept after filtering
    #[serde(default = "default_max_leads")]
    pub max_leads: usize,

    /// Leads (with a website) that get researched per run
    #[serde(default = "default_research_limit")]
    pub research_limit: usize,

    /// URL substrings that disqualify a search hit
    #[serde(default = "default_blacklist")]
    pub blacklist: Vec<String>,

    /// Page load timeout in seconds
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// User agent presented by the browser
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Characters of cleaned page text kept per website
    #[serde(default = "default_content_limit")]
    pub content_limit: usize,

    /// Characters of cleaned page text shown in a report preview
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,

    /// Run the browser without a window
    #[serde(default = "default_headless")]
    pub headless: bool,
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_search_endpoint() -> String {
    "https://html.duckduckgo.com/html/".to_string()
}

fn default_search_max_results() -> usize {
    20
}

fn default_max_leads() -> usize {
    5
}

fn default_research_limit() -> usize {
    3
}

fn default_blacklist() -> Vec<String> {
    DEFAULT_BLACKLIST.iter().map(|s| s.to_string()).collect()
}

fn default_fetch_timeout_secs() -> u64 {
    60
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_content_limit() -> usize {
    5000
}

fn default_preview_limit() -> usize {
    500
}

fn default_headless() -> bool {
    true
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            search_endpoint: default_search_endpoint(),
            search_max_results: default_search_max_results(),
            max_leads: default_max_leads(),
            research_limit: default_research_limit(),
            blacklist: default_blacklist(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            user_agent: default_user_agent(),
            content_limit: default_content_limit(),
            preview_limit: default_preview_limit(),
            headless: default_headless(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| LeadgenError::io(path, e))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| LeadgenError::io(path, e))?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Override the WebDriver URL with the `WEBDRIVER_URL` environment variable if set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        self
    }

    /// Reject settings that cannot produce a usable run
    pub fn validate(&self) -> Result<()> {
        if self.fetch_timeout_secs == 0 {
            return Err(LeadgenError::Config(
                "fetch_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.search_max_results == 0 {
            return Err(LeadgenError::Config(
                "search_max_results must be greater than zero".to_string(),
            ));
        }
        if self.preview_limit > self.content_limit {
            return Err(LeadgenError::Config(format!(
                "preview_limit ({}) exceeds content_limit ({})",
                self.preview_limit, self.content_limit
            )));
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.search_max_results, 20);
        assert_eq!(config.max_leads, 5);
        assert_eq!(config.research_limit, 3);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(60));
        assert_eq!(config.content_limit, 5000);
        assert_eq!(config.preview_limit, 500);
        assert!(config.blacklist.contains(&"wikipedia.org".to_string()));
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_empty_json_matches_defaults() {
        let config = PipelineConfig::from_json("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = PipelineConfig::from_json(
            r#"{"research_limit": 1, "blacklist": ["crunchbase.com"], "headless": false}"#,
        )
        .unwrap();
        assert_eq!(config.research_limit, 1);
        assert_eq!(config.blacklist, vec!["crunchbase.com".to_string()]);
        assert!(!config.headless);
        assert_eq!(config.max_leads, 5);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = PipelineConfig::from_json(r#"{"fetch_timeout_secs": 0}"#).unwrap_err();
        assert!(matches!(err, LeadgenError::Config(_)));

        let err =
            PipelineConfig::from_json(r#"{"preview_limit": 600, "content_limit": 100}"#).unwrap_err();
        assert!(err.to_string().contains("preview_limit"));

        let err = PipelineConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, LeadgenError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = PipelineConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LeadgenError::Io { .. }));
    }
}
