use crate::config::PipelineConfig;
use crate::enrichment::Enrichment;
use crate::error::Result;
use crate::events::{EventSink, NoopSink, PipelineEvent};
use crate::parsers::html::extract_text;
use crate::results::ResearchReport;
use crate::utils::truncate_chars;
use crate::web::PageFetcher;
use std::time::Duration;

/// Limits and identity used when visiting a website
#[derive(Debug, Clone)]
pub struct ResearchSettings {
    pub timeout: Duration,
    pub user_agent: String,
    /// Characters of cleaned text kept
    pub content_limit: usize,
    /// Characters of cleaned text shown in the preview
    pub preview_limit: usize,
}

impl From<&PipelineConfig> for ResearchSettings {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            timeout: config.fetch_timeout(),
            user_agent: config.user_agent.clone(),
            content_limit: config.content_limit,
            preview_limit: config.preview_limit,
        }
    }
}

impl Default for ResearchSettings {
    fn default() -> Self {
        Self::from(&PipelineConfig::default())
    }
}

/// Text obtained for a website
enum Scraped {
    /// Cleaned page content
    Page(String),
    /// Error marker standing in for a page that would not load
    Degraded(String),
}

impl Scraped {
    fn text(&self) -> &str {
        match self {
            Scraped::Page(text) | Scraped::Degraded(text) => text,
        }
    }
}

/// Visits a company website and reports what it says
pub struct Researcher<'a> {
    fetcher: &'a dyn PageFetcher,
    enrichment: &'a Enrichment,
    settings: &'a ResearchSettings,
    events: &'a dyn EventSink,
}

impl<'a> Researcher<'a> {
    /// Create a researcher that reports nowhere
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        enrichment: &'a Enrichment,
        settings: &'a ResearchSettings,
    ) -> Self {
        Self {
            fetcher,
            enrichment,
            settings,
            events: &NoopSink,
        }
    }

    /// Report degraded fetches to `events`
    pub fn with_events(mut self, events: &'a dyn EventSink) -> Self {
        self.events = events;
        self
    }

    /// Research a single website.
    ///
    /// A page that fails to load still yields a report whose content is an
    /// error marker; enrichment is skipped for it. `Err` is returned only when
    /// no browser session could be obtained or enrichment failed.
    pub async fn research(&self, url: &str) -> Result<ResearchReport> {
        let scraped = self.scrape(url).await?;
        let content = scraped.text();

        let report = ResearchReport {
            source_url: url.to_string(),
            raw_content_preview: truncate_chars(content, self.settings.preview_limit).to_string(),
            full_content_length: content.chars().count(),
            profile: None,
        };

        match scraped {
            Scraped::Page(text) => self.enrichment.apply(report, &text).await,
            Scraped::Degraded(_) => Ok(report),
        }
    }

    /// Cleaned, capped page text, or an error marker if the page would not load
    async fn scrape(&self, url: &str) -> Result<Scraped> {
        let fetched = self
            .fetcher
            .fetch(url, self.settings.timeout, &self.settings.user_agent)
            .await;

        match fetched {
            Ok(html) => {
                let text = extract_text(&html);
                Ok(Scraped::Page(
                    truncate_chars(&text, self.settings.content_limit).to_string(),
                ))
            }
            Err(e) if e.is_degradable() => {
                self.events.emit(&PipelineEvent::FetchDegraded {
                    url: url.to_string(),
                    message: e.to_string(),
                });
                Ok(Scraped::Degraded(format!("Error scraping {}: {}", url, e)))
            }
            Err(e) => Err(e),
        }
    }
}
