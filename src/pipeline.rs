use crate::config::PipelineConfig;
use crate::enrichment::Enrichment;
use crate::events::{EventSink, LogSink, PipelineEvent, Stage};
use crate::filter::LeadFilter;
use crate::prospector::Prospector;
use crate::researcher::{ResearchSettings, Researcher};
use crate::results::{EnrichedLead, PipelineState};
use crate::web::webdriver::SessionOptions;
use crate::web::{BrowserFetcher, DuckDuckGoSearch, PageFetcher, SearchProvider};
use std::sync::Arc;

/// Two-stage lead generation: prospect for companies, then research them.
///
/// A `Pipeline` holds no per-run state; every call to [`Pipeline::run`]
/// builds and returns its own [`PipelineState`].
pub struct Pipeline {
    config: PipelineConfig,
    search: Arc<dyn SearchProvider>,
    fetcher: Arc<dyn PageFetcher>,
    filter: LeadFilter,
    settings: ResearchSettings,
    enrichment: Enrichment,
    events: Arc<dyn EventSink>,
}

impl Pipeline {
    /// Create a pipeline over the given collaborators with default settings
    pub fn new(search: Arc<dyn SearchProvider>, fetcher: Arc<dyn PageFetcher>) -> Self {
        let config = PipelineConfig::default();
        Self {
            filter: LeadFilter::new(&config.blacklist),
            settings: ResearchSettings::from(&config),
            config,
            search,
            fetcher,
            enrichment: Enrichment::Passthrough,
            events: Arc::new(LogSink),
        }
    }

    /// Create a pipeline that searches and fetches through WebDriver
    pub fn from_config(config: PipelineConfig) -> Self {
        let session = SessionOptions::new(&config.webdriver_url).with_headless(config.headless);
        let search = DuckDuckGoSearch::new(&config.search_endpoint, session);
        let fetcher = BrowserFetcher::new(&config.webdriver_url, config.headless);

        Self::new(Arc::new(search), Arc::new(fetcher)).with_config(config)
    }

    /// Apply a configuration
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.filter = LeadFilter::new(&config.blacklist);
        self.settings = ResearchSettings::from(&config);
        self.config = config;
        self
    }

    /// Post-process research reports with `enrichment`
    pub fn with_enrichment(mut self, enrichment: Enrichment) -> Self {
        self.enrichment = enrichment;
        self
    }

    /// Send run events somewhere other than the log
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Configuration in effect
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run both stages for `icp`.
    ///
    /// Never fails: prospecting and research errors are collected in
    /// `errors` and the run carries on with whatever it has.
    pub async fn run(&self, icp: &str) -> PipelineState {
        let mut state = PipelineState::new(icp);

        self.enter(Stage::Prospecting, icp);
        self.prospect(&mut state).await;

        self.enter(Stage::Researching, icp);
        self.research(&mut state).await;

        self.enter(Stage::Done, icp);
        ::log::info!(
            "Run finished: {} leads, {} reports, {} errors",
            state.leads.len(),
            state.reports.len(),
            state.errors.len()
        );
        state
    }

    fn enter(&self, stage: Stage, icp: &str) {
        self.events.emit(&PipelineEvent::StageEntered {
            stage,
            icp: icp.to_string(),
        });
    }

    async fn prospect(&self, state: &mut PipelineState) {
        let prospector = Prospector::new(self.search.as_ref(), &self.filter)
            .with_limits(self.config.search_max_results, self.config.max_leads)
            .with_events(self.events.as_ref());

        match prospector.prospect(&state.icp).await {
            Ok(leads) => state.leads = leads,
            Err(e) => self.record_error(state, format!("Prospecting Error: {}", e)),
        }
    }

    async fn research(&self, state: &mut PipelineState) {
        let researcher = Researcher::new(self.fetcher.as_ref(), &self.enrichment, &self.settings)
            .with_events(self.events.as_ref());

        // Leads without a website are skipped and do not use up the limit
        let selected = state
            .leads
            .iter()
            .filter(|lead| !lead.website.is_empty())
            .take(self.config.research_limit)
            .cloned()
            .collect::<Vec<_>>();

        for lead in selected {
            self.events.emit(&PipelineEvent::ResearchStarted {
                url: lead.website.clone(),
            });

            match researcher.research(&lead.website).await {
                Ok(report) => state.reports.push(EnrichedLead {
                    lead,
                    deep_dive: report,
                }),
                Err(e) => {
                    let message = format!("Research Error {}: {}", lead.website, e);
                    self.record_error(state, message);
                }
            }
        }
    }

    fn record_error(&self, state: &mut PipelineState, message: String) {
        self.events.emit(&PipelineEvent::ErrorRecorded {
            message: message.clone(),
        });
        state.errors.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::Extractor;
    use crate::error::{LeadgenError, Result};
    use crate::events::RecordingSink;
    use crate::prospector::tests::ScriptedSearch;
    use crate::researcher::tests::{Page, ScriptedFetcher};
    use crate::results::{CompanyProfile, Lead, SearchHit};
    use async_trait::async_trait;

    fn hit(title: &str, href: &str) -> SearchHit {
        SearchHit::new(title, href, "")
    }

    fn page(text: &str) -> Page {
        Page::Html(format!("<html><body><p>{}</p></body></html>", text))
    }

    fn pipeline(search: Arc<ScriptedSearch>, fetcher: Arc<ScriptedFetcher>) -> Pipeline {
        Pipeline::new(search, fetcher).with_event_sink(Arc::new(crate::events::NoopSink))
    }

    #[tokio::test]
    async fn test_full_run() {
        let search = Arc::new(ScriptedSearch::default().answer(
            "fintech official website",
            vec![
                hit("Wiki", "https://wikipedia.org/wiki/Fintech"),
                hit("Acme", "https://acme.io"),
                hit("Acme About", "https://acme.io/about"),
                hit("Globex", "https://globex.example"),
            ],
        ));
        let fetcher = Arc::new(
            ScriptedFetcher::default()
                .with_page("https://acme.io", page("Acme moves money."))
                .with_page("https://globex.example", page("Globex lends.")),
        );

        let state = pipeline(search, fetcher).run("fintech").await;

        assert_eq!(state.icp, "fintech");
        assert!(state.errors.is_empty());
        let websites: Vec<&str> = state.leads.iter().map(|l| l.website.as_str()).collect();
        assert_eq!(websites, vec!["https://acme.io", "https://globex.example"]);

        assert_eq!(state.reports.len(), 2);
        assert_eq!(state.reports[0].lead.company_name, "Acme");
        assert_eq!(state.reports[0].deep_dive.raw_content_preview, "Acme moves money.");
        assert_eq!(state.reports[1].deep_dive.source_url, "https://globex.example");
    }

    #[tokio::test]
    async fn test_research_capped_at_three() {
        let hits = (0..5)
            .map(|i| hit(&format!("Co{}", i), &format!("https://co{}.example", i)))
            .collect();
        let search = Arc::new(ScriptedSearch::default().answer("saas official website", hits));
        let mut fetcher = ScriptedFetcher::default();
        for i in 0..5 {
            fetcher = fetcher.with_page(&format!("https://co{}.example", i), page("ok"));
        }
        let fetcher = Arc::new(fetcher);

        let state = pipeline(search, fetcher.clone()).run("saas").await;

        assert_eq!(state.leads.len(), 5);
        assert_eq!(state.reports.len(), 3);
        assert_eq!(
            fetcher.fetched_urls(),
            vec!["https://co0.example", "https://co1.example", "https://co2.example"]
        );
    }

    #[tokio::test]
    async fn test_fewer_leads_than_cap() {
        let search = Arc::new(
            ScriptedSearch::default().answer("niche official website", vec![hit("Solo", "https://solo.example")]),
        );
        let fetcher = Arc::new(ScriptedFetcher::default().with_page("https://solo.example", page("Solo")));

        let state = pipeline(search, fetcher.clone()).run("niche").await;
        assert_eq!(fetcher.fetched_urls(), vec!["https://solo.example"]);
        assert_eq!(state.reports.len(), 1);
    }

    #[tokio::test]
    async fn test_leads_without_website_do_not_count() {
        let search = Arc::new(ScriptedSearch::default().answer(
            "b2b official website",
            vec![
                SearchHit {
                    title: Some("Linkless".to_string()),
                    ..SearchHit::default()
                },
                hit("A", "https://a.example"),
                hit("B", "https://b.example"),
                hit("C", "https://c.example"),
                hit("D", "https://d.example"),
            ],
        ));
        let fetcher = Arc::new(ScriptedFetcher::default());

        let state = pipeline(search, fetcher.clone()).run("b2b").await;

        assert_eq!(state.leads.len(), 5);
        assert_eq!(state.leads[0].website, "");
        assert_eq!(
            fetcher.fetched_urls(),
            vec!["https://a.example", "https://b.example", "https://c.example"]
        );
    }

    #[tokio::test]
    async fn test_prospecting_failure_is_recorded() {
        let search = Arc::new(ScriptedSearch::failing());
        let fetcher = Arc::new(ScriptedFetcher::default());

        let state = pipeline(search, fetcher.clone()).run("fintech").await;

        assert!(state.leads.is_empty());
        assert!(state.reports.is_empty());
        assert_eq!(state.errors.len(), 1);
        assert!(state.errors[0].starts_with("Prospecting Error: "));
        assert!(state.errors[0].contains("provider unavailable"));
        assert!(fetcher.fetched_urls().is_empty());
    }

    #[tokio::test]
    async fn test_no_leads_still_completes() {
        let search = Arc::new(ScriptedSearch::default());
        let fetcher = Arc::new(ScriptedFetcher::default());
        let sink = Arc::new(RecordingSink::default());

        let state = Pipeline::new(search, fetcher)
            .with_event_sink(sink.clone())
            .run("nothing")
            .await;

        assert_eq!(state, PipelineState::new("nothing"));
        let stages: Vec<Stage> = sink
            .events()
            .into_iter()
            .filter_map(|e| match e {
                PipelineEvent::StageEntered { stage, .. } => Some(stage),
                _ => None,
            })
            .collect();
        assert_eq!(stages, vec![Stage::Prospecting, Stage::Researching, Stage::Done]);
    }

    #[tokio::test]
    async fn test_research_fault_skips_lead_and_continues() {
        let search = Arc::new(ScriptedSearch::default().answer(
            "ai official website",
            vec![
                hit("A", "https://a.example"),
                hit("B", "https://b.example"),
                hit("C", "https://c.example"),
            ],
        ));
        let fetcher = Arc::new(
            ScriptedFetcher::default()
                .with_page("https://a.example", page("A"))
                .with_page("https://b.example", Page::NoSession)
                .with_page("https://c.example", page("C")),
        );

        let state = pipeline(search, fetcher).run("ai").await;

        let researched: Vec<&str> = state
            .reports
            .iter()
            .map(|r| r.lead.website.as_str())
            .collect();
        assert_eq!(researched, vec!["https://a.example", "https://c.example"]);
        assert_eq!(state.errors.len(), 1);
        assert!(state.errors[0].starts_with("Research Error https://b.example: "));
    }

    #[tokio::test]
    async fn test_fetch_degradation_keeps_report_and_errors_clean() {
        let search = Arc::new(
            ScriptedSearch::default().answer("ai official website", vec![hit("Down", "https://down.example")]),
        );
        let fetcher = Arc::new(ScriptedFetcher::default().with_page("https://down.example", Page::Unreachable));

        let state = pipeline(search, fetcher).run("ai").await;

        assert!(state.errors.is_empty());
        assert_eq!(state.reports.len(), 1);
        assert!(state.reports[0]
            .deep_dive
            .raw_content_preview
            .starts_with("Error scraping https://down.example:"));
    }

    #[tokio::test]
    async fn test_empty_icp_still_searches() {
        let search = Arc::new(ScriptedSearch::default());
        let fetcher = Arc::new(ScriptedFetcher::default());

        let state = pipeline(search.clone(), fetcher).run("").await;

        assert_eq!(search.issued(), vec![" official website", ""]);
        assert!(state.errors.is_empty());
        assert!(state.leads.is_empty());
    }

    #[tokio::test]
    async fn test_config_limits_apply() {
        let hits = (0..6)
            .map(|i| hit(&format!("Co{}", i), &format!("https://co{}.example", i)))
            .collect();
        let search = Arc::new(ScriptedSearch::default().answer("saas official website", hits));
        let fetcher = Arc::new(ScriptedFetcher::default());
        let config = PipelineConfig {
            max_leads: 2,
            research_limit: 1,
            search_max_results: 7,
            ..PipelineConfig::default()
        };

        let state = pipeline(search.clone(), fetcher.clone())
            .with_config(config)
            .run("saas")
            .await;

        assert_eq!(state.leads.len(), 2);
        assert_eq!(fetcher.fetched_urls(), vec!["https://co0.example"]);
        assert!(search.queries.lock().unwrap().iter().all(|(_, max)| *max == 7));
    }

    struct FailingExtractor;

    #[async_trait]
    impl Extractor for FailingExtractor {
        async fn extract(&self, _url: &str, _content: &str) -> Result<CompanyProfile> {
            Err(LeadgenError::Extraction("model offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_extraction_failure_is_a_research_error() {
        let search = Arc::new(
            ScriptedSearch::default().answer("ai official website", vec![hit("A", "https://a.example")]),
        );
        let fetcher = Arc::new(ScriptedFetcher::default().with_page("https://a.example", page("A")));

        let state = pipeline(search, fetcher)
            .with_enrichment(Enrichment::StructuredExtract(Arc::new(FailingExtractor)))
            .run("ai")
            .await;

        assert!(state.reports.is_empty());
        assert_eq!(
            state.errors,
            vec!["Research Error https://a.example: extraction failed: model offline".to_string()]
        );
        assert_eq!(
            state.leads,
            vec![Lead {
                company_name: "A".to_string(),
                website: "https://a.example".to_string(),
                context: String::new(),
            }]
        );
    }

    #[tokio::test]
    async fn test_degraded_fetch_skips_extraction() {
        let search = Arc::new(
            ScriptedSearch::default().answer("ai official website", vec![hit("Down", "https://down.example")]),
        );
        let fetcher = Arc::new(ScriptedFetcher::default().with_page("https://down.example", Page::Unreachable));

        let state = pipeline(search, fetcher)
            .with_enrichment(Enrichment::StructuredExtract(Arc::new(FailingExtractor)))
            .run("ai")
            .await;

        assert!(state.errors.is_empty());
        assert_eq!(state.reports.len(), 1);
        let report = &state.reports[0].deep_dive;
        assert!(report.raw_content_preview.starts_with("Error scraping https://down.example:"));
        assert_eq!(report.profile, None);
    }
}
