use crate::error::Result;
use crate::events::{EventSink, NoopSink, PipelineEvent};
use crate::filter::LeadFilter;
use crate::results::Lead;
use crate::web::SearchProvider;

/// Search queries tried for an ICP, most specific first
pub fn build_queries(icp: &str) -> [String; 2] {
    [format!("{} official website", icp), icp.to_string()]
}

/// Finds candidate companies for an ICP
pub struct Prospector<'a> {
    search: &'a dyn SearchProvider,
    filter: &'a LeadFilter,
    /// Raw hits requested per query
    search_max_results: usize,
    /// Leads kept after filtering
    max_leads: usize,
    events: &'a dyn EventSink,
}

impl<'a> Prospector<'a> {
    /// Create a prospector with the default search and lead limits
    pub fn new(search: &'a dyn SearchProvider, filter: &'a LeadFilter) -> Self {
        Self {
            search,
            filter,
            search_max_results: 20,
            max_leads: LeadFilter::DEFAULT_MAX_RESULTS,
            events: &NoopSink,
        }
    }

    /// Set raw hits requested per query and leads kept after filtering
    pub fn with_limits(mut self, search_max_results: usize, max_leads: usize) -> Self {
        self.search_max_results = search_max_results;
        self.max_leads = max_leads;
        self
    }

    /// Report queries and filter decisions to `events`
    pub fn with_events(mut self, events: &'a dyn EventSink) -> Self {
        self.events = events;
        self
    }

    /// Search for `icp` and return the filtered leads.
    ///
    /// Queries are tried in order until one returns any hits. A search error
    /// is returned straight away; it is not treated as an empty result.
    pub async fn prospect(&self, icp: &str) -> Result<Vec<Lead>> {
        let mut raw_hits = Vec::new();

        for query in build_queries(icp) {
            self.events.emit(&PipelineEvent::QueryIssued {
                query: query.clone(),
            });

            raw_hits = self.search.search(&query, self.search_max_results).await?;

            self.events.emit(&PipelineEvent::RawResults {
                query,
                count: raw_hits.len(),
            });

            if !raw_hits.is_empty() {
                break;
            }
        }

        Ok(self
            .filter
            .filter_with_events(&raw_hits, self.max_leads, self.events))
    }
}
