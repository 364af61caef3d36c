use crate::events::{EventSink, NoopSink, PipelineEvent, RejectReason};
use crate::results::{Lead, SearchHit};
use std::collections::HashSet;

/// URL fragments that identify aggregators, directories and platforms rather
/// than company websites
pub const DEFAULT_BLACKLIST: &[&str] = &[
    "wikipedia.org",
    "linkedin.com/lists",
    "clutch.co",
    "yelp.com",
    "top10",
    "best of",
    "google.com",
    "support.google.com",
    "play.google.com",
];

/// Turns raw search hits into a short list of distinct candidate companies
#[derive(Debug, Clone)]
pub struct LeadFilter {
    /// Lowercased blacklist entries
    blacklist: Vec<String>,
}

impl Default for LeadFilter {
    fn default() -> Self {
        Self::new(DEFAULT_BLACKLIST.iter().copied())
    }
}

impl LeadFilter {
    /// Cap used when the caller has no opinion
    pub const DEFAULT_MAX_RESULTS: usize = 5;

    /// Create a filter from a list of blacklist substrings
    pub fn new<I, S>(blacklist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            blacklist: blacklist
                .into_iter()
                .map(|entry| entry.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Blacklist entries, lowercased
    pub fn blacklist(&self) -> &[String] {
        &self.blacklist
    }

    /// Filter hits down to at most `max_results` leads with distinct domains
    pub fn filter(&self, raw_hits: &[SearchHit], max_results: usize) -> Vec<Lead> {
        self.filter_with_events(raw_hits, max_results, &NoopSink)
    }

    /// Same as [`LeadFilter::filter`], reporting each decision to `events`
    pub fn filter_with_events(
        &self,
        raw_hits: &[SearchHit],
        max_results: usize,
        events: &dyn EventSink,
    ) -> Vec<Lead> {
        let mut leads = Vec::new();
        let mut seen_domains = HashSet::new();

        for hit in raw_hits {
            if leads.len() >= max_results {
                break;
            }

            let href = hit.href.to_lowercase();

            if let Some(entry) = self.blacklisted_by(&href) {
                events.emit(&PipelineEvent::HitRejected {
                    url: hit.href.clone(),
                    reason: RejectReason::Blacklisted(entry.to_string()),
                });
                continue;
            }

            let domain = naive_domain(&href);
            if !seen_domains.insert(domain.to_string()) {
                events.emit(&PipelineEvent::HitRejected {
                    url: hit.href.clone(),
                    reason: RejectReason::DuplicateDomain(domain.to_string()),
                });
                continue;
            }

            events.emit(&PipelineEvent::LeadAccepted {
                website: hit.href.clone(),
            });
            leads.push(Lead::from(hit));
        }

        leads
    }

    /// First blacklist entry contained in an already lowercased URL
    fn blacklisted_by(&self, href: &str) -> Option<&str> {
        self.blacklist
            .iter()
            .find(|entry| href.contains(entry.as_str()))
            .map(String::as_str)
    }
}

/// Domain key used for deduplication.
///
/// If the URL contains `//` this is its third `/`-separated segment, otherwise
/// the whole URL. Not real URL parsing: `"a/b//c"` yields `""` and a bare
/// `"acme.io/about"` is its own domain. Keep it this way, existing lead lists
/// were deduplicated with exactly this rule.
pub fn naive_domain(url: &str) -> &str {
    if url.contains("//") {
        url.split('/').nth(2).unwrap_or_default()
    } else {
        url
    }
}
