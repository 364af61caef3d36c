//! Observability hook for pipeline runs.
//!
//! Components report what they are doing through an [`EventSink`] instead of
//! writing to the console. [`LogSink`] forwards everything to the `log`
//! facade; [`NoopSink`] drops it.

use std::fmt;

/// Stages of a pipeline run, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Prospecting,
    Researching,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Prospecting => "PROSPECTING",
            Stage::Researching => "RESEARCHING",
            Stage::Done => "DONE",
        };
        f.write_str(name)
    }
}

/// Why the lead filter dropped a hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// URL contained this blacklist entry
    Blacklisted(String),
    /// Another hit with this domain was already accepted
    DuplicateDomain(String),
}

/// Something worth reporting during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    StageEntered { stage: Stage, icp: String },
    QueryIssued { query: String },
    RawResults { query: String, count: usize },
    HitRejected { url: String, reason: RejectReason },
    LeadAccepted { website: String },
    ResearchStarted { url: String },
    /// The fetch failed but research continued with an error marker
    FetchDegraded { url: String, message: String },
    ErrorRecorded { message: String },
}

/// Receiver for pipeline events
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &PipelineEvent);
}

/// Forwards events to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: &PipelineEvent) {
        match event {
            PipelineEvent::StageEntered { stage, icp } => {
                ::log::info!("--- {}: {} ---", stage, icp);
            }
            PipelineEvent::QueryIssued { query } => {
                ::log::debug!("Searching for: {}", query);
            }
            PipelineEvent::RawResults { query, count } => {
                ::log::debug!("Query {:?} returned {} raw results", query, count);
            }
            PipelineEvent::HitRejected { url, reason } => match reason {
                RejectReason::Blacklisted(entry) => {
                    ::log::debug!("Blacklisted ({}): {}", entry, url);
                }
                RejectReason::DuplicateDomain(domain) => {
                    ::log::debug!("Duplicate domain {}: {}", domain, url);
                }
            },
            PipelineEvent::LeadAccepted { website } => {
                ::log::debug!("Accepted lead: {}", website);
            }
            PipelineEvent::ResearchStarted { url } => {
                ::log::info!("Researching: {}", url);
            }
            PipelineEvent::FetchDegraded { url, message } => {
                ::log::warn!("Fetch degraded for {}: {}", url, message);
            }
            PipelineEvent::ErrorRecorded { message } => {
                ::log::error!("{}", message);
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: &PipelineEvent) {}
}

/// Collects events in memory, for assertions in tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    events: std::sync::Mutex<Vec<PipelineEvent>>,
}

#[cfg(test)]
impl RecordingSink {
    pub(crate) fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl EventSink for RecordingSink {
    fn emit(&self, event: &PipelineEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
