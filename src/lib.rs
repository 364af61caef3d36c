//! Lead generation from an Ideal Customer Profile (ICP).
//!
//! A run searches the web for companies matching the ICP, filters the hits
//! down to a handful of distinct company websites, then visits the first few
//! of them and reports what they say.

// Re-export modules
pub mod config;
pub mod enrichment;
pub mod error;
pub mod events;
pub mod filter;
pub mod parsers;
pub mod pipeline;
pub mod prospector;
pub mod researcher;
pub mod results;
pub mod service;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use config::PipelineConfig;
pub use enrichment::{Enrichment, Extractor};
pub use error::{LeadgenError, Result};
pub use events::{EventSink, LogSink, NoopSink, PipelineEvent, Stage};
pub use filter::LeadFilter;
pub use pipeline::Pipeline;
pub use results::{CompanyProfile, EnrichedLead, Lead, PipelineState, ResearchReport, SearchHit};
