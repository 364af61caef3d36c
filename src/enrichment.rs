//! Post-processing of researched page text.
//!
//! [`Enrichment::Passthrough`] keeps the raw preview only. A structured
//! extractor (typically model backed) can be plugged in through
//! [`Enrichment::StructuredExtract`] without touching the pipeline.

use crate::error::Result;
use crate::results::{CompanyProfile, ResearchReport};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Turns cleaned website text into a structured company profile
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, url: &str, content: &str) -> Result<CompanyProfile>;
}

/// How research reports are enriched after the page has been cleaned
#[derive(Clone, Default)]
pub enum Enrichment {
    /// Report the cleaned text as is
    #[default]
    Passthrough,
    /// Run an extractor over the cleaned text and attach its profile
    StructuredExtract(Arc<dyn Extractor>),
}

impl fmt::Debug for Enrichment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Enrichment::Passthrough => f.write_str("Passthrough"),
            Enrichment::StructuredExtract(_) => f.write_str("StructuredExtract"),
        }
    }
}

impl Enrichment {
    /// Enrich `report` using the full cleaned `content` it was built from
    pub async fn apply(&self, mut report: ResearchReport, content: &str) -> Result<ResearchReport> {
        match self {
            Enrichment::Passthrough => Ok(report),
            Enrichment::StructuredExtract(extractor) => {
                let profile = extractor.extract(&report.source_url, content).await?;
                report.profile = Some(profile);
                Ok(report)
            }
        }
    }
}
