use serde::{Deserialize, Serialize};

/// A single hit as returned by the search provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Result title (if the provider gave one)
    #[serde(default)]
    pub title: Option<String>,

    /// Result URL, empty when the provider gave none
    #[serde(default)]
    pub href: String,

    /// Snippet shown under the result (if any)
    #[serde(default)]
    pub body: Option<String>,
}

impl SearchHit {
    /// Create a hit with all three fields present
    pub fn new(title: &str, href: &str, body: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            href: href.to_string(),
            body: Some(body.to_string()),
        }
    }
}

/// A candidate company derived from a search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub company_name: String,
    pub website: String,
    pub context: String,
}

impl From<&SearchHit> for Lead {
    fn from(hit: &SearchHit) -> Self {
        Self {
            company_name: hit.title.clone().unwrap_or_else(|| "Unknown".to_string()),
            website: hit.href.clone(),
            context: hit.body.clone().unwrap_or_default(),
        }
    }
}

/// Structured facts pulled out of a company website
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub summary: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub key_personnel: Vec<String>,
}

/// What the researcher learned from visiting one website
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchReport {
    pub source_url: String,

    /// Leading slice of the cleaned page text
    pub raw_content_preview: String,

    /// Character count of the cleaned text, after the content cap
    pub full_content_length: usize,

    /// Only present when a structured extractor ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<CompanyProfile>,
}

/// A lead with its research report attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedLead {
    #[serde(flatten)]
    pub lead: Lead,
    pub deep_dive: ResearchReport,
}

/// Mutable record threaded through a single pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineState {
    pub icp: String,
    pub leads: Vec<Lead>,
    pub reports: Vec<EnrichedLead>,
    pub errors: Vec<String>,
}

impl PipelineState {
    /// Fresh state for `icp` with nothing collected yet
    pub fn new(icp: &str) -> Self {
        Self {
            icp: icp.to_string(),
            ..Self::default()
        }
    }
}
