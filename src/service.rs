//! Request and response envelopes for serving the pipeline.

use crate::error::{LeadgenError, Result};
use crate::pipeline::Pipeline;
use crate::results::{EnrichedLead, Lead, PipelineState};
use serde::{Deserialize, Serialize};

/// Body of a prospecting request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProspectRequest {
    pub icp: String,
}

/// Everything a run produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProspectData {
    pub leads: Vec<Lead>,
    pub reports: Vec<EnrichedLead>,
    pub errors: Vec<String>,
}

impl From<PipelineState> for ProspectData {
    fn from(state: PipelineState) -> Self {
        Self {
            leads: state.leads,
            reports: state.reports,
            errors: state.errors,
        }
    }
}

/// Body returned when a run completed, even with recorded errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProspectResponse {
    pub status: String,
    pub data: ProspectData,
}

/// Body returned when a request could not be run at all
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&LeadgenError> for ErrorResponse {
    fn from(err: &LeadgenError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Body of a health check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub mode: String,
}

/// Static payload for liveness checks
pub fn health() -> HealthStatus {
    HealthStatus {
        status: "Lead engine operational".to_string(),
        mode: "prospect+research".to_string(),
    }
}

/// Run the pipeline for one request.
///
/// Only a missing ICP is refused. Search and research failures come back
/// inside `data.errors` of a successful response.
pub async fn handle_prospect(
    pipeline: &Pipeline,
    request: ProspectRequest,
) -> Result<ProspectResponse> {
    if request.icp.is_empty() {
        return Err(LeadgenError::InvalidInput(
            "ICP description is required".to_string(),
        ));
    }

    ::log::info!("Starting campaign for ICP: {}", request.icp);
    let state = pipeline.run(&request.icp).await;

    Ok(ProspectResponse {
        status: "success".to_string(),
        data: state.into(),
    })
}
