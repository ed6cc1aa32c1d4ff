use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{GeoPoint, Recommendation};
use crate::wizard::WizardState;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid recommendation data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// The wizard fields as they stood when the user confirmed.
///
/// Taken once at submission so edits made while the fetch is outstanding do
/// not leak into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub budget: String,
    pub price_estimate: String,
    pub province: Option<String>,
    pub district: Option<String>,
    pub sub_district: Option<String>,
    pub map_center: GeoPoint,
    pub radius: String,
}

impl From<&WizardState> for RecommendationRequest {
    fn from(state: &WizardState) -> Self {
        Self {
            budget: state.budget.clone(),
            price_estimate: state.price_estimate.clone(),
            province: state.province.clone(),
            district: state.district.clone(),
            sub_district: state.sub_district.clone(),
            map_center: state.map_center,
            radius: state.radius.clone(),
        }
    }
}

/// Produces the ingredient and recipe lists shown on the result step.
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Backend identifier, used in logs.
    fn name(&self) -> &'static str;

    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, SourceError>;
}
