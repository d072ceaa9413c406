use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::predictor::NutrientEstimate;
use super::ranker::SimilarFoodSuggestion;

/// Body of `POST /ai/predict`, also accepted as the query of `GET /ai/predict`.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub food: String,
    pub quantity_g: Option<f64>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: NutrientEstimate,
    pub similar_foods: Vec<SimilarFoodSuggestion>,
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SimilarParams {
    #[serde(default)]
    pub food: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub enabled: bool,
    pub foods_in_database: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub ai_enabled: bool,
    pub foods_in_database: usize,
}
