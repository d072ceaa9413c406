use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::state::AppState;

use super::dto::{
    HealthResponse, PredictRequest, PredictResponse, SearchParams, SimilarParams, StatusResponse,
};
use super::ranker::{DatabaseStats, SearchHit, SimilarFoodSuggestion};

pub fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/ai/predict", get(predict_get).post(predict_post))
        .route("/ai/similar", get(similar_foods))
        .route("/ai/search", get(search_foods))
        .route("/ai/stats", get(database_stats))
        .route("/ai/status", get(ai_status))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[instrument(skip(state, payload))]
pub async fn predict_post(
    State(state): State<AppState>,
    Json(payload): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, (StatusCode, String)> {
    predict(&state, payload)
}

#[instrument(skip(state))]
pub async fn predict_get(
    State(state): State<AppState>,
    Query(params): Query<PredictRequest>,
) -> Result<Json<PredictResponse>, (StatusCode, String)> {
    predict(&state, params)
}

fn predict(
    state: &AppState,
    req: PredictRequest,
) -> Result<Json<PredictResponse>, (StatusCode, String)> {
    let food = req.food.trim();
    if food.is_empty() {
        warn!("predict called without a food description");
        return Err((
            StatusCode::BAD_REQUEST,
            "Food description is required".into(),
        ));
    }

    let category = req.category.as_deref();
    let response = if state.config.ai_enabled {
        PredictResponse {
            prediction: state.predictor.predict(food, req.quantity_g, category),
            similar_foods: state
                .predictor
                .similar_foods(food, state.config.similar_limit),
            success: true,
        }
    } else {
        PredictResponse {
            prediction: state.predictor.estimate_only(food, req.quantity_g, category),
            similar_foods: Vec::new(),
            success: true,
        }
    };

    info!(
        food = %food,
        source = ?response.prediction.source,
        confidence = ?response.prediction.confidence,
        calories = response.prediction.calories,
        "nutrients predicted"
    );
    Ok(Json(response))
}

#[instrument(skip(state))]
pub async fn similar_foods(
    State(state): State<AppState>,
    Query(params): Query<SimilarParams>,
) -> Json<Vec<SimilarFoodSuggestion>> {
    let limit = params.limit.unwrap_or(state.config.similar_limit);
    Json(state.predictor.similar_foods(&params.food, limit))
}

#[instrument(skip(state))]
pub async fn search_foods(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<SearchHit>> {
    let limit = params.limit.unwrap_or(state.config.search_limit);
    Json(state.predictor.search(&params.q, limit))
}

#[instrument(skip(state))]
pub async fn database_stats(State(state): State<AppState>) -> Json<DatabaseStats> {
    Json(state.predictor.database_stats())
}

#[instrument(skip(state))]
pub async fn ai_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        enabled: state.config.ai_enabled,
        foods_in_database: state.predictor.table().len(),
    })
}

#[instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: OffsetDateTime::now_utc(),
        ai_enabled: state.config.ai_enabled,
        foods_in_database: state.predictor.table().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::predictor::{Confidence, Source};

    fn request(food: &str) -> PredictRequest {
        PredictRequest {
            food: food.into(),
            quantity_g: None,
            category: None,
        }
    }

    #[tokio::test]
    async fn predict_post_returns_prediction_and_suggestions() {
        let state = AppState::fake();
        let Json(body) = predict_post(State(state), Json(request("100g chicken")))
            .await
            .expect("prediction succeeds");
        assert!(body.success);
        assert_eq!(body.prediction.matched_food.as_deref(), Some("chicken"));
        assert_eq!(body.prediction.confidence, Confidence::High);
        assert!(!body.similar_foods.is_empty());
        assert!(body.similar_foods.len() <= 3);
        assert_eq!(body.similar_foods[0].name, "chicken");
    }

    #[tokio::test]
    async fn predict_get_honours_quantity_and_category() {
        let state = AppState::fake();
        let params = PredictRequest {
            food: "rice".into(),
            quantity_g: Some(200.0),
            category: Some("Dinner".into()),
        };
        let Json(body) = predict_get(State(state), Query(params)).await.unwrap();
        assert_eq!(body.prediction.quantity_g, 200);
        assert_eq!(body.prediction.calories, 286);
    }

    #[tokio::test]
    async fn predict_rejects_blank_food() {
        let state = AppState::fake();
        let err = predict_post(State(state), Json(request("   ")))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn predict_with_ai_disabled_only_estimates() {
        let mut state = AppState::fake();
        let mut config = (*state.config).clone();
        config.ai_enabled = false;
        state.config = std::sync::Arc::new(config);

        let Json(body) = predict_post(State(state), Json(request("chicken")))
            .await
            .unwrap();
        assert_eq!(body.prediction.source, Source::AiEstimation);
        assert!(body.similar_foods.is_empty());
    }

    #[tokio::test]
    async fn search_and_stats_routes() {
        let state = AppState::fake();
        let Json(hits) = search_foods(
            State(state.clone()),
            Query(SearchParams {
                q: "ch".into(),
                limit: None,
            }),
        )
        .await;
        assert!(hits.len() <= 10);
        assert!(hits.iter().any(|h| h.name == "cheese"));

        let Json(stats) = database_stats(State(state.clone())).await;
        assert_eq!(stats.total_foods, state.predictor.table().len());

        let Json(status) = ai_status(State(state)).await;
        assert!(status.enabled);
    }

    #[tokio::test]
    async fn health_reports_table_size() {
        let state = AppState::fake();
        let Json(body) = health(State(state.clone())).await;
        assert_eq!(body.status, "healthy");
        assert_eq!(body.foods_in_database, state.predictor.table().len());
        let json = serde_json::to_value(&body).unwrap();
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn similar_route_uses_limit() {
        let state = AppState::fake();
        let Json(hits) = similar_foods(
            State(state),
            Query(SimilarParams {
                food: "grilled chicken".into(),
                limit: Some(1),
            }),
        )
        .await;
        assert_eq!(hits.len(), 1);
    }
}
