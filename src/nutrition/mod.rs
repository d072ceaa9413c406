pub mod cache;
pub mod category;
mod dto;
pub mod estimator;
pub mod handlers;
pub mod matcher;
pub mod normalize;
pub mod predictor;
pub mod ranker;
pub mod table;
pub mod weight;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::ai_routes())
        .merge(handlers::health_routes())
}
