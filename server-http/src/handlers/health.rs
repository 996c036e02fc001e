use crate::state::AppState;
use axum::{extract::State, Json};
use shared_http::api::HealthResponse;

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "OK".into(),
        product_configured: state.product_id.is_some(),
    })
}
