use crate::middleware::check_admin;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Extension, Json};
use roster::Viewer;
use shared::Error;
use shared_http::api::{ErrorResponse, MembershipsResponse};
use tracing::{error, info};

/// GET /api/memberships - All active memberships for the configured product
pub async fn list_memberships(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Result<Json<MembershipsResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = check_admin(&state.access_policy, &viewer) {
        return Err((e, Json(ErrorResponse::new("Insufficient permissions"))));
    }

    let Some(product_id) = state.product_id.as_deref() else {
        let e = Error::MissingConfig("WHOP_PRODUCT_ID");
        error!("Cannot list memberships: {}", e);
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::new(e.to_string())),
        ));
    };

    info!(
        "LIST_MEMBERSHIPS: product_id={}, requested_by={}",
        product_id, viewer.user_id
    );

    let collection = state.collector.collect_active_memberships(product_id).await;
    Ok(Json(MembershipsResponse::from_collection(
        product_id, collection,
    )))
}
