use crate::pages::{dashboard, experience, PageContext};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Html,
    Extension,
};
use roster::{Collection, Viewer};
use tracing::error;

async fn collect_for_page(state: &AppState) -> Option<Collection> {
    match state.product_id.as_deref() {
        Some(product_id) => Some(state.collector.collect_active_memberships(product_id).await),
        None => {
            error!("WHOP_PRODUCT_ID is not set in the environment variables.");
            None
        }
    }
}

/// GET /dashboard/{company_id}
pub async fn dashboard_page(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(company_id): Path<String>,
) -> Html<String> {
    let access_level = state.access_policy.company_access(&viewer);
    let collection = collect_for_page(&state).await;

    let ctx = PageContext {
        viewer: &viewer,
        access_level,
        product_id: state.product_id.as_deref(),
        collection: collection.as_ref(),
        development: state.development,
    };
    Html(dashboard::render(&company_id, &ctx))
}

/// GET /experiences/{experience_id}
pub async fn experience_page(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(experience_id): Path<String>,
) -> Html<String> {
    let collection = collect_for_page(&state).await;
    let access_level = state.access_policy.experience_access(
        &viewer,
        collection.as_ref().map(Collection::memberships).unwrap_or(&[]),
    );

    let ctx = PageContext {
        viewer: &viewer,
        access_level,
        product_id: state.product_id.as_deref(),
        collection: collection.as_ref(),
        development: state.development,
    };
    Html(experience::render(&experience_id, &ctx))
}
