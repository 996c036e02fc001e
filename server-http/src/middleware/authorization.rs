use axum::http::StatusCode;
use roster::{AccessLevel, AccessPolicy, Viewer};

/// Helper function to require company admin access in route handlers
pub fn check_admin(policy: &AccessPolicy, viewer: &Viewer) -> Result<(), StatusCode> {
    match policy.company_access(viewer) {
        AccessLevel::Admin => Ok(()),
        _ => Err(StatusCode::FORBIDDEN),
    }
}
