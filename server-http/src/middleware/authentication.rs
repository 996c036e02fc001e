use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use roster::Viewer;
use shared_http::api::ErrorResponse;
use tracing::debug;

/// Headers the platform proxy attaches once it has verified the user token.
pub const USER_ID_HEADER: &str = "x-whop-user-id";
pub const USER_NAME_HEADER: &str = "x-whop-user-name";
pub const USERNAME_HEADER: &str = "x-whop-username";

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Extract the viewer identity from forwarded headers
pub fn extract_viewer(headers: &HeaderMap) -> Option<Viewer> {
    let user_id = header_value(headers, USER_ID_HEADER)?;
    Some(Viewer {
        user_id,
        name: header_value(headers, USER_NAME_HEADER),
        username: header_value(headers, USERNAME_HEADER),
    })
}

/// Viewer middleware
pub async fn viewer_middleware(mut request: Request, next: Next) -> Result<Response, Response> {
    let viewer = match extract_viewer(request.headers()) {
        Some(viewer) => viewer,
        None => {
            debug!("Rejecting {} without a user identity", request.uri());
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Missing user identity")),
            )
                .into_response());
        }
    };

    // Attach viewer to request extensions
    request.extensions_mut().insert(viewer);

    Ok(next.run(request).await)
}
