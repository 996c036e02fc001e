use crate::handlers;
use crate::middleware::viewer_middleware;
use crate::state::AppState;
use axum::{http::StatusCode, middleware, routing::get, Router};
use shared::config::Config;
use tower_http::normalize_path::NormalizePath;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build and configure the application router.
///
/// Trailing slashes are trimmed before routing, so the router is returned
/// wrapped in [`NormalizePath`].
pub fn build_router(state: AppState, config: &Config) -> NormalizePath<Router> {
    // Routes that need a forwarded user identity
    let viewer_routes = Router::new()
        .route("/dashboard/{company_id}", get(handlers::dashboard_page))
        .route("/experiences/{experience_id}", get(handlers::experience_page))
        .route("/api/memberships", get(handlers::list_memberships))
        .route_layer(middleware::from_fn(viewer_middleware));

    let router = Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        .merge(viewer_routes)
        // Middleware
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    NormalizePath::trim_trailing_slash(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::authentication::{USERNAME_HEADER, USER_ID_HEADER, USER_NAME_HEADER};
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::Request,
        response::Response,
    };
    use roster::{CustomerProfile, MembershipPage, MembershipRecord, MembershipSource, PageRequest};
    use serde_json::Value;
    use shared::Error;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tower::ServiceExt;

    type App = NormalizePath<Router>;

    struct FakeSource {
        pages: Mutex<VecDeque<shared::Result<MembershipPage>>>,
        calls: Mutex<u32>,
    }

    impl FakeSource {
        fn new(pages: Vec<shared::Result<MembershipPage>>) -> Arc<Self> {
            Arc::new(Self {
                pages: Mutex::new(pages.into()),
                calls: Mutex::new(0),
            })
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl MembershipSource for FakeSource {
        async fn fetch_page(&self, _request: &PageRequest) -> shared::Result<MembershipPage> {
            *self.calls.lock().unwrap() += 1;
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(MembershipPage::default()))
        }
    }

    fn member(id: &str, user_id: &str, name: &str) -> MembershipRecord {
        MembershipRecord {
            id: id.to_string(),
            status: "active".to_string(),
            customer: CustomerProfile {
                id: Some(user_id.to_string()),
                name: Some(name.to_string()),
                email: Some(format!("{user_id}@example.com")),
                ..Default::default()
            },
            created_at: Some("2025-03-01T10:00:00Z".to_string()),
            updated_at: None,
        }
    }

    /// Never answers within any reasonable request deadline.
    struct StalledSource;

    #[async_trait]
    impl MembershipSource for StalledSource {
        async fn fetch_page(&self, _request: &PageRequest) -> shared::Result<MembershipPage> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(MembershipPage::default())
        }
    }

    fn test_config(product_id: Option<&str>) -> Config {
        let product_id = product_id.map(str::to_string);
        Config::from_lookup(move |key| match key {
            "WHOP_PRODUCT_ID" => product_id.clone(),
            "ROSTER_ADMIN_USER_IDS" => Some("user_admin".to_string()),
            "ROSTER_REQUEST_TIMEOUT_SECS" => Some("2".to_string()),
            _ => None,
        })
    }

    fn app(source: Arc<FakeSource>, product_id: Option<&str>) -> App {
        let config = test_config(product_id);
        build_router(AppState::with_source(source, &config), &config)
    }

    async fn get_as(router: App, uri: &str, user_id: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(user_id) = user_id {
            builder = builder
                .header(USER_ID_HEADER, user_id)
                .header(USER_NAME_HEADER, "Grace")
                .header(USERNAME_HEADER, "grace");
        }
        router
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = get_as(app(FakeSource::new(vec![]), None), "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["message"], "OK");
        assert_eq!(json["product_configured"], false);
    }

    #[tokio::test]
    async fn test_trailing_slash_is_trimmed_before_routing() {
        let response = get_as(app(FakeSource::new(vec![]), None), "/health/", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let source = FakeSource::new(vec![Ok(MembershipPage::default())]);
        let response = get_as(
            app(source.clone(), Some("prod_123")),
            "/dashboard/biz_1/",
            Some("user_admin"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_upstream_hits_request_deadline() {
        let config = test_config(Some("prod_123"));
        let router = build_router(
            AppState::with_source(Arc::new(StalledSource), &config),
            &config,
        );

        let response = get_as(router, "/dashboard/biz_1", Some("user_admin")).await;

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_pages_require_user_identity() {
        let source = FakeSource::new(vec![]);
        let response = get_as(app(source.clone(), Some("prod_123")), "/dashboard/biz_1", None).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_dashboard_without_product_shows_configuration_error() {
        let source = FakeSource::new(vec![]);
        let response = get_as(app(source.clone(), None), "/dashboard/biz_1", Some("user_admin")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Configuration Error"));
        assert!(html.contains("Active App Users (0)"));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_dashboard_lists_members() {
        let source = FakeSource::new(vec![
            Ok(MembershipPage::new(vec![
                member("m1", "user_a", "Ada"),
                member("m2", "user_b", "<b>Bob</b>"),
            ])),
            Ok(MembershipPage::default()),
        ]);
        let response = get_as(
            app(source.clone(), Some("prod_123")),
            "/dashboard/biz_1",
            Some("user_admin"),
        )
        .await;

        let html = body_text(response).await;
        assert!(html.contains("Company ID: biz_1"));
        assert!(html.contains("Active App Users (2)"));
        assert!(html.contains("Hi <strong>Grace</strong>"));
        assert!(html.contains("Your access level: <strong>admin</strong>"));
        assert!(html.contains("&lt;b&gt;Bob&lt;/b&gt;"));
        assert!(!html.contains("<b>Bob</b>"));
        assert!(!html.contains("truncation-notice"));
        assert!(!html.contains("Debug Info"));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_dashboard_empty_product() {
        let source = FakeSource::new(vec![Ok(MembershipPage::default())]);
        let response = get_as(
            app(source, Some("prod_123")),
            "/dashboard/biz_1",
            Some("user_other"),
        )
        .await;

        let html = body_text(response).await;
        assert!(html.contains("No active users found for this product."));
        assert!(html.contains("do not have access"));
        assert!(html.contains("<strong>no_access</strong>"));
    }

    #[tokio::test]
    async fn test_dashboard_flags_truncated_list() {
        let source = FakeSource::new(vec![
            Ok(MembershipPage::new(vec![member("m1", "user_a", "Ada")])),
            Err(Error::Status(500)),
        ]);
        let response = get_as(
            app(source, Some("prod_123")),
            "/dashboard/biz_1",
            Some("user_admin"),
        )
        .await;

        let html = body_text(response).await;
        assert!(html.contains("Active App Users (1)"));
        assert!(html.contains("loading stopped at page 2"));
    }

    #[tokio::test]
    async fn test_experience_page_grants_customer_access_to_members() {
        let source = FakeSource::new(vec![
            Ok(MembershipPage::new(vec![member("m1", "user_a", "Ada")])),
            Ok(MembershipPage::default()),
        ]);
        let response = get_as(
            app(source, Some("prod_123")),
            "/experiences/exp_1",
            Some("user_a"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Experience: <span>exp_1</span>"));
        assert!(html.contains("1 total"));
        assert!(html.contains("<strong>customer</strong>"));
    }

    #[tokio::test]
    async fn test_experience_page_without_product() {
        let source = FakeSource::new(vec![]);
        let response = get_as(app(source.clone(), None), "/experiences/exp_1", Some("user_a")).await;

        let html = body_text(response).await;
        assert!(html.contains("Set WHOP_PRODUCT_ID to view users."));
        assert!(html.contains("<strong>no_access</strong>"));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_list_memberships_requires_admin() {
        let source = FakeSource::new(vec![]);
        let response = get_as(
            app(source.clone(), Some("prod_123")),
            "/api/memberships",
            Some("user_a"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_list_memberships_without_product() {
        let response = get_as(
            app(FakeSource::new(vec![]), None),
            "/api/memberships",
            Some("user_admin"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["error"], "missing configuration: WHOP_PRODUCT_ID");
    }

    #[tokio::test]
    async fn test_list_memberships_reports_completeness() {
        let source = FakeSource::new(vec![
            Ok(MembershipPage::new(vec![
                member("m1", "user_a", "Ada"),
                member("m2", "user_b", "Bob"),
            ])),
            Err(Error::Transport("connection reset".to_string())),
        ]);
        let response = get_as(
            app(source, Some("prod_123")),
            "/api/memberships",
            Some("user_admin"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["product_id"], "prod_123");
        assert_eq!(json["count"], 2);
        assert_eq!(json["complete"], false);
        assert_eq!(json["failed_page"], 2);
        assert_eq!(json["memberships"][1]["id"], "m2");
    }
}
