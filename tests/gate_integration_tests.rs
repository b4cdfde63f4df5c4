use admin_pro::{
    AppConfig, AppState, BackendState, CacheState, MockBackend, RevalidationRegistry,
    cache::CacheInvalidator, create_router, middleware::SECURITY_HEADERS, models::PageShell,
};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use std::sync::Arc;
use tower::util::ServiceExt;

// --- Test Harness ---

fn app_with_cache(cache: Arc<RevalidationRegistry>) -> Router {
    let state = AppState {
        backend: Arc::new(MockBackend::new()) as BackendState,
        cache: cache as CacheState,
        config: AppConfig::default(),
    };
    create_router(state)
}

fn app() -> Router {
    app_with_cache(Arc::new(RevalidationRegistry::new()))
}

async fn get(app: Router, uri: &str, token: Option<&str>) -> Response {
    let mut request = Request::builder().uri(uri);
    if let Some(token) = token {
        request = request.header(header::COOKIE, format!("token={token}"));
    }
    app.oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect without Location")
        .to_str()
        .unwrap()
}

async fn page_shell(response: Response) -> PageShell {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// --- Redirects ---

#[tokio::test]
async fn test_anonymous_protected_page_redirects_to_login() {
    let response = get(app(), "/users", None).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?redirect=/users");
}

#[tokio::test]
async fn test_anonymous_dashboard_redirects_with_root_target() {
    let response = get(app(), "/", None).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?redirect=/");
}

#[tokio::test]
async fn test_nested_path_is_preserved_in_redirect() {
    let response = get(app(), "/users/123/edit", None).await;

    assert_eq!(location(&response), "/login?redirect=/users/123/edit");
}

#[tokio::test]
async fn test_redirect_target_is_escaped_as_query_value() {
    let response = get(app(), "/users/a%20b", None).await;

    assert_eq!(location(&response), "/login?redirect=/users/a%2520b");
}

#[tokio::test]
async fn test_signed_in_visitor_leaves_login_page() {
    let response = get(app(), "/login", Some("abc")).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_signed_in_visitor_leaves_register_page() {
    let response = get(app(), "/register", Some("abc")).await;

    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_empty_cookie_counts_as_anonymous() {
    let response = get(app(), "/settings", Some("")).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?redirect=/settings");
}

// --- Pass-through ---

#[tokio::test]
async fn test_anonymous_login_page_passes() {
    let response = get(app(), "/login", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let shell = page_shell(response).await;
    assert_eq!(shell.title, "登录");
    assert_eq!(shell.permission, None);
}

#[tokio::test]
async fn test_legal_pages_pass_with_or_without_session() {
    for token in [None, Some("abc")] {
        let response = get(app(), "/privacy", token).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_signed_in_page_resolves_shell() {
    let response = get(app(), "/users/42", Some("abc")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let shell = page_shell(response).await;
    assert_eq!(shell.path, "/users/42");
    assert_eq!(shell.permission.as_deref(), Some("users:view"));
    assert_eq!(shell.label.as_deref(), Some("用户管理"));
    // Titles are exact-match only.
    assert_eq!(shell.title, "Admin Pro");
    assert_eq!(shell.revision, 0);
}

#[tokio::test]
async fn test_shell_revision_follows_revalidation() {
    let cache = Arc::new(RevalidationRegistry::new());
    cache.revalidate_path("/calendar");
    cache.revalidate_path("/calendar");

    let response = get(app_with_cache(cache), "/calendar", Some("abc")).await;

    let shell = page_shell(response).await;
    assert_eq!(shell.title, "日历");
    assert_eq!(shell.revision, 2);
}

// --- Security Headers ---

#[tokio::test]
async fn test_security_headers_on_every_gated_response() {
    let cases = [
        ("/users", None, StatusCode::TEMPORARY_REDIRECT),
        ("/login", Some("abc"), StatusCode::TEMPORARY_REDIRECT),
        ("/login", None, StatusCode::OK),
        ("/", Some("abc"), StatusCode::OK),
    ];

    for (uri, token, status) in cases {
        let response = get(app(), uri, token).await;
        assert_eq!(response.status(), status, "{uri}");
        for (name, value) in SECURITY_HEADERS {
            assert_eq!(
                response.headers().get(*name).and_then(|v| v.to_str().ok()),
                Some(*value),
                "{name} missing on {uri}"
            );
        }
    }

    let response = get(app(), "/", Some("abc")).await;
    assert_eq!(response.headers()["x-frame-options"], "DENY");
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
}

// --- Matcher Exclusions ---

#[tokio::test]
async fn test_api_routes_bypass_gate() {
    let response = get(app(), "/api/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-frame-options").is_none());
}

#[tokio::test]
async fn test_static_assets_bypass_gate() {
    for uri in ["/favicon.ico", "/logo.svg", "/_next/static/app.js"] {
        let response = get(app(), uri, None).await;
        // Not redirected; there is nothing to serve, so 404.
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert!(response.headers().get(header::LOCATION).is_none());
    }
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let response = get(app(), "/api/health", None).await;

    assert!(response.headers().contains_key("x-request-id"));
}
