use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::{
    auth::session_token,
    classifier::{is_auth_route, is_public_route},
};

/// GateDecision
///
/// What the authentication gate does with a page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Signed-in visitor on a login/register page.
    RedirectHome,
    /// Anonymous visitor on a protected page. Carries the original path.
    RedirectLogin(String),
    Continue,
}

impl GateDecision {
    /// Location header for redirect decisions.
    pub fn location(&self) -> Option<String> {
        match self {
            GateDecision::RedirectHome => Some("/".to_string()),
            GateDecision::RedirectLogin(path) => {
                Some(format!("/login?redirect={}", escape_query_value(path)))
            }
            GateDecision::Continue => None,
        }
    }
}

/// decide
///
/// Session presence is the only input besides the path. Token validity and
/// expiry are not checked at this layer.
pub fn decide(path: &str, has_token: bool) -> GateDecision {
    if has_token && is_auth_route(path) {
        return GateDecision::RedirectHome;
    }
    if !has_token && !is_public_route(path) {
        return GateDecision::RedirectLogin(path.to_string());
    }
    GateDecision::Continue
}

/// Whether the gate runs for `path` at all.
///
/// Skipped: API routes, framework assets under `_next`, the favicon, and any
/// path containing a dot (static files).
pub fn gate_applies(path: &str) -> bool {
    let rest = path.strip_prefix('/').unwrap_or(path);
    !(rest.starts_with("api")
        || rest.starts_with("_next")
        || rest.starts_with("favicon.ico")
        || rest.contains('.'))
}

/// Characters escaped in the `redirect` query value. `/` is left as is so the
/// target stays readable; non-ASCII is always encoded.
const REDIRECT_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn escape_query_value(value: &str) -> String {
    utf8_percent_encode(value, REDIRECT_VALUE).to_string()
}

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
script-src 'self' 'unsafe-inline' 'unsafe-eval'; \
style-src 'self' 'unsafe-inline'; \
img-src 'self' data: blob: https:; \
font-src 'self' data:; \
connect-src 'self' https: wss:; \
frame-ancestors 'none'; \
base-uri 'self'; \
form-action 'self'";

/// Fixed security headers stamped on every gated response.
pub const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("content-security-policy", CONTENT_SECURITY_POLICY),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("x-xss-protection", "1; mode=block"),
    (
        "permissions-policy",
        "camera=(), microphone=(), geolocation=(), interest-cohort=()",
    ),
    (
        "cache-control",
        "private, no-cache, no-store, max-age=0, must-revalidate",
    ),
];

/// Overwrites `headers` with `SECURITY_HEADERS`.
pub fn apply_security_headers(headers: &mut HeaderMap) {
    for &(name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
}

/// auth_gate
///
/// Edge middleware for page routes. Redirects or passes the request through,
/// then stamps the security headers on whatever response results.
pub async fn auth_gate(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if !gate_applies(&path) {
        return next.run(request).await;
    }

    let has_token = session_token(request.headers()).is_some();
    let decision = decide(&path, has_token);
    tracing::debug!(%path, has_token, ?decision, "auth gate");

    let mut response = match decision.location() {
        Some(location) => Redirect::temporary(&location).into_response(),
        None => next.run(request).await,
    };

    apply_security_headers(response.headers_mut());
    response
}
