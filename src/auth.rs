use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::convert::Infallible;

/// Name of the cookie holding the opaque session token.
pub const SESSION_COOKIE: &str = "token";

/// Session lifetime when the user ticks "remember me".
const REMEMBER_DAYS: i64 = 7;
/// Session lifetime otherwise.
const SESSION_DAYS: i64 = 1;

/// The session token carried by `headers`, if any. An empty value counts as absent.
///
/// The token is never decoded or verified here; only its presence matters.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// SessionToken
///
/// Extractor for the raw session token. Never rejects: a visitor without a
/// session simply yields `SessionToken(None)`, and the backend decides what an
/// anonymous call may do.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionToken(pub Option<String>);

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionToken(session_token(&parts.headers)))
    }
}

/// Cookie set after a successful login: httpOnly, `SameSite=Lax`, path `/`,
/// seven days with `remember`, one day without.
pub fn session_cookie(token: &str, remember: bool, secure: bool) -> Cookie<'static> {
    let days = if remember { REMEMBER_DAYS } else { SESSION_DAYS };

    Cookie::build((SESSION_COOKIE, token.to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::days(days))
        .build()
}

/// Expired cookie that clears the session on logout.
pub fn cleared_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::ZERO)
        .build()
}
