//! API middleware
//!
//! Session resolution, the authenticated-user extractors and the
//! per-request error type. The error type encodes the three terminal
//! outcomes of the access rules: not found, redirect-to-authenticate and
//! internal failure. Validation failures never reach it; handlers recover
//! those locally by re-rendering the form.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use std::convert::Infallible;
use std::sync::Arc;

use crate::models::User;
use crate::services::access::AccessDecision;
use crate::services::{CommentService, NewsService, NoteService, UserService};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub news_service: Arc<NewsService>,
    pub comment_service: Arc<CommentService>,
    pub note_service: Arc<NoteService>,
}

/// Authenticated user stored in request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Session cookie name
pub const SESSION_COOKIE: &str = "session";

/// Login page path; mutations by anonymous actors redirect here
pub const LOGIN_PATH: &str = "/auth/login";

/// Build the login redirect target carrying the original URL
pub fn login_redirect(next: &str) -> String {
    format!("{}?next={}", LOGIN_PATH, urlencoding::encode(next))
}

/// Terminal per-request outcome of the access rules
#[derive(Debug)]
pub enum PageError {
    /// Resource absent, or deliberately hidden from a non-owner
    NotFound,
    /// Anonymous actor on a protected operation
    RedirectToLogin { next: String },
    /// Unexpected failure
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for PageError {
    fn from(err: anyhow::Error) -> Self {
        PageError::Internal(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "Not Found" })),
            )
                .into_response(),
            PageError::RedirectToLogin { next } => {
                Redirect::to(&login_redirect(&next)).into_response()
            }
            PageError::Internal(err) => {
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "Internal Server Error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Turn an access decision into a handler result.
///
/// `next` is the original request target, used when an anonymous actor
/// must authenticate first.
pub fn guard(decision: AccessDecision, next: &str) -> Result<(), PageError> {
    match decision {
        AccessDecision::Proceed => Ok(()),
        AccessDecision::NotFound => Err(PageError::NotFound),
        AccessDecision::RedirectToLogin => Err(PageError::RedirectToLogin {
            next: next.to_string(),
        }),
    }
}

/// Extract the session token from request headers
fn extract_session_token(headers: &axum::http::HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    if let Some(cookie_header) = headers.get(header::COOKIE) {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie in cookie_str.split(';') {
                let cookie = cookie.trim();
                if let Some(token) = cookie.strip_prefix("session=") {
                    return Some(token.to_string());
                }
            }
        }
    }

    None
}

/// Session resolution middleware.
///
/// Resolves the session cookie to a user and stashes it in the request
/// extensions. Requests without a valid session simply proceed anonymous;
/// individual routes decide what that means.
pub async fn resolve_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_session_token(request.headers()) {
        if let Ok(Some(user)) = state.user_service.validate_session(&token).await {
            request.extensions_mut().insert(CurrentUser(user));
        }
    }
    next.run(request).await
}

/// Extractor for the optional authenticated user
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl MaybeUser {
    /// The actor's user id, `None` for anonymous requests
    pub fn actor(&self) -> Option<i64> {
        self.0.as_ref().map(|u| u.id)
    }
}

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(
            parts.extensions.get::<CurrentUser>().map(|u| u.0.clone()),
        ))
    }
}

/// Extractor that requires an authenticated user.
///
/// Anonymous requests are rejected with a redirect to the login page whose
/// `next` parameter points back at the requested URL.
#[derive(Debug, Clone)]
pub struct RequireUser(pub User);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<CurrentUser>() {
            Some(user) => Ok(RequireUser(user.0.clone())),
            None => Err(PageError::RedirectToLogin {
                next: parts.uri.path().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    fn headers_with(name: header::HeaderName, value: &str) -> axum::http::HeaderMap {
        let request = HttpRequest::builder()
            .uri("/test")
            .header(name, value)
            .body(Body::empty())
            .unwrap();
        request.headers().clone()
    }

    #[test]
    fn test_extract_session_token_from_cookie() {
        let headers = headers_with(header::COOKIE, "session=token-456; theme=dark");
        assert_eq!(extract_session_token(&headers), Some("token-456".to_string()));
    }

    #[test]
    fn test_extract_session_token_from_bearer() {
        let headers = headers_with(header::AUTHORIZATION, "Bearer token-123");
        assert_eq!(extract_session_token(&headers), Some("token-123".to_string()));
    }

    #[test]
    fn test_extract_session_token_none() {
        assert!(extract_session_token(&axum::http::HeaderMap::new()).is_none());
    }

    #[test]
    fn test_login_redirect_encodes_next() {
        assert_eq!(
            login_redirect("/notes/add"),
            "/auth/login?next=%2Fnotes%2Fadd"
        );
    }

    #[test]
    fn test_guard_maps_decisions() {
        assert!(guard(AccessDecision::Proceed, "/x").is_ok());
        assert!(matches!(
            guard(AccessDecision::NotFound, "/x"),
            Err(PageError::NotFound)
        ));
        assert!(matches!(
            guard(AccessDecision::RedirectToLogin, "/x"),
            Err(PageError::RedirectToLogin { next }) if next == "/x"
        ));
    }
}
