//! Authentication endpoints
//!
//! Signup, login and logout. Login and signup open a session and set the
//! session cookie; login honors a `next` target (form field or query
//! parameter) so interrupted requests resume where they started. Invalid
//! credentials re-render the login form with an error instead of failing
//! the request.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::middleware::{AppState, PageError, SESSION_COOKIE};
use crate::models::form::{Form as BoundForm, NON_FIELD_ERRORS};
use crate::models::Session;
use crate::services::UserServiceError;

/// Login form fields
#[derive(Debug, Deserialize)]
pub struct LoginFormData {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

/// Signup form fields
#[derive(Debug, Deserialize)]
pub struct SignupFormData {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Query string carrying the post-login target
#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Build the session cookie for a fresh login
fn session_cookie(session: &Session) -> HeaderMap {
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        session.id,
        7 * 24 * 60 * 60
    );
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        headers.insert(header::SET_COOKIE, value);
    }
    headers
}

/// Build an expired session cookie for logout
fn clear_session_cookie() -> HeaderMap {
    let cookie = format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE);
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        headers.insert(header::SET_COOKIE, value);
    }
    headers
}

/// Only same-site relative targets are followed after login
fn safe_next(next: Option<String>) -> String {
    next.filter(|n| n.starts_with('/') && !n.starts_with("//"))
        .unwrap_or_else(|| "/".to_string())
}

/// GET /auth/login - login form
pub async fn login_page(Query(query): Query<NextQuery>) -> Json<serde_json::Value> {
    let mut form = BoundForm::new().value("username", "");
    if let Some(next) = query.next {
        form = form.value("next", next);
    }
    Json(json!({ "form": form }))
}

/// POST /auth/login - authenticate and open a session
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
    Form(data): Form<LoginFormData>,
) -> Result<Response, PageError> {
    match state.user_service.login(&data.username, &data.password).await {
        Ok((user, session)) => {
            tracing::info!(user_id = user.id, "login");
            let target = safe_next(data.next.or(query.next));
            Ok((session_cookie(&session), Redirect::to(&target)).into_response())
        }
        Err(UserServiceError::AuthenticationError(_)) => {
            let mut form = BoundForm::new().value("username", &data.username);
            form.add_error(NON_FIELD_ERRORS, "Invalid username or password");
            Ok(Json(json!({ "form": form })).into_response())
        }
        Err(UserServiceError::InternalError(err)) => Err(PageError::Internal(err)),
        Err(other) => Err(PageError::Internal(anyhow::anyhow!(other))),
    }
}

/// GET /auth/signup - signup form
pub async fn signup_page() -> Json<serde_json::Value> {
    let form = BoundForm::new().value("username", "");
    Json(json!({ "form": form }))
}

/// POST /auth/signup - register, open a session and go home
pub async fn signup(
    State(state): State<AppState>,
    Form(data): Form<SignupFormData>,
) -> Result<Response, PageError> {
    let mut form = BoundForm::new().value("username", &data.username);

    match state.user_service.signup(&data.username, &data.password).await {
        Ok(user) => {
            // Open a session for the fresh account
            let (_, session) = state
                .user_service
                .login(&data.username, &data.password)
                .await
                .map_err(|e| PageError::Internal(anyhow::anyhow!(e)))?;
            tracing::info!(user_id = user.id, "signup");
            Ok((session_cookie(&session), Redirect::to("/")).into_response())
        }
        Err(UserServiceError::UserExists(_)) => {
            form.add_error("username", "A user with that username already exists");
            Ok(Json(json!({ "form": form })).into_response())
        }
        Err(UserServiceError::ValidationError(message)) => {
            let field = if data.username.trim().is_empty() {
                "username"
            } else {
                "password"
            };
            form.add_error(field, message);
            Ok(Json(json!({ "form": form })).into_response())
        }
        Err(UserServiceError::InternalError(err)) => Err(PageError::Internal(err)),
        Err(other) => Err(PageError::Internal(anyhow::anyhow!(other))),
    }
}

/// GET/POST /auth/logout - close the session
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    if let Some(token) = token_from_cookie(&headers) {
        state
            .user_service
            .logout(&token)
            .await
            .map_err(|e| PageError::Internal(anyhow::anyhow!(e)))?;
    }
    Ok((clear_session_cookie(), Json(json!({}))).into_response())
}

fn token_from_cookie(headers: &HeaderMap) -> Option<String> {
    let cookie_str = headers.get(header::COOKIE)?.to_str().ok()?;
    cookie_str.split(';').find_map(|c| {
        c.trim()
            .strip_prefix(&format!("{}=", SESSION_COOKIE))
            .map(|t| t.to_string())
    })
}
