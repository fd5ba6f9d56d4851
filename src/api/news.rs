//! News endpoints
//!
//! The home page and the article detail page. The detail page doubles as
//! the comment submission target: an authenticated GET receives an empty
//! comment form in its context, and a POST runs the submission through
//! moderation before persisting.

use axum::{
    extract::{OriginalUri, Path, State},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::middleware::{AppState, MaybeUser, PageError};
use crate::models::Form as BoundForm;
use crate::services::CommentServiceError;

/// Comment submission fields
#[derive(Debug, Deserialize)]
pub struct CommentFormData {
    #[serde(default)]
    pub text: String,
}

/// Redirect target after a successful comment mutation
pub fn comments_anchor(news_id: i64) -> String {
    format!("/news/{news_id}#comments")
}

/// GET / - home page with the most recent articles
pub async fn home(State(state): State<AppState>) -> Result<Json<serde_json::Value>, PageError> {
    let object_list = state.news_service.home_page().await?;
    Ok(Json(json!({ "object_list": object_list })))
}

/// GET /news/{id} - article detail with its comment thread
///
/// Authenticated visitors also get an empty comment form in the context;
/// anonymous visitors never receive a `form` key.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    user: MaybeUser,
) -> Result<Json<serde_json::Value>, PageError> {
    let (news, comments) = state.news_service.detail(id).await?.ok_or(PageError::NotFound)?;

    let mut context = json!({ "news": news, "comments": comments });
    if user.0.is_some() {
        context["form"] = json!(BoundForm::new().value("text", ""));
    }
    Ok(Json(context))
}

/// POST /news/{id} - submit a comment on the article
pub async fn submit_comment(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    user: MaybeUser,
    Form(data): Form<CommentFormData>,
) -> Result<Response, PageError> {
    let news = state.news_service.get(id).await?.ok_or(PageError::NotFound)?;

    let user = match user.0 {
        Some(user) => user,
        None => {
            return Err(PageError::RedirectToLogin {
                next: uri.path().to_string(),
            })
        }
    };

    match state.comment_service.create(news.id, user.id, &data.text).await {
        Ok(_) => Ok(Redirect::to(&comments_anchor(news.id)).into_response()),
        Err(CommentServiceError::Rejected(reason)) => {
            // Validation failure: re-render the detail context with the
            // bound form and its field error, nothing persisted.
            let mut form = BoundForm::new().value("text", &data.text);
            form.add_error("text", reason.to_string());

            let (news, comments) = state
                .news_service
                .detail(id)
                .await?
                .ok_or(PageError::NotFound)?;
            Ok(Json(json!({ "news": news, "comments": comments, "form": form })).into_response())
        }
        Err(CommentServiceError::NotFound(_)) => Err(PageError::NotFound),
        Err(CommentServiceError::InternalError(err)) => Err(PageError::Internal(err)),
    }
}
