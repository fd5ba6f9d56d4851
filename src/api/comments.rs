//! Comment mutation endpoints
//!
//! Editing and deleting comments is restricted to their author. The
//! access check runs before the handler body touches anything: a
//! non-author is told the comment does not exist, an anonymous actor is
//! sent to the login page with the original target in `next`.

use axum::{
    extract::{OriginalUri, Path, State},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde_json::json;

use crate::api::middleware::{guard, AppState, MaybeUser, PageError};
use crate::api::news::{comments_anchor, CommentFormData};
use crate::models::{Comment, Form as BoundForm};
use crate::services::access::{comment_access, Operation};
use crate::services::CommentServiceError;

fn map_service_error(err: CommentServiceError) -> PageError {
    match err {
        CommentServiceError::NotFound(_) => PageError::NotFound,
        // Moderation failures are handled before this mapping
        CommentServiceError::Rejected(reason) => {
            PageError::Internal(anyhow::anyhow!("unhandled moderation failure: {reason}"))
        }
        CommentServiceError::InternalError(err) => PageError::Internal(err),
    }
}

/// Load a comment and check the operation against its author
async fn load_guarded(
    state: &AppState,
    id: i64,
    actor: Option<i64>,
    operation: Operation,
    next: &str,
) -> Result<Comment, PageError> {
    let comment = state
        .comment_service
        .get(id)
        .await
        .map_err(map_service_error)?
        .ok_or(PageError::NotFound)?;
    guard(comment_access(actor, comment.author_id, operation), next)?;
    Ok(comment)
}

/// GET /comments/{id}/edit - edit form bound with the current text
pub async fn edit_page(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    user: MaybeUser,
) -> Result<Json<serde_json::Value>, PageError> {
    let comment = load_guarded(&state, id, user.actor(), Operation::Edit, uri.path()).await?;

    let form = BoundForm::new().value("text", &comment.text);
    Ok(Json(json!({ "comment": comment, "form": form })))
}

/// POST /comments/{id}/edit - replace the comment text
pub async fn edit(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    user: MaybeUser,
    Form(data): Form<CommentFormData>,
) -> Result<Response, PageError> {
    let comment = load_guarded(&state, id, user.actor(), Operation::Edit, uri.path()).await?;

    match state.comment_service.edit(comment.id, &data.text).await {
        Ok(()) => Ok(Redirect::to(&comments_anchor(comment.news_id)).into_response()),
        Err(CommentServiceError::Rejected(reason)) => {
            let mut form = BoundForm::new().value("text", &data.text);
            form.add_error("text", reason.to_string());
            Ok(Json(json!({ "comment": comment, "form": form })).into_response())
        }
        Err(err) => Err(map_service_error(err)),
    }
}

/// GET /comments/{id}/delete - deletion confirmation context
pub async fn delete_page(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    user: MaybeUser,
) -> Result<Json<serde_json::Value>, PageError> {
    let comment = load_guarded(&state, id, user.actor(), Operation::Delete, uri.path()).await?;
    Ok(Json(json!({ "comment": comment })))
}

/// POST/DELETE /comments/{id}/delete - remove the comment
pub async fn delete(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    user: MaybeUser,
) -> Result<Response, PageError> {
    let comment = load_guarded(&state, id, user.actor(), Operation::Delete, uri.path()).await?;

    state
        .comment_service
        .delete(comment.id)
        .await
        .map_err(map_service_error)?;
    Ok(Redirect::to(&comments_anchor(comment.news_id)).into_response())
}
