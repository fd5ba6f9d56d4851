//! Note endpoints
//!
//! Every note page requires an authenticated user; the `RequireUser`
//! extractor turns anonymous requests into a login redirect that carries
//! the original target. On top of that, a note is only ever visible to
//! its owner: the list silently filters, and detail/edit/delete answer
//! "not found" to anyone else.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::middleware::{guard, AppState, PageError, RequireUser};
use crate::models::{CreateNoteInput, Form as BoundForm, Note, UpdateNoteInput};
use crate::services::access::{note_access, Operation};
use crate::services::NoteServiceError;

/// Redirect target after a successful note mutation
const SUCCESS_PATH: &str = "/notes/done";

/// Note submission fields
#[derive(Debug, Deserialize)]
pub struct NoteFormData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub slug: Option<String>,
}

impl NoteFormData {
    fn bind(&self) -> BoundForm {
        BoundForm::new()
            .value("title", &self.title)
            .value("text", &self.text)
            .value("slug", self.slug.clone().unwrap_or_default())
    }
}

fn map_service_error(err: NoteServiceError) -> PageError {
    match err {
        NoteServiceError::NotFound(_) => PageError::NotFound,
        NoteServiceError::InternalError(err) => PageError::Internal(err),
        // Validation outcomes are turned into form errors before this
        other => PageError::Internal(anyhow::anyhow!("unhandled note failure: {other}")),
    }
}

/// Attach a validation failure to the bound form, or bubble everything else
fn form_or_error(err: NoteServiceError, form: &mut BoundForm) -> Result<(), PageError> {
    match err {
        NoteServiceError::DuplicateSlug(slug) => {
            form.add_error("slug", err_text_for_slug(&slug));
            Ok(())
        }
        NoteServiceError::ValidationError { field, message } => {
            form.add_error(field, message);
            Ok(())
        }
        other => Err(map_service_error(other)),
    }
}

fn err_text_for_slug(slug: &str) -> String {
    format!("{slug}{}", crate::services::SLUG_WARNING)
}

/// Load a note by slug and check the operation against its owner
async fn load_guarded(
    state: &AppState,
    slug: &str,
    actor: i64,
    operation: Operation,
) -> Result<Note, PageError> {
    let note = state
        .note_service
        .get_by_slug(slug)
        .await
        .map_err(map_service_error)?
        .ok_or(PageError::NotFound)?;
    // `next` is unused here: the actor is already authenticated
    guard(note_access(Some(actor), note.author_id, operation), "/notes")?;
    Ok(note)
}

/// GET /notes - the actor's own notes, nobody else's
pub async fn list(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<serde_json::Value>, PageError> {
    let object_list = state
        .note_service
        .list_owned_by(user.id)
        .await
        .map_err(map_service_error)?;
    Ok(Json(json!({ "object_list": object_list })))
}

/// GET /notes/add - empty creation form
pub async fn add_page(RequireUser(_user): RequireUser) -> Json<serde_json::Value> {
    let form = BoundForm::new().value("title", "").value("text", "").value("slug", "");
    Json(json!({ "form": form }))
}

/// POST /notes/add - create a note
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Form(data): Form<NoteFormData>,
) -> Result<Response, PageError> {
    let input = CreateNoteInput {
        title: data.title.clone(),
        text: data.text.clone(),
        slug: data.slug.clone(),
        author_id: user.id,
    };

    match state.note_service.create(input).await {
        Ok(_) => Ok(Redirect::to(SUCCESS_PATH).into_response()),
        Err(err) => {
            let mut form = data.bind();
            form_or_error(err, &mut form)?;
            Ok(Json(json!({ "form": form })).into_response())
        }
    }
}

/// GET /notes/done - post-mutation landing page
pub async fn done(RequireUser(_user): RequireUser) -> Json<serde_json::Value> {
    Json(json!({}))
}

/// GET /notes/{slug} - note detail, owner only
pub async fn detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RequireUser(user): RequireUser,
) -> Result<Json<serde_json::Value>, PageError> {
    let note = load_guarded(&state, &slug, user.id, Operation::Read).await?;
    Ok(Json(json!({ "note": note })))
}

/// GET /notes/{slug}/edit - edit form bound with the current fields
pub async fn edit_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RequireUser(user): RequireUser,
) -> Result<Json<serde_json::Value>, PageError> {
    let note = load_guarded(&state, &slug, user.id, Operation::Edit).await?;

    let form = BoundForm::new()
        .value("title", &note.title)
        .value("text", &note.text)
        .value("slug", &note.slug);
    Ok(Json(json!({ "note": note, "form": form })))
}

/// POST /notes/{slug}/edit - rebind the note's fields
pub async fn edit(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RequireUser(user): RequireUser,
    Form(data): Form<NoteFormData>,
) -> Result<Response, PageError> {
    let note = load_guarded(&state, &slug, user.id, Operation::Edit).await?;

    let input = UpdateNoteInput {
        title: data.title.clone(),
        text: data.text.clone(),
        slug: data.slug.clone(),
    };

    match state.note_service.update(&note, input).await {
        Ok(_) => Ok(Redirect::to(SUCCESS_PATH).into_response()),
        Err(err) => {
            let mut form = data.bind();
            form_or_error(err, &mut form)?;
            Ok(Json(json!({ "note": note, "form": form })).into_response())
        }
    }
}

/// GET /notes/{slug}/delete - deletion confirmation context
pub async fn delete_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RequireUser(user): RequireUser,
) -> Result<Json<serde_json::Value>, PageError> {
    let note = load_guarded(&state, &slug, user.id, Operation::Delete).await?;
    Ok(Json(json!({ "note": note })))
}

/// POST/DELETE /notes/{slug}/delete - remove the note
pub async fn delete(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RequireUser(user): RequireUser,
) -> Result<Response, PageError> {
    let note = load_guarded(&state, &slug, user.id, Operation::Delete).await?;

    state
        .note_service
        .delete(&note)
        .await
        .map_err(map_service_error)?;
    Ok(Redirect::to(SUCCESS_PATH).into_response())
}
