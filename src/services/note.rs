//! Note service
//!
//! Creation, editing and deletion of personal notes, including slug
//! assignment. A requested slug is validated against every persisted note
//! (excluding the note itself on edit) and rejected with the colliding
//! value prefixed to a fixed warning. An omitted slug is derived from the
//! title by transliteration and used as-is: that path performs no
//! uniqueness re-check, matching the observed behavior of the submission
//! form, and relies on the store's UNIQUE constraint as the final
//! serialization point.

use crate::db::repositories::NoteRepository;
use crate::models::{CreateNoteInput, Note, UpdateNoteInput};
use crate::services::slug::slugify;
use anyhow::Context;
use std::sync::Arc;

/// Warning suffix appended to a colliding slug value
pub const SLUG_WARNING: &str = " - такой slug уже существует, придумайте уникальное значение!";

/// Error types for note service operations
#[derive(Debug, thiserror::Error)]
pub enum NoteServiceError {
    /// Note not found
    #[error("Note not found: {0}")]
    NotFound(String),

    /// A requested slug is already in use; carries the colliding value
    #[error("{0}{SLUG_WARNING}")]
    DuplicateSlug(String),

    /// Validation error (missing required field)
    #[error("{message}")]
    ValidationError {
        field: &'static str,
        message: &'static str,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Note service
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
}

impl NoteService {
    /// Create a new note service
    pub fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self { repo }
    }

    /// Create a note for the given owner.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if the title or text is empty
    /// - `DuplicateSlug` if an explicitly requested slug already exists
    pub async fn create(&self, input: CreateNoteInput) -> Result<Note, NoteServiceError> {
        validate_fields(&input.title, &input.text)?;
        let slug = self
            .assign_slug(&input.title, input.slug.as_deref(), None)
            .await?;

        let note = self
            .repo
            .create(&input.title, &input.text, &slug, input.author_id)
            .await
            .context("Failed to create note")?;
        tracing::debug!(note_id = note.id, slug = %note.slug, "note created");
        Ok(note)
    }

    /// All notes owned by the given user
    pub async fn list_owned_by(&self, author_id: i64) -> Result<Vec<Note>, NoteServiceError> {
        Ok(self
            .repo
            .list_owned_by(author_id)
            .await
            .context("Failed to list notes")?)
    }

    /// Look up a note by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Note>, NoteServiceError> {
        Ok(self
            .repo
            .get_by_slug(slug)
            .await
            .context("Failed to fetch note")?)
    }

    /// Rebind a note's fields from an edit submission.
    ///
    /// The slug rules match creation, except the note's own slug never
    /// counts as a collision.
    pub async fn update(&self, note: &Note, input: UpdateNoteInput) -> Result<Note, NoteServiceError> {
        validate_fields(&input.title, &input.text)?;
        let slug = self
            .assign_slug(&input.title, input.slug.as_deref(), Some(note.id))
            .await?;

        let updated = Note {
            id: note.id,
            title: input.title,
            text: input.text,
            slug,
            author_id: note.author_id,
        };
        let found = self
            .repo
            .update(&updated)
            .await
            .context("Failed to update note")?;
        if !found {
            return Err(NoteServiceError::NotFound(note.slug.clone()));
        }
        Ok(updated)
    }

    /// Delete a note
    pub async fn delete(&self, note: &Note) -> Result<(), NoteServiceError> {
        let deleted = self.repo.delete(note.id).await.context("Failed to delete note")?;
        if !deleted {
            return Err(NoteServiceError::NotFound(note.slug.clone()));
        }
        Ok(())
    }

    /// Resolve the slug to store for a submission.
    ///
    /// A provided slug must be unused (aside from `exclude_id`); an empty
    /// one is derived from the title without a uniqueness re-check.
    async fn assign_slug(
        &self,
        title: &str,
        requested: Option<&str>,
        exclude_id: Option<i64>,
    ) -> Result<String, NoteServiceError> {
        match requested.map(str::trim).filter(|s| !s.is_empty()) {
            Some(slug) => {
                let taken = match exclude_id {
                    Some(id) => self.repo.exists_by_slug_excluding(slug, id).await,
                    None => self.repo.exists_by_slug(slug).await,
                }
                .context("Failed to check slug uniqueness")?;
                if taken {
                    return Err(NoteServiceError::DuplicateSlug(slug.to_string()));
                }
                Ok(slug.to_string())
            }
            None => Ok(slugify(title)),
        }
    }
}

fn validate_fields(title: &str, text: &str) -> Result<(), NoteServiceError> {
    if title.trim().is_empty() {
        return Err(NoteServiceError::ValidationError {
            field: "title",
            message: "This field is required",
        });
    }
    if text.trim().is_empty() {
        return Err(NoteServiceError::ValidationError {
            field: "text",
            message: "This field is required",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{NoteRepository, SqlxNoteRepository, SqlxUserRepository, UserRepository};
    use crate::db::{create_test_pool, migrations};
    use crate::models::User;

    async fn setup() -> (NoteService, Arc<dyn NoteRepository>, i64) {
        let pool = create_test_pool().await.unwrap();
        migrations::run_migrations(&pool).await.unwrap();
        let author = SqlxUserRepository::new(pool.clone())
            .create(&User::new("author".to_string(), "hash".to_string()))
            .await
            .unwrap();
        let repo = SqlxNoteRepository::boxed(pool);
        (NoteService::new(repo.clone()), repo, author.id)
    }

    #[tokio::test]
    async fn test_create_with_requested_slug() {
        let (service, _repo, author_id) = setup().await;
        let note = service
            .create(CreateNoteInput::new("Новый заголовок", "Новый текст", author_id).with_slug("new-slug"))
            .await
            .unwrap();

        assert_eq!(note.slug, "new-slug");
        assert_eq!(note.author_id, author_id);
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected_with_warning() {
        let (service, repo, author_id) = setup().await;
        service
            .create(CreateNoteInput::new("title", "text", author_id).with_slug("new-slug"))
            .await
            .unwrap();

        let err = service
            .create(CreateNoteInput::new("other", "text", author_id).with_slug("new-slug"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), format!("new-slug{SLUG_WARNING}"));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_slug_derived_from_title() {
        let (service, _repo, author_id) = setup().await;
        let note = service
            .create(CreateNoteInput::new("Новый заголовок", "Новый текст", author_id))
            .await
            .unwrap();

        assert_eq!(note.slug, "novyj-zagolovok");
    }

    #[tokio::test]
    async fn test_blank_requested_slug_falls_back_to_title() {
        let (service, _repo, author_id) = setup().await;
        let note = service
            .create(CreateNoteInput::new("Заголовок", "text", author_id).with_slug("   "))
            .await
            .unwrap();

        assert_eq!(note.slug, "zagolovok");
    }

    #[tokio::test]
    async fn test_update_keeps_own_slug_without_collision() {
        let (service, _repo, author_id) = setup().await;
        let note = service
            .create(CreateNoteInput::new("title", "text", author_id).with_slug("test-note"))
            .await
            .unwrap();

        let updated = service
            .update(
                &note,
                UpdateNoteInput {
                    title: "New title".to_string(),
                    text: "New text".to_string(),
                    slug: Some("test-note".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.slug, "test-note");
        assert_eq!(updated.title, "New title");
    }

    #[tokio::test]
    async fn test_update_rejects_foreign_slug() {
        let (service, _repo, author_id) = setup().await;
        service
            .create(CreateNoteInput::new("first", "text", author_id).with_slug("taken"))
            .await
            .unwrap();
        let note = service
            .create(CreateNoteInput::new("second", "text", author_id).with_slug("mine"))
            .await
            .unwrap();

        let err = service
            .update(
                &note,
                UpdateNoteInput {
                    title: "second".to_string(),
                    text: "text".to_string(),
                    slug: Some("taken".to_string()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, NoteServiceError::DuplicateSlug(s) if s == "taken"));
    }

    #[tokio::test]
    async fn test_required_fields() {
        let (service, repo, author_id) = setup().await;

        assert!(matches!(
            service.create(CreateNoteInput::new("", "text", author_id)).await,
            Err(NoteServiceError::ValidationError { field: "title", .. })
        ));
        assert!(matches!(
            service.create(CreateNoteInput::new("title", "  ", author_id)).await,
            Err(NoteServiceError::ValidationError { field: "text", .. })
        ));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_note() {
        let (service, repo, author_id) = setup().await;
        let note = service
            .create(CreateNoteInput::new("title", "text", author_id).with_slug("bye"))
            .await
            .unwrap();

        service.delete(&note).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(matches!(service.delete(&note).await, Err(NoteServiceError::NotFound(_))));
    }
}
