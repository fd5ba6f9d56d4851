//! Note repository
//!
//! Owner filtering is a named query (`list_owned_by`) rather than a
//! policy-layer concern, and slug uniqueness is backed by the UNIQUE
//! column constraint. `exists_by_slug_excluding` supports the edit path
//! where a note keeps its own slug.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::Row;
use std::sync::Arc;

use crate::db::DbPool;
use crate::models::Note;

/// Note repository trait
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Persist a note with an already-validated slug
    async fn create(&self, title: &str, text: &str, slug: &str, author_id: i64) -> Result<Note>;

    /// Get a note by slug
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Note>>;

    /// All notes owned by the given user, insertion order
    async fn list_owned_by(&self, author_id: i64) -> Result<Vec<Note>>;

    /// Check whether any note uses this slug
    async fn exists_by_slug(&self, slug: &str) -> Result<bool>;

    /// Check whether any note other than `id` uses this slug
    async fn exists_by_slug_excluding(&self, slug: &str, id: i64) -> Result<bool>;

    /// Replace a note's title, text and slug
    async fn update(&self, note: &Note) -> Result<bool>;

    /// Delete a note
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Count total notes
    async fn count(&self) -> Result<i64>;
}

/// SQLx-based note repository implementation
pub struct SqlxNoteRepository {
    pool: DbPool,
}

impl SqlxNoteRepository {
    /// Create a new SQLx note repository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DbPool) -> Arc<dyn NoteRepository> {
        Arc::new(Self::new(pool))
    }
}

fn map_note(row: &sqlx::sqlite::SqliteRow) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        text: row.get("text"),
        slug: row.get("slug"),
        author_id: row.get("author_id"),
    }
}

#[async_trait]
impl NoteRepository for SqlxNoteRepository {
    async fn create(&self, title: &str, text: &str, slug: &str, author_id: i64) -> Result<Note> {
        let result = sqlx::query(
            "INSERT INTO notes (title, text, slug, author_id) VALUES (?, ?, ?, ?)",
        )
        .bind(title)
        .bind(text)
        .bind(slug)
        .bind(author_id)
        .execute(&self.pool)
        .await
        .context("Failed to insert note")?;

        Ok(Note {
            id: result.last_insert_rowid(),
            title: title.to_string(),
            text: text.to_string(),
            slug: slug.to_string(),
            author_id,
        })
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Note>> {
        let row = sqlx::query("SELECT * FROM notes WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch note by slug")?;

        Ok(row.as_ref().map(map_note))
    }

    async fn list_owned_by(&self, author_id: i64) -> Result<Vec<Note>> {
        let rows = sqlx::query("SELECT * FROM notes WHERE author_id = ? ORDER BY id ASC")
            .bind(author_id)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list notes by owner")?;

        Ok(rows.iter().map(map_note).collect())
    }

    async fn exists_by_slug(&self, slug: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE slug = ?")
            .bind(slug)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check slug existence")?;
        Ok(count > 0)
    }

    async fn exists_by_slug_excluding(&self, slug: &str, id: i64) -> Result<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE slug = ? AND id != ?")
                .bind(slug)
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .context("Failed to check slug existence")?;
        Ok(count > 0)
    }

    async fn update(&self, note: &Note) -> Result<bool> {
        let result = sqlx::query("UPDATE notes SET title = ?, text = ?, slug = ? WHERE id = ?")
            .bind(&note.title)
            .bind(&note.text)
            .bind(&note.slug)
            .bind(note.id)
            .execute(&self.pool)
            .await
            .context("Failed to update note")?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete note")?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count notes")?;
        Ok(count)
    }
}
