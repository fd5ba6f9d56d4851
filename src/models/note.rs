//! Note model
//!
//! This module provides:
//! - `Note` entity representing a personal note
//! - Input types for creating and updating notes
//!
//! Notes are private: every operation, including reads and list
//! membership, is restricted to the owning user. The `slug` is globally
//! unique and identifies the note in URLs instead of its numeric id.

use serde::{Deserialize, Serialize};

/// Note entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier
    pub id: i64,
    /// Note title
    pub title: String,
    /// Note body
    pub text: String,
    /// URL-friendly slug (unique across all notes)
    pub slug: String,
    /// Owner user ID
    pub author_id: i64,
}

/// Input for creating a new note
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteInput {
    /// Note title
    pub title: String,
    /// Note body
    pub text: String,
    /// Requested slug; empty or absent means "derive from the title"
    pub slug: Option<String>,
    /// Owner user ID
    pub author_id: i64,
}

impl CreateNoteInput {
    /// Create a new input without an explicit slug
    pub fn new(title: impl Into<String>, text: impl Into<String>, author_id: i64) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            slug: None,
            author_id,
        }
    }

    /// Set a requested slug
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }
}

/// Input for updating an existing note
///
/// Mirrors the submission form: every field is rebound on edit, and an
/// empty slug is re-derived from the (possibly new) title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNoteInput {
    /// New title
    pub title: String,
    /// New body
    pub text: String,
    /// Requested slug; empty or absent means "derive from the title"
    pub slug: Option<String>,
}
