//! Comment service
//!
//! Creation and mutation of comments. All text passes moderation before it
//! reaches the store; ownership checks happen in the access policy before
//! these methods are called.

use crate::db::repositories::CommentRepository;
use crate::models::Comment;
use crate::services::moderation::{validate_comment_text, ModerationError};
use anyhow::Context;
use std::sync::Arc;

/// Error types for comment service operations
#[derive(Debug, thiserror::Error)]
pub enum CommentServiceError {
    /// Comment not found
    #[error("Comment not found: {0}")]
    NotFound(i64),

    /// The text failed moderation
    #[error(transparent)]
    Rejected(#[from] ModerationError),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Comment service
pub struct CommentService {
    repo: Arc<dyn CommentRepository>,
}

impl CommentService {
    /// Create a new comment service
    pub fn new(repo: Arc<dyn CommentRepository>) -> Self {
        Self { repo }
    }

    /// Create a comment on an article.
    ///
    /// # Errors
    ///
    /// `Rejected` if the text contains a banned word; nothing is persisted.
    pub async fn create(
        &self,
        news_id: i64,
        author_id: i64,
        text: &str,
    ) -> Result<Comment, CommentServiceError> {
        validate_comment_text(text)?;
        let comment = self
            .repo
            .create(news_id, author_id, text)
            .await
            .context("Failed to create comment")?;
        tracing::debug!(comment_id = comment.id, news_id, "comment created");
        Ok(comment)
    }

    /// Look up a comment
    pub async fn get(&self, id: i64) -> Result<Option<Comment>, CommentServiceError> {
        Ok(self.repo.get_by_id(id).await.context("Failed to fetch comment")?)
    }

    /// Replace a comment's text.
    ///
    /// The replacement passes the same moderation as a fresh submission.
    pub async fn edit(&self, id: i64, text: &str) -> Result<(), CommentServiceError> {
        validate_comment_text(text)?;
        let updated = self
            .repo
            .update_text(id, text)
            .await
            .context("Failed to update comment")?;
        if !updated {
            return Err(CommentServiceError::NotFound(id));
        }
        Ok(())
    }

    /// Delete a comment
    pub async fn delete(&self, id: i64) -> Result<(), CommentServiceError> {
        let deleted = self.repo.delete(id).await.context("Failed to delete comment")?;
        if !deleted {
            return Err(CommentServiceError::NotFound(id));
        }
        Ok(())
    }
}
