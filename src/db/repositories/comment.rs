//! Comment repository
//!
//! Comments are listed per article in ascending creation order so threads
//! read chronologically regardless of storage order.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use std::sync::Arc;

use crate::db::DbPool;
use crate::models::{Comment, CommentView};

/// Comment repository trait
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Create a new comment, stamping `created` with the current time
    async fn create(&self, news_id: i64, author_id: i64, text: &str) -> Result<Comment>;

    /// Get a comment by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Comment>>;

    /// Comments for an article joined with author names, oldest first
    async fn list_for_news(&self, news_id: i64) -> Result<Vec<CommentView>>;

    /// Replace a comment's text
    async fn update_text(&self, id: i64, text: &str) -> Result<bool>;

    /// Delete a comment
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Count total comments
    async fn count(&self) -> Result<i64>;
}

/// SQLx-based comment repository implementation
pub struct SqlxCommentRepository {
    pool: DbPool,
}

impl SqlxCommentRepository {
    /// Create a new SQLx comment repository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DbPool) -> Arc<dyn CommentRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn create(&self, news_id: i64, author_id: i64, text: &str) -> Result<Comment> {
        let created = Utc::now();
        let result = sqlx::query(
            "INSERT INTO comments (news_id, author_id, text, created) VALUES (?, ?, ?, ?)",
        )
        .bind(news_id)
        .bind(author_id)
        .bind(text)
        .bind(created)
        .execute(&self.pool)
        .await
        .context("Failed to insert comment")?;

        Ok(Comment {
            id: result.last_insert_rowid(),
            news_id,
            author_id,
            text: text.to_string(),
            created,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let row = sqlx::query("SELECT * FROM comments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch comment by id")?;

        Ok(row.map(|r| Comment {
            id: r.get("id"),
            news_id: r.get("news_id"),
            author_id: r.get("author_id"),
            text: r.get("text"),
            created: r.get("created"),
        }))
    }

    async fn list_for_news(&self, news_id: i64) -> Result<Vec<CommentView>> {
        let rows = sqlx::query(
            r#"SELECT c.*, u.username
               FROM comments c
               LEFT JOIN users u ON c.author_id = u.id
               WHERE c.news_id = ?
               ORDER BY c.created ASC"#,
        )
        .bind(news_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list comments")?;

        Ok(rows
            .into_iter()
            .map(|r| CommentView {
                id: r.get("id"),
                news_id: r.get("news_id"),
                author_id: r.get("author_id"),
                author: r.try_get("username").unwrap_or_default(),
                text: r.get("text"),
                created: r.get("created"),
            })
            .collect())
    }

    async fn update_text(&self, id: i64, text: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE comments SET text = ? WHERE id = ?")
            .bind(text)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to update comment")?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete comment")?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count comments")?;
        Ok(count)
    }
}
