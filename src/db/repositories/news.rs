//! News repository
//!
//! The home page ordering contract lives here: `list_recent` returns at
//! most `limit` articles ordered by publication date descending, ties
//! broken by insertion order.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use std::sync::Arc;

use crate::db::DbPool;
use crate::models::{CreateNewsInput, News};

/// News repository trait
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Create a news article
    async fn create(&self, input: &CreateNewsInput) -> Result<News>;

    /// Get an article by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<News>>;

    /// Most recent articles, date descending, capped at `limit`
    async fn list_recent(&self, limit: i64) -> Result<Vec<News>>;

    /// Count total articles
    async fn count(&self) -> Result<i64>;
}

/// SQLx-based news repository implementation
pub struct SqlxNewsRepository {
    pool: DbPool,
}

impl SqlxNewsRepository {
    /// Create a new SQLx news repository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DbPool) -> Arc<dyn NewsRepository> {
        Arc::new(Self::new(pool))
    }
}

fn map_news(row: &sqlx::sqlite::SqliteRow) -> News {
    News {
        id: row.get("id"),
        title: row.get("title"),
        text: row.get("text"),
        date: row.get("date"),
    }
}

#[async_trait]
impl NewsRepository for SqlxNewsRepository {
    async fn create(&self, input: &CreateNewsInput) -> Result<News> {
        let date = input.date.unwrap_or_else(Utc::now);
        let result = sqlx::query("INSERT INTO news (title, text, date) VALUES (?, ?, ?)")
            .bind(&input.title)
            .bind(&input.text)
            .bind(date)
            .execute(&self.pool)
            .await
            .context("Failed to insert news")?;

        Ok(News {
            id: result.last_insert_rowid(),
            title: input.title.clone(),
            text: input.text.clone(),
            date,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<News>> {
        let row = sqlx::query("SELECT * FROM news WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch news by id")?;

        Ok(row.as_ref().map(map_news))
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<News>> {
        let rows = sqlx::query("SELECT * FROM news ORDER BY date DESC, id ASC LIMIT ?")
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list recent news")?;

        Ok(rows.iter().map(map_news).collect())
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM news")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count news")?;
        Ok(count)
    }
}
