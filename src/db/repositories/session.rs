//! Session repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use std::sync::Arc;

use crate::db::DbPool;
use crate::models::Session;

/// Session repository trait
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new session
    async fn create(&self, session: &Session) -> Result<()>;

    /// Get a session by its token
    async fn get(&self, id: &str) -> Result<Option<Session>>;

    /// Delete a session by its token
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Delete all expired sessions, returning how many were removed
    async fn delete_expired(&self) -> Result<u64>;
}

/// SQLx-based session repository implementation
pub struct SqlxSessionRepository {
    pool: DbPool,
}

impl SqlxSessionRepository {
    /// Create a new SQLx session repository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DbPool) -> Arc<dyn SessionRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl SessionRepository for SqlxSessionRepository {
    async fn create(&self, session: &Session) -> Result<()> {
        sqlx::query(
            "INSERT INTO sessions (id, user_id, expires_at, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&session.id)
        .bind(session.user_id)
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert session")?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Session>> {
        let row = sqlx::query("SELECT * FROM sessions WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch session")?;

        Ok(row.map(|r| Session {
            id: r.get("id"),
            user_id: r.get("user_id"),
            expires_at: r.get("expires_at"),
            created_at: r.get("created_at"),
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete session")?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .context("Failed to delete expired sessions")?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{SqlxUserRepository, UserRepository};
    use crate::db::{create_test_pool, migrations};
    use crate::models::User;
    use chrono::Duration;

    async fn setup() -> (DbPool, SqlxSessionRepository, i64) {
        let pool = create_test_pool().await.unwrap();
        migrations::run_migrations(&pool).await.unwrap();

        let users = SqlxUserRepository::new(pool.clone());
        let user = users
            .create(&User::new("author".to_string(), "hash".to_string()))
            .await
            .unwrap();

        (pool.clone(), SqlxSessionRepository::new(pool), user.id)
    }

    fn session_for(user_id: i64, id: &str, hours: i64) -> Session {
        Session {
            id: id.to_string(),
            user_id,
            expires_at: Utc::now() + Duration::hours(hours),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_get_delete_roundtrip() {
        let (_pool, repo, user_id) = setup().await;
        repo.create(&session_for(user_id, "token-1", 1)).await.unwrap();

        let fetched = repo.get("token-1").await.unwrap().unwrap();
        assert_eq!(fetched.user_id, user_id);

        assert!(repo.delete("token-1").await.unwrap());
        assert!(repo.get("token-1").await.unwrap().is_none());
        assert!(!repo.delete("token-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_expired_keeps_live_sessions() {
        let (_pool, repo, user_id) = setup().await;
        repo.create(&session_for(user_id, "live", 1)).await.unwrap();
        repo.create(&session_for(user_id, "stale", -1)).await.unwrap();

        let removed = repo.delete_expired().await.unwrap();
        assert_eq!(removed, 1);
        assert!(repo.get("live").await.unwrap().is_some());
        assert!(repo.get("stale").await.unwrap().is_none());
    }
}
