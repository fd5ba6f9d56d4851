//! Vestnik - a small news-with-comments and personal-notes web service

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vestnik::{
    api::{self, AppState},
    config::Config,
    db::{
        self,
        repositories::{
            SqlxCommentRepository, SqlxNewsRepository, SqlxNoteRepository, SqlxSessionRepository,
            SqlxUserRepository,
        },
    },
    services::{CommentService, NewsService, NoteService, UserService},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vestnik=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Vestnik...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {}", config.database.url);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Create repositories
    let user_repo = SqlxUserRepository::boxed(pool.clone());
    let session_repo = SqlxSessionRepository::boxed(pool.clone());
    let news_repo = SqlxNewsRepository::boxed(pool.clone());
    let comment_repo = SqlxCommentRepository::boxed(pool.clone());
    let note_repo = SqlxNoteRepository::boxed(pool.clone());

    // Initialize services
    let user_service = Arc::new(UserService::with_session_days(
        user_repo,
        session_repo.clone(),
        config.auth.session_days,
    ));
    let news_service = Arc::new(NewsService::new(
        news_repo,
        comment_repo.clone(),
        config.content.news_per_page,
    ));
    let comment_service = Arc::new(CommentService::new(comment_repo));
    let note_service = Arc::new(NoteService::new(note_repo));

    // Periodic cleanup of expired sessions (runs hourly)
    {
        let sessions = session_repo;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(3600));
            loop {
                interval.tick().await;
                match sessions.delete_expired().await {
                    Ok(0) => {}
                    Ok(n) => tracing::debug!("Removed {} expired session(s)", n),
                    Err(e) => tracing::warn!("Session cleanup failed: {}", e),
                }
            }
        });
    }

    // Build application state
    let state = AppState {
        user_service,
        news_service,
        comment_service,
        note_service,
    };

    // Build router
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
