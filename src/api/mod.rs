//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP endpoints for the Vestnik service:
//! - News home and detail pages (public)
//! - Comment submission and author-only mutation
//! - Personal notes (owner-only, login required)
//! - Authentication endpoints

pub mod comments;
pub mod middleware;
pub mod news;
pub mod notes;
pub mod users;


use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{AppState, CurrentUser, MaybeUser, PageError, RequireUser};

/// Build the application router
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
        .allow_credentials(true);

    Router::new()
        // News
        .route("/", get(news::home))
        .route("/news/{id}", get(news::detail).post(news::submit_comment))
        // Comment mutation
        .route("/comments/{id}/edit", get(comments::edit_page).post(comments::edit))
        .route(
            "/comments/{id}/delete",
            get(comments::delete_page)
                .post(comments::delete)
                .delete(comments::delete),
        )
        // Notes
        .route("/notes", get(notes::list))
        .route("/notes/add", get(notes::add_page).post(notes::add))
        .route("/notes/done", get(notes::done))
        .route("/notes/{slug}", get(notes::detail))
        .route("/notes/{slug}/edit", get(notes::edit_page).post(notes::edit))
        .route(
            "/notes/{slug}/delete",
            get(notes::delete_page)
                .post(notes::delete)
                .delete(notes::delete),
        )
        // Authentication
        .route("/auth/login", get(users::login_page).post(users::login))
        .route("/auth/logout", get(users::logout).post(users::logout))
        .route("/auth/signup", get(users::signup_page).post(users::signup))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::resolve_session,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
