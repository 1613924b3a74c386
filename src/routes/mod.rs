//! HTTP boundary: router, handlers, views, form tokens.

pub mod cafe;
pub mod csrf;
pub mod view;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::infra::DbPool;
use csrf::TokenScope;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<DbPool>,
    secret: Arc<str>,
}

impl AppState {
    pub fn new(pool: DbPool, secret: impl Into<String>) -> Self {
        Self {
            pool: Arc::new(pool),
            secret: Arc::from(secret.into()),
        }
    }

    /// Fresh token for `client`, stamped now.
    pub fn token(&self, scope: TokenScope, client: &str) -> String {
        csrf::issue(&self.secret, scope, client, Utc::now().timestamp())
    }

    /// Check a submitted token against the client cookie of the same request.
    pub fn verify(&self, scope: TokenScope, jar: &CookieJar, token: &str) -> Result<(), AppError> {
        let client = csrf::client_id(jar);
        csrf::verify(
            &self.secret,
            scope,
            client.as_deref(),
            token,
            Utc::now().timestamp(),
        )
    }

    /// Run a store call on the blocking pool; the connection mutex is never
    /// held on an async worker.
    pub async fn with_store<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&DbPool) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || f(&pool))
            .await
            .map_err(|e| AppError::Db(format!("store task failed: {}", e)))?
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(cafe::home))
        .route("/add", get(cafe::add_form).post(cafe::add_submit))
        .route("/cafes", get(cafe::list))
        .route("/delete/{id}", post(cafe::delete))
        .route("/edit/{id}", get(cafe::edit_form).post(cafe::edit_submit))
        .route("/health", get(cafe::health))
        .fallback(cafe::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
