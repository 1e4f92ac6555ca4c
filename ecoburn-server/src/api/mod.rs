//! API Module
//!
//! HTTP API layer for the server.
//! Each submodule handles endpoints for a specific domain.

pub mod auth;
pub mod burn_job;
pub mod error;
pub mod health;
pub mod json;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use ecoburn_core::domain::status::TransitionPolicy;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::repository::BurnJobStore;
use auth::TokenSet;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BurnJobStore>,
    pub tokens: Arc<TokenSet>,
    pub policy: TransitionPolicy,
}

impl AppState {
    pub fn new(store: Arc<dyn BurnJobStore>, tokens: TokenSet, policy: TransitionPolicy) -> Self {
        Self {
            store,
            tokens: Arc::new(tokens),
            policy,
        }
    }
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Burn job endpoints
        .route(
            "/api/burn-jobs",
            get(burn_job::list_burn_jobs).post(burn_job::create_burn_job),
        )
        .route("/api/burn-jobs/summary", get(burn_job::burn_summary))
        .route("/api/burn-jobs/bulk-update", post(burn_job::bulk_update))
        .route(
            "/api/burn-jobs/{id}",
            get(burn_job::get_burn_job)
                .put(burn_job::update_burn_job)
                .delete(burn_job::delete_burn_job),
        )
        // Add state and middleware
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
