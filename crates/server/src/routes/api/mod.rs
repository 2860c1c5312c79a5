//! JSON API route handlers.

pub mod calendar;
pub mod preferences;
pub mod relationships;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(relationships::router())
        .merge(preferences::router())
        .merge(calendar::router())
}
