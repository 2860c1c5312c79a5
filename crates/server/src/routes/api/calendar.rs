//! Calendar API handler.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use agent_pipeline_core::{CalendarEvent, UserId};

use crate::{db::RelationshipRepository, error::AppError, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/calendar", get(list_events))
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    #[serde(rename = "userId")]
    pub user_id: UserId,
}

/// Follow-up events for every relationship with a follow-up date.
///
/// Scoped to one owner; a request without `userId` is rejected with 400.
///
/// # Errors
///
/// Returns an error if the database query fails.
#[instrument(skip_all)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    let events = RelationshipRepository::new(state.pool())
        .follow_ups(query.user_id)
        .await?
        .iter()
        .filter_map(CalendarEvent::follow_up)
        .collect();
    Ok(Json(events))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::routes::{app, test_support};

    #[tokio::test]
    async fn test_calendar_requires_user_id() {
        let request = Request::builder()
            .uri("/api/calendar")
            .body(Body::empty())
            .unwrap();
        let response = app(test_support::unreachable_state())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
