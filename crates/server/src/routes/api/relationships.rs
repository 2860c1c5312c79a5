//! Relationship API handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use agent_pipeline_core::{Relationship, RelationshipId, UserId};

use crate::{
    db::{NewRelationship, RelationshipRepository},
    error::AppError,
    state::AppState,
};

/// Build the relationships router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/relationships", post(create))
        .route("/api/relationships/user/{user_id}", get(list_for_user))
        .route(
            "/api/relationships/{id}",
            get(get_one).put(update).delete(delete),
        )
}

/// Owner parameter for deletes.
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    #[serde(rename = "userId")]
    pub user_id: UserId,
}

/// List every relationship owned by a user.
///
/// # Errors
///
/// Returns an error if the database query fails.
#[instrument(skip_all)]
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<Relationship>>, AppError> {
    let records = RelationshipRepository::new(state.pool())
        .list_for_user(user_id)
        .await?;
    tracing::debug!(%user_id, count = records.len(), "Listed relationships");
    Ok(Json(records))
}

/// Get a single relationship.
///
/// # Errors
///
/// Returns 404 if the relationship does not exist.
#[instrument(skip_all)]
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<RelationshipId>,
) -> Result<Json<Relationship>, AppError> {
    RelationshipRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("relationship {id}")))
}

/// Create a relationship.
///
/// # Errors
///
/// Returns 400 for a blank name, or an error if the insert fails.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewRelationship>,
) -> Result<(StatusCode, Json<Relationship>), AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    let record = RelationshipRepository::new(state.pool())
        .create(&body)
        .await?;
    tracing::info!(
        relationship_id = %record.id,
        user_id = %body.user_id,
        "Created relationship"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// Replace a relationship.
///
/// # Errors
///
/// Returns 400 if the body ID differs from the path or the name is blank,
/// and 404 if the relationship does not exist.
#[instrument(skip_all)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<RelationshipId>,
    Json(body): Json<Relationship>,
) -> Result<Json<Relationship>, AppError> {
    if body.id != id {
        return Err(AppError::BadRequest(format!(
            "body id {} does not match path id {id}",
            body.id
        )));
    }
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    let record = RelationshipRepository::new(state.pool())
        .update(&body)
        .await?;
    tracing::info!(relationship_id = %id, "Updated relationship");
    Ok(Json(record))
}

/// Delete a relationship owned by the given user.
///
/// # Errors
///
/// Returns 404 if the user has no such relationship.
#[instrument(skip_all)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<RelationshipId>,
    Query(owner): Query<OwnerQuery>,
) -> Result<StatusCode, AppError> {
    RelationshipRepository::new(state.pool())
        .delete(id, owner.user_id)
        .await?;
    tracing::info!(
        relationship_id = %id,
        user_id = %owner.user_id,
        "Deleted relationship"
    );
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, header};
    use tower::ServiceExt;

    use super::*;
    use crate::routes::{app, test_support};

    async fn send(request: Request<Body>) -> (StatusCode, String) {
        let response = app(test_support::unreachable_state())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_update_rejects_mismatched_id() {
        let body = serde_json::json!({"id": 102, "name": "Sarah Thompson"});
        let (status, text) = send(json_request("PUT", "/api/relationships/101", &body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text, "Bad request: body id 102 does not match path id 101");
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name() {
        let body = serde_json::json!({"id": 101, "name": " "});
        let (status, _) = send(json_request("PUT", "/api/relationships/101", &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let body = serde_json::json!({"userId": 1, "name": ""});
        let (status, text) = send(json_request("POST", "/api/relationships", &body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text, "Bad request: name is required");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_rejected() {
        let request = Request::builder()
            .uri("/api/relationships/abc")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_requires_user_id() {
        let request = Request::builder()
            .method("DELETE")
            .uri("/api/relationships/101")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
