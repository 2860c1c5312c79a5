//! User preferences API handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use agent_pipeline_core::{ThemeName, ThemePreference, ThemeStyle, UserId};

use crate::{db::preferences, error::AppError, state::AppState};

/// Build the preferences router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/preferences/colorscheme", post(save_color_scheme))
        .route(
            "/api/preferences/colorscheme/{user_id}",
            get(get_color_scheme),
        )
}

/// Request for saving a color scheme.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSchemeRequest {
    pub user_id: UserId,
    pub theme: ThemeName,
    #[serde(default)]
    pub style: Option<ThemeStyle>,
}

/// Response for preference writes.
#[derive(Debug, Serialize)]
pub struct SavedResponse {
    pub success: bool,
}

/// Get a user's color scheme; `{}` when nothing is stored.
///
/// # Errors
///
/// Returns an error if the database query fails.
#[instrument(skip_all)]
pub async fn get_color_scheme(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<ThemePreference>, AppError> {
    let preference = preferences::get_color_scheme(state.pool(), user_id).await?;
    Ok(Json(preference))
}

/// Save a user's color scheme.
///
/// # Errors
///
/// Returns an error if the request body is invalid or the database operation fails.
#[instrument(skip_all)]
pub async fn save_color_scheme(
    State(state): State<AppState>,
    Json(body): Json<ColorSchemeRequest>,
) -> Result<Json<SavedResponse>, AppError> {
    preferences::set_color_scheme(state.pool(), body.user_id, body.theme, body.style.as_ref())
        .await?;
    tracing::info!(user_id = %body.user_id, theme = %body.theme, "Saved color scheme");
    Ok(Json(SavedResponse { success: true }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;
    use crate::routes::{app, test_support};

    #[test]
    fn test_request_body_shape() {
        let body: ColorSchemeRequest = serde_json::from_value(serde_json::json!({
            "userId": 1,
            "theme": "sunset",
            "style": {"text": "#111111"}
        }))
        .unwrap();

        assert_eq!(body.user_id, UserId::new(1));
        assert_eq!(body.theme, ThemeName::Sunset);
        assert_eq!(body.style.unwrap().text.as_deref(), Some("#111111"));
    }

    #[test]
    fn test_saved_response() {
        let value = serde_json::to_value(SavedResponse { success: true }).unwrap();
        assert_eq!(value, serde_json::json!({"success": true}));
    }

    #[test]
    fn test_empty_preference_serializes_as_empty_object() {
        let value = serde_json::to_value(ThemePreference::default()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_unknown_theme_is_rejected() {
        let response = app(test_support::unreachable_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/preferences/colorscheme")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"userId": 1, "theme": "neon"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
