//! Color-scheme preference storage.
//!
//! One row per user: the theme name plus an optional JSONB style overlay.

use serde_json::Value as JsonValue;
use sqlx::PgPool;

use agent_pipeline_core::{ThemeName, ThemePreference, ThemeStyle, UserId};

/// Error type for preference operations.
#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, sqlx::FromRow)]
struct PreferenceRow {
    theme: Option<String>,
    style: Option<JsonValue>,
}

impl TryFrom<PreferenceRow> for ThemePreference {
    type Error = PreferencesError;

    fn try_from(row: PreferenceRow) -> Result<Self, Self::Error> {
        // An unknown stored name falls back to the default theme
        let theme = row.theme.and_then(|name| match name.parse::<ThemeName>() {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::warn!("Ignoring stored theme: {e}");
                None
            }
        });
        let style = row
            .style
            .map(serde_json::from_value::<ThemeStyle>)
            .transpose()?;

        Ok(Self { theme, style })
    }
}

/// Get a user's color scheme. Returns an empty preference if none is stored.
///
/// # Errors
///
/// Returns an error if the query fails or the stored style is malformed.
pub async fn get_color_scheme(
    pool: &PgPool,
    user: UserId,
) -> Result<ThemePreference, PreferencesError> {
    let row = sqlx::query_as::<_, PreferenceRow>(
        r"
        SELECT theme, style FROM crm.user_preferences
        WHERE user_id = $1
        ",
    )
    .bind(user)
    .fetch_optional(pool)
    .await?;

    row.map_or_else(|| Ok(ThemePreference::default()), TryInto::try_into)
}

/// Store a user's theme. A stored style is kept unless a new one is given.
///
/// # Errors
///
/// Returns an error if the style cannot be serialized or the upsert fails.
pub async fn set_color_scheme(
    pool: &PgPool,
    user: UserId,
    theme: ThemeName,
    style: Option<&ThemeStyle>,
) -> Result<(), PreferencesError> {
    let style = style.map(serde_json::to_value).transpose()?;

    sqlx::query(
        r"
        INSERT INTO crm.user_preferences (user_id, theme, style)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id) DO UPDATE
        SET theme = EXCLUDED.theme,
            style = COALESCE(EXCLUDED.style, crm.user_preferences.style),
            updated_at = NOW()
        ",
    )
    .bind(user)
    .bind(theme.as_str())
    .bind(style)
    .execute(pool)
    .await?;

    Ok(())
}
