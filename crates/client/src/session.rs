//! The signed-in user and their local theme selection.
//!
//! A [`Session`] is loaded once at startup and handed to the views that need
//! it. It persists to a JSON file chosen by the caller. Without a file the
//! session is signed out and views skip every call that needs a user.

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use agent_pipeline_core::{ThemeName, UserId};

use crate::error::ClientError;

/// The user the session acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Default for SessionUser {
    fn default() -> Self {
        Self {
            id: UserId::new(1),
            name: "Test User".to_string(),
            email: None,
        }
    }
}

/// Locally remembered theme choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSelection {
    pub theme: ThemeName,
    #[serde(default)]
    pub custom_color: Option<String>,
}

/// Explicit replacement for ambient "current user" storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// `None` while signed out.
    #[serde(default)]
    pub user: Option<SessionUser>,
    #[serde(default)]
    pub theme: ThemeSelection,
}

impl Session {
    /// Load the session stored at `path`.
    ///
    /// A missing file yields the signed-out default session. So does a
    /// corrupt one, after logging a warning.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Io` if the file exists but cannot be read.
    pub async fn load(path: &Path) -> Result<Self, ClientError> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(session) => Ok(session),
            Err(e) => {
                tracing::warn!(path = %path.display(), "Ignoring unreadable session file: {e}");
                Ok(Self::default())
            }
        }
    }

    /// Persist the session to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save(&self, path: &Path) -> Result<(), ClientError> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    /// Local sign-in stub: every email maps to the development user.
    #[must_use]
    pub fn sign_in(email: &str) -> Self {
        Self {
            user: Some(SessionUser {
                email: Some(email.to_string()),
                ..SessionUser::default()
            }),
            theme: ThemeSelection::default(),
        }
    }

    /// Forget the stored session. Signing out twice is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Io` if the file exists but cannot be removed.
    pub async fn sign_out(path: &Path) -> Result<(), ClientError> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Session for an already-known user, as after sign-in.
    #[must_use]
    pub fn for_user(user: SessionUser) -> Self {
        Self {
            user: Some(user),
            theme: ThemeSelection::default(),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|user| user.id)
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}
