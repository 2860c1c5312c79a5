//! HTTP record store backed by the CRM server's REST API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Response;
use serde::Serialize;
use tracing::instrument;
use url::Url;

use agent_pipeline_core::{Relationship, RelationshipId, ThemeName, ThemePreference, UserId};

use crate::error::ClientError;
use crate::store::RecordStore;

/// Default request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// REST client for the CRM server.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

#[derive(Debug)]
struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

/// Body of a theme save request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveThemeRequest {
    user_id: UserId,
    theme: ThemeName,
}

impl ApiClient {
    /// Create a client for the server at `base_url` (e.g. `http://localhost:5000`).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUrl` if the URL does not parse, or
    /// `ClientError::Http` if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        // Relative joins replace the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner { client, base_url }),
        })
    }

    /// The normalized base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Turn a non-success response into `ClientError::Status`.
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status { status, body })
    }
}

impl RecordStore for ApiClient {
    #[instrument(skip(self), fields(user_id = %user))]
    async fn fetch_records(&self, user: UserId) -> Result<Vec<Relationship>, ClientError> {
        let url = self.endpoint(&format!("api/relationships/user/{user}"))?;
        let response = self.inner.client.get(url).send().await?;
        let records = Self::check(response).await?.json().await?;
        Ok(records)
    }

    #[instrument(skip(self, record), fields(relationship_id = %id))]
    async fn update_record(
        &self,
        id: RelationshipId,
        record: &Relationship,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("api/relationships/{id}"))?;
        let response = self.inner.client.put(url).json(record).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(relationship_id = %id, user_id = %user))]
    async fn delete_record(&self, id: RelationshipId, user: UserId) -> Result<(), ClientError> {
        let mut url = self.endpoint(&format!("api/relationships/{id}"))?;
        url.query_pairs_mut()
            .append_pair("userId", &user.to_string());
        let response = self.inner.client.delete(url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = %user))]
    async fn fetch_theme_preference(&self, user: UserId) -> Result<ThemePreference, ClientError> {
        let url = self.endpoint(&format!("api/preferences/colorscheme/{user}"))?;
        let response = self.inner.client.get(url).send().await?;
        let preference = Self::check(response).await?.json().await?;
        Ok(preference)
    }

    #[instrument(skip(self), fields(user_id = %user, theme = %theme))]
    async fn save_theme_preference(&self, user: UserId, theme: ThemeName) -> Result<(), ClientError> {
        let url = self.endpoint("api/preferences/colorscheme")?;
        let body = SaveThemeRequest {
            user_id: user,
            theme,
        };
        let response = self.inner.client.post(url).json(&body).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
