//! Command implementations.

pub mod migrate;
pub mod relationships;
pub mod seed;
pub mod session;
pub mod theme;

use std::path::PathBuf;

use agent_pipeline_client::{ApiClient, RelationshipsView, Session};

/// Settings shared by every command that talks to the server.
pub struct Context {
    pub api_url: String,
    pub session_file: PathBuf,
}

impl Context {
    /// Load the stored session and build a view against the API.
    ///
    /// Fails with "not signed in" when no session is stored.
    pub async fn view(&self) -> Result<RelationshipsView<ApiClient>, Box<dyn std::error::Error>> {
        let session = Session::load(&self.session_file).await?;
        if !session.is_signed_in() {
            return Err("not signed in; run `crm-cli sign-in --email <email>` first".into());
        }
        let client = ApiClient::new(&self.api_url)?;
        Ok(RelationshipsView::new(std::sync::Arc::new(client), session))
    }
}
