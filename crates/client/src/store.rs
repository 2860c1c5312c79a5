//! The record store collaborator.

use std::future::Future;

use agent_pipeline_core::{Relationship, RelationshipId, ThemeName, ThemePreference, UserId};

use crate::error::ClientError;

/// Remote persistence for relationships and theme preferences.
///
/// An empty record list is a valid answer and distinct from an error.
pub trait RecordStore: Send + Sync {
    /// Fetch every relationship owned by `user`.
    fn fetch_records(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<Vec<Relationship>, ClientError>> + Send;

    /// Replace the stored record `id` with `record`.
    fn update_record(
        &self,
        id: RelationshipId,
        record: &Relationship,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Delete record `id` owned by `user`.
    fn delete_record(
        &self,
        id: RelationshipId,
        user: UserId,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Fetch the stored color scheme; absent parts mean "use the default".
    fn fetch_theme_preference(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<ThemePreference, ClientError>> + Send;

    fn save_theme_preference(
        &self,
        user: UserId,
        theme: ThemeName,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}
