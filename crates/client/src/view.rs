//! Relationships view controller.
//!
//! Owns the record collection for one view and reconciles it with the record
//! store. Writes follow a write-then-reconcile policy: a successful update or
//! delete is always followed by a full re-fetch, and local state is never
//! patched optimistically. A signed-out session never reaches the store.

use std::sync::Arc;
use std::time::Instant;

use agent_pipeline_core::listing::{PageView, RelationshipList, SortConfig, SortField};
use agent_pipeline_core::{Relationship, RelationshipId, ThemeName, ThemeTokens, UserId};

use crate::display::RelationshipRow;
use crate::error::ClientError;
use crate::mutation::Mutator;
use crate::session::Session;
use crate::store::RecordStore;

/// Collaborator call that a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchRecords,
    UpdateRecord(RelationshipId),
    DeleteRecord(RelationshipId),
    LoadTheme,
    SaveTheme,
}

/// A recorded, non-fatal collaborator failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub operation: Operation,
    pub message: String,
}

/// User-facing toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// State and actions behind the relationships page.
#[derive(Debug)]
pub struct RelationshipsView<S> {
    session: Session,
    mutator: Mutator<S>,
    list: RelationshipList,
    theme: ThemeTokens,
    loading: bool,
    diagnostics: Vec<Diagnostic>,
    notices: Vec<Notice>,
}

/// Current time on the runtime clock, so paused test clocks apply.
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

impl<S: RecordStore> RelationshipsView<S> {
    /// Create an empty view. Nothing is fetched until [`refresh`](Self::refresh).
    #[must_use]
    pub fn new(store: Arc<S>, session: Session) -> Self {
        Self {
            session,
            mutator: Mutator::new(store),
            list: RelationshipList::default(),
            theme: ThemeTokens::default(),
            loading: true,
            diagnostics: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Create a view and perform the initial theme load and fetch.
    pub async fn open(store: Arc<S>, session: Session) -> Self {
        let mut view = Self::new(store, session);
        view.load_theme().await;
        view.refresh().await;
        view
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn list(&self) -> &RelationshipList {
        &self.list
    }

    #[must_use]
    pub const fn theme(&self) -> &ThemeTokens {
        &self.theme
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain notices once they have been shown.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// A cloneable handle for issuing writes from other tasks.
    #[must_use]
    pub fn mutator(&self) -> Mutator<S> {
        self.mutator.clone()
    }

    fn signed_in_user(&self, operation: Operation) -> Option<UserId> {
        let user = self.session.user_id();
        if user.is_none() {
            tracing::debug!(?operation, "Not signed in, skipping store call");
        }
        user
    }

    fn record_failure(&mut self, operation: Operation, error: &ClientError) {
        tracing::warn!(?operation, "Record store call failed: {error}");
        self.diagnostics.push(Diagnostic {
            operation,
            message: error.to_string(),
        });
    }

    // =========================================================================
    // Store interaction
    // =========================================================================

    /// Load the user's color scheme, falling back to the default tokens.
    pub async fn load_theme(&mut self) {
        let Some(user) = self.signed_in_user(Operation::LoadTheme) else {
            self.theme = ThemeTokens::default();
            return;
        };
        match self.mutator.store().fetch_theme_preference(user).await {
            Ok(preference) => {
                if let Some(theme) = preference.theme {
                    self.session.theme.theme = theme;
                }
                self.theme = preference.tokens();
            }
            Err(e) => {
                self.record_failure(Operation::LoadTheme, &e);
                self.theme = ThemeTokens::default();
            }
        }
    }

    /// Re-fetch every record, replacing the collection wholesale.
    ///
    /// On failure, or while signed out, the collection becomes empty.
    pub async fn refresh(&mut self) {
        let Some(user) = self.signed_in_user(Operation::FetchRecords) else {
            self.list.replace_records(Vec::new());
            self.loading = false;
            return;
        };
        self.loading = true;
        match self.mutator.store().fetch_records(user).await {
            Ok(records) => {
                tracing::debug!(count = records.len(), "Fetched relationships");
                self.list.replace_records(records);
            }
            Err(e) => {
                self.record_failure(Operation::FetchRecords, &e);
                self.list.replace_records(Vec::new());
            }
        }
        self.loading = false;
    }

    /// Save an edited record, then reconcile with the store.
    ///
    /// Returns `true` if the store accepted the edit. A rejected edit is
    /// reported as a notice and is not retried or kept locally.
    pub async fn update(&mut self, record: &Relationship) -> bool {
        if self.signed_in_user(Operation::UpdateRecord(record.id)).is_none() {
            return false;
        }
        match self.mutator.update(record).await {
            Ok(()) => {
                self.notices
                    .push(Notice::Success("Saved successfully!".to_string()));
                self.refresh().await;
                true
            }
            Err(e) => {
                self.record_failure(Operation::UpdateRecord(record.id), &e);
                self.notices.push(Notice::Error("Could not save.".to_string()));
                false
            }
        }
    }

    /// Delete a record, then reconcile with the store.
    pub async fn delete(&mut self, id: RelationshipId) -> bool {
        let Some(user) = self.signed_in_user(Operation::DeleteRecord(id)) else {
            return false;
        };
        match self.mutator.delete(id, user).await {
            Ok(()) => {
                self.refresh().await;
                true
            }
            Err(e) => {
                self.record_failure(Operation::DeleteRecord(id), &e);
                false
            }
        }
    }

    /// Persist a new theme choice and remember it in the session.
    pub async fn save_theme(&mut self, theme: ThemeName) -> bool {
        let Some(user) = self.signed_in_user(Operation::SaveTheme) else {
            return false;
        };
        match self.mutator.store().save_theme_preference(user, theme).await {
            Ok(()) => {
                self.session.theme.theme = theme;
                self.notices.push(Notice::Success("Theme updated!".to_string()));
                true
            }
            Err(e) => {
                self.record_failure(Operation::SaveTheme, &e);
                self.notices
                    .push(Notice::Error("Error saving theme.".to_string()));
                false
            }
        }
    }

    // =========================================================================
    // List interaction
    // =========================================================================

    pub fn set_search_input(&mut self, text: &str) {
        self.list.set_search_input(text, now());
    }

    /// Commit pending search text if typing has paused.
    pub fn tick(&mut self) -> bool {
        self.list.tick(now())
    }

    /// Wait out the debounce window, then commit pending search text.
    pub async fn settle_search(&mut self) -> bool {
        if let Some(deadline) = self.list.query().deadline() {
            tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        }
        self.tick()
    }

    pub fn toggle_sort(&mut self, field: SortField) {
        self.list.toggle_sort(field);
    }

    pub const fn set_sort(&mut self, sort: SortConfig) {
        self.list.set_sort(sort);
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.list.go_to_page(page)
    }

    #[must_use]
    pub fn page(&self) -> PageView<'_> {
        self.list.view()
    }

    /// The current page rendered for display.
    #[must_use]
    pub fn rows(&self) -> Vec<RelationshipRow> {
        self.page()
            .items
            .into_iter()
            .map(RelationshipRow::from)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use agent_pipeline_core::{ThemePreference, ThemeStyle, UserId};

    use super::*;
    use crate::store::fake::FakeStore;

    fn sample() -> Vec<Relationship> {
        ["John Doe", "Sarah Thompson", "Michael Johnson"]
            .into_iter()
            .zip(101..)
            .map(|(name, id)| Relationship::new(RelationshipId::new(id), name))
            .collect()
    }

    fn signed_in() -> Session {
        Session::sign_in("agent@example.com")
    }

    fn ids(view: &RelationshipsView<FakeStore>) -> Vec<i32> {
        view.page().items.iter().map(|r| r.id.as_i32()).collect()
    }

    #[tokio::test]
    async fn test_open_fetches_and_sorts_by_name() {
        let store = Arc::new(FakeStore::with_records(sample()));
        let view = RelationshipsView::open(Arc::clone(&store), signed_in()).await;

        assert!(!view.is_loading());
        assert_eq!(ids(&view), vec![101, 103, 102]);
        assert_eq!(view.theme(), &ThemeTokens::default());
        assert!(view.diagnostics().is_empty());
        assert_eq!(store.fetch_calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_result_is_not_a_failure() {
        let store = Arc::new(FakeStore::default());
        let view = RelationshipsView::open(store, signed_in()).await;

        assert!(view.page().items.is_empty());
        assert_eq!(view.page().total_pages, 1);
        assert!(view.diagnostics().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_empty() {
        let store = Arc::new(FakeStore::with_records(sample()));
        let mut view = RelationshipsView::open(Arc::clone(&store), signed_in()).await;
        assert_eq!(view.page().total_items, 3);

        store.fail_fetch(true);
        view.refresh().await;

        assert!(view.page().items.is_empty());
        assert!(!view.is_loading());
        assert_eq!(view.diagnostics().len(), 1);
        assert_eq!(view.diagnostics()[0].operation, Operation::FetchRecords);
    }

    #[tokio::test]
    async fn test_theme_style_overlays_defaults() {
        let store = Arc::new(FakeStore::default());
        store.set_preference(ThemePreference {
            theme: Some(ThemeName::Sunset),
            style: Some(ThemeStyle {
                header_color: Some("#ff0000".to_string()),
                ..ThemeStyle::default()
            }),
        });

        let view = RelationshipsView::open(store, signed_in()).await;
        assert_eq!(view.theme().header_color, "#ff0000");
        assert_eq!(view.theme().text, ThemeTokens::default().text);
        assert_eq!(view.session().theme.theme, ThemeName::Sunset);
    }

    #[tokio::test]
    async fn test_theme_failure_uses_default() {
        let store = Arc::new(FakeStore::default());
        store.fail_theme(true);

        let view = RelationshipsView::open(store, signed_in()).await;
        assert_eq!(view.theme(), &ThemeTokens::default());
        assert_eq!(view.diagnostics()[0].operation, Operation::LoadTheme);
    }

    #[tokio::test]
    async fn test_successful_update_refetches_once() {
        let store = Arc::new(FakeStore::with_records(sample()));
        let mut view = RelationshipsView::open(Arc::clone(&store), signed_in()).await;

        let mut edited = view.list().records()[1].clone();
        edited.name = "Aaron Thompson".to_string();
        assert!(view.update(&edited).await);

        assert_eq!(store.fetch_calls(), 2);
        assert_eq!(ids(&view), vec![102, 101, 103]);
        assert_eq!(
            view.take_notices(),
            vec![Notice::Success("Saved successfully!".to_string())]
        );
        assert!(view.notices().is_empty());
    }

    #[tokio::test]
    async fn test_failed_update_shows_error_and_keeps_state() {
        let store = Arc::new(FakeStore::with_records(sample()));
        let mut view = RelationshipsView::open(Arc::clone(&store), signed_in()).await;
        store.fail_update(true);

        let mut edited = view.list().records()[0].clone();
        edited.name = "Changed".to_string();
        assert!(!view.update(&edited).await);

        assert_eq!(store.fetch_calls(), 1);
        assert_eq!(view.list().records()[0].name, "John Doe");
        assert_eq!(view.notices(), &[Notice::Error("Could not save.".to_string())]);
        assert_eq!(
            view.diagnostics()[0].operation,
            Operation::UpdateRecord(RelationshipId::new(101))
        );
    }

    #[tokio::test]
    async fn test_delete_refetches() {
        let store = Arc::new(FakeStore::with_records(sample()));
        let mut view = RelationshipsView::open(Arc::clone(&store), signed_in()).await;

        assert!(view.delete(RelationshipId::new(103)).await);
        assert_eq!(store.fetch_calls(), 2);
        assert_eq!(ids(&view), vec![101, 102]);
    }

    #[tokio::test]
    async fn test_delete_failure_records_diagnostic() {
        let store = Arc::new(FakeStore::with_records(sample()));
        let mut view = RelationshipsView::open(Arc::clone(&store), signed_in()).await;
        store.fail_delete(true);

        assert!(!view.delete(RelationshipId::new(103)).await);
        assert_eq!(store.fetch_calls(), 1);
        assert_eq!(view.page().total_items, 3);
        assert_eq!(view.diagnostics().len(), 1);
    }

    #[tokio::test]
    async fn test_save_theme_updates_session() {
        let store = Arc::new(FakeStore::default());
        let mut view = RelationshipsView::new(Arc::clone(&store), signed_in());

        assert!(view.save_theme(ThemeName::Ocean).await);
        assert_eq!(view.session().theme.theme, ThemeName::Ocean);
        assert_eq!(store.saved_theme(UserId::new(1)), Some(ThemeName::Ocean));

        store.fail_theme(true);
        assert!(!view.save_theme(ThemeName::Rose).await);
        assert_eq!(view.session().theme.theme, ThemeName::Ocean);
        assert_eq!(
            view.notices().last(),
            Some(&Notice::Error("Error saving theme.".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_typing_commits_once_and_resets_page() {
        let records: Vec<_> = (1..=25)
            .map(|id| Relationship::new(RelationshipId::new(id), format!("Person {id:02}")))
            .chain(sample())
            .collect();
        let store = Arc::new(FakeStore::with_records(records));
        let mut view = RelationshipsView::open(store, signed_in()).await;
        assert!(view.go_to_page(3));

        let mut commits = 0;
        for text in ["j", "jo", "joh", "john"] {
            view.set_search_input(text);
            tokio::time::advance(Duration::from_millis(100)).await;
            if view.tick() {
                commits += 1;
            }
        }
        assert_eq!(commits, 0);
        assert_eq!(view.list().current_page(), 3);

        assert!(view.settle_search().await);
        assert!(!view.tick());
        assert_eq!(view.list().query().committed(), "john");
        assert_eq!(view.list().current_page(), 1);
        assert_eq!(ids(&view), vec![101, 103]);
    }

    #[tokio::test]
    async fn test_rows_render_current_page() {
        let store = Arc::new(FakeStore::with_records(sample()));
        let view = RelationshipsView::open(store, signed_in()).await;

        let rows = view.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "John Doe");
        assert_eq!(rows[0].email, crate::display::EMPTY_CELL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_record_writes_do_not_overlap() {
        let store = Arc::new(FakeStore::with_records(sample()));
        store.set_write_delay(Duration::from_millis(50));
        let view = RelationshipsView::new(Arc::clone(&store), signed_in());
        let mutator = view.mutator();

        let first = Relationship::new(RelationshipId::new(101), "First");
        let second = Relationship::new(RelationshipId::new(101), "Second");
        let other = Relationship::new(RelationshipId::new(102), "Other");

        let (a, b, c) = tokio::join!(
            mutator.update(&first),
            mutator.update(&second),
            mutator.update(&other)
        );
        assert!(a.is_ok() && b.is_ok() && c.is_ok());

        let events = store.events();
        let same: Vec<_> = events.iter().filter(|e| e.ends_with(":101")).collect();
        assert_eq!(same, vec!["start:101", "end:101", "start:101", "end:101"]);

        // The unrelated record ran alongside the first write
        let other_start = events.iter().position(|e| e == "start:102").unwrap();
        let first_end = events.iter().position(|e| e == "end:101").unwrap();
        assert!(other_start < first_end);

        assert_eq!(mutator.in_flight(), 0);
        assert_eq!(store.records()[0].name, "Second");
    }

    #[tokio::test]
    async fn test_signed_out_view_skips_the_store() {
        let store = Arc::new(FakeStore::with_records(sample()));
        store.set_preference(ThemePreference {
            theme: Some(ThemeName::Sunset),
            style: None,
        });
        let mut view = RelationshipsView::open(Arc::clone(&store), Session::default()).await;

        assert_eq!(store.fetch_calls(), 0);
        assert!(!view.is_loading());
        assert!(view.page().items.is_empty());
        assert_eq!(view.theme(), &ThemeTokens::default());
        assert_eq!(view.session().theme.theme, ThemeName::Light);

        let record = Relationship::new(RelationshipId::new(101), "Changed");
        assert!(!view.update(&record).await);
        assert!(!view.delete(RelationshipId::new(101)).await);
        assert!(!view.save_theme(ThemeName::Ocean).await);

        assert!(store.events().is_empty());
        assert_eq!(store.records().len(), 3);
        assert_eq!(store.records()[0].name, "John Doe");
        assert_eq!(store.saved_theme(UserId::new(1)), None);
        assert!(view.notices().is_empty());
        assert!(view.diagnostics().is_empty());
    }
}
