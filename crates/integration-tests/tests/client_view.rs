//! The relationships view driven against a live server.
//!
//! Requires the CRM server running against a migrated database.

use std::sync::Arc;

use agent_pipeline_client::session::{Session, SessionUser};
use agent_pipeline_client::view::Notice;
use agent_pipeline_client::{ApiClient, RelationshipsView};
use agent_pipeline_core::{Relationship, RelationshipId, ThemeName, UserId};
use agent_pipeline_integration_tests::{api_base_url, test_user_id};
use reqwest::{Client, StatusCode};
use serde_json::json;

fn test_session() -> Session {
    Session::for_user(SessionUser {
        id: UserId::new(test_user_id()),
        ..SessionUser::default()
    })
}

async fn create(name: &str) -> Relationship {
    let resp = Client::new()
        .post(format!("{}/api/relationships", api_base_url()))
        .json(&json!({"userId": test_user_id(), "name": name}))
        .send()
        .await
        .expect("Failed to create relationship");
    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse relationship")
}

async fn open_view() -> RelationshipsView<ApiClient> {
    let client = ApiClient::new(&api_base_url()).expect("valid base URL");
    RelationshipsView::open(Arc::new(client), test_session()).await
}

#[tokio::test]
#[ignore = "Requires running CRM server and database"]
async fn test_update_then_refetch() {
    let record = create("View Update Contact").await;
    let mut view = open_view().await;
    assert!(view.diagnostics().is_empty());

    let mut edited = record.clone();
    edited.notes = Some("Called back".to_string());
    assert!(view.update(&edited).await);
    assert_eq!(
        view.take_notices(),
        vec![Notice::Success("Saved successfully!".to_string())]
    );

    let stored = view
        .list()
        .records()
        .iter()
        .find(|r| r.id == record.id)
        .expect("record still listed");
    assert_eq!(stored.notes.as_deref(), Some("Called back"));

    assert!(view.delete(record.id).await);
    assert!(view.list().records().iter().all(|r| r.id != record.id));
}

#[tokio::test]
#[ignore = "Requires running CRM server and database"]
async fn test_update_of_missing_record_shows_error() {
    let mut view = open_view().await;
    let ghost = Relationship::new(RelationshipId::new(2_147_480_001), "Ghost");

    assert!(!view.update(&ghost).await);
    assert_eq!(
        view.notices(),
        &[Notice::Error("Could not save.".to_string())]
    );
}

#[tokio::test]
#[ignore = "Requires running CRM server and database"]
async fn test_search_narrows_list() {
    let record = create("Quentin Searchable").await;
    let mut view = open_view().await;

    view.set_search_input("QUENTIN");
    assert!(view.settle_search().await);
    let page = view.page();
    assert_eq!(page.page, 1);
    assert!(page.items.iter().any(|r| r.id == record.id));
    assert!(page.items.iter().all(|r| r.name.to_lowercase().contains("quentin")));

    assert!(view.delete(record.id).await);
}

#[tokio::test]
#[ignore = "Requires running CRM server and database"]
async fn test_theme_round_trip() {
    let mut view = open_view().await;
    assert!(view.save_theme(ThemeName::Rose).await);

    let mut reopened = open_view().await;
    reopened.load_theme().await;
    assert_eq!(reopened.session().theme.theme, ThemeName::Rose);
}
