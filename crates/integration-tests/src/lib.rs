//! Integration tests for Agent Pipeline CRM.
//!
//! # Running Tests
//!
//! ```bash
//! # Prepare the database and start the server
//! cargo run -p agent-pipeline-cli -- migrate
//! cargo run -p agent-pipeline-server
//!
//! # Run the ignored HTTP tests against it
//! cargo test -p agent-pipeline-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `api_relationships` - Relationship CRUD and calendar
//! - `api_preferences` - Color scheme storage
//! - `client_view` - The relationships view against a live server

/// Base URL of the server under test (configurable via `CRM_API_URL`).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("CRM_API_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// User ID the tests create their records under.
///
/// Kept away from real accounts so repeated runs don't disturb them.
#[must_use]
pub fn test_user_id() -> i32 {
    std::env::var("CRM_TEST_USER_ID")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(9001)
}
