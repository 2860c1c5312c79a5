//! Agent Pipeline Client - Relationships view logic.
//!
//! This crate drives the relationships view against a record store:
//! - [`store`] - The [`RecordStore`](store::RecordStore) collaborator contract
//! - [`http`] - reqwest implementation talking to the CRM server
//! - [`session`] - Signed-in user and local theme, passed explicitly to views
//! - [`view`] - Fetch, write-then-reconcile mutations, theme loading
//! - [`mutation`] - Per-record serialization of in-flight writes
//! - [`display`] - Turning records into display strings
//!
//! Collaborator failures never escape the view; they end in an empty or
//! default state plus a recorded [`Diagnostic`](view::Diagnostic).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod display;
pub mod error;
pub mod http;
pub mod mutation;
pub mod session;
pub mod store;
pub mod view;

pub use error::ClientError;
pub use http::ApiClient;
pub use session::Session;
pub use store::RecordStore;
pub use view::RelationshipsView;
