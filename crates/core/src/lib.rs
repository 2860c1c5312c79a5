//! Agent Pipeline Core - Shared types and list logic.
//!
//! This crate provides the types and pure logic shared by all Agent Pipeline
//! components:
//! - `server` - REST backend serving relationships and preferences
//! - `client` - Relationships view logic and HTTP record store
//! - `cli` - Command-line front end, migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Relationship records, ids, statuses, themes and calendar events
//! - [`listing`] - Search, sort, pagination and debounce for the relationships view

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod listing;
pub mod types;

pub use types::*;
