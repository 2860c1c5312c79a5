//! Agent Pipeline CRM server library.
//!
//! REST backend for relationships, color-scheme preferences and the
//! follow-up calendar. Exposed as a library so the router can be tested and
//! the repositories reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
