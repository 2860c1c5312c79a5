//! Core types for Agent Pipeline.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod calendar;
pub mod id;
pub mod relationship;
pub mod status;
pub mod theme;

pub use calendar::{CalendarEvent, EventKind};
pub use id::*;
pub use relationship::Relationship;
pub use status::*;
pub use theme::{ParseThemeError, ThemeName, ThemePreference, ThemeStyle, ThemeTokens};
