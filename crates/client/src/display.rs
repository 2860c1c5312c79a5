//! Display formatting for relationship rows.
//!
//! This is the only place absent values turn into placeholder text; search
//! and sort work on the typed values.

use agent_pipeline_core::Relationship;
use serde::Serialize;

/// Shown in place of an absent or empty value.
pub const EMPTY_CELL: &str = "—";

fn text_cell(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => EMPTY_CELL.to_string(),
    }
}

const fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// A relationship with every column rendered to text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub married: &'static str,
    pub spouse: String,
    pub status: String,
    pub relationship_type: String,
    pub last_contacted: String,
    pub follow_up_date: String,
    pub qualified: &'static str,
    pub notes: String,
}

impl From<&Relationship> for RelationshipRow {
    fn from(record: &Relationship) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            email: text_cell(record.email.as_deref()),
            phone: text_cell(record.phone.as_deref()),
            address: text_cell(record.address.as_deref()),
            married: yes_no(record.married),
            spouse: text_cell(record.spouse.as_deref()),
            status: record.transaction_status.to_string(),
            relationship_type: text_cell(record.relationship_type.as_deref()),
            last_contacted: record
                .last_contacted
                .map_or_else(|| EMPTY_CELL.to_string(), |d| d.to_string()),
            follow_up_date: record
                .follow_up_date
                .map_or_else(|| EMPTY_CELL.to_string(), |d| d.to_string()),
            qualified: yes_no(record.qualified),
            notes: text_cell(record.notes.as_deref()),
        }
    }
}
