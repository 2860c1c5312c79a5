//! Single-field, stable sorting of relationships.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::Relationship;

/// Error returned when a sort field name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort field: {0}")]
pub struct ParseSortFieldError(pub String);

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Apply this direction to an ascending ordering.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// A sortable relationship field, named by its wire key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    Name,
    Email,
    Phone,
    Address,
    Married,
    Spouse,
    TransactionStatus,
    RelationshipType,
    LastContacted,
    FollowUpDate,
    Qualified,
    Notes,
}

/// The value a record exposes for a given field.
enum SortKey<'a> {
    Bool(bool),
    Number(i32),
    Text(Cow<'a, str>),
}

fn text_key(value: Option<&str>) -> SortKey<'_> {
    SortKey::Text(Cow::Borrowed(value.unwrap_or_default()))
}

impl SortField {
    pub const ALL: [Self; 13] = [
        Self::Id,
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::Married,
        Self::Spouse,
        Self::TransactionStatus,
        Self::RelationshipType,
        Self::LastContacted,
        Self::FollowUpDate,
        Self::Qualified,
        Self::Notes,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Married => "married",
            Self::Spouse => "spouse",
            Self::TransactionStatus => "transaction_status",
            Self::RelationshipType => "relationship_type",
            Self::LastContacted => "last_contacted",
            Self::FollowUpDate => "follow_up_date",
            Self::Qualified => "qualified",
            Self::Notes => "notes",
        }
    }

    /// Look up a field by name, returning `None` for unknown names.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }

    fn key(self, record: &Relationship) -> SortKey<'_> {
        match self {
            Self::Id => SortKey::Number(record.id.as_i32()),
            Self::Name => SortKey::Text(Cow::Borrowed(&record.name)),
            Self::Email => text_key(record.email.as_deref()),
            Self::Phone => text_key(record.phone.as_deref()),
            Self::Address => text_key(record.address.as_deref()),
            Self::Married => SortKey::Bool(record.married),
            Self::Spouse => text_key(record.spouse.as_deref()),
            Self::TransactionStatus => {
                SortKey::Text(Cow::Borrowed(record.transaction_status.as_str()))
            }
            Self::RelationshipType => text_key(record.relationship_type.as_deref()),
            // ISO dates order chronologically as text; absent dates become ""
            Self::LastContacted => SortKey::Text(
                record
                    .last_contacted
                    .map_or(Cow::Borrowed(""), |d| Cow::Owned(d.to_string())),
            ),
            Self::FollowUpDate => SortKey::Text(
                record
                    .follow_up_date
                    .map_or(Cow::Borrowed(""), |d| Cow::Owned(d.to_string())),
            ),
            Self::Qualified => SortKey::Bool(record.qualified),
            Self::Notes => text_key(record.notes.as_deref()),
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortField {
    type Err = ParseSortFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseSortFieldError(s.to_string()))
    }
}

/// Compare two records on `field` in the given direction.
fn compare(
    a: &Relationship,
    b: &Relationship,
    field: SortField,
    direction: SortDirection,
) -> Ordering {
    match (field.key(a), field.key(b)) {
        // false ranks below true; equal booleans stay tied in both directions
        (SortKey::Bool(x), SortKey::Bool(y)) => direction.apply(x.cmp(&y)),
        (SortKey::Number(x), SortKey::Number(y)) => direction.apply(x.cmp(&y)),
        (SortKey::Text(x), SortKey::Text(y)) => direction.apply(x.cmp(&y)),
        // A field always yields the same key kind, so mixed pairs are ties
        _ => Ordering::Equal,
    }
}

/// Return `records` ordered by `field`, without touching the input.
///
/// The sort is stable, so records with equal keys keep their relative order.
/// With no field selected the input order is returned as is.
#[must_use]
pub fn sort<'a>(
    records: &[&'a Relationship],
    field: Option<SortField>,
    direction: SortDirection,
) -> Vec<&'a Relationship> {
    let mut sorted = records.to_vec();
    if let Some(field) = field {
        sorted.sort_by(|a, b| compare(a, b, field, direction));
    }
    sorted
}

/// The active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub field: Option<SortField>,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            field: Some(SortField::Name),
            direction: SortDirection::Asc,
        }
    }
}

impl SortConfig {
    #[must_use]
    pub const fn new(field: Option<SortField>, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Select `field`: the active field flips direction, a new one starts ascending.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == Some(field) {
            self.direction = self.direction.flipped();
        } else {
            self.field = Some(field);
            self.direction = SortDirection::Asc;
        }
    }

    /// Header arrow for `field`.
    #[must_use]
    pub fn indicator(&self, field: SortField) -> &'static str {
        if self.field != Some(field) {
            return "⇅";
        }
        match self.direction {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }

    /// Apply this configuration to `records`.
    #[must_use]
    pub fn sort<'a>(&self, records: &[&'a Relationship]) -> Vec<&'a Relationship> {
        sort(records, self.field, self.direction)
    }
}
