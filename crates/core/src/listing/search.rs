//! Case-insensitive substring search over relationship text fields.

use crate::Relationship;

/// Build the lower-cased text that a query is matched against.
///
/// Fields are joined with single spaces in a fixed order; absent fields
/// contribute empty text.
fn haystack(record: &Relationship) -> String {
    [
        record.name.as_str(),
        record.email.as_deref().unwrap_or_default(),
        record.phone.as_deref().unwrap_or_default(),
        record.address.as_deref().unwrap_or_default(),
        record.relationship_type.as_deref().unwrap_or_default(),
        record.transaction_status.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// Whether `record` matches `query`, ignoring case.
///
/// An empty query matches everything.
#[must_use]
pub fn matches(record: &Relationship, query: &str) -> bool {
    query.is_empty() || haystack(record).contains(&query.to_lowercase())
}

/// Narrow `records` to those matching `query`, preserving input order.
#[must_use]
pub fn filter<'a>(records: &'a [Relationship], query: &str) -> Vec<&'a Relationship> {
    if query.is_empty() {
        return records.iter().collect();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| haystack(record).contains(&needle))
        .collect()
}
