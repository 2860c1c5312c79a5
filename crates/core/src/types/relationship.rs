//! Relationship (contact) records.

use chrono::NaiveDate;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use super::{RelationshipId, TransactionStatus};

/// One contact in an agent's book of business.
///
/// Optional fields stay `None` when absent; turning them into display text is
/// the job of the rendering layer, not of search or sort. Every field except
/// `id` tolerates `null` or a wrong type, so one bad row never rejects a whole
/// fetched collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Stable identifier assigned by the record store.
    pub id: RelationshipId,
    /// Contact's full name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub married: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub spouse: Option<String>,
    /// Unknown status text falls back to `potential`.
    #[serde(default, deserialize_with = "lenient")]
    pub transaction_status: TransactionStatus,
    /// Free-form label such as "Friend", "Lead" or "Referral".
    #[serde(default, deserialize_with = "lenient")]
    pub relationship_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub last_contacted: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub follow_up_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient")]
    pub qualified: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub notes: Option<String>,
}

impl Relationship {
    /// Create a relationship with only the required fields set.
    #[must_use]
    pub fn new(id: RelationshipId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: None,
            phone: None,
            address: None,
            married: false,
            spouse: None,
            transaction_status: TransactionStatus::default(),
            relationship_type: None,
            last_contacted: None,
            follow_up_date: None,
            qualified: false,
            notes: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Value(T),
    Malformed(IgnoredAny),
}

/// Deserialize `T`, falling back to its default for `null` or mismatched input.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Value(value) => value,
        Lenient::Malformed(_) => T::default(),
    })
}

/// Accept ISO dates, treating `null`, empty strings and unparseable text as absent.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = lenient(deserializer)?;
    Ok(raw.and_then(|s| {
        let trimmed = s.trim();
        // Accept full timestamps too, keeping only the date part
        let date_part = trimmed.get(..10).unwrap_or(trimmed);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }))
}
