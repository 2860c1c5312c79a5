//! Status enums for relationship records.

use serde::{Deserialize, Serialize};

/// Error returned when a status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid transaction status: {0}")]
pub struct ParseStatusError(pub String);

/// Where a relationship stands in the agent's sales pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "crm.transaction_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Not yet engaged in a transaction.
    #[default]
    Potential,
    /// Actively searching, listing or negotiating.
    Active,
    /// Under contract.
    Pending,
    /// Transaction completed.
    Closed,
    /// Lead went elsewhere or dropped out.
    NotConverted,
}

impl TransactionStatus {
    /// All statuses in pipeline order.
    pub const ALL: [Self; 5] = [
        Self::Potential,
        Self::Active,
        Self::Pending,
        Self::Closed,
        Self::NotConverted,
    ];

    /// The wire/text form of the status (e.g. `not_converted`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Potential => "potential",
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Closed => "closed",
            Self::NotConverted => "not_converted",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_round_trip() {
        for status in TransactionStatus::ALL {
            assert_eq!(status.to_string().parse::<TransactionStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_serde_is_snake_case() {
        let json = serde_json::to_string(&TransactionStatus::NotConverted).unwrap();
        assert_eq!(json, "\"not_converted\"");
    }

    #[test]
    fn test_status_rejects_unknown() {
        let err = "won".parse::<TransactionStatus>().unwrap_err();
        assert_eq!(err.to_string(), "invalid transaction status: won");
    }
}
