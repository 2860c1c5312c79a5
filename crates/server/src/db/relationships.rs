//! Relationship repository for database operations.
//!
//! Queries are built at runtime with `sqlx::query_as` and decoded through an
//! internal row type, so the crate builds without a live database.

use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;

use agent_pipeline_core::{Relationship, RelationshipId, TransactionStatus, UserId};

use super::RepositoryError;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` relationship queries.
#[derive(Debug, sqlx::FromRow)]
struct RelationshipRow {
    id: i32,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    married: bool,
    spouse: Option<String>,
    transaction_status: TransactionStatus,
    relationship_type: Option<String>,
    last_contacted: Option<NaiveDate>,
    follow_up_date: Option<NaiveDate>,
    qualified: bool,
    notes: Option<String>,
}

impl TryFrom<RelationshipRow> for Relationship {
    type Error = RepositoryError;

    fn try_from(row: RelationshipRow) -> Result<Self, Self::Error> {
        if row.name.trim().is_empty() {
            return Err(RepositoryError::DataCorruption(format!(
                "relationship {} has an empty name",
                row.id
            )));
        }

        Ok(Self {
            id: RelationshipId::new(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            married: row.married,
            spouse: row.spouse,
            transaction_status: row.transaction_status,
            relationship_type: row.relationship_type,
            last_contacted: row.last_contacted,
            follow_up_date: row.follow_up_date,
            qualified: row.qualified,
            notes: row.notes,
        })
    }
}

// =============================================================================
// Input Types
// =============================================================================

/// A relationship to be created, owned by `user_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRelationship {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub married: bool,
    #[serde(default)]
    pub spouse: Option<String>,
    #[serde(default)]
    pub transaction_status: TransactionStatus,
    #[serde(default)]
    pub relationship_type: Option<String>,
    #[serde(default)]
    pub last_contacted: Option<NaiveDate>,
    #[serde(default)]
    pub follow_up_date: Option<NaiveDate>,
    #[serde(default)]
    pub qualified: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewRelationship {
    /// A record with only a name, everything else defaulted.
    #[must_use]
    pub fn named(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            user_id,
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

// =============================================================================
// Repository
// =============================================================================

/// Repository for relationship database operations.
pub struct RelationshipRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RelationshipRepository<'a> {
    /// Create a new relationship repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every relationship owned by `user`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list_for_user(&self, user: UserId) -> Result<Vec<Relationship>, RepositoryError> {
        let rows = sqlx::query_as::<_, RelationshipRow>(
            r"
            SELECT id, name, email, phone, address, married, spouse,
                   transaction_status, relationship_type, last_contacted,
                   follow_up_date, qualified, notes
            FROM crm.relationships
            WHERE user_id = $1
            ORDER BY id
            ",
        )
        .bind(user)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Relationships owned by `user` that have a follow-up date, soonest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn follow_ups(&self, user: UserId) -> Result<Vec<Relationship>, RepositoryError> {
        let rows = sqlx::query_as::<_, RelationshipRow>(
            r"
            SELECT id, name, email, phone, address, married, spouse,
                   transaction_status, relationship_type, last_contacted,
                   follow_up_date, qualified, notes
            FROM crm.relationships
            WHERE user_id = $1 AND follow_up_date IS NOT NULL
            ORDER BY follow_up_date, id
            ",
        )
        .bind(user)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a relationship by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row is invalid.
    pub async fn get(&self, id: RelationshipId) -> Result<Option<Relationship>, RepositoryError> {
        let row = sqlx::query_as::<_, RelationshipRow>(
            r"
            SELECT id, name, email, phone, address, married, spouse,
                   transaction_status, relationship_type, last_contacted,
                   follow_up_date, qualified, notes
            FROM crm.relationships
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Insert a new relationship and return it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a unique constraint violation.
    /// Returns `RepositoryError::Database` if the insert fails otherwise.
    pub async fn create(&self, new: &NewRelationship) -> Result<Relationship, RepositoryError> {
        let row = sqlx::query_as::<_, RelationshipRow>(
            r"
            INSERT INTO crm.relationships (
                user_id, name, email, phone, address, married, spouse,
                transaction_status, relationship_type, last_contacted,
                follow_up_date, qualified, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id, name, email, phone, address, married, spouse,
                      transaction_status, relationship_type, last_contacted,
                      follow_up_date, qualified, notes
            ",
        )
        .bind(new.user_id)
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.address)
        .bind(new.married)
        .bind(&new.spouse)
        .bind(new.transaction_status)
        .bind(&new.relationship_type)
        .bind(new.last_contacted)
        .bind(new.follow_up_date)
        .bind(new.qualified)
        .bind(&new.notes)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                RepositoryError::Conflict(db_err.message().to_string())
            }
            other => RepositoryError::Database(other),
        })?;

        row.try_into()
    }

    /// Replace every field of an existing relationship.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no relationship has this ID.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(&self, record: &Relationship) -> Result<Relationship, RepositoryError> {
        let row = sqlx::query_as::<_, RelationshipRow>(
            r"
            UPDATE crm.relationships
            SET name = $2, email = $3, phone = $4, address = $5, married = $6,
                spouse = $7, transaction_status = $8, relationship_type = $9,
                last_contacted = $10, follow_up_date = $11, qualified = $12,
                notes = $13, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, phone, address, married, spouse,
                      transaction_status, relationship_type, last_contacted,
                      follow_up_date, qualified, notes
            ",
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(&record.address)
        .bind(record.married)
        .bind(&record.spouse)
        .bind(record.transaction_status)
        .bind(&record.relationship_type)
        .bind(record.last_contacted)
        .bind(record.follow_up_date)
        .bind(record.qualified)
        .bind(&record.notes)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete a relationship owned by `user`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such relationship exists for the user.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: RelationshipId, user: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM crm.relationships WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
