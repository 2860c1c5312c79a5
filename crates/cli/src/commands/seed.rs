//! Seed the database with sample relationships.
//!
//! Gives an empty account something to browse: three contacts in different
//! pipeline stages, each with a follow-up date so the calendar has entries.

use chrono::NaiveDate;
use tracing::info;

use agent_pipeline_core::{TransactionStatus, UserId};
use agent_pipeline_server::db::{NewRelationship, RelationshipRepository};
use agent_pipeline_server::{config, db};

struct Sample {
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    address: &'static str,
    spouse: Option<&'static str>,
    status: TransactionStatus,
    kind: &'static str,
    last_contacted: (i32, u32, u32),
    follow_up: (i32, u32, u32),
    qualified: bool,
}

const SAMPLES: [Sample; 3] = [
    Sample {
        name: "John Doe",
        email: "john@example.com",
        phone: "(214) 555-1234",
        address: "123 Main St, Plano TX",
        spouse: Some("Jane Doe"),
        status: TransactionStatus::Active,
        kind: "Friend",
        last_contacted: (2025, 3, 1),
        follow_up: (2025, 4, 1),
        qualified: true,
    },
    Sample {
        name: "Sarah Thompson",
        email: "sarah.t@example.com",
        phone: "(972) 888-4499",
        address: "450 Oak Ridge Dr, McKinney TX",
        spouse: None,
        status: TransactionStatus::Potential,
        kind: "Lead",
        last_contacted: (2025, 2, 15),
        follow_up: (2025, 3, 10),
        qualified: false,
    },
    Sample {
        name: "Michael Johnson",
        email: "m.johnson@gmail.com",
        phone: "(469) 222-7788",
        address: "88 Lakeview Ln, Frisco TX",
        spouse: Some("Ashley Johnson"),
        status: TransactionStatus::Pending,
        kind: "Referral",
        last_contacted: (2025, 2, 28),
        follow_up: (2025, 3, 5),
        qualified: false,
    },
];

fn date((year, month, day): (i32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

impl Sample {
    fn to_new(&self, user: UserId) -> NewRelationship {
        NewRelationship {
            email: Some(self.email.to_string()),
            phone: Some(self.phone.to_string()),
            address: Some(self.address.to_string()),
            married: self.spouse.is_some(),
            spouse: self.spouse.map(str::to_string),
            transaction_status: self.status,
            relationship_type: Some(self.kind.to_string()),
            last_contacted: date(self.last_contacted),
            follow_up_date: date(self.follow_up),
            qualified: self.qualified,
            ..NewRelationship::named(user, self.name)
        }
    }
}

/// Insert the sample relationships for `user` unless they already have some.
///
/// # Errors
///
/// Returns an error if the database URL is missing or a query fails.
pub async fn relationships(user: UserId) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = config::get_database_url("CRM_DATABASE_URL")?;

    info!("Connecting to CRM database...");
    let pool = db::create_pool(&database_url).await?;
    let repo = RelationshipRepository::new(&pool);

    let existing = repo.list_for_user(user).await?;
    if !existing.is_empty() {
        info!(
            user_id = %user,
            count = existing.len(),
            "User already has relationships, skipping seed"
        );
        return Ok(());
    }

    for sample in &SAMPLES {
        let record = repo.create(&sample.to_new(user)).await?;
        info!(relationship_id = %record.id, name = %record.name, "Inserted sample");
    }

    info!(user_id = %user, "Seed complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_build_valid_records() {
        let records: Vec<_> = SAMPLES.iter().map(|s| s.to_new(UserId::new(1))).collect();

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.follow_up_date.is_some()));
        assert!(records[0].married);
        assert!(!records[1].married);
        assert_eq!(records[2].spouse.as_deref(), Some("Ashley Johnson"));
        assert_eq!(records[1].transaction_status, TransactionStatus::Potential);
    }
}
