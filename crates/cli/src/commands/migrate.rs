//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! crm-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `CRM_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Server migrations live in `crates/server/migrations/`.

use agent_pipeline_server::{config, db};

/// Run every pending migration against the CRM database.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = config::get_database_url("CRM_DATABASE_URL")?;

    tracing::info!("Connecting to CRM database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running CRM migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("CRM migrations complete!");
    Ok(())
}
