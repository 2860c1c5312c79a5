//! Agent Pipeline CLI - Database and relationship management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! crm-cli migrate
//!
//! # Insert sample relationships for a user
//! crm-cli seed --user-id 1
//!
//! # Browse relationships through the API
//! crm-cli relationships list --search john --sort name --page 1
//!
//! # Pick a theme
//! crm-cli theme set ocean
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Insert sample relationships
//! - `sign-in` / `sign-out` - Manage the local session file
//! - `relationships` - List, update and delete relationships
//! - `theme` - Show or change the color scheme

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use agent_pipeline_core::{RelationshipId, ThemeName, TransactionStatus, UserId};

mod commands;

#[derive(Parser)]
#[command(name = "crm-cli")]
#[command(author, version, about = "Agent Pipeline CRM tools")]
struct Cli {
    /// Base URL of the CRM server
    #[arg(long, global = true, env = "CRM_API_URL", default_value = "http://localhost:5000")]
    api_url: String,

    /// Where the signed-in session is stored
    #[arg(long, global = true, env = "CRM_SESSION_FILE", default_value = ".crm-session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert sample relationships for a user
    Seed {
        /// Owner of the sample records
        #[arg(short, long, default_value_t = 1)]
        user_id: i32,
    },
    /// Start a local session
    SignIn {
        #[arg(short, long)]
        email: String,
    },
    /// Forget the local session
    SignOut,
    /// Manage relationships
    Relationships {
        #[command(subcommand)]
        action: RelationshipAction,
    },
    /// Show or change the color scheme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Subcommand)]
enum RelationshipAction {
    /// Print one page of relationships
    List {
        /// Case-insensitive search text
        #[arg(short, long, default_value = "")]
        search: String,

        /// Field to sort by (e.g. `name`, `follow_up_date`, `qualified`)
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Edit fields of a relationship
    Update(UpdateArgs),
    /// Delete a relationship
    Delete { id: i32 },
}

#[derive(Args)]
struct UpdateArgs {
    id: i32,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    status: Option<TransactionStatus>,
    #[arg(long)]
    qualified: Option<bool>,
    /// Follow-up date (YYYY-MM-DD)
    #[arg(long)]
    follow_up: Option<chrono::NaiveDate>,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Show the stored theme and resolved colors
    Get,
    /// Store a new theme
    Set { theme: ThemeName },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = commands::Context {
        api_url: cli.api_url,
        session_file: cli.session_file,
    };

    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { user_id } => {
            commands::seed::relationships(UserId::new(user_id)).await?;
        }
        Commands::SignIn { email } => commands::session::sign_in(&ctx, &email).await?,
        Commands::SignOut => commands::session::sign_out(&ctx).await?,
        Commands::Relationships { action } => match action {
            RelationshipAction::List {
                search,
                sort,
                desc,
                page,
                json,
            } => {
                let options = commands::relationships::ListOptions {
                    search,
                    sort,
                    descending: desc,
                    page,
                    json,
                };
                commands::relationships::list(&ctx, &options).await?;
            }
            RelationshipAction::Update(args) => {
                let edit = commands::relationships::Edit {
                    name: args.name,
                    email: args.email,
                    phone: args.phone,
                    status: args.status,
                    qualified: args.qualified,
                    follow_up: args.follow_up,
                    notes: args.notes,
                };
                commands::relationships::update(&ctx, RelationshipId::new(args.id), edit).await?;
            }
            RelationshipAction::Delete { id } => {
                commands::relationships::delete(&ctx, RelationshipId::new(id)).await?;
            }
        },
        Commands::Theme { action } => match action {
            ThemeAction::Get => commands::theme::show(&ctx).await?,
            ThemeAction::Set { theme } => commands::theme::set(&ctx, theme).await?,
        },
    }
    Ok(())
}
