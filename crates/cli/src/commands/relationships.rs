//! Relationship commands, driven through the same view logic as the UI.

use chrono::NaiveDate;

use agent_pipeline_client::display::RelationshipRow;
use agent_pipeline_client::view::Notice;
use agent_pipeline_core::listing::{SortConfig, SortDirection, SortField};
use agent_pipeline_core::{RelationshipId, TransactionStatus};

use super::Context;

/// Options for `relationships list`.
pub struct ListOptions {
    pub search: String,
    pub sort: Option<String>,
    pub descending: bool,
    pub page: usize,
    pub json: bool,
}

/// Fields to change in `relationships update`; `None` leaves a field alone.
pub struct Edit {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<TransactionStatus>,
    pub qualified: Option<bool>,
    pub follow_up: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Columns printed by `relationships list`.
const COLUMNS: [SortField; 6] = [
    SortField::Name,
    SortField::Email,
    SortField::Phone,
    SortField::TransactionStatus,
    SortField::FollowUpDate,
    SortField::Qualified,
];

fn cells(row: &RelationshipRow) -> [&str; 6] {
    [
        &row.name,
        &row.email,
        &row.phone,
        &row.status,
        &row.follow_up_date,
        row.qualified,
    ]
}

fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        match notice {
            Notice::Success(message) => tracing::info!("{message}"),
            Notice::Error(message) => tracing::error!("{message}"),
        }
    }
}

/// Print one page of relationships.
///
/// # Errors
///
/// Returns an error if the relationships cannot be fetched.
pub async fn list(ctx: &Context, options: &ListOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = ctx.view().await?;
    view.refresh().await;
    if let Some(diagnostic) = view.diagnostics().first() {
        return Err(format!("could not load relationships: {}", diagnostic.message).into());
    }

    if let Some(name) = options.sort.as_deref() {
        match SortField::parse(name) {
            Some(field) => {
                let direction = if options.descending {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                };
                view.set_sort(SortConfig::new(Some(field), direction));
            }
            None => tracing::warn!(field = name, "Unknown sort field, keeping default order"),
        }
    }

    if !options.search.is_empty() {
        view.set_search_input(&options.search);
        view.settle_search().await;
    }

    if !view.go_to_page(options.page) {
        tracing::warn!(
            page = options.page,
            total_pages = view.list().total_pages(),
            "Page out of range, showing page {}",
            view.list().current_page()
        );
    }

    if options.json {
        let page = serde_json::to_string_pretty(&view.page())?;
        #[allow(clippy::print_stdout)]
        {
            println!("{page}");
        }
        return Ok(());
    }

    let sort = view.list().sort_config();
    let header: Vec<String> = COLUMNS
        .iter()
        .map(|field| format!("{} {}", field.as_str(), sort.indicator(*field)))
        .collect();
    let page = view.page();

    #[allow(clippy::print_stdout)]
    {
        println!("{:>5}  {}", "id", header.join(" | "));
        for row in view.rows() {
            println!("{:>5}  {}", row.id, cells(&row).join(" | "));
        }
        println!(
            "page {} of {} ({} matching)",
            page.page, page.total_pages, page.total_items
        );
    }
    Ok(())
}

/// Apply `edit` to a relationship and save it.
///
/// # Errors
///
/// Returns an error if the relationship does not exist or the save is rejected.
pub async fn update(
    ctx: &Context,
    id: RelationshipId,
    edit: Edit,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = ctx.view().await?;
    view.refresh().await;

    let mut record = view
        .list()
        .records()
        .iter()
        .find(|r| r.id == id)
        .cloned()
        .ok_or_else(|| format!("relationship {id} not found"))?;

    if let Some(name) = edit.name {
        record.name = name;
    }
    if let Some(email) = edit.email {
        record.email = Some(email);
    }
    if let Some(phone) = edit.phone {
        record.phone = Some(phone);
    }
    if let Some(status) = edit.status {
        record.transaction_status = status;
    }
    if let Some(qualified) = edit.qualified {
        record.qualified = qualified;
    }
    if let Some(follow_up) = edit.follow_up {
        record.follow_up_date = Some(follow_up);
    }
    if let Some(notes) = edit.notes {
        record.notes = Some(notes);
    }

    let saved = view.update(&record).await;
    print_notices(view.take_notices());
    if !saved {
        return Err(format!("relationship {id} was not saved").into());
    }
    Ok(())
}

/// Delete a relationship owned by the signed-in user.
///
/// # Errors
///
/// Returns an error if the server rejects the delete.
pub async fn delete(ctx: &Context, id: RelationshipId) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = ctx.view().await?;
    if !view.delete(id).await {
        let reason = view
            .diagnostics()
            .last()
            .map_or_else(String::new, |d| d.message.clone());
        return Err(format!("could not delete relationship {id}: {reason}").into());
    }

    tracing::info!(
        relationship_id = %id,
        remaining = view.list().records().len(),
        "Deleted relationship"
    );
    Ok(())
}
