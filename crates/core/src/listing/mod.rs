//! List management for the relationships view.
//!
//! Records flow through three pure stages, each recomputed from its inputs:
//!
//! ```text
//! records -> search::filter -> sort::sort -> paginate::paginate -> page
//! ```
//!
//! [`debounce::QueryDebouncer`] decides when typed search text becomes the
//! committed query, and [`view::RelationshipList`] ties the stages together.

pub mod debounce;
pub mod paginate;
pub mod search;
pub mod sort;
pub mod view;

pub use debounce::{DebounceState, QUIESCENCE_WINDOW, QueryDebouncer};
pub use paginate::{PAGE_SIZE, Pager, paginate, total_pages};
pub use search::{filter, matches};
pub use sort::{ParseSortFieldError, SortConfig, SortDirection, SortField, sort};
pub use view::{PageView, RelationshipList};
