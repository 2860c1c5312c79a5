//! State glue for the relationships list.

use std::time::Instant;

use serde::Serialize;

use super::debounce::QueryDebouncer;
use super::paginate::Pager;
use super::search;
use super::sort::{SortConfig, SortField};
use crate::Relationship;

/// One rendered page of the relationships list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView<'a> {
    pub items: Vec<&'a Relationship>,
    /// Current 1-based page.
    pub page: usize,
    pub total_pages: usize,
    /// Number of records after filtering.
    pub total_items: usize,
}

/// Owns the record collection plus the search, sort and page state.
///
/// Every derived sequence is recomputed from scratch on request; nothing here
/// caches intermediate results or mutates the record collection in place.
#[derive(Debug, Clone, Default)]
pub struct RelationshipList {
    records: Vec<Relationship>,
    query: QueryDebouncer,
    sort: SortConfig,
    pager: Pager,
}

impl RelationshipList {
    #[must_use]
    pub fn new(records: Vec<Relationship>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn records(&self) -> &[Relationship] {
        &self.records
    }

    /// Swap in a freshly fetched collection. The current page is kept.
    pub fn replace_records(&mut self, records: Vec<Relationship>) {
        self.records = records;
    }

    #[must_use]
    pub const fn query(&self) -> &QueryDebouncer {
        &self.query
    }

    #[must_use]
    pub const fn sort_config(&self) -> &SortConfig {
        &self.sort
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.pager.current()
    }

    /// Buffer a change to the search box.
    pub fn set_search_input(&mut self, text: &str, now: Instant) {
        self.query.input(text, now);
    }

    /// Advance the debounce timer.
    ///
    /// When a query is committed the page returns to 1 and `true` is returned.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.query.poll(now).is_some() {
            self.pager.reset();
            return true;
        }
        false
    }

    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort.toggle(field);
    }

    pub const fn set_sort(&mut self, sort: SortConfig) {
        self.sort = sort;
    }

    /// Request a page change; ignored when `target` is out of range.
    pub fn go_to_page(&mut self, target: usize) -> bool {
        let len = self.filtered().len();
        self.pager.go_to(target, len)
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.pager.total_pages(self.filtered().len())
    }

    /// Records matching the committed query, in collection order.
    #[must_use]
    pub fn filtered(&self) -> Vec<&Relationship> {
        search::filter(&self.records, self.query.committed())
    }

    /// Filtered records in the configured order.
    #[must_use]
    pub fn sorted(&self) -> Vec<&Relationship> {
        self.sort.sort(&self.filtered())
    }

    /// The current page of filtered, sorted records.
    #[must_use]
    pub fn view(&self) -> PageView<'_> {
        let sorted = self.sorted();
        PageView {
            items: self.pager.slice(&sorted).to_vec(),
            page: self.pager.current(),
            total_pages: self.pager.total_pages(sorted.len()),
            total_items: sorted.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::RelationshipId;
    use crate::listing::{QUIESCENCE_WINDOW, SortDirection};

    fn numbered(count: i32) -> Vec<Relationship> {
        (1..=count)
            .map(|id| Relationship::new(RelationshipId::new(id), format!("Contact {id:02}")))
            .collect()
    }

    fn ids(view: &PageView<'_>) -> Vec<i32> {
        view.items.iter().map(|r| r.id.as_i32()).collect()
    }

    #[test]
    fn test_default_view_sorted_by_name_first_page() {
        let mut records = numbered(25);
        records.reverse();
        let list = RelationshipList::new(records);

        let view = list.view();
        assert_eq!(view.page, 1);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.total_items, 25);
        assert_eq!(ids(&view), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_debounced_search_resets_page() {
        let start = Instant::now();
        let mut list = RelationshipList::new(numbered(25));
        assert!(list.go_to_page(3));

        for (i, text) in ["C", "Co", "Con", "Contact 1"].into_iter().enumerate() {
            let now = start + Duration::from_millis(50 * i as u64);
            list.set_search_input(text, now);
            assert!(!list.tick(now));
        }
        // Filtering has not changed yet
        assert_eq!(list.view().total_items, 25);
        assert_eq!(list.current_page(), 3);

        let fire = start + Duration::from_millis(150) + QUIESCENCE_WINDOW;
        assert!(list.tick(fire));
        assert_eq!(list.query().committed(), "contact 1");
        assert_eq!(list.current_page(), 1);

        let view = list.view();
        assert_eq!(view.total_items, 10);
        assert_eq!(ids(&view), (10..=19).collect::<Vec<_>>());
    }

    #[test]
    fn test_page_change_bounds_follow_filtered_count() {
        let mut list = RelationshipList::new(numbered(12));
        assert!(!list.go_to_page(3));
        assert!(list.go_to_page(2));
        assert_eq!(ids(&list.view()), vec![11, 12]);
    }

    #[test]
    fn test_replacing_records_keeps_page() {
        let mut list = RelationshipList::new(numbered(25));
        assert!(list.go_to_page(3));

        list.replace_records(numbered(5));
        let view = list.view();
        assert_eq!(view.page, 3);
        assert_eq!(view.total_pages, 1);
        assert!(view.items.is_empty());
    }

    #[test]
    fn test_toggle_sort_reorders() {
        let mut list = RelationshipList::new(numbered(3));
        list.toggle_sort(SortField::Name);
        assert_eq!(ids(&list.view()), vec![3, 2, 1]);

        list.set_sort(SortConfig::new(None, SortDirection::Asc));
        assert_eq!(ids(&list.view()), vec![1, 2, 3]);
    }
}
