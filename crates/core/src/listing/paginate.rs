//! Fixed-size pagination over an ordered result set.

/// Records shown per page in the relationships view.
pub const PAGE_SIZE: usize = 10;

/// Number of pages needed for `len` items. Never less than one.
#[must_use]
pub const fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    let pages = len.div_ceil(page_size);
    if pages == 0 { 1 } else { pages }
}

/// The items on 1-based `page`, clipped to what is available.
///
/// Page 0 and pages past the end yield an empty slice.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let Some(start) = page.checked_sub(1).and_then(|p| p.checked_mul(page_size)) else {
        return &[];
    };
    let end = start.saturating_add(page_size).min(items.len());
    items.get(start..end).unwrap_or_default()
}

/// Tracks the current page of a view.
///
/// The pager never corrects itself when the underlying data shrinks; callers
/// decide when to [`reset`](Self::reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: usize,
    page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Pager {
    #[must_use]
    pub const fn new(page_size: usize) -> Self {
        Self {
            current: 1,
            page_size,
        }
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub const fn total_pages(&self, len: usize) -> usize {
        total_pages(len, self.page_size)
    }

    /// Move to `target` if it lies in `[1, total_pages]`.
    ///
    /// Returns `true` if the page changed; out-of-range requests are ignored.
    pub fn go_to(&mut self, target: usize, len: usize) -> bool {
        if target < 1 || target > self.total_pages(len) {
            return false;
        }
        let changed = self.current != target;
        self.current = target;
        changed
    }

    pub const fn reset(&mut self) {
        self.current = 1;
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current > 1
    }

    #[must_use]
    pub const fn has_next(&self, len: usize) -> bool {
        self.current < self.total_pages(len)
    }

    /// The current page of `items`.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        paginate(items, self.current, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, PAGE_SIZE), 1);
        assert_eq!(total_pages(1, PAGE_SIZE), 1);
        assert_eq!(total_pages(10, PAGE_SIZE), 1);
        assert_eq!(total_pages(11, PAGE_SIZE), 2);
        assert_eq!(total_pages(25, PAGE_SIZE), 3);
    }

    #[test]
    fn test_twenty_five_items() {
        let items: Vec<usize> = (0..25).collect();

        assert_eq!(paginate(&items, 1, PAGE_SIZE), &items[0..10]);
        assert_eq!(paginate(&items, 3, PAGE_SIZE), &items[20..25]);
        assert_eq!(paginate(&items, 3, PAGE_SIZE).len(), 5);
    }

    #[test]
    fn test_out_of_range_pages_are_empty() {
        let items: Vec<usize> = (0..5).collect();
        assert!(paginate(&items, 0, PAGE_SIZE).is_empty());
        assert!(paginate(&items, 2, PAGE_SIZE).is_empty());
        assert!(paginate(&items, usize::MAX, PAGE_SIZE).is_empty());
    }

    #[test]
    fn test_pages_concatenate_to_input() {
        for len in [0, 1, 9, 10, 11, 20, 37] {
            let items: Vec<usize> = (0..len).collect();
            let pages = total_pages(len, PAGE_SIZE);

            let mut rebuilt = Vec::new();
            for page in 1..=pages {
                let chunk = paginate(&items, page, PAGE_SIZE);
                assert!(chunk.len() <= PAGE_SIZE);
                rebuilt.extend_from_slice(chunk);
            }
            assert_eq!(rebuilt, items, "len {len}");
        }
    }

    #[test]
    fn test_go_to_ignores_out_of_range() {
        let mut pager = Pager::default();

        assert!(!pager.go_to(0, 25));
        assert!(!pager.go_to(4, 25));
        assert_eq!(pager.current(), 1);

        assert!(pager.go_to(3, 25));
        assert_eq!(pager.current(), 3);
        assert!(!pager.go_to(3, 25));
    }

    #[test]
    fn test_shrinking_data_does_not_move_the_page() {
        let mut pager = Pager::default();
        assert!(pager.go_to(3, 25));

        let shrunk: Vec<usize> = (0..4).collect();
        assert_eq!(pager.current(), 3);
        assert!(pager.slice(&shrunk).is_empty());

        pager.reset();
        assert_eq!(pager.slice(&shrunk), &shrunk[..]);
    }

    #[test]
    fn test_previous_and_next() {
        let mut pager = Pager::default();
        assert!(!pager.has_previous());
        assert!(pager.has_next(11));
        assert!(!pager.has_next(10));

        pager.go_to(2, 11);
        assert!(pager.has_previous());
        assert!(!pager.has_next(11));
    }
}
