//! Generic filter/sort/paginate derivation for table-backed views.
//!
//! Every table in the dashboard (alertas, transitos, precintos, novedades)
//! derives its visible rows the same way: filter the source collection,
//! sort by the active column, slice the requested page. This module is
//! that derivation, factored once; the per-domain stores supply the
//! predicate and comparator.
//!
//! The output is always a permutation/subset of the input - derivation
//! never fabricates or mutates rows.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Direction of the active sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// The direction a second click on the same column header produces.
    pub fn toggled(self) -> SortDirection {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// A page request: zero-based page index and rows per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub index: usize,
    pub size: usize,
}

/// A derived view over a source collection.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedView<T> {
    /// Rows of the requested page, filtered and sorted.
    pub items: Vec<T>,
    /// Total row count after filtering (before pagination).
    pub total: usize,
    /// The page actually returned; out-of-range requests clamp to the
    /// last page.
    pub page_index: usize,
    /// Number of pages the filtered set spans. Zero only when `size` is
    /// zero.
    pub page_count: usize,
}

/// Derive a filtered, sorted, paginated view of `source`.
///
/// `filter` keeps rows it returns true for; `compare` orders them in
/// ascending terms and `direction` flips it. The sort is stable, so rows
/// the comparator considers equal keep their source order. With
/// `page: None` the whole filtered set is returned as a single page.
pub fn derive_view<T, F, C>(
    source: &[T],
    filter: F,
    compare: C,
    direction: SortDirection,
    page: Option<Page>,
) -> PagedView<T>
where
    T: Clone,
    F: Fn(&T) -> bool,
    C: Fn(&T, &T) -> Ordering,
{
    let mut items: Vec<T> = source.iter().filter(|row| filter(row)).cloned().collect();
    items.sort_by(|a, b| match direction {
        SortDirection::Asc => compare(a, b),
        SortDirection::Desc => compare(b, a),
    });

    let total = items.len();
    let Some(Page { index, size }) = page else {
        return PagedView {
            items,
            total,
            page_index: 0,
            page_count: 1,
        };
    };

    if size == 0 {
        return PagedView {
            items: Vec::new(),
            total,
            page_index: 0,
            page_count: 0,
        };
    }

    let page_count = total.div_ceil(size).max(1);
    let page_index = index.min(page_count - 1);
    let items = items
        .into_iter()
        .skip(page_index * size)
        .take(size)
        .collect();

    PagedView {
        items,
        total,
        page_index,
        page_count,
    }
}

/// Case-insensitive substring match, used by the free-text filters.
/// An empty needle matches everything.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
