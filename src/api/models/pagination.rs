//! Cursor pagination for list endpoints.
//!
//! Pages are keyed by entity id: ids are ULIDs, so lexical order is creation
//! order and "id < cursor" selects rows older than the cursor. The query
//! layer fetches one row more than the page size; the extra row only signals
//! that another page exists and is dropped before the page is returned. This
//! makes `has_more_pages` detectable without a separate count query.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Default number of items to return per page.
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Maximum number of items that can be requested per page.
pub const MAX_PER_PAGE: i64 = 100;

/// A cursor that sorts after every ULID this service generates.
///
/// Passing it (or omitting the cursor entirely) requests the newest page.
pub const FIRST_PAGE_CURSOR: &str = "7ZZZZZZZZZZZZZZZZZZZZZZZZZ";

/// Pagination parameters for cursor-based list endpoints.
///
/// - `cursor`: id boundary from the previous page (exclusive); omit for the
///   first page
/// - `per_page`: maximum items to return (default: 10, max: 100)
#[serde_as]
#[derive(Debug, Default, Clone, Deserialize, IntoParams, ToSchema)]
pub struct Pageable {
    /// Cursor returned by the previous page; omit to get the newest page
    pub cursor: Option<String>,

    /// Maximum number of items to return (default: 10, max: 100)
    #[param(default = 10, minimum = 1, maximum = 100)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub per_page: Option<i64>,
}

impl Pageable {
    /// Get the page size, clamped between 1 and [`MAX_PER_PAGE`].
    #[inline]
    pub fn per_page(&self) -> i64 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }

    /// Number of rows the query layer must fetch: one extra row beyond the
    /// page size, as the lookahead that detects whether more pages exist.
    #[inline]
    pub fn fetch_limit(&self) -> i64 {
        self.per_page() + 1
    }

    /// The effective cursor: the caller's, or the maximal sentinel that
    /// selects the newest page. An empty string counts as absent.
    #[inline]
    pub fn cursor(&self) -> &str {
        match self.cursor.as_deref() {
            Some(cursor) if !cursor.is_empty() => cursor,
            _ => FIRST_PAGE_CURSOR,
        }
    }
}

/// Pagination metadata returned alongside a page of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginationData {
    /// Page size this page was built with
    pub per_page: i64,
    /// Cursor for the next (older) page; empty when this page is empty
    pub cursor: String,
    /// Whether at least one more page exists
    pub has_more_pages: bool,
}

impl PaginationData {
    /// Post-process a fetched row set into the final page.
    ///
    /// `rows` must have been fetched with [`Pageable::fetch_limit`], ordered
    /// by id descending. If the lookahead row is present it is dropped and
    /// `has_more_pages` is set; the next-page cursor is the id of the last
    /// row that survives.
    pub fn build<T>(pageable: &Pageable, mut rows: Vec<T>, id_of: impl Fn(&T) -> &str) -> (Vec<T>, Self) {
        let per_page = pageable.per_page();

        let has_more_pages = rows.len() as i64 > per_page;
        if has_more_pages {
            rows.truncate(per_page as usize);
        }

        let cursor = rows.last().map(|row| id_of(row).to_string()).unwrap_or_default();

        (
            rows,
            Self {
                per_page,
                cursor,
                has_more_pages,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pageable(per_page: i64) -> Pageable {
        Pageable {
            cursor: None,
            per_page: Some(per_page),
        }
    }

    #[test]
    fn per_page_defaults_and_clamps() {
        assert_eq!(Pageable::default().per_page(), DEFAULT_PER_PAGE);
        assert_eq!(pageable(0).per_page(), 1);
        assert_eq!(pageable(-5).per_page(), 1);
        assert_eq!(pageable(1000).per_page(), MAX_PER_PAGE);
        assert_eq!(pageable(50).per_page(), 50);
    }

    #[test]
    fn fetch_limit_is_one_past_the_page() {
        assert_eq!(pageable(3).fetch_limit(), 4);
    }

    #[test]
    fn missing_or_empty_cursor_selects_newest_page() {
        assert_eq!(Pageable::default().cursor(), FIRST_PAGE_CURSOR);

        let empty = Pageable {
            cursor: Some(String::new()),
            per_page: None,
        };
        assert_eq!(empty.cursor(), FIRST_PAGE_CURSOR);

        let explicit = Pageable {
            cursor: Some("01ARZ3NDEKTSV4RRFFQ69G5FAV".to_string()),
            per_page: None,
        };
        assert_eq!(explicit.cursor(), "01ARZ3NDEKTSV4RRFFQ69G5FAV");
    }

    #[test]
    fn sentinel_sorts_after_ulids() {
        assert!(FIRST_PAGE_CURSOR > crate::types::new_id().as_str());
    }

    #[test]
    fn lookahead_row_is_dropped_and_flagged() {
        let rows: Vec<String> = (0..4).map(|i| format!("id-{i}")).collect();
        let (page, data) = PaginationData::build(&pageable(3), rows, |s| s.as_str());

        assert_eq!(page, vec!["id-0", "id-1", "id-2"]);
        assert!(data.has_more_pages);
        assert_eq!(data.cursor, "id-2");
        assert_eq!(data.per_page, 3);
    }

    #[test]
    fn short_page_keeps_every_row() {
        let rows: Vec<String> = (0..3).map(|i| format!("id-{i}")).collect();
        let (page, data) = PaginationData::build(&pageable(3), rows, |s| s.as_str());

        assert_eq!(page.len(), 3);
        assert!(!data.has_more_pages);
        assert_eq!(data.cursor, "id-2");
    }

    #[test]
    fn empty_page_has_empty_cursor() {
        let (page, data) = PaginationData::build(&pageable(3), Vec::<String>::new(), |s| s.as_str());

        assert!(page.is_empty());
        assert!(!data.has_more_pages);
        assert_eq!(data.cursor, "");
    }
}
