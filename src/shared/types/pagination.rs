//! Offset/limit pagination for listing pages
//!
//! `compute_pagination` turns a row count, a page size and the page the
//! client asked for into everything a listing view needs to draw its
//! navigation links. It never fails: nonsensical inputs are clamped so the
//! view can never produce a broken link.

use serde::Serialize;
use utoipa::ToSchema;

/// Navigation data for one page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    /// Page being shown (1-based)
    pub current_page: u64,
    /// Rows per page
    pub page_size: u64,
    /// Zero-based row offset of the first row on `current_page`
    pub offset: u64,
    /// Last page number; 0 when there are no rows
    pub total_pages: u64,
    /// `1..=total_pages`, empty when there are no rows
    pub page_numbers: Vec<u64>,
    /// Target of the "previous" link, never below 1
    pub previous_page: u64,
    /// Target of the "next" link, never below 1 and never past the last page
    pub next_page: u64,
}

/// Compute the page context for `requested_page` of a listing with
/// `total_count` rows split into pages of `page_size`.
///
/// `page_size == 0` is treated as 1 and `requested_page == 0` as 1.
/// Pages past the end are tolerated: the offset points past the last row
/// and the caller simply receives an empty slice.
pub fn compute_pagination(total_count: u64, page_size: u64, requested_page: u64) -> PageContext {
    let page_size = page_size.max(1);
    let current_page = requested_page.max(1);

    let offset = (current_page - 1).saturating_mul(page_size);
    let total_pages = total_count.div_ceil(page_size);
    let page_numbers = (1..=total_pages).collect();

    let previous_page = current_page.saturating_sub(1).max(1);
    let next_page = current_page.saturating_add(1).min(total_pages).max(1);

    PageContext {
        current_page,
        page_size,
        offset,
        total_pages,
        page_numbers,
        previous_page,
        next_page,
    }
}

impl PageContext {
    /// Whether `current_page` lies past the last page.
    pub fn is_out_of_range(&self) -> bool {
        self.current_page > self.total_pages.max(1)
    }
}

// ── Tests ──────────────────────────────────────────────────────
