//! Page math shared by the list view and its callers.

/// Questions per page, fixed server-side.
pub const PAGE_SIZE: u32 = 10;

/// Number of pages needed for `total` questions; at least 1 even when the
/// catalog is empty, so pagination controls always have a valid range.
#[must_use]
pub fn page_count(total: u32) -> u32 {
    total.div_ceil(PAGE_SIZE).max(1)
}
