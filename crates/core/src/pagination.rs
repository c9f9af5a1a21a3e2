//! Pagination clamps shared by all list endpoints.

/// Page size applied when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: i64 = 25;

/// Hard ceiling on page size, so a single listing can never become an
/// unbounded scan.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a user-provided page size into `1..=MAX_PAGE_SIZE`.
pub fn clamp_page_size(page_size: Option<i64>) -> i64 {
    page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Convert a 1-based page number into a row offset for the given page size.
pub fn page_offset(page: Option<i64>, page_size: i64) -> i64 {
    (page.unwrap_or(1).max(1) - 1) * page_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_applied_when_absent() {
        assert_eq!(clamp_page_size(None), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn oversized_clamped_to_max() {
        assert_eq!(clamp_page_size(Some(500)), MAX_PAGE_SIZE);
    }

    #[test]
    fn zero_and_negative_clamped_to_one() {
        assert_eq!(clamp_page_size(Some(0)), 1);
        assert_eq!(clamp_page_size(Some(-3)), 1);
    }

    #[test]
    fn offsets_are_zero_based_pages() {
        assert_eq!(page_offset(None, 25), 0);
        assert_eq!(page_offset(Some(1), 25), 0);
        assert_eq!(page_offset(Some(3), 25), 50);
        assert_eq!(page_offset(Some(0), 25), 0);
        assert_eq!(page_offset(Some(-2), 25), 0);
    }
}
