//! Pagination parameters with lenient compatibility defaults.
//!
//! Malformed `page` or `limit` values never reject a request. Absent,
//! non-numeric, and non-positive inputs all silently fall back to the
//! defaults, which front-ends have come to rely on.

use serde::{Deserialize, Serialize};

/// Page number used when the input is absent or unusable.
pub const DEFAULT_PAGE: usize = 1;

/// Page size used when the input is absent or unusable.
pub const DEFAULT_LIMIT: usize = 5;

/// Resolved pagination parameters.
///
/// `page` is 1-based; `offset` is derived as `(page - 1) * limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// 1-based page number.
    pub page: usize,
    /// Maximum records per page.
    pub limit: usize,
}

impl PageParams {
    /// Creates parameters from already-validated values.
    #[must_use]
    pub const fn new(page: usize, limit: usize) -> Self {
        Self { page, limit }
    }

    /// Resolves raw query-string values, falling back to defaults.
    ///
    /// A value that is missing, fails to parse as an integer, or is not
    /// strictly positive resolves to the corresponding default.
    #[must_use]
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page, DEFAULT_PAGE),
            limit: parse_positive(limit, DEFAULT_LIMIT),
        }
    }

    /// Zero-based offset of the first record on this page.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Whether records exist beyond this page, given the total count.
    #[must_use]
    pub const fn has_next(&self, total: usize) -> bool {
        self.offset().saturating_add(self.limit) < total
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

fn parse_positive(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
        .map_or(default, |v| v as usize)
}
