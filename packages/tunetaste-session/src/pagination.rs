//! Offset-based pagination state for a search session.

use crate::PAGE_LIMIT;

/// Current page position and the navigation it allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    offset: u32,
    total: u32,
    limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PAGE_LIMIT)
    }
}

impl Pagination {
    pub fn new(limit: u32) -> Self {
        Self {
            offset: 0,
            total: 0,
            limit,
        }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Record the outcome of a successful search.
    pub fn update(&mut self, total: u32, offset: u32) {
        self.total = total;
        self.offset = offset;
    }

    /// Back to the empty state.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.total = 0;
    }

    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.offset) + u64::from(self.limit) < u64::from(self.total)
    }

    pub fn next_offset(&self) -> u32 {
        self.offset.saturating_add(self.limit)
    }

    pub fn previous_offset(&self) -> u32 {
        self.offset.saturating_sub(self.limit)
    }

    /// "Showing X - Y of Z", or an empty string when there is nothing to show.
    pub fn label(&self) -> String {
        if self.total == 0 {
            return String::new();
        }

        let first = u64::from(self.offset) + 1;
        let last = (u64::from(self.offset) + u64::from(self.limit)).min(u64::from(self.total));
        format!("Showing {} - {} of {}", first, last, self.total)
    }
}
