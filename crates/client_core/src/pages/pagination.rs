//! Page cursor shown under every list.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current: u32,
    total: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current: 1,
            total: 1,
        }
    }
}

impl Pagination {
    pub fn new(current: u32, total: u32) -> Self {
        let total = total.max(1);
        Self {
            current: current.clamp(1, total),
            total,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn clamp(&self, page: u32) -> u32 {
        page.clamp(1, self.total)
    }

    /// Moves to `page` (clamped). Returns the new page when it differs from
    /// the current one, so callers know whether a refetch is due.
    pub fn select(&mut self, page: u32) -> Option<u32> {
        let page = self.clamp(page);
        if page == self.current {
            return None;
        }
        self.current = page;
        Some(page)
    }

    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.current + 1)
    }

    pub fn previous(&self) -> Option<u32> {
        self.has_previous().then(|| self.current - 1)
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    /// Applies the page count from a fresh response. The current page is
    /// kept as requested; it is only pulled back when the list shrank.
    pub fn set_total(&mut self, total: u32) {
        self.total = total.max(1);
        self.current = self.current.clamp(1, self.total);
    }

    pub(crate) fn force_current(&mut self, page: u32) {
        self.current = page.max(1);
        self.total = self.total.max(self.current);
    }

    pub fn label(&self) -> String {
        format!("{} / {}", self.current, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_requested_pages_to_bounds() {
        let mut pagination = Pagination::new(1, 3);
        assert_eq!(pagination.select(0), None);
        assert_eq!(pagination.select(9), Some(3));
        assert_eq!(pagination.current(), 3);
        assert_eq!(pagination.next(), None);
        assert_eq!(pagination.previous(), Some(2));
    }

    #[test]
    fn zero_total_counts_as_single_page() {
        let pagination = Pagination::new(4, 0);
        assert_eq!(pagination.total(), 1);
        assert_eq!(pagination.current(), 1);
        assert!(!pagination.has_next());
        assert!(!pagination.has_previous());
    }

    #[test]
    fn shrinking_total_pulls_current_back() {
        let mut pagination = Pagination::new(5, 5);
        pagination.set_total(2);
        assert_eq!(pagination.label(), "2 / 2");
    }
}
