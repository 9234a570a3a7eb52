//! Pagination state machine.
//!
//! The gate against concurrent fetches is the `Idle` -> `Loading`
//! transition itself: `begin` hands out the page to fetch exactly once, and
//! every further advance signal is ignored until one of the `finish_*`
//! transitions runs. `Exhausted` is terminal.

use std::collections::HashSet;

/// Status of a pagination controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    /// Ready to accept an advance signal.
    Idle,
    /// A fetch for `current_page` is in flight.
    Loading,
    /// The collection ended; no further fetches, ever.
    Exhausted,
}

/// Pagination state for one embed instance. Never shared across instances.
#[derive(Debug)]
pub struct PaginationState {
    current_page: u32,
    status: PageStatus,
    seen_pages: HashSet<u32>,
}

impl PaginationState {
    /// Initial state: idle at page 0, nothing rendered.
    pub fn new() -> Self {
        Self {
            current_page: 0,
            status: PageStatus::Idle,
            seen_pages: HashSet::new(),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn status(&self) -> PageStatus {
        self.status
    }

    /// Accept an advance signal.
    ///
    /// Returns the page to fetch, or `None` when a fetch is already in
    /// flight or pagination is exhausted (duplicate signals are dropped
    /// here, nowhere else).
    pub fn begin(&mut self) -> Option<u32> {
        match self.status {
            PageStatus::Idle => {
                self.status = PageStatus::Loading;
                Some(self.current_page)
            }
            PageStatus::Loading | PageStatus::Exhausted => None,
        }
    }

    /// The in-flight page reconciled successfully: advance to the next one.
    pub fn finish_success(&mut self) {
        debug_assert_eq!(self.status, PageStatus::Loading);
        self.status = PageStatus::Idle;
        self.current_page += 1;
    }

    /// The in-flight page came back empty: pagination ends here.
    pub fn finish_exhausted(&mut self) {
        debug_assert_eq!(self.status, PageStatus::Loading);
        self.status = PageStatus::Exhausted;
    }

    /// The in-flight fetch failed: same page, eligible for retry on the
    /// next advance signal.
    pub fn finish_failed(&mut self) {
        debug_assert_eq!(self.status, PageStatus::Loading);
        self.status = PageStatus::Idle;
    }

    /// Mark a page as rendered. Returns whether this was the first render
    /// attempt for the page (which gates optimistic rendering).
    pub fn mark_rendered(&mut self, page: u32) -> bool {
        self.seen_pages.insert(page)
    }

    /// Whether the page has been rendered at least once.
    pub fn has_rendered(&self, page: u32) -> bool {
        self.seen_pages.contains(&page)
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = PaginationState::new();
        assert_eq!(state.current_page(), 0);
        assert_eq!(state.status(), PageStatus::Idle);
    }

    #[test]
    fn test_begin_is_single_shot_while_loading() {
        let mut state = PaginationState::new();
        assert_eq!(state.begin(), Some(0));
        // Rapid duplicate signals are dropped.
        assert_eq!(state.begin(), None);
        assert_eq!(state.begin(), None);
        state.finish_success();
        assert_eq!(state.begin(), Some(1));
    }

    #[test]
    fn test_success_advances_failure_does_not() {
        let mut state = PaginationState::new();
        state.begin();
        state.finish_failed();
        assert_eq!(state.status(), PageStatus::Idle);
        assert_eq!(state.begin(), Some(0));
        state.finish_success();
        assert_eq!(state.begin(), Some(1));
    }

    #[test]
    fn test_exhausted_is_terminal() {
        let mut state = PaginationState::new();
        state.begin();
        state.finish_exhausted();
        assert_eq!(state.status(), PageStatus::Exhausted);
        for _ in 0..3 {
            assert_eq!(state.begin(), None);
        }
    }

    #[test]
    fn test_first_render_tracking() {
        let mut state = PaginationState::new();
        assert!(!state.has_rendered(0));
        assert!(state.mark_rendered(0));
        assert!(!state.mark_rendered(0));
        assert!(state.has_rendered(0));
    }
}
