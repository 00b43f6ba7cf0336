//! # Page Cursor
//!
//! 1-based page index for the directory listing. Never drops below 1;
//! has no upper bound.

/// Direction of a single page step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor(u32);

impl PageCursor {
    pub const FIRST: u32 = 1;

    pub fn new() -> Self {
        Self(Self::FIRST)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Whether a `Previous` step would move the cursor
    pub fn can_go_back(&self) -> bool {
        self.0 > Self::FIRST
    }

    /// Apply a step. Returns false when the step was a no-op.
    pub fn step(&mut self, step: PageStep) -> bool {
        match step {
            PageStep::Next => {
                self.0 = self.0.saturating_add(1);
                true
            }
            PageStep::Previous if self.can_go_back() => {
                self.0 -= 1;
                true
            }
            PageStep::Previous => false,
        }
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_should_start_at_first_page() {
        let cursor = PageCursor::new();
        assert_eq!(cursor.get(), 1);
        assert!(!cursor.can_go_back());
    }

    #[test]
    fn previous_should_be_noop_at_first_page() {
        let mut cursor = PageCursor::new();
        assert!(!cursor.step(PageStep::Previous));
        assert_eq!(cursor.get(), 1);
    }

    #[test]
    fn back_control_should_be_disabled_exactly_at_first_page() {
        let mut cursor = PageCursor::new();
        for expected in 2..=20 {
            assert!(cursor.step(PageStep::Next));
            assert_eq!(cursor.get(), expected);
            assert!(cursor.can_go_back());
        }
        while cursor.can_go_back() {
            assert!(cursor.step(PageStep::Previous));
        }
        assert_eq!(cursor.get(), 1);
        assert!(!cursor.can_go_back());
    }

    #[test]
    fn next_should_have_no_ceiling() {
        let mut cursor = PageCursor::new();
        for _ in 0..500 {
            cursor.step(PageStep::Next);
        }
        assert_eq!(cursor.get(), 501);
    }
}
