use std::ops::Range;

/// Viewports narrower than this use the two-column layout.
pub const NARROW_BREAKPOINT: u32 = 640;
pub const ROWS_PER_PAGE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Narrow,
    Wide,
}

impl Layout {
    pub fn from_width(width: u32) -> Self {
        if width < NARROW_BREAKPOINT {
            Layout::Narrow
        } else {
            Layout::Wide
        }
    }

    pub fn columns(self) -> usize {
        match self {
            Layout::Narrow => 2,
            Layout::Wide => 4,
        }
    }

    pub fn page_size(self) -> usize {
        self.columns() * ROWS_PER_PAGE
    }
}

/// Fixed-size pages over an item list. Navigation stops at both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    item_count: usize,
    current: usize,
}

impl Pagination {
    pub fn new(page_size: usize, item_count: usize) -> Self {
        Pagination {
            page_size: page_size.max(1),
            item_count,
            current: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.item_count.div_ceil(self.page_size)
    }

    pub fn has_prev(&self) -> bool {
        self.current > 0
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.page_count()
    }

    /// Index range of the items on the current page.
    pub fn range(&self) -> Range<usize> {
        let start = (self.current * self.page_size).min(self.item_count);
        let end = (start + self.page_size).min(self.item_count);
        start..end
    }

    /// Returns whether the page changed.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Returns whether the page changed.
    pub fn prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Returns whether the page changed. Out-of-range pages are ignored.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page >= self.page_count() || page == self.current {
            return false;
        }
        self.current = page;
        true
    }

    /// Re-partitions with a new page size, clamping to the last page.
    /// Returns whether the current page index changed.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        self.page_size = page_size.max(1);
        let last = self.page_count().saturating_sub(1);
        if self.current > last {
            self.current = last;
            return true;
        }
        false
    }
}
