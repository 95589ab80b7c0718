use std::{fmt, num::NonZeroUsize, ops::Range};

/// Page sizes offered by the console, in cycling order.
pub const PAGE_SIZES: [usize; 3] = [5, 10, 20];

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(PAGE_SIZES[0]) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    First,
    Last,
    Next,
    Previous,
    /// 1-based page number; clamped on navigation.
    Number(usize),
}

/// `ceil(count / size)`; zero for an empty list.
pub fn total_pages(count: usize, size: NonZeroUsize) -> usize {
    count.div_ceil(size.get())
}

/// Current page (1-based) and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    page: usize,
    size: NonZeroUsize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    pub fn new(size: NonZeroUsize) -> Self {
        Self { page: 1, size }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> NonZeroUsize {
        self.size
    }

    pub fn set_size(&mut self, size: NonZeroUsize) {
        self.size = size;
        self.page = 1;
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Page `target` resolves to, always within `[1, max(total_pages, 1)]`.
    pub fn resolve(&self, target: PageTarget, count: usize) -> usize {
        let last = total_pages(count, self.size).max(1);
        let wanted = match target {
            PageTarget::First => 1,
            PageTarget::Last => last,
            PageTarget::Next => self.page.saturating_add(1),
            PageTarget::Previous => self.page.saturating_sub(1),
            PageTarget::Number(n) => n,
        };
        wanted.clamp(1, last)
    }

    /// Moves to `target`. Returns `false` when already there.
    pub fn go_to(&mut self, target: PageTarget, count: usize) -> bool {
        let page = self.resolve(target, count);
        if page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    /// Pulls the current page back in range after the row count shrank.
    pub fn clamp(&mut self, count: usize) {
        self.page = self.resolve(PageTarget::Number(self.page), count);
    }

    /// Index range of the current page over a list of `count` rows.
    pub fn range(&self, count: usize) -> Range<usize> {
        let start = ((self.page - 1) * self.size.get()).min(count);
        let end = (start + self.size.get()).min(count);
        start..end
    }

    pub fn summary(&self, count: usize) -> Summary {
        let start = (self.page - 1) * self.size.get() + 1;
        let end = (start - 1 + self.size.get()).min(count);
        Summary {
            start,
            end,
            total: count,
        }
    }
}

/// "Showing X to Y of Z entries".
///
/// On an empty list this reads "Showing 1 to 0 of 0 entries", which is what the
/// console has always displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Showing {} to {} of {} entries",
            self.start, self.end, self.total
        )
    }
}

/// Next entry of [`PAGE_SIZES`] after `current`, wrapping around.
pub fn next_page_size(current: NonZeroUsize) -> NonZeroUsize {
    let next = PAGE_SIZES
        .iter()
        .copied()
        .find(|size| *size > current.get())
        .unwrap_or(PAGE_SIZES[0]);
    NonZeroUsize::new(next).unwrap_or(DEFAULT_PAGE_SIZE)
}
