//! Zero-based pagination state mirroring the backend's page metadata.

use credscope_models::Pageable;

/// Page sizes the backend accepts.
pub const PAGE_SIZES: [u32; 3] = [20, 50, 100];

pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    /// Zero-based current page.
    pub page: u32,
    pub page_size: u32,
    /// Server-reported total across all pages of the current filter.
    pub total_elements: u64,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            total_elements: 0,
        }
    }
}

impl Pager {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: if is_allowed_size(page_size) {
                page_size
            } else {
                DEFAULT_PAGE_SIZE
            },
            ..Self::default()
        }
    }

    /// Index of the last page, `ceil(total / size) - 1`; 0 when empty.
    pub fn last_page(&self) -> u32 {
        if self.total_elements == 0 {
            return 0;
        }
        let size = u64::from(self.page_size.max(1));
        (self.total_elements.div_ceil(size) - 1) as u32
    }

    pub fn can_next(&self) -> bool {
        self.page < self.last_page()
    }

    pub fn can_previous(&self) -> bool {
        self.page > 0
    }

    /// Target page for "next", or `None` at the upper bound.
    pub fn next(&self) -> Option<u32> {
        self.can_next().then(|| self.page + 1)
    }

    /// Target page for "previous", or `None` at page 0.
    pub fn previous(&self) -> Option<u32> {
        self.can_previous().then(|| self.page - 1)
    }

    /// Adopt the metadata of a successfully fetched page. Only ever
    /// called after a confirmed fetch, so a failed request leaves the
    /// pager untouched.
    pub fn apply(&mut self, pageable: &Pageable, total_elements: u64) {
        self.page = pageable.page_number;
        if is_allowed_size(pageable.page_size) {
            self.page_size = pageable.page_size;
        }
        self.total_elements = total_elements;
    }
}

pub fn is_allowed_size(size: u32) -> bool {
    PAGE_SIZES.contains(&size)
}
