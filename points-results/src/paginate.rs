use serde::Serialize;

pub const PAGE_SIZE: usize = 20;

/// Fixed-size pages over the filtered collection. Pages are 1-based; a page
/// outside `1..=page_count` is empty rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Paginator {
    pub page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self { page_size: PAGE_SIZE }
    }
}

impl Paginator {
    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    pub fn slice<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        if page == 0 {
            return &[];
        }
        let start = (page - 1).saturating_mul(self.page_size);
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }

    pub fn has_next(&self, len: usize, page: usize) -> bool {
        page < self.page_count(len)
    }

    pub fn has_previous(&self, page: usize) -> bool {
        page > 1
    }
}
