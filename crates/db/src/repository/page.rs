//! Fixed-size pagination over an ordered result sequence

use serde::Serialize;

/// Number of items on every page
pub const PAGE_SIZE: usize = 10;

/// One page of an ordered result set plus its position in the whole
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: u32,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: u32,
    /// 1-based position of the first item, 0 when `items` is empty
    pub first_index: usize,
    /// 1-based position of the last item, 0 when `items` is empty
    pub last_index: usize,
}

impl<T> Page<T> {
    /// Slice page `page_number` (1-based) out of the full ordered sequence.
    ///
    /// A page past the end yields no items but still reports the true totals.
    /// `page_number` 0 is treated as 1.
    pub fn paginate(all: Vec<T>, page_number: u32) -> Self {
        let page_number = page_number.max(1);
        let total_count = all.len();
        let total_pages = total_count.div_ceil(PAGE_SIZE).max(1) as u32;

        let start = (page_number as usize - 1).saturating_mul(PAGE_SIZE);
        let items: Vec<T> = all.into_iter().skip(start).take(PAGE_SIZE).collect();

        let (first_index, last_index) = if items.is_empty() {
            (0, 0)
        } else {
            (start + 1, start + items.len())
        };

        Self {
            items,
            page_number,
            page_size: PAGE_SIZE,
            total_count,
            total_pages,
            first_index,
            last_index,
        }
    }

    /// Whether this page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Map items while preserving the page metadata
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
            first_index: self.first_index,
            last_index: self.last_index,
        }
    }
}

static_assertions::const_assert!(PAGE_SIZE > 0);
