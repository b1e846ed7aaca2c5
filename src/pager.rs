use crate::config::PAGE_SIZE;
use crate::data::filter::ActiveView;
use crate::data::model::TripRecord;

/// One window of raw records.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub records: Vec<&'a TripRecord>,
    /// View position of the first record on this page.
    pub start: usize,
    /// Rows shown so far, this page included.
    pub seen: usize,
    pub remaining: usize,
    pub total: usize,
}

impl Page<'_> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Sequential fixed-size reader over an [`ActiveView`].
#[derive(Debug)]
pub struct Pager<'v, 'a> {
    view: &'v ActiveView<'a>,
    cursor: usize,
    page_size: usize,
}

impl<'v, 'a> Pager<'v, 'a> {
    pub fn new(view: &'v ActiveView<'a>) -> Self {
        Self::with_page_size(view, PAGE_SIZE)
    }

    /// A page size of zero is treated as one.
    pub fn with_page_size(view: &'v ActiveView<'a>, page_size: usize) -> Self {
        Pager {
            view,
            cursor: 0,
            page_size: page_size.max(1),
        }
    }

    /// Index of the next unseen row.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.view.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.view.len()
    }

    /// Up to `page_size` records from the cursor; empty once exhausted.
    pub fn next_page(&mut self) -> Page<'a> {
        let total = self.view.len();
        let start = self.cursor;
        let end = (start + self.page_size).min(total);

        let records: Vec<&'a TripRecord> = (start..end).filter_map(|i| self.view.get(i)).collect();
        self.cursor = end;

        Page {
            records,
            start,
            seen: end,
            remaining: total - end,
            total,
        }
    }
}

impl<'a> Iterator for Pager<'_, 'a> {
    type Item = Page<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        (!self.is_exhausted()).then(|| self.next_page())
    }
}
