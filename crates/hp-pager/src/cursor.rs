//! Forward / backward page navigation over a [`PageHandle`].

use hp_core::Result;

use crate::handle::{Page, PageHandle};

/// Keeps a current page index, always within `[0, page_count - 1]`.
#[derive(Debug)]
pub struct PageCursor {
    handle: PageHandle,
    page_size: usize,
    current: usize,
}

impl PageCursor {
    /// Start on the first page at the handle's page size.
    pub fn new(handle: PageHandle) -> Self {
        let page_size = handle.page_size();
        Self { handle, page_size, current: 0 }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self.current = self.handle.clamp_page(self.current, self.page_size);
        self
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.handle.page_count_for(self.page_size)
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.page_count()
    }

    pub fn current(&mut self) -> Result<Page> {
        self.handle.get_page(self.current, self.page_size)
    }

    /// Move one page forward; stays on the last page.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Page> {
        self.seek(self.current.saturating_add(1))
    }

    /// Move one page back; stays on the first page.
    pub fn prev(&mut self) -> Result<Page> {
        self.seek(self.current.saturating_sub(1))
    }

    pub fn seek(&mut self, page_index: usize) -> Result<Page> {
        self.current = self.handle.clamp_page(page_index, self.page_size);
        self.current()
    }

    pub fn first(&mut self) -> Result<Page> {
        self.seek(0)
    }

    pub fn last(&mut self) -> Result<Page> {
        self.seek(usize::MAX)
    }

    pub fn handle(&self) -> &PageHandle {
        &self.handle
    }

    pub fn into_handle(self) -> PageHandle {
        self.handle
    }
}
