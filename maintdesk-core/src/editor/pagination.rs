//! Pagination state and the page-link window

use maintdesk_client::PageQuery;

/// Pages shown around the current page when there are more than this many.
const WINDOW: u32 = 3;

/// One entry in the page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page { number: u32, current: bool },
    /// Ellipsis that jumps to `target` (first or last page).
    Jump { target: u32 },
}

/// `current_page` is 1-indexed and always within `[1, max(total_pages, 1)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    current_page: u32,
    items_per_page: u32,
    total_pages: u32,
    total_records: u64,
    search_term: String,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(10)
    }
}

impl PaginationState {
    pub fn new(items_per_page: u32) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
            total_pages: 0,
            total_records: 0,
            search_term: String::new(),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    fn last_page(&self) -> u32 {
        self.total_pages.max(1)
    }

    /// Key for the page currently on screen.
    pub fn query(&self) -> PageQuery {
        PageQuery::new(self.current_page, self.items_per_page, self.search_term.clone())
    }

    /// Move to `page`, clamped. Returns whether the page changed.
    pub fn go_to(&mut self, page: u32) -> bool {
        let page = page.clamp(1, self.last_page());
        let changed = page != self.current_page;
        self.current_page = page;
        changed
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Change page size; always returns to page 1.
    pub fn set_items_per_page(&mut self, items_per_page: u32) {
        self.items_per_page = items_per_page.max(1);
        self.current_page = 1;
    }

    /// Change the search term; always returns to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
    }

    /// Record totals from a fetch. Returns `true` when the current page no
    /// longer exists and was clamped, meaning the page must be refetched.
    pub fn apply_totals(&mut self, total_pages: u32, total_records: u64) -> bool {
        self.total_pages = total_pages;
        self.total_records = total_records;
        let clamped = self.current_page.clamp(1, self.last_page());
        if clamped == self.current_page {
            return false;
        }
        self.current_page = clamped;
        true
    }

    /// After a delete left `remaining` rows on this page: step back a page if
    /// it is now empty. Returns whether the page changed.
    pub fn after_delete(&mut self, remaining: usize) -> bool {
        self.total_records = self.total_records.saturating_sub(1);
        if remaining == 0 && self.current_page > 1 {
            self.current_page -= 1;
            self.total_pages = self.total_pages.min(self.current_page);
            return true;
        }
        false
    }

    /// Page selector entries.
    pub fn window(&self) -> Vec<PageLink> {
        let total = self.last_page();
        let current = self.current_page;
        let page = |number| PageLink::Page {
            number,
            current: number == current,
        };
        if total <= WINDOW {
            return (1..=total).map(page).collect();
        }
        let start = current.saturating_sub(1).clamp(1, total - WINDOW + 1);
        let end = start + WINDOW - 1;
        let mut links = Vec::with_capacity(WINDOW as usize + 2);
        if start > 1 {
            links.push(PageLink::Jump { target: 1 });
        }
        links.extend((start..=end).map(page));
        if end < total {
            links.push(PageLink::Jump { target: total });
        }
        links
    }
}
