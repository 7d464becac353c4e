//! Interaction state behind the orders table.
//!
//! The controller owns the server-side query state (page, status filter,
//! committed search term) and the client-side sort. Per the table's
//! contract: filter or search changes reset the page to 1, sorting never
//! issues a request, and pagination steps by one page within
//! `total_pages` bounds.

use orderdash_orders::FulfillmentStatus;
use orderdash_store::{OrderListRequest, OrderPage, DEFAULT_PAGE_LIMIT};

use crate::table::{sort_rows, Column, OrderRowView, Sort, SortDirection};

/// View state for one orders table.
#[derive(Debug, Clone)]
pub struct DashboardController {
    page: u32,
    limit: u32,
    status: Option<FulfillmentStatus>,
    committed_search: String,
    sort: Option<Sort>,
    total_pages: u64,
}

impl Default for DashboardController {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardController {
    pub fn new() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            status: None,
            committed_search: String::new(),
            sort: None,
            total_pages: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn status_filter(&self) -> Option<FulfillmentStatus> {
        self.status
    }

    pub fn committed_search(&self) -> &str {
        &self.committed_search
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    /// The request describing the current view state.
    pub fn request(&self) -> OrderListRequest {
        OrderListRequest {
            page: self.page,
            limit: self.limit,
            status: self.status,
            search: if self.committed_search.is_empty() {
                None
            } else {
                Some(self.committed_search.clone())
            },
        }
    }

    /// Change the status filter; resets to the first page.
    pub fn set_status_filter(&mut self, status: Option<FulfillmentStatus>) -> OrderListRequest {
        self.status = status;
        self.page = 1;
        self.request()
    }

    /// Commit a debounced search term; resets to the first page.
    pub fn commit_search(&mut self, term: String) -> OrderListRequest {
        self.committed_search = term;
        self.page = 1;
        self.request()
    }

    /// Record the response so the pager knows where the last page is.
    pub fn apply_page(&mut self, page: &OrderPage) {
        self.total_pages = page.total_pages;
    }

    pub fn can_go_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_go_next(&self) -> bool {
        u64::from(self.page) < self.total_pages
    }

    /// Step back one page; `None` while the control is disabled.
    pub fn prev_page(&mut self) -> Option<OrderListRequest> {
        if !self.can_go_prev() {
            return None;
        }
        self.page -= 1;
        Some(self.request())
    }

    /// Step forward one page; `None` while the control is disabled.
    pub fn next_page(&mut self) -> Option<OrderListRequest> {
        if !self.can_go_next() {
            return None;
        }
        self.page += 1;
        Some(self.request())
    }

    /// Toggle sorting on `column`: first click sorts ascending, the next
    /// flips direction. Purely client-side.
    pub fn toggle_sort(&mut self, column: Column) {
        self.sort = Some(match self.sort {
            Some(sort) if sort.column == column => Sort {
                column,
                direction: sort.direction.toggled(),
            },
            _ => Sort {
                column,
                direction: SortDirection::Ascending,
            },
        });
    }

    /// Flatten the loaded page into display rows with the active sort
    /// applied. Only the loaded page is sorted.
    pub fn rows(&self, page: &OrderPage) -> Vec<OrderRowView> {
        let mut rows: Vec<OrderRowView> =
            page.orders.iter().map(OrderRowView::from_row).collect();
        if let Some(sort) = self.sort {
            sort_rows(&mut rows, sort);
        }
        rows
    }
}
