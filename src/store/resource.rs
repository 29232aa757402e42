use crate::api::{Page, PaginationMeta};

use super::filters::FilterSet;

/// Generation id handed out when a fetch starts. Only the latest one may
/// settle the container.
pub type Ticket = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// How a successful page is merged into what the container already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Every response replaces the list (page-numbered views).
    Replace,
    /// Continuation pages (`current_page > 1`) are appended (infinite scroll).
    AppendContinuation,
}

/// Last fetched list of one resource plus the bookkeeping around it.
#[derive(Debug, Clone)]
pub struct ResourceState<T> {
    pub items: Vec<T>,
    pub status: FetchStatus,
    pub error: Option<String>,
    pub filters: FilterSet,
    pub pagination: Option<PaginationMeta>,
    merge: MergePolicy,
    latest: Ticket,
}

impl<T> ResourceState<T> {
    pub fn new(merge: MergePolicy) -> Self {
        Self {
            items: Vec::new(),
            status: FetchStatus::Idle,
            error: None,
            filters: FilterSet::new(),
            pagination: None,
            merge,
            latest: 0,
        }
    }

    pub fn paged() -> Self {
        Self::new(MergePolicy::Replace)
    }

    pub fn incremental() -> Self {
        Self::new(MergePolicy::AppendContinuation)
    }

    /// Marks the container as loading and issues a fresh ticket. Any response
    /// still in flight for an older ticket will be dropped.
    pub fn begin_fetch(&mut self) -> Ticket {
        self.latest += 1;
        self.status = FetchStatus::Loading;
        self.error = None;
        self.latest
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket == self.latest
    }

    /// Applies a successful response. Returns `false` for stale tickets.
    pub fn fetch_succeeded(&mut self, ticket: Ticket, page: Page<T>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        let continuation = page.pagination.is_some_and(|meta| meta.current_page > 1);
        if self.merge == MergePolicy::AppendContinuation && continuation && !self.items.is_empty() {
            self.append_items(page.results);
        } else {
            self.items = page.results;
        }
        self.pagination = page.pagination;
        self.status = FetchStatus::Succeeded;
        self.error = None;
        true
    }

    /// Records a failure. Items are left as they were. Returns `false` for
    /// stale tickets.
    pub fn fetch_failed(&mut self, ticket: Ticket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.status = FetchStatus::Failed;
        self.error = Some(message.into());
        true
    }

    pub fn set_filters(&mut self, filters: FilterSet) {
        self.filters = filters;
    }

    pub fn clear_filters(&mut self) {
        self.filters = FilterSet::new();
        self.items.clear();
        self.pagination = None;
    }

    pub fn append_items(&mut self, items: Vec<T>) {
        self.items.extend(items);
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn has_more(&self) -> bool {
        self.pagination.is_some_and(|meta| meta.has_next())
    }

    /// Filters for the page after the last loaded one, if there is one.
    pub fn next_page_filters(&self) -> Option<FilterSet> {
        let meta = self.pagination.filter(PaginationMeta::has_next)?;
        Some(self.filters.clone().with_page(meta.current_page + 1))
    }
}
