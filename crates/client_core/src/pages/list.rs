//! Client-side state of a paginated, filterable list.
//!
//! The state never performs I/O. Callers ask it for a [`FetchTicket`] whenever
//! the filter or page changes, run the request however they like, and hand the
//! result back through [`ListPage::finish_fetch`]. Tickets carry a generation
//! number so a slow response to a superseded request is dropped instead of
//! overwriting fresher data.

use std::fmt::{Debug, Display};

use shared::protocol::{ListQuery, Page};

use super::pagination::Pagination;

/// Anything that can be shown as a row in a list page.
pub trait Listed {
    type Id: Copy + PartialEq + Debug + Send + Sync + 'static;

    fn list_id(&self) -> Self::Id;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub query: ListQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// The response belonged to an older request and was ignored.
    Stale,
    Failed,
    /// The response was applied but the server reported fewer pages than the
    /// one requested; the cursor moved back and a new fetch is due.
    PageOutOfRange,
}

#[derive(Debug, PartialEq)]
pub enum ListBody<'a, T> {
    Loading,
    Failed(&'a str),
    Empty,
    Rows(&'a [T]),
}

#[derive(Debug, Clone)]
pub struct ListPage<T> {
    items: Vec<T>,
    filter: String,
    pagination: Pagination,
    per_page: u32,
    load: LoadState,
    generation: u64,
    reset_page_on_filter: bool,
}

impl<T: Listed> ListPage<T> {
    pub fn new(per_page: u32) -> Self {
        Self {
            items: Vec::new(),
            filter: String::new(),
            pagination: Pagination::default(),
            per_page: per_page.max(1),
            load: LoadState::Idle,
            generation: 0,
            reset_page_on_filter: false,
        }
    }

    pub fn with_filter_reset(mut self, reset_page_on_filter: bool) -> Self {
        self.reset_page_on_filter = reset_page_on_filter;
        self
    }

    pub fn query(&self) -> ListQuery {
        ListQuery::new(self.pagination.current(), self.per_page, self.filter.clone())
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.load = LoadState::Loading;
        FetchTicket {
            generation: self.generation,
            query: self.query(),
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    pub fn finish_fetch<E: Display>(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Page<T>, E>,
    ) -> FetchOutcome {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.generation,
                latest = self.generation,
                "dropping stale list response"
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(page) => {
                self.items = page.items;
                self.pagination.set_total(page.total_pages);
                self.load = LoadState::Loaded;
                if self.pagination.current() < ticket.query.page {
                    FetchOutcome::PageOutOfRange
                } else {
                    FetchOutcome::Applied
                }
            }
            Err(err) => {
                self.load = LoadState::Failed(err.to_string());
                FetchOutcome::Failed
            }
        }
    }

    /// Returns `true` when the submitted text differs from the active filter
    /// and the list has to be fetched again.
    pub fn submit_filter(&mut self, filter: &str) -> bool {
        if self.filter == filter {
            return false;
        }
        self.filter = filter.to_string();
        if self.reset_page_on_filter {
            self.pagination.force_current(1);
        }
        true
    }

    pub fn select_page(&mut self, page: u32) -> bool {
        self.pagination.select(page).is_some()
    }

    /// Drops a row locally after the server confirmed its deletion.
    pub fn remove(&mut self, id: T::Id) -> Option<T> {
        let index = self.items.iter().position(|item| item.list_id() == id)?;
        Some(self.items.remove(index))
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Pagination only accompanies rows; placeholders stand alone.
    pub fn shows_pagination(&self) -> bool {
        matches!(self.body(), ListBody::Rows(_))
    }

    pub fn body(&self) -> ListBody<'_, T> {
        match &self.load {
            LoadState::Failed(message) => ListBody::Failed(message),
            _ if !self.items.is_empty() => ListBody::Rows(&self.items),
            LoadState::Loading => ListBody::Loading,
            _ => ListBody::Empty,
        }
    }
}
