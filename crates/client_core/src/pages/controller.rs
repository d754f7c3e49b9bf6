//! The backend side of a list screen: how rows are fetched and deleted, and
//! an async controller for callers that await their own fetches.

use std::sync::Arc;

use async_trait::async_trait;
use shared::protocol::{ListQuery, Page};
use tracing::warn;

use super::list::{FetchOutcome, ListPage, Listed};
use crate::{config::ClientSettings, error::ClientError, GymApi};

/// A row type that a list page can fetch from the backend.
#[async_trait]
pub trait ListResource: Listed + Clone + Send + Sync + 'static {
    /// Extra context the list endpoint needs, e.g. the owning student.
    type Scope: Send + Sync;

    const EMPTY_PLACEHOLDER: &'static str;

    async fn fetch(
        api: &dyn GymApi,
        scope: &Self::Scope,
        query: &ListQuery,
    ) -> Result<Page<Self>, ClientError>;
}

/// A row type that can be deleted from its list after confirmation.
#[async_trait]
pub trait DeletableResource: ListResource {
    const DELETE_TITLE: &'static str;
    const DELETE_SUCCESS: &'static str;
    const DELETE_FAILURE: &'static str;

    fn delete_prompt(&self) -> String;

    async fn delete(api: &dyn GymApi, id: Self::Id) -> Result<(), ClientError>;
}

/// Drives one list page against the backend: fetches on mount, on filter
/// and page changes, and retries once when the list shrank under the cursor.
pub struct ListController<R: ListResource> {
    api: Arc<dyn GymApi>,
    scope: R::Scope,
    list: ListPage<R>,
}

impl<R: ListResource> ListController<R> {
    pub fn new(api: Arc<dyn GymApi>, scope: R::Scope, settings: &ClientSettings) -> Self {
        Self {
            api,
            scope,
            list: ListPage::new(settings.per_page).with_filter_reset(settings.reset_page_on_filter),
        }
    }

    pub async fn mount(&mut self) -> FetchOutcome {
        self.refresh().await
    }

    /// Fetches the current page. When the server reports that the requested
    /// page no longer exists the cursor is pulled back and fetched once more.
    pub async fn refresh(&mut self) -> FetchOutcome {
        let mut outcome = self.fetch_once().await;
        if outcome == FetchOutcome::PageOutOfRange {
            outcome = self.fetch_once().await;
        }
        outcome
    }

    async fn fetch_once(&mut self) -> FetchOutcome {
        let ticket = self.list.begin_fetch();
        let result = R::fetch(self.api.as_ref(), &self.scope, &ticket.query).await;
        if let Err(err) = &result {
            warn!(page = ticket.query.page, "list fetch failed: {err}");
        }
        self.list.finish_fetch(&ticket, result)
    }

    pub async fn submit_filter(&mut self, filter: &str) -> Option<FetchOutcome> {
        if !self.list.submit_filter(filter) {
            return None;
        }
        Some(self.refresh().await)
    }

    pub async fn select_page(&mut self, page: u32) -> Option<FetchOutcome> {
        if !self.list.select_page(page) {
            return None;
        }
        Some(self.refresh().await)
    }

    pub fn list(&self) -> &ListPage<R> {
        &self.list
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
