use std::sync::Arc;

use tracing::debug;

use catalog::{CatalogApi, CatalogError, QuestionPage};
use trivia_core::model::{CategoryId, Question, QuestionDraft, QuestionId};
use trivia_core::paging::page_count;

use crate::error::ListViewError;

//
// ─── LIST STATE ────────────────────────────────────────────────────────────────
//

/// Presentation mode of the question list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// Paginated, unfiltered-or-category-filtered listing.
    Browse,
    /// Single-shot full-text results, shown as one unpaginated page.
    Search,
}

/// Snapshot of the question list: what is shown, and under which trigger it
/// was fetched. Replaced wholesale on every successful reconciliation, never
/// partially mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    items: Vec<Question>,
    total: u32,
    page: u32,
    mode: ListMode,
    category_filter: Option<CategoryId>,
    search_term: Option<String>,
}

impl ListState {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            mode: ListMode::Browse,
            category_filter: None,
            search_term: None,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[Question] {
        &self.items
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn mode(&self) -> ListMode {
        self.mode
    }

    #[must_use]
    pub fn category_filter(&self) -> Option<CategoryId> {
        self.category_filter
    }

    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    /// Number of pages under the current total; meaningful in Browse mode.
    #[must_use]
    pub fn page_count(&self) -> u32 {
        page_count(self.total)
    }
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Owns the list state and reconciles it against its triggers: category
/// change, page navigation, search submission, create, and delete.
///
/// State is a deterministic function of the last trigger and the catalog's
/// response. Any catalog failure leaves the prior state intact. Responses are
/// committed under a monotonically increasing request sequence, so a response
/// that has been superseded by a newer trigger is discarded rather than
/// clobbering fresher state.
pub struct ListViewController {
    catalog: Arc<dyn CatalogApi>,
    state: ListState,
    latest_seq: u64,
}

impl ListViewController {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogApi>) -> Self {
        Self {
            catalog,
            state: ListState::empty(),
            latest_seq: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ListState {
        &self.state
    }

    fn begin_request(&mut self) -> u64 {
        self.latest_seq += 1;
        self.latest_seq
    }

    /// Install `next` as the current state unless a newer request has been
    /// issued since `seq`. Returns whether the commit was applied.
    fn commit(&mut self, seq: u64, next: ListState) -> bool {
        if seq != self.latest_seq {
            debug!(seq, latest = self.latest_seq, "discarding stale response");
            return false;
        }
        self.state = next;
        true
    }

    async fn fetch_browse(
        &self,
        filter: Option<CategoryId>,
        page: u32,
    ) -> Result<QuestionPage, CatalogError> {
        match filter {
            Some(category) => self.catalog.questions_by_category(category, page).await,
            None => self.catalog.questions(page).await,
        }
    }

    async fn reload_browse(&mut self, page: u32) -> Result<(), ListViewError> {
        let filter = self.state.category_filter;
        let seq = self.begin_request();
        let fetched = self.fetch_browse(filter, page).await?;
        self.commit(
            seq,
            ListState {
                items: fetched.questions,
                total: fetched.total,
                page,
                mode: ListMode::Browse,
                category_filter: filter,
                search_term: None,
            },
        );
        Ok(())
    }

    /// Switch the category filter (`None` = all categories) and reload from
    /// page 1 in Browse mode.
    ///
    /// # Errors
    ///
    /// Returns `ListViewError::Catalog` if the fetch fails; state is
    /// unchanged in that case.
    pub async fn set_category_filter(
        &mut self,
        filter: Option<CategoryId>,
    ) -> Result<(), ListViewError> {
        let seq = self.begin_request();
        let fetched = self.fetch_browse(filter, 1).await?;
        self.commit(
            seq,
            ListState {
                items: fetched.questions,
                total: fetched.total,
                page: 1,
                mode: ListMode::Browse,
                category_filter: filter,
                search_term: None,
            },
        );
        Ok(())
    }

    /// Navigate to page `page` under the current category filter.
    ///
    /// # Errors
    ///
    /// Returns `ListViewError::SearchUnpaginated` in Search mode,
    /// `ListViewError::PageOutOfRange` when `page` is outside
    /// `1..=page_count`, and `ListViewError::Catalog` if the fetch fails.
    pub async fn go_to_page(&mut self, page: u32) -> Result<(), ListViewError> {
        if self.state.mode == ListMode::Search {
            return Err(ListViewError::SearchUnpaginated);
        }
        let page_count = self.state.page_count();
        if page < 1 || page > page_count {
            return Err(ListViewError::PageOutOfRange { page, page_count });
        }
        self.reload_browse(page).await
    }

    /// Submit a search term. A blank term falls back to browsing page 1
    /// under the current category filter; otherwise the matching questions
    /// are shown as a single unpaginated page.
    ///
    /// The search endpoint is catalog-wide: an active category filter is
    /// retained in the state but does not scope the results.
    ///
    /// # Errors
    ///
    /// Returns `ListViewError::Catalog` if the fetch fails.
    pub async fn search(&mut self, term: &str) -> Result<(), ListViewError> {
        let term = term.trim();
        if term.is_empty() {
            return self.set_category_filter(self.state.category_filter).await;
        }
        let seq = self.begin_request();
        let fetched = self.catalog.search_questions(term).await?;
        self.commit(
            seq,
            ListState {
                items: fetched.questions,
                total: fetched.total,
                page: 1,
                mode: ListMode::Search,
                category_filter: self.state.category_filter,
                search_term: Some(term.to_owned()),
            },
        );
        Ok(())
    }

    /// Delete a question, then reconcile the visible page.
    ///
    /// The landing page follows the pre-delete item count of the current
    /// page: deleting the sole item of a page past the first lands on the
    /// previous page; otherwise the same page is reloaded so the hole left
    /// by the deletion backfills from the next page. The reload is a Browse
    /// fetch under the current category filter.
    ///
    /// # Errors
    ///
    /// Returns `ListViewError::Catalog` if the delete or the reload fails;
    /// state is unchanged in that case.
    pub async fn delete_question(&mut self, id: QuestionId) -> Result<(), ListViewError> {
        self.catalog.delete_question(id).await?;
        let landing = if self.state.items.len() == 1 && self.state.page > 1 {
            self.state.page - 1
        } else {
            self.state.page
        };
        self.reload_browse(landing).await
    }

    /// Validate and create a question, then reload the current page. The new
    /// question is not guaranteed to be visible on it.
    ///
    /// # Errors
    ///
    /// Returns `ListViewError::Validation` for client-side draft failures
    /// (no request is issued) and `ListViewError::Catalog` if the create or
    /// the reload fails.
    pub async fn create_question(
        &mut self,
        draft: QuestionDraft,
    ) -> Result<QuestionId, ListViewError> {
        let validated = draft.validate()?;
        let id = self.catalog.create_question(&validated).await?;
        self.reload_browse(self.state.page).await?;
        Ok(id)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
