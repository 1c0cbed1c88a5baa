//! Cursor-based incremental loading for the launch list.
//!
//! [`PaginationState`] is the synchronous bookkeeping (items, cursor,
//! has-more flag, in-flight guard). [`PaginationController`] drives it
//! against a [`PageSource`], runs each fetch as a spawned task, and
//! publishes a revision counter whenever the list may have changed.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// One fetched page.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    /// Items in server order.
    pub items: Vec<T>,
    /// Continuation token for the following page.
    pub cursor: Option<String>,
    pub has_more: bool,
    /// Non-fatal field errors that came back alongside the data.
    pub errors: Vec<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, cursor: Option<String>, has_more: bool) -> Self {
        Self {
            items,
            cursor,
            has_more,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

/// Parameters of a single page fetch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// `None` requests the first page.
    pub cursor: Option<String>,
    pub page_size: Option<u32>,
}

/// Anything that can serve pages by cursor.
pub trait PageSource: Send + Sync + 'static {
    type Item: Send + 'static;
    type Error: Display + Send + 'static;

    /// Fetches one page. Resolves exactly once.
    fn fetch_page(
        &self,
        request: PageRequest,
    ) -> impl Future<Output = Result<Page<Self::Item>, Self::Error>> + Send;
}

/// What applying a fetch result did to the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    /// The page was merged.
    Appended { added: usize, partial_errors: usize },
    /// The fetch failed; items, cursor and has-more are unchanged.
    Failed,
    /// The controller was disposed and the result was dropped.
    Discarded,
}

/// Accumulated list plus the cursor needed to continue it.
///
/// `items` is append-only. At most one request is outstanding at a time:
/// [`next_request`](Self::next_request) hands out a request and marks it
/// in flight, and [`apply`](Self::apply) clears the mark.
#[derive(Debug)]
pub struct PaginationState<T> {
    items: Vec<T>,
    cursor: Option<String>,
    has_more: bool,
    in_flight: bool,
    page_size: Option<u32>,
}

impl<T> Default for PaginationState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PaginationState<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
            has_more: true,
            in_flight: false,
            page_size: None,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Returns the request to issue next, or `None` when a fetch is already
    /// outstanding or the list is exhausted.
    ///
    /// An empty list always restarts from the beginning, whatever `has_more` says.
    pub fn next_request(&mut self) -> Option<PageRequest> {
        if self.in_flight {
            return None;
        }
        let cursor = if self.items.is_empty() {
            None
        } else if !self.has_more {
            return None;
        } else {
            self.cursor.clone()
        };
        self.in_flight = true;
        Some(PageRequest {
            cursor,
            page_size: self.page_size,
        })
    }

    /// Merges a fetch result. A failure only clears the in-flight mark.
    pub fn apply<E>(&mut self, result: Result<Page<T>, E>) -> Applied {
        self.in_flight = false;
        match result {
            Ok(page) => {
                let added = page.items.len();
                let partial_errors = page.errors.len();
                self.items.extend(page.items);
                self.cursor = page.cursor;
                self.has_more = page.has_more;
                Applied::Appended {
                    added,
                    partial_errors,
                }
            }
            Err(_) => Applied::Failed,
        }
    }

    /// Forgets the outstanding request without a result.
    pub fn cancel_in_flight(&mut self) {
        self.in_flight = false;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

type Completion<S> = Result<Page<<S as PageSource>::Item>, <S as PageSource>::Error>;

/// Issues page fetches on demand and merges their results.
///
/// Owns the list state exclusively. Fetches run as tokio tasks; the owner
/// awaits [`next_completion`](Self::next_completion) to apply the result on
/// its own task. Dropping the controller or calling
/// [`dispose`](Self::dispose) aborts an outstanding fetch, and nothing is
/// applied afterwards.
pub struct PaginationController<S: PageSource> {
    source: Arc<S>,
    state: PaginationState<S::Item>,
    task: Option<JoinHandle<Completion<S>>>,
    revision: watch::Sender<u64>,
    disposed: bool,
}

impl<S: PageSource> PaginationController<S> {
    pub fn new(source: S) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            source: Arc::new(source),
            state: PaginationState::new(),
            task: None,
            revision,
            disposed: false,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.state.page_size = Some(page_size);
        self
    }

    /// Starts a fetch if one is allowed right now. Cheap to call on every
    /// scroll update. Returns whether a fetch was started.
    ///
    /// Must be called from within a tokio runtime.
    pub fn request_more_if_needed(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        let Some(request) = self.state.next_request() else {
            return false;
        };
        tracing::debug!(
            cursor = ?request.cursor,
            loaded = self.state.len(),
            "requesting next page"
        );
        let source = Arc::clone(&self.source);
        self.task = Some(tokio::spawn(async move { source.fetch_page(request).await }));
        true
    }

    /// Waits for the outstanding fetch and applies it. Returns `None` when
    /// nothing is in flight.
    ///
    /// Cancel-safe: if the returned future is dropped early, the fetch
    /// stays outstanding and a later call picks it up.
    pub async fn next_completion(&mut self) -> Option<Applied> {
        let handle = self.task.as_mut()?;
        let joined = handle.await;
        self.task = None;
        Some(match joined {
            Ok(result) => self.handle_fetch_result(result),
            Err(e) => {
                tracing::error!("page fetch task failed: {}", e);
                self.state.cancel_in_flight();
                self.notify();
                Applied::Failed
            }
        })
    }

    /// Requests a page if allowed and waits for whatever fetch is outstanding.
    pub async fn load_more(&mut self) -> Option<Applied> {
        self.request_more_if_needed();
        self.next_completion().await
    }

    /// Applies a fetch result and signals subscribers, on success and on failure alike.
    ///
    /// A result delivered here while a spawned fetch is still outstanding
    /// supersedes it: that fetch is aborted and its result never merged.
    pub fn handle_fetch_result(&mut self, result: Completion<S>) -> Applied {
        if self.disposed {
            tracing::debug!("discarding page result after dispose");
            return Applied::Discarded;
        }
        if let Some(task) = self.task.take() {
            tracing::debug!("aborting outstanding fetch superseded by a delivered result");
            task.abort();
        }
        match &result {
            Ok(page) if !page.errors.is_empty() => {
                tracing::warn!(
                    "page arrived with {} field error(s):\n{}",
                    page.errors.len(),
                    page.errors.join("\n")
                );
            }
            Ok(_) => {}
            Err(e) => tracing::error!("network error - {}", e),
        }
        let applied = self.state.apply(result);
        if let Applied::Appended { added, .. } = applied {
            tracing::debug!(
                added,
                total = self.state.len(),
                has_more = self.state.has_more(),
                "page merged"
            );
        }
        self.notify();
        applied
    }

    /// Items loaded so far, in arrival order.
    pub fn current_items(&self) -> &[S::Item] {
        self.state.items()
    }

    pub fn state(&self) -> &PaginationState<S::Item> {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_in_flight()
    }

    /// Receiver of the data-changed signal. The value is a revision counter.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Aborts the outstanding fetch and stops all further loading.
    pub fn dispose(&mut self) {
        self.disposed = true;
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.state.cancel_in_flight();
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn notify(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}

impl<S: PageSource> Drop for PaginationController<S> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
