//! Next-page and refetch requests, and applying their results.
//!
//! The fetcher is owned by the view-model task. It turns a fetch command
//! into a [`RequestTask`], keeps the caller's callbacks until the request
//! completes, and applies the result to the [`ListState`].
//!
//! ```text
//! Idle → Requested ─┬─ body ──→ Parsing ─┬─ ok ──→ StoreUpdated → Idle
//!                   │                    └─ err ─→ ParseFailed  → Idle
//!                   └─ error ─→ TransportFailed ─────────────────→ Idle
//! ```
//!
//! Request handlers run on whatever context the client uses. They only
//! parse, then post the outcome back to the view-model through a weak
//! sender, so a handler that fires after the view-model is gone does
//! nothing at all.

use std::collections::HashMap;

use livelist_protocol::{Category, Room, check_status, parse_room_list};
use livelist_store::ListState;
use livelist_transport::{
    FailureHandler, RequestClient, RequestTask, RetryOption, SuccessHandler,
    TokenProvider, TransportError,
};
use serde_json::Value;
use tokio::sync::mpsc;

use crate::viewmodel::Command;
use crate::{FetchError, ListConfig};

/// Called after the fetched rooms are in the store.
pub type SuccessCallback = Box<dyn FnOnce() + Send + 'static>;

/// Called with the reason a fetch left the store untouched.
pub type FailureCallback = Box<dyn FnOnce(FetchError) + Send + 'static>;

// ---------------------------------------------------------------------------
// Public fetch API types
// ---------------------------------------------------------------------------

/// Which kind of fetch a request is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Rooms after the last one held; appended on success.
    NextPage,
    /// A fresh first page; replaces the list on success.
    Refetch,
}

impl FetchMode {
    /// Client-side event name attached to the request.
    pub fn event(self) -> &'static str {
        match self {
            Self::NextPage => "room-page",
            Self::Refetch => "room-page-refetch",
        }
    }

    fn parse(self, body: &Value) -> Result<Vec<Room>, FetchError> {
        if self == Self::Refetch {
            check_status(body)?;
        }
        Ok(parse_room_list(body)?)
    }
}

/// Whether a fetch call actually issued a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Requested,
    /// Next-page fetch on an empty list: there is no cursor to page
    /// from, so nothing was sent and no callback will run.
    Skipped,
}

/// Optional page size and callbacks for one fetch.
#[derive(Default)]
pub struct FetchOptions {
    pub(crate) count: Option<usize>,
    pub(crate) on_success: Option<SuccessCallback>,
    pub(crate) on_failure: Option<FailureCallback>,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page size for a next-page fetch. Ignored by refetch, which
    /// derives its count from what is displayed.
    pub fn count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn on_success(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    pub fn on_failure(
        mut self,
        f: impl FnOnce(FetchError) + Send + 'static,
    ) -> Self {
        self.on_failure = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchOptions")
            .field("count", &self.count)
            .field("on_success", &self.on_success.is_some())
            .field("on_failure", &self.on_failure.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Completion plumbing
// ---------------------------------------------------------------------------

pub(crate) type FetchId = u64;

/// Outcome of one request, posted back to the view-model.
pub(crate) struct FetchCompletion {
    pub(crate) id: FetchId,
    pub(crate) result: Result<Vec<Room>, FetchError>,
}

/// Non-owning route from a request handler back to the view-model.
#[derive(Clone)]
pub(crate) struct CompletionLink(mpsc::WeakUnboundedSender<Command>);

impl CompletionLink {
    pub(crate) fn new(sender: &mpsc::UnboundedSender<Command>) -> Self {
        Self(sender.downgrade())
    }

    fn deliver(&self, completion: FetchCompletion) {
        let id = completion.id;
        let delivered = self
            .0
            .upgrade()
            .is_some_and(|tx| tx.send(Command::Completed(completion)).is_ok());
        if !delivered {
            tracing::debug!(fetch = id, "view-model gone, dropping fetch result");
        }
    }
}

/// What the fetcher remembers about a request in flight.
struct PendingFetch {
    /// Captured when the request was issued.
    category: Category,
    mode: FetchMode,
    on_success: Option<SuccessCallback>,
    on_failure: Option<FailureCallback>,
}

// ---------------------------------------------------------------------------
// ListFetcher
// ---------------------------------------------------------------------------

pub(crate) struct ListFetcher<C: RequestClient, T: TokenProvider> {
    client: C,
    tokens: T,
    config: ListConfig,
    link: CompletionLink,
    pending: HashMap<FetchId, PendingFetch>,
    next_id: FetchId,
}

impl<C: RequestClient, T: TokenProvider> ListFetcher<C, T> {
    pub(crate) fn new(
        client: C,
        tokens: T,
        config: ListConfig,
        link: CompletionLink,
    ) -> Self {
        Self {
            client,
            tokens,
            config,
            link,
            pending: HashMap::new(),
            next_id: 1,
        }
    }

    /// Requests in flight.
    pub(crate) fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Requests the page after the last room of the active category.
    pub(crate) fn fetch_next_page(
        &mut self,
        state: &ListState,
        options: FetchOptions,
    ) -> FetchOutcome {
        let category = state.active();
        let Some(cursor) = state.store().last(category) else {
            tracing::debug!(%category, "no rooms to page from, skipping");
            return FetchOutcome::Skipped;
        };

        let count = options.count.unwrap_or(self.config.page_size);
        let task = self
            .base_task(FetchMode::NextPage, category, count)
            .param("nextId", cursor.room_id());

        self.issue(task, category, FetchMode::NextPage, options);
        FetchOutcome::Requested
    }

    /// Requests a fresh first page for the active category.
    pub(crate) fn refetch(
        &mut self,
        state: &ListState,
        options: FetchOptions,
    ) -> FetchOutcome {
        let category = state.active();
        let count = self.config.refetch_count(state.store().len(category));
        let task = self.base_task(FetchMode::Refetch, category, count);

        self.issue(task, category, FetchMode::Refetch, options);
        FetchOutcome::Requested
    }

    /// Applies a completed request to `state` and runs its callback.
    pub(crate) fn complete(
        &mut self,
        state: &mut ListState,
        completion: FetchCompletion,
    ) {
        let Some(pending) = self.pending.remove(&completion.id) else {
            tracing::debug!(fetch = completion.id, "duplicate completion ignored");
            return;
        };

        match completion.result {
            Ok(rooms) => {
                tracing::debug!(
                    fetch = completion.id,
                    category = %pending.category,
                    mode = ?pending.mode,
                    rooms = rooms.len(),
                    "fetch succeeded"
                );
                match pending.mode {
                    FetchMode::NextPage => state.append(pending.category, rooms),
                    FetchMode::Refetch => state.replace(pending.category, rooms),
                }
                if let Some(on_success) = pending.on_success {
                    on_success();
                }
            }
            Err(error) => {
                tracing::warn!(
                    fetch = completion.id,
                    category = %pending.category,
                    mode = ?pending.mode,
                    %error,
                    "fetch failed"
                );
                if let Some(on_failure) = pending.on_failure {
                    on_failure(error);
                }
            }
        }
    }

    fn base_task(
        &self,
        mode: FetchMode,
        category: Category,
        count: usize,
    ) -> RequestTask {
        RequestTask::get(mode.event(), self.config.room_page_url.as_str())
            .timeout(self.config.timeout)
            .header(self.config.token_header.as_str(), self.tokens.token())
            .param("count", count)
            .param("type", category.wire_value())
    }

    fn issue(
        &mut self,
        task: RequestTask,
        category: Category,
        mode: FetchMode,
        options: FetchOptions,
    ) {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.insert(
            id,
            PendingFetch {
                category,
                mode,
                on_success: options.on_success,
                on_failure: options.on_failure,
            },
        );

        tracing::debug!(
            fetch = id,
            %category,
            event = mode.event(),
            params = ?task.parameters,
            "issuing room list request"
        );

        let link = self.link.clone();
        let on_success: SuccessHandler = Box::new(move |body: Value| {
            link.deliver(FetchCompletion {
                id,
                result: mode.parse(&body),
            });
        });

        let link = self.link.clone();
        let on_failure: FailureHandler =
            Box::new(move |error: TransportError| {
                link.deliver(FetchCompletion {
                    id,
                    result: Err(FetchError::Transport(error)),
                });
                RetryOption::Resign
            });

        self.client.request(task, on_success, on_failure);
    }
}
