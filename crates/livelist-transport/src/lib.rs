//! Request-client abstraction for livelist.
//!
//! The view-model never talks HTTP itself. It hands a [`RequestTask`] plus
//! two completion handlers to a [`RequestClient`] and gets called back
//! later, either with the parsed JSON body or with a [`TransportError`].
//!
//! # Provided implementations
//!
//! - [`QueuedClient`] — an in-memory client that parks every request on a
//!   Tokio channel until someone resolves it. Used by tests and demos that
//!   need to control exactly when (and how) a response arrives.

mod auth;
mod error;
mod queue;
mod task;

pub use auth::{StaticToken, TokenProvider};
pub use error::TransportError;
pub use queue::{PendingRequest, QueuedClient, RequestQueue};
pub use task::{HttpMethod, RequestTask, RetryOption, TimeoutClass};

/// Called with the decoded response body when the request succeeds.
pub type SuccessHandler = Box<dyn FnOnce(serde_json::Value) + Send + 'static>;

/// Called when the request fails. The returned [`RetryOption`] tells the
/// client whether to try again or give up.
pub type FailureHandler =
    Box<dyn FnOnce(TransportError) -> RetryOption + Send + 'static>;

/// Issues requests and delivers exactly one completion per request.
///
/// Implementations must not block the caller: `request` returns as soon
/// as the task is queued. Exactly one of the two handlers is eventually
/// invoked (the failure handler may be invoked again if it asked for a
/// retry and the retry fails too).
pub trait RequestClient: Send + Sync + 'static {
    /// Queues `task` and arranges for one of the handlers to run later.
    fn request(
        &self,
        task: RequestTask,
        on_success: SuccessHandler,
        on_failure: FailureHandler,
    );
}
