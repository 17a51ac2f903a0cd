//! In-memory request client backed by a Tokio channel.
//!
//! [`QueuedClient`] never touches the network. Every call to
//! [`RequestClient::request`] becomes a [`PendingRequest`] on a channel,
//! and whoever holds the matching [`RequestQueue`] decides how it
//! completes. That makes the completion order, and the timing relative
//! to other work, fully deterministic.
//!
//! A [`PendingRequest`] dropped without being resolved fails with
//! [`TransportError::Cancelled`], so exactly one handler always runs.

use serde_json::Value;
use tokio::sync::mpsc;

use crate::{
    FailureHandler, RequestClient, RequestTask, RetryOption, SuccessHandler,
    TransportError,
};

/// A request waiting to be resolved.
///
/// Both handlers are taken together on the first resolution; `None`
/// means the request is already resolved.
pub struct PendingRequest {
    task: RequestTask,
    handlers: Option<(SuccessHandler, FailureHandler)>,
}

impl PendingRequest {
    fn new(
        task: RequestTask,
        on_success: SuccessHandler,
        on_failure: FailureHandler,
    ) -> Self {
        Self {
            task,
            handlers: Some((on_success, on_failure)),
        }
    }

    /// The task as it was issued.
    pub fn task(&self) -> &RequestTask {
        &self.task
    }

    /// Delivers `body` to the success handler.
    pub fn succeed(mut self, body: Value) {
        if let Some((on_success, _)) = self.handlers.take() {
            tracing::debug!(event = %self.task.event, "request succeeded");
            on_success(body);
        }
    }

    /// Delivers `error` to the failure handler and returns its retry
    /// decision.
    pub fn fail(mut self, error: TransportError) -> RetryOption {
        self.resolve_failed(error)
    }

    fn resolve_failed(&mut self, error: TransportError) -> RetryOption {
        match self.handlers.take() {
            Some((_, on_failure)) => {
                tracing::debug!(event = %self.task.event, %error, "request failed");
                on_failure(error)
            }
            None => RetryOption::Resign,
        }
    }
}

impl Drop for PendingRequest {
    fn drop(&mut self) {
        if self.handlers.is_some() {
            let _ = self.resolve_failed(TransportError::Cancelled);
        }
    }
}

impl std::fmt::Debug for PendingRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRequest")
            .field("task", &self.task)
            .finish_non_exhaustive()
    }
}

/// A [`RequestClient`] that parks requests on a channel.
#[derive(Debug, Clone)]
pub struct QueuedClient {
    sender: mpsc::UnboundedSender<PendingRequest>,
}

impl QueuedClient {
    /// Creates a client and the queue its requests arrive on.
    pub fn new() -> (Self, RequestQueue) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, RequestQueue { receiver })
    }
}

impl RequestClient for QueuedClient {
    fn request(
        &self,
        task: RequestTask,
        on_success: SuccessHandler,
        on_failure: FailureHandler,
    ) {
        tracing::debug!(
            event = %task.event,
            method = %task.method,
            url = %task.url,
            "request queued"
        );
        let pending = PendingRequest::new(task, on_success, on_failure);
        // Nobody left to resolve it: report the request as cancelled.
        if let Err(mpsc::error::SendError(pending)) = self.sender.send(pending)
        {
            let _ = pending.fail(TransportError::Cancelled);
        }
    }
}

/// Receiving side of a [`QueuedClient`].
#[derive(Debug)]
pub struct RequestQueue {
    receiver: mpsc::UnboundedReceiver<PendingRequest>,
}

impl RequestQueue {
    /// Waits for the next request. Returns `None` once every client
    /// clone has been dropped and the queue is drained.
    pub async fn next(&mut self) -> Option<PendingRequest> {
        self.receiver.recv().await
    }

    /// Returns the next request if one is already queued.
    pub fn try_next(&mut self) -> Option<PendingRequest> {
        self.receiver.try_recv().ok()
    }
}
