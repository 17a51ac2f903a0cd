//! Error types for the view-model.

use livelist_protocol::ProtocolError;
use livelist_transport::TransportError;

/// Why a fetch did not update the store.
///
/// This is the value passed to a caller's failure callback. Whatever the
/// kind, the store is left exactly as it was and the request is never
/// retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// A room record (or the envelope around it) failed validation.
    #[error("invalid room list: {0}")]
    Validation(ProtocolError),

    /// The response-level status check failed (refetch only). `code` is
    /// `None` when the response carried no readable integer code.
    #[error("{}", status_text(.code, .message))]
    Status { code: Option<i64>, message: String },

    /// The request itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

fn status_text(code: &Option<i64>, message: &str) -> String {
    match code {
        Some(code) => format!("server returned code {code}: {message}"),
        None => format!("malformed response status: {message}"),
    }
}

impl From<ProtocolError> for FetchError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Status { code, message } => Self::Status {
                code: Some(code),
                message,
            },
            ProtocolError::MalformedStatus(cause) => Self::Status {
                code: None,
                message: cause.to_string(),
            },
            other => Self::Validation(other),
        }
    }
}

/// Error returned by [`LiveListHandle`](crate::LiveListHandle) calls.
///
/// Fetch failures never surface here; they go to the fetch's failure
/// callback as a [`FetchError`].
#[derive(Debug, thiserror::Error)]
pub enum LiveListError {
    /// The view-model task has stopped.
    #[error("live list view-model is unavailable")]
    Unavailable,
}
