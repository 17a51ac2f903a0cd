/// Errors reported by a [`RequestClient`](crate::RequestClient).
///
/// The cause is opaque to the view-model; it only forwards these to the
/// caller's failure callback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request did not complete within its timeout class.
    #[error("request timed out")]
    Timeout,

    /// The connection failed before a response was received.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success HTTP status.
    #[error("server responded with status {status}")]
    Server { status: u16 },

    /// The client was shut down before the request could complete.
    #[error("request cancelled")]
    Cancelled,
}
