//! Auth-token lookup for outgoing requests.
//!
//! Token storage lives outside livelist (keychain, login flow, etc.).
//! The view-model only needs to read the current token when it builds a
//! request, so that is all [`TokenProvider`] asks for.

/// Supplies the opaque token sent in the request header.
pub trait TokenProvider: Send + Sync + 'static {
    /// Returns the current token. Called once per request.
    fn token(&self) -> String;
}

/// A fixed token, for tests and tools that log in once up front.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> String {
        self.0.clone()
    }
}
