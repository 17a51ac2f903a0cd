//! # livelist
//!
//! A view-model for a categorized live-room listing.
//!
//! Rooms are kept in five independent lists, one per [`Category`]. One of
//! them is "presenting": its content is mirrored into a single `watch`
//! channel that UI code subscribes to. Pages are fetched through a
//! [`RequestClient`] either incrementally (append after the last room) or
//! from scratch (replace the whole list).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use livelist::prelude::*;
//!
//! # async fn demo(client: impl RequestClient) -> Result<(), LiveListError> {
//! let handle = LiveListVm::builder()
//!     .initial_category(Category::Pk)
//!     .spawn(client, StaticToken::new("session-token"));
//!
//! let mut rooms = handle.subscribe().await?;
//! handle.refetch(FetchOptions::new()).await?;
//! rooms.changed().await.ok();
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod fetcher;
mod logging;
mod viewmodel;

pub use config::ListConfig;
pub use error::{FetchError, LiveListError};
pub use fetcher::{
    FailureCallback, FetchMode, FetchOptions, FetchOutcome, SuccessCallback,
};
pub use logging::init_tracing;
pub use viewmodel::{LiveListHandle, LiveListVm, LiveListVmBuilder};

pub use livelist_protocol::{
    Category, IMAGE_SLOTS, ProtocolError, RoleDescriptor, RoleKind, Room,
};
pub use livelist_transport::{
    PendingRequest, QueuedClient, RequestClient, RequestQueue, RequestTask,
    RetryOption, StaticToken, TimeoutClass, TokenProvider, TransportError,
};

/// Everything needed to build and drive a view-model.
pub mod prelude {
    pub use crate::{
        Category, FetchError, FetchOptions, FetchOutcome, ListConfig,
        LiveListError, LiveListHandle, LiveListVm, RequestClient, Room,
        StaticToken, TokenProvider, TransportError,
    };
}
