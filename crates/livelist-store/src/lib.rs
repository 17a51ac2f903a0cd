//! Per-category room lists and the presenting-list publisher.
//!
//! Five independent lists, one per [`Category`], and a single observable
//! "presenting" list that mirrors whichever category is active.
//!
//! # Key types
//!
//! - [`CategoryStore`] — the five ordered lists; every mutation returns
//!   a [`Mutation`] notification
//! - [`PresentingList`] — watch channel that UI observers subscribe to
//! - [`ActiveCategorySelector`] — the active category plus the rule for
//!   when a mutation is republished
//! - [`ListState`] — ties the three together so a mutation and its
//!   publish happen in the same call
//!
//! None of these types lock. They are owned by one task and mutated
//! through `&mut self`.

mod presenting;
mod state;
mod store;

pub use livelist_protocol::{Category, Room};
pub use presenting::{ActiveCategorySelector, PresentingList};
pub use state::ListState;
pub use store::{CategoryStore, Mutation};
