//! Data model and wire format for livelist.
//!
//! - **Types** ([`Category`], [`Room`], [`RoleDescriptor`]) — what a room
//!   listing is made of.
//! - **Envelope** ([`parse_room_list`], [`check_status`]) — how the
//!   server's list response is unpacked.
//! - **Errors** ([`ProtocolError`]) — what can be wrong with a response.
//!
//! Everything here is pure validation. Nothing in this crate performs I/O.
//!
//! ```text
//! Transport (JSON body) → Protocol (Vec<Room>) → Store (per-category lists)
//! ```

mod category;
mod envelope;
mod error;
mod fields;
mod role;
mod room;

pub use category::Category;
pub use envelope::{check_status, parse_room_list};
pub use error::ProtocolError;
pub use role::{RoleDescriptor, RoleKind};
pub use room::{IMAGE_SLOTS, Room};
