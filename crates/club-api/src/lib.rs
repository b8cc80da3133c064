//! REST access to the club event backend.
//!
//! Provides:
//! - [`Client`]: typed calls for the list, create, update and delete endpoints
//! - [`Hook`]: observable `loading`/`error`/`result` state around one call
//! - Event hooks ([`ListEvents`], [`CreateEvent`], [`UpdateEvent`],
//!   [`DeleteEvent`]) pairing the two

mod client;
mod error;
mod events;
pub mod hook;

pub use client::Client;
pub use error::ApiError;
pub use events::{CreateEvent, DeleteEvent, ListEvents, UpdateEvent};
pub use hook::{Hook, HookState, Phase};
