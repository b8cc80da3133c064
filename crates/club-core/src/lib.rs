//! Core domain logic for the club events console.
//!
//! This crate contains the fundamental types and logic for:
//! - Events: the record exchanged with the backend and its create/update shapes
//! - Classification: ongoing/upcoming/past bucketing and text search
//! - Stats: dashboard counters over an event snapshot

pub mod classify;
pub mod date;
mod event;
mod stats;
mod types;

pub use classify::{Bucket, Buckets, categorize, filter_by_query, matches_query, next_upcoming};
pub use event::{Event, EventPatch, EventStatus, NewEvent};
pub use stats::EventStats;
pub use types::{EventId, ValidationError};
