//! CLI subcommand implementations.

pub mod create;
pub mod delete;
pub mod events;
pub mod next;
pub mod stats;
pub mod update;
mod util;
