//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::create::CreateArgs;
use crate::commands::delete::DeleteArgs;
use crate::commands::events::EventsArgs;
use crate::commands::next::NextArgs;
use crate::commands::stats::StatsArgs;
use crate::commands::update::UpdateArgs;

/// Club events console.
///
/// Lists, searches and manages club events through the backend's REST API.
#[derive(Debug, Parser)]
#[command(name = "club", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List events grouped into ongoing, upcoming and past.
    Events(EventsArgs),

    /// Show the soonest upcoming event.
    Next(NextArgs),

    /// Create an event.
    Create(CreateArgs),

    /// Update fields of an existing event.
    Update(UpdateArgs),

    /// Permanently delete an event.
    Delete(DeleteArgs),

    /// Show dashboard counters.
    Stats(StatsArgs),
}
