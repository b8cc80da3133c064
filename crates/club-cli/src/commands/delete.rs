//! Delete command.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use club_api::{Client, DeleteEvent};
use club_core::EventId;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// ID of the event to delete.
    pub id: String,
}

pub async fn run<W: Write>(writer: &mut W, client: &Client, args: &DeleteArgs) -> Result<()> {
    let id = EventId::new(args.id.as_str()).context("invalid event ID")?;
    let delete = DeleteEvent::new(client.clone());
    delete
        .invoke(&id)
        .await
        .with_context(|| format!("failed to delete event {id}"))?;
    writeln!(writer, "Deleted event {id}")?;
    Ok(())
}
