//! Create command.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use club_api::{Client, CreateEvent};
use club_core::{EventStatus, NewEvent};

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Event title.
    #[arg(long)]
    pub title: String,

    /// When the event happens (RFC 3339, `YYYY-MM-DDTHH:MM`, or `YYYY-MM-DD`).
    #[arg(long)]
    pub date: String,

    /// Where the event happens.
    #[arg(long)]
    pub venue: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Initial status (backend default when omitted).
    #[arg(long)]
    pub status: Option<EventStatus>,

    /// Search tag; repeat for several.
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

impl CreateArgs {
    fn to_new_event(&self) -> NewEvent {
        NewEvent {
            description: self.description.clone(),
            venue: self.venue.clone(),
            status: self.status,
            tags: self.tags.clone(),
            ..NewEvent::new(self.title.clone(), self.date.clone())
        }
    }
}

pub async fn run<W: Write>(writer: &mut W, client: &Client, args: &CreateArgs) -> Result<()> {
    let create = CreateEvent::new(client.clone());
    let event = create
        .invoke(&args.to_new_event())
        .await
        .context("failed to create event")?;
    writeln!(writer, "Created event {}: {}", event.id, event.title)?;
    Ok(())
}
