//! Update command.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use club_api::{Client, UpdateEvent};
use club_core::{EventId, EventPatch, EventStatus};

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// ID of the event to change.
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub venue: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub status: Option<EventStatus>,

    /// Replace the tag list; repeat for several.
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

impl UpdateArgs {
    fn to_patch(&self) -> EventPatch {
        EventPatch {
            title: self.title.clone(),
            date: self.date.clone(),
            description: self.description.clone(),
            venue: self.venue.clone(),
            status: self.status,
            tags: (!self.tags.is_empty()).then(|| self.tags.clone()),
            posters: None,
        }
    }
}

pub async fn run<W: Write>(writer: &mut W, client: &Client, args: &UpdateArgs) -> Result<()> {
    let id = EventId::new(args.id.as_str()).context("invalid event ID")?;
    let update = UpdateEvent::new(client.clone());
    let event = update
        .invoke(&id, &args.to_patch())
        .await
        .with_context(|| format!("failed to update event {id}"))?;
    writeln!(
        writer,
        "Updated event {}: {} ({})",
        event.id, event.title, event.status
    )?;
    Ok(())
}
