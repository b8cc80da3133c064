//! Next command: the soonest upcoming event.

use std::fmt;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use clap::Args;
use club_api::{Client, ListEvents};
use club_core::next_upcoming;

use super::util::describe;

#[derive(Debug, Args)]
pub struct NextArgs {
    /// Output as JSON (`null` when nothing is scheduled).
    #[arg(long)]
    pub json: bool,
}

pub async fn run<W, Tz>(
    writer: &mut W,
    client: &Client,
    args: &NextArgs,
    now: &DateTime<Tz>,
) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let list = ListEvents::new(client.clone());
    let events = list.invoke(None).await.context("failed to fetch events")?;
    let next = next_upcoming(&events, now);

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&next)?)?;
        return Ok(());
    }

    match next {
        Some(event) => writeln!(writer, "Next: {}", describe(event, &now.timezone()))?,
        None => writeln!(writer, "No upcoming events.")?,
    }
    Ok(())
}
