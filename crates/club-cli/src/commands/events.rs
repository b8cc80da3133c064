//! Events command: fetch, bucket and search the event list.

use std::fmt;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use clap::Args;
use club_api::{Client, ListEvents};
use club_core::{Bucket, EventStatus, categorize, filter_by_query};

use super::util::{capitalize, describe};

#[derive(Debug, Args)]
pub struct EventsArgs {
    /// Only fetch events with this status.
    #[arg(long)]
    pub status: Option<EventStatus>,

    /// Case-insensitive text to find in title, description, venue or tags.
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

pub async fn run<W, Tz>(
    writer: &mut W,
    client: &Client,
    args: &EventsArgs,
    now: &DateTime<Tz>,
) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let list = ListEvents::new(client.clone());
    let events = list
        .invoke(args.status)
        .await
        .context("failed to fetch events")?;
    let buckets = filter_by_query(categorize(&events, now), &args.query);

    if args.json {
        let output = serde_json::json!({
            "ongoing": buckets.ongoing,
            "upcoming": buckets.upcoming,
            "past": buckets.past,
        });
        writeln!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
        return Ok(());
    }

    let tz = now.timezone();
    for bucket in Bucket::ALL {
        let events = buckets.get(bucket);
        writeln!(writer, "{} ({})", capitalize(bucket.as_str()), events.len())?;
        if events.is_empty() {
            writeln!(writer, "  (none)")?;
        }
        for event in events {
            writeln!(writer, "- {}", describe(event, &tz))?;
        }
    }

    Ok(())
}
