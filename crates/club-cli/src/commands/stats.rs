//! Stats command: dashboard counters over the current event list.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use clap::Args;
use club_api::{Client, ListEvents};
use club_core::EventStats;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct StatsReport<'a> {
    timezone: &'a str,
    #[serde(flatten)]
    stats: &'a EventStats,
}

/// `timezone` names the zone of `now`, which decides what "today" means.
pub async fn run<W, Tz>(
    writer: &mut W,
    client: &Client,
    args: &StatsArgs,
    now: &DateTime<Tz>,
    timezone: &str,
) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
{
    let list = ListEvents::new(client.clone());
    let events = list.invoke(None).await.context("failed to fetch events")?;
    let stats = EventStats::collect(&events, now);

    if args.json {
        let report = StatsReport {
            timezone,
            stats: &stats,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    writeln!(writer, "Event dashboard (timezone: {timezone})")?;
    writeln!(writer, "Total: {}", stats.total)?;
    writeln!(writer, "Ongoing: {}", stats.ongoing)?;
    writeln!(writer, "Upcoming: {}", stats.upcoming)?;
    writeln!(writer, "Past: {}", stats.past)?;
    if stats.invalid_dates > 0 {
        writeln!(writer, "Invalid dates: {}", stats.invalid_dates)?;
    }
    writeln!(writer, "By status:")?;
    for (status, count) in &stats.by_status {
        writeln!(writer, "- {status}: {count}")?;
    }
    Ok(())
}
