//! Aggregate counters for the admin dashboard.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::classify::{Bucket, bucket_for};
use crate::event::{Event, EventStatus};

/// Event counts by operator status and by computed bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventStats {
    pub total: usize,
    /// Keyed by status wire name so JSON output is stable.
    pub by_status: BTreeMap<&'static str, usize>,
    pub ongoing: usize,
    pub upcoming: usize,
    pub past: usize,
    /// Events whose date could not be parsed.
    pub invalid_dates: usize,
}

impl EventStats {
    /// Counts `events` as the classifier would bucket them at `now`.
    ///
    /// Cancelled events count toward `total` and `by_status` only.
    pub fn collect<Tz: TimeZone>(events: &[Event], now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let mut stats = Self {
            by_status: EventStatus::ALL
                .iter()
                .map(|status| (status.as_str(), 0))
                .collect(),
            ..Self::default()
        };

        for event in events {
            stats.total += 1;
            *stats.by_status.entry(event.status.as_str()).or_insert(0) += 1;
            if event.date_in(&tz).is_none() {
                stats.invalid_dates += 1;
            }
            match bucket_for(event, now) {
                Some(Bucket::Ongoing) => stats.ongoing += 1,
                Some(Bucket::Upcoming) => stats.upcoming += 1,
                Some(Bucket::Past) => stats.past += 1,
                None => {}
            }
        }

        stats
    }
}
