//! Time-based bucketing and text search over event lists.
//!
//! # Rules
//!
//! Cancelled events are never bucketed. Every other event lands in exactly
//! one bucket, checked in this order:
//!
//! 1. `ongoing` if its status is `ongoing` or its date falls on the same
//!    calendar day as `now` (in `now`'s time zone), even later today
//! 2. `upcoming` if its date is after `now`
//! 3. `past` otherwise, including events whose date does not parse
//!
//! Buckets keep the input order.

use std::fmt;

use chrono::{DateTime, TimeZone};

use crate::event::{Event, EventStatus};

/// One of the three mutually exclusive classification outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Ongoing,
    Upcoming,
    Past,
}

impl Bucket {
    pub const ALL: [Self; 3] = [Self::Ongoing, Self::Upcoming, Self::Past];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ongoing => "ongoing",
            Self::Upcoming => "upcoming",
            Self::Past => "past",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Events partitioned by [`Bucket`], borrowed from the input list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets<'a> {
    pub ongoing: Vec<&'a Event>,
    pub upcoming: Vec<&'a Event>,
    pub past: Vec<&'a Event>,
}

impl<'a> Buckets<'a> {
    pub fn get(&self, bucket: Bucket) -> &[&'a Event] {
        match bucket {
            Bucket::Ongoing => &self.ongoing,
            Bucket::Upcoming => &self.upcoming,
            Bucket::Past => &self.past,
        }
    }

    fn get_mut(&mut self, bucket: Bucket) -> &mut Vec<&'a Event> {
        match bucket {
            Bucket::Ongoing => &mut self.ongoing,
            Bucket::Upcoming => &mut self.upcoming,
            Bucket::Past => &mut self.past,
        }
    }

    /// Total number of events across all buckets.
    pub fn len(&self) -> usize {
        self.ongoing.len() + self.upcoming.len() + self.past.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns the bucket for a single event, or `None` if it is cancelled.
pub fn bucket_for<Tz: TimeZone>(event: &Event, now: &DateTime<Tz>) -> Option<Bucket> {
    if event.is_cancelled() {
        return None;
    }

    let date = event.date_in(&now.timezone());
    let same_day = date
        .as_ref()
        .is_some_and(|date| date.date_naive() == now.date_naive());

    if event.status == EventStatus::Ongoing || same_day {
        return Some(Bucket::Ongoing);
    }

    match date {
        Some(date) if date > *now => Some(Bucket::Upcoming),
        Some(_) => Some(Bucket::Past),
        None => {
            tracing::debug!(
                event_id = %event.id,
                date = %event.date,
                "unparseable event date, classifying as past"
            );
            Some(Bucket::Past)
        }
    }
}

/// Partitions `events` into ongoing, upcoming and past relative to `now`.
pub fn categorize<'a, Tz: TimeZone>(events: &'a [Event], now: &DateTime<Tz>) -> Buckets<'a> {
    let mut buckets = Buckets::default();
    for event in events {
        if let Some(bucket) = bucket_for(event, now) {
            buckets.get_mut(bucket).push(event);
        }
    }
    buckets
}

/// Narrows every bucket to events matching `query`.
///
/// An empty or whitespace-only query returns `buckets` unchanged. Otherwise
/// the match is a case-insensitive substring test against the title,
/// description, venue and each tag.
pub fn filter_by_query<'a>(buckets: Buckets<'a>, query: &str) -> Buckets<'a> {
    if query.trim().is_empty() {
        return buckets;
    }

    let needle = query.to_lowercase();
    let keep = |events: Vec<&'a Event>| -> Vec<&'a Event> {
        events
            .into_iter()
            .filter(|event| matches_lowered(event, &needle))
            .collect()
    };

    Buckets {
        ongoing: keep(buckets.ongoing),
        upcoming: keep(buckets.upcoming),
        past: keep(buckets.past),
    }
}

/// Returns true if `query` occurs, ignoring case, in any searchable field.
pub fn matches_query(event: &Event, query: &str) -> bool {
    matches_lowered(event, &query.to_lowercase())
}

fn matches_lowered(event: &Event, needle: &str) -> bool {
    let hit = |field: &str| field.to_lowercase().contains(needle);
    hit(event.title.as_str())
        || hit(event.description.as_str())
        || hit(event.venue.as_str())
        || event.tags.iter().any(|tag| hit(tag.as_str()))
}

/// The soonest non-cancelled event dated strictly after `now`.
///
/// Ties keep the earliest entry in `events`. Events with unparseable dates
/// are never selected.
pub fn next_upcoming<'a, Tz: TimeZone>(
    events: &'a [Event],
    now: &DateTime<Tz>,
) -> Option<&'a Event> {
    let tz = now.timezone();
    events
        .iter()
        .filter(|event| !event.is_cancelled())
        .filter_map(|event| {
            event
                .date_in(&tz)
                .filter(|date| date > now)
                .map(|date| (date, event))
        })
        .min_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, event)| event)
}
