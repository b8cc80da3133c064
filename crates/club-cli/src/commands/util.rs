//! Shared utilities for CLI commands.

use std::fmt;

use chrono::TimeZone;
use club_core::Event;

/// Renders one event as a single line, with its date shown in `tz`.
pub fn describe<Tz: TimeZone>(event: &Event, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    let when = event.date_in(tz).map_or_else(
        || format!("invalid date {:?}", event.date),
        |date| date.format("%Y-%m-%d %H:%M").to_string(),
    );

    let mut parts = vec![format!("[{}] {}", event.id, event.title), when];
    if !event.venue.is_empty() {
        parts.push(event.venue.clone());
    }
    parts.push(event.status.to_string());
    if !event.tags.is_empty() {
        parts.push(format!("#{}", event.tags.join(" #")));
    }
    parts.join(" | ")
}

/// Uppercases the first character, for section headings built from wire names.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
