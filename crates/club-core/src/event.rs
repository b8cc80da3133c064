//! Club events as exchanged with the backend.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

use crate::date;
use crate::types::{EventId, ValidationError};

/// Operator-assigned lifecycle status.
///
/// The status is set by hand and may disagree with what the event's date
/// implies; the classifier decides how the two interact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EventStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Upcoming,
        Self::Ongoing,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upcoming" => Ok(Self::Upcoming),
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(ValidationError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for EventStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A schedulable club activity.
///
/// Only `id` and `title` are strict. Other fields degrade instead of failing
/// the whole list: nulls become defaults, an unknown status reads as
/// `upcoming`, and a non-string `date` is kept as its JSON text. Use
/// [`Event::date_in`] to place the date on a timeline; one that does not
/// parse yields `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(alias = "_id")]
    pub id: EventId,
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default, alias = "location", deserialize_with = "nullable_string")]
    pub venue: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: EventStatus,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub tags: Vec<String>,
    /// Image references; opaque to everything but the presentation layer.
    #[serde(default, deserialize_with = "nullable_vec")]
    pub posters: Vec<serde_json::Value>,
}

impl Event {
    /// The event's date in `tz`, or `None` if it cannot be parsed.
    pub fn date_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        date::parse_in(&self.date, tz)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == EventStatus::Cancelled
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keeps any JSON value as text so the classifier can treat it as unparseable.
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

fn lenient_status<'de, D>(deserializer: D) -> Result<EventStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(EventStatus::default());
    };
    Ok(raw.parse().unwrap_or_else(|err| {
        tracing::debug!(error = %err, "unknown event status, treating as upcoming");
        EventStatus::default()
    }))
}

/// Fields for creating an event. The backend assigns the ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub posters: Vec<String>,
}

impl NewEvent {
    /// Creates the minimal valid shape: a title and a date.
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            description: None,
            venue: None,
            status: None,
            tags: Vec::new(),
            posters: Vec::new(),
        }
    }

    /// Checks the fields the backend cannot be trusted to reject.
    ///
    /// The date is checked with [`date::is_parseable`], so only its shape is
    /// validated, not whether it exists in the viewer's zone.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }
        if !date::is_parseable(&self.date) {
            return Err(ValidationError::InvalidDate {
                value: self.date.clone(),
            });
        }
        Ok(())
    }
}

/// A partial update. Absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posters: Option<Vec<String>>,
}

impl EventPatch {
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.venue.is_none()
            && self.status.is_none()
            && self.tags.is_none()
            && self.posters.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyPatch);
        }
        if self
            .title
            .as_deref()
            .is_some_and(|title| title.trim().is_empty())
        {
            return Err(ValidationError::Empty { field: "title" });
        }
        match &self.date {
            Some(date) if !date::is_parseable(date) => Err(ValidationError::InvalidDate {
                value: date.clone(),
            }),
            _ => Ok(()),
        }
    }
}
