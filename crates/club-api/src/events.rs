//! Hooks for the four event operations.
//!
//! Each hook owns a [`Client`] clone and its own [`Hook`] state, so two
//! screens holding separate instances never observe each other's calls.
//! Dropping the hook disposes of its state.

use club_core::{Event, EventId, EventPatch, EventStatus, NewEvent};
use tokio::sync::watch;

use crate::hook::{Hook, HookState, Phase};
use crate::{ApiError, Client};

/// Generates the state accessors shared by every event hook.
macro_rules! hook_accessors {
    ($name:ident, $result:ty) => {
        impl $name {
            pub fn loading(&self) -> bool {
                self.hook.loading()
            }

            pub fn error(&self) -> Option<String> {
                self.hook.error()
            }

            pub fn result(&self) -> Option<$result> {
                self.hook.result()
            }

            pub fn phase(&self) -> Phase {
                self.hook.phase()
            }

            pub fn state(&self) -> HookState<$result> {
                self.hook.state()
            }

            pub fn subscribe(&self) -> watch::Receiver<HookState<$result>> {
                self.hook.subscribe()
            }
        }
    };
}

/// Creates events. `result` is the created event with its assigned ID.
#[derive(Debug)]
pub struct CreateEvent {
    client: Client,
    hook: Hook<Event>,
}

impl CreateEvent {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            hook: Hook::new(),
        }
    }

    pub async fn invoke(&self, event: &NewEvent) -> Result<Event, ApiError> {
        tracing::debug!(title = %event.title, "creating event");
        let outcome = self.hook.track(self.client.create_event(event)).await;
        match &outcome {
            Ok(created) => tracing::info!(event_id = %created.id, "event created"),
            Err(err) => tracing::warn!(error = %err, "failed to create event"),
        }
        outcome
    }
}

hook_accessors!(CreateEvent, Event);

/// Applies partial updates. `result` is the event as stored after the update.
#[derive(Debug)]
pub struct UpdateEvent {
    client: Client,
    hook: Hook<Event>,
}

impl UpdateEvent {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            hook: Hook::new(),
        }
    }

    pub async fn invoke(&self, id: &EventId, patch: &EventPatch) -> Result<Event, ApiError> {
        tracing::debug!(event_id = %id, "updating event");
        let outcome = self.hook.track(self.client.update_event(id, patch)).await;
        match &outcome {
            Ok(_) => tracing::info!(event_id = %id, "event updated"),
            Err(err) => tracing::warn!(event_id = %id, error = %err, "failed to update event"),
        }
        outcome
    }
}

hook_accessors!(UpdateEvent, Event);

/// Deletes events. `result` is `true` once a delete has succeeded.
#[derive(Debug)]
pub struct DeleteEvent {
    client: Client,
    hook: Hook<bool>,
}

impl DeleteEvent {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            hook: Hook::new(),
        }
    }

    pub async fn invoke(&self, id: &EventId) -> Result<(), ApiError> {
        tracing::debug!(event_id = %id, "deleting event");
        let outcome = self
            .hook
            .track(async { self.client.delete_event(id).await.map(|()| true) })
            .await;
        match &outcome {
            Ok(_) => tracing::info!(event_id = %id, "event deleted"),
            Err(err) => tracing::warn!(event_id = %id, error = %err, "failed to delete event"),
        }
        outcome.map(|_| ())
    }
}

hook_accessors!(DeleteEvent, bool);

/// Fetches the event list. `result` is the latest snapshot.
///
/// A successful fetch replaces the snapshot wholesale. A failed fetch leaves
/// the previous snapshot in place next to the error.
#[derive(Debug)]
pub struct ListEvents {
    client: Client,
    hook: Hook<Vec<Event>>,
}

impl ListEvents {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            hook: Hook::new(),
        }
    }

    pub async fn invoke(&self, status: Option<EventStatus>) -> Result<Vec<Event>, ApiError> {
        let outcome = self.hook.track(self.client.list_events(status)).await;
        match &outcome {
            Ok(events) => tracing::debug!(count = events.len(), ?status, "fetched events"),
            Err(err) => tracing::warn!(error = %err, "failed to fetch events"),
        }
        outcome
    }

    /// The current snapshot, empty before the first successful fetch.
    pub fn events(&self) -> Vec<Event> {
        self.hook.result().unwrap_or_default()
    }
}

hook_accessors!(ListEvents, Vec<Event>);
