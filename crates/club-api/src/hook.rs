//! Observable state for one asynchronous backend operation.
//!
//! A [`Hook`] tracks `loading`, the last `error` and the last `result` of an
//! operation. Every invocation moves it through
//! `Idle -> Pending -> Succeeded | Failed`, and a finished hook can be
//! invoked again. State is published through a `tokio::sync::watch`
//! channel so a presentation layer can re-render on change.
//!
//! # Concurrency
//!
//! Overlapping invocations are not coalesced or cancelled. Each writes its
//! outcome when it finishes, so the last one to resolve wins. Callers should
//! disable the triggering control while [`Hook::loading`] is true.

use std::future::Future;

use tokio::sync::watch;

use crate::ApiError;

/// Snapshot of a hook's observable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookState<T> {
    /// True only while a call is outstanding.
    pub loading: bool,
    /// Message of the last failure, cleared when a new call starts.
    pub error: Option<String>,
    /// Payload of the last success. Kept across later failures.
    pub result: Option<T>,
}

impl<T> Default for HookState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            result: None,
        }
    }
}

/// Lifecycle phase derived from a [`HookState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl<T> HookState<T> {
    pub const fn phase(&self) -> Phase {
        if self.loading {
            Phase::Pending
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.result.is_some() {
            Phase::Succeeded
        } else {
            Phase::Idle
        }
    }
}

/// Instance-scoped, observable state for one operation.
#[derive(Debug)]
pub struct Hook<T> {
    state: watch::Sender<HookState<T>>,
}

impl<T> Default for Hook<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Hook<T> {
    pub fn new() -> Self {
        let (state, _) = watch::channel(HookState::default());
        Self { state }
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase()
    }

    /// Receives every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<HookState<T>> {
        self.state.subscribe()
    }
}

impl<T: Clone> Hook<T> {
    pub fn state(&self) -> HookState<T> {
        self.state.borrow().clone()
    }

    pub fn result(&self) -> Option<T> {
        self.state.borrow().result.clone()
    }

    /// Runs `operation`, recording its outcome, and hands the outcome back.
    ///
    /// Failures are both stored in `error` and returned, so a caller can
    /// render the message and also stop a follow-up such as a refetch.
    /// `loading` is reset on every exit path, including the returned future
    /// being dropped before completion.
    pub async fn track<F>(&self, operation: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
        let _reset = LoadingReset { state: &self.state };

        match operation.await {
            Ok(value) => {
                let result = value.clone();
                self.state.send_modify(|state| {
                    state.loading = false;
                    state.result = Some(result);
                });
                Ok(value)
            }
            Err(err) => {
                let message = err.to_string();
                self.state.send_modify(|state| {
                    state.loading = false;
                    state.error = Some(message);
                });
                Err(err)
            }
        }
    }
}

/// Clears `loading` when a tracked call ends without recording an outcome.
struct LoadingReset<'a, T> {
    state: &'a watch::Sender<HookState<T>>,
}

impl<T> Drop for LoadingReset<'_, T> {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| {
            let was_loading = state.loading;
            state.loading = false;
            was_loading
        });
    }
}
