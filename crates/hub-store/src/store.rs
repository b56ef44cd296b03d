//! Store: holds the current state and notifies subscribers
//!
//! Dispatch runs the root reducer synchronously. Subscribers are only woken
//! when the reducer produced a new state, so no-op actions are invisible to
//! them.

use crate::action::Action;
use crate::state::{self, ConsoleState};
use std::sync::Arc;
use tokio::sync::watch;

/// Console state store
#[derive(Debug, Clone)]
pub struct Store {
    sender: Arc<watch::Sender<Arc<ConsoleState>>>,
}

impl Store {
    /// Store with the initial state
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(ConsoleState::default())
    }

    /// Store starting from `state`
    #[must_use]
    pub fn with_state(state: ConsoleState) -> Self {
        let (sender, _) = watch::channel(Arc::new(state));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Apply an action; returns whether the state changed
    pub fn dispatch(&self, action: &Action) -> bool {
        let changed = self.sender.send_if_modified(|current| {
            let next = state::reduce(current, action);
            if Arc::ptr_eq(&next, current) {
                false
            } else {
                *current = next;
                true
            }
        });
        tracing::debug!(kind = %action.kind(), changed, "dispatched");
        changed
    }

    /// Current state snapshot
    #[must_use]
    pub fn state(&self) -> Arc<ConsoleState> {
        Arc::clone(&self.sender.borrow())
    }

    /// Project the current state
    pub fn select<R>(&self, selector: impl FnOnce(&ConsoleState) -> R) -> R {
        selector(&self.sender.borrow())
    }

    /// Watch state changes
    #[must_use]
    pub fn subscribe(&self) -> StoreSubscription {
        StoreSubscription {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiver side of [`Store::subscribe`]
#[derive(Debug)]
pub struct StoreSubscription {
    receiver: watch::Receiver<Arc<ConsoleState>>,
}

impl StoreSubscription {
    /// Latest state
    #[must_use]
    pub fn current(&self) -> Arc<ConsoleState> {
        Arc::clone(&self.receiver.borrow())
    }

    /// Wait for the next state change; returns `None` once the store is gone
    pub async fn changed(&mut self) -> Option<Arc<ConsoleState>> {
        self.receiver.changed().await.ok()?;
        Some(Arc::clone(&self.receiver.borrow_and_update()))
    }

    /// Whether a change arrived that has not been read through `changed`
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }
}
