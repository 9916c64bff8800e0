//! Request-scoped state cell shared between a view and its in-flight tasks.
//!
//! DESIGN
//! ======
//! Each request captures a [`Ticket`] (the generation at start). Its result
//! is applied only if no newer request began and the view was not torn
//! down in the meantime. The generation and the state live under one lock
//! so the check and the write cannot interleave with another request.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Generation captured when a request begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
struct Slot<S> {
    state: S,
    generation: u64,
    torn_down: bool,
}

#[derive(Debug)]
pub struct ViewScope<S> {
    slot: Mutex<Slot<S>>,
}

impl<S: Clone> ViewScope<S> {
    #[must_use]
    pub fn new(initial: S) -> Self {
        Self { slot: Mutex::new(Slot { state: initial, generation: 0, torn_down: false }) }
    }

    /// A scope whose first request is already in flight.
    #[must_use]
    pub fn started(pending: S) -> (Self, Ticket) {
        let first = Ticket(1);
        let scope = Self { slot: Mutex::new(Slot { state: pending, generation: first.0, torn_down: false }) };
        (scope, first)
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> S {
        self.lock().state.clone()
    }

    /// Start a new request generation and set its pending state.
    ///
    /// Returns `None` once the scope is torn down.
    pub fn begin(&self, pending: S) -> Option<Ticket> {
        let mut slot = self.lock();
        if slot.torn_down {
            return None;
        }
        slot.generation = slot.generation.wrapping_add(1);
        slot.state = pending;
        Some(Ticket(slot.generation))
    }

    /// Apply `next` if `ticket` is still the latest request and the scope is live.
    ///
    /// Returns whether the state was applied.
    pub fn resolve(&self, ticket: Ticket, next: S) -> bool {
        let mut slot = self.lock();
        if slot.torn_down || slot.generation != ticket.0 {
            return false;
        }
        slot.state = next;
        true
    }

    /// Mark the scope dead. Later `begin`/`resolve` calls are no-ops.
    pub fn teardown(&self) {
        self.lock().torn_down = true;
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.lock().torn_down
    }

    fn lock(&self) -> MutexGuard<'_, Slot<S>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "scope_test.rs"]
mod scope_test;
