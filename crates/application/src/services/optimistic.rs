//! Optimistic Cell - reusable predict / commit / rollback state machine
//!
//! Хранит предсказанное (локальное) состояние, пока remote write в полёте.
//! Один mutation за раз: `begin` во время `Pending` отклоняется без очереди.
//!
//! ```text
//! Idle ──begin──▶ Pending ──commit───▶ Reconciled ──begin──▶ Pending ...
//!                    │
//!                    └─────rollback──▶ RolledBack ──▶ Idle
//! ```

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;

/// Synchronization phase of the locally displayed state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    Pending,
    Reconciled,
    RolledBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OptimisticError {
    #[error("a mutation is already pending")]
    AlreadyPending,

    #[error("cell has been unmounted")]
    Unmounted,
}

/// What subscribers observe after every transition
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<S> {
    pub state: S,
    pub phase: SyncPhase,
}

/// Proof of an in-flight mutation, carrying the exact pre-transition state
#[derive(Debug)]
pub struct Ticket<S> {
    previous: S,
    generation: u64,
}

impl<S> Ticket<S> {
    pub fn previous(&self) -> &S {
        &self.previous
    }
}

struct Inner<S> {
    state: S,
    phase: SyncPhase,
    generation: u64,
    mounted: bool,
}

pub struct OptimisticCell<S> {
    inner: Mutex<Inner<S>>,
    publisher: watch::Sender<Snapshot<S>>,
}

impl<S: Clone + Send + Sync> OptimisticCell<S> {
    pub fn new(initial: S) -> Self {
        let (publisher, _) = watch::channel(Snapshot {
            state: initial.clone(),
            phase: SyncPhase::Idle,
        });

        Self {
            inner: Mutex::new(Inner {
                state: initial,
                phase: SyncPhase::Idle,
                generation: 0,
                mounted: true,
            }),
            publisher,
        }
    }

    pub fn state(&self) -> S {
        self.inner.lock().state.clone()
    }

    pub fn phase(&self) -> SyncPhase {
        self.inner.lock().phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase() == SyncPhase::Pending
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.lock().mounted
    }

    /// Receive a snapshot after every transition (UI re-render hook)
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<S>> {
        self.publisher.subscribe()
    }

    /// Overwrite the state with authoritative data (initial fetch on mount).
    /// Refused while a mutation is pending so the prediction is not clobbered.
    pub fn replace(&self, state: S) -> Result<(), OptimisticError> {
        let mut inner = self.inner.lock();
        if !inner.mounted {
            return Err(OptimisticError::Unmounted);
        }
        if inner.phase == SyncPhase::Pending {
            return Err(OptimisticError::AlreadyPending);
        }

        inner.state = state;
        inner.phase = SyncPhase::Idle;
        self.publish(&inner);
        Ok(())
    }

    /// Apply a prediction immediately and enter `Pending`.
    ///
    /// `predict` receives the current state and returns the predicted state
    /// plus any extra value the caller needs to issue the remote write.
    pub fn begin<T>(
        &self,
        predict: impl FnOnce(&S) -> (S, T),
    ) -> Result<(Ticket<S>, T), OptimisticError> {
        let mut inner = self.inner.lock();
        if !inner.mounted {
            return Err(OptimisticError::Unmounted);
        }
        if inner.phase == SyncPhase::Pending {
            return Err(OptimisticError::AlreadyPending);
        }

        let (predicted, extra) = predict(&inner.state);
        let previous = std::mem::replace(&mut inner.state, predicted);
        inner.generation += 1;
        inner.phase = SyncPhase::Pending;
        self.publish(&inner);

        debug!(generation = inner.generation, "optimistic mutation started");

        Ok((
            Ticket {
                previous,
                generation: inner.generation,
            },
            extra,
        ))
    }

    /// Keep the prediction, optionally folding in server data.
    /// Returns false (and changes nothing) if the cell was unmounted meanwhile.
    pub fn commit(&self, ticket: Ticket<S>, reconcile: impl FnOnce(&mut S)) -> bool {
        let mut inner = self.inner.lock();
        if !Self::accepts(&inner, &ticket) {
            return false;
        }

        reconcile(&mut inner.state);
        inner.phase = SyncPhase::Reconciled;
        self.publish(&inner);
        true
    }

    /// Restore the exact pre-transition state and return to `Idle`.
    /// Returns false (and changes nothing) if the cell was unmounted meanwhile.
    pub fn rollback(&self, ticket: Ticket<S>) -> bool {
        let mut inner = self.inner.lock();
        if !Self::accepts(&inner, &ticket) {
            return false;
        }

        inner.state = ticket.previous;
        inner.phase = SyncPhase::RolledBack;
        self.publish(&inner);

        inner.phase = SyncPhase::Idle;
        self.publish(&inner);
        true
    }

    /// Detach from the view: later completions become no-ops
    pub fn unmount(&self) {
        let mut inner = self.inner.lock();
        inner.mounted = false;
    }

    fn accepts(inner: &Inner<S>, ticket: &Ticket<S>) -> bool {
        inner.mounted && inner.phase == SyncPhase::Pending && inner.generation == ticket.generation
    }

    fn publish(&self, inner: &Inner<S>) {
        self.publisher.send_replace(Snapshot {
            state: inner.state.clone(),
            phase: inner.phase,
        });
    }
}
