//! Optimistic Vote Updater
//!
//! Состояние для одной пары (subject, identity): предсказание применяется
//! сразу, remote write идёт следом, при ошибке точный rollback и notice.

use crate::ports::{Notice, UserNotifier, VoteGateway};
use crate::services::optimistic::{OptimisticCell, OptimisticError, Snapshot, SyncPhase};
use crate::{ApplicationError, ApplicationResult};
use domain::{ClientIdentity, SubjectId, VoteState, VoteType, VoteWrite};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

/// Result of a vote action that was accepted (not rejected as in-flight)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// Remote write succeeded; the predicted state stands
    Reconciled(VoteState),
    /// Remote write failed; the pre-click state was restored
    RolledBack { restored: VoteState, reason: String },
    /// The view went away before the write completed
    Discarded,
}

pub struct VoteUpdater {
    subject: SubjectId,
    client: ClientIdentity,
    gateway: Arc<dyn VoteGateway>,
    notifier: Arc<dyn UserNotifier>,
    cell: OptimisticCell<VoteState>,
}

impl VoteUpdater {
    pub fn new(
        subject: SubjectId,
        client: ClientIdentity,
        gateway: Arc<dyn VoteGateway>,
        notifier: Arc<dyn UserNotifier>,
    ) -> Self {
        Self::with_state(subject, client, gateway, notifier, VoteState::default())
    }

    /// Start from an already known state instead of zero votes
    pub fn with_state(
        subject: SubjectId,
        client: ClientIdentity,
        gateway: Arc<dyn VoteGateway>,
        notifier: Arc<dyn UserNotifier>,
        initial: VoteState,
    ) -> Self {
        Self {
            subject,
            client,
            gateway,
            notifier,
            cell: OptimisticCell::new(initial),
        }
    }

    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }

    pub fn state(&self) -> VoteState {
        self.cell.state()
    }

    pub fn phase(&self) -> SyncPhase {
        self.cell.phase()
    }

    /// UI should disable vote controls while this is true
    pub fn is_pending(&self) -> bool {
        self.cell.is_pending()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot<VoteState>> {
        self.cell.subscribe()
    }

    /// Fetch authoritative counts and this identity's vote (on mount)
    #[instrument(skip(self), fields(subject = %self.subject))]
    pub async fn load(&self) -> ApplicationResult<VoteState> {
        let (counts, user_vote) = tokio::join!(
            self.gateway.fetch_counts(&self.subject),
            self.gateway.fetch_user_vote(&self.subject, &self.client),
        );

        let counts = counts
            .map_err(|e| ApplicationError::gateway("fetch vote counts", e))?
            .unwrap_or_default();
        let user_vote = user_vote.map_err(|e| ApplicationError::gateway("fetch user vote", e))?;

        let state = VoteState::new(counts, user_vote);
        self.cell
            .replace(state)
            .map_err(|e| self.map_cell_error(e, "vote load"))?;

        info!(
            upvotes = state.upvotes,
            downvotes = state.downvotes,
            score = state.score,
            "vote state loaded"
        );
        Ok(state)
    }

    /// Click on the upvote / downvote control
    ///
    /// Rejected with `MutationInFlight` while a previous click is unreconciled.
    #[instrument(skip(self), fields(subject = %self.subject))]
    pub async fn vote(&self, requested: VoteType) -> ApplicationResult<VoteOutcome> {
        let (ticket, transition) = self
            .cell
            .begin(|current| current.apply(requested))
            .map_err(|e| self.map_cell_error(e, "vote"))?;

        let result = match transition.write() {
            VoteWrite::Upsert(vote) => {
                self.gateway
                    .upsert_vote(&self.subject, &self.client, vote)
                    .await
            }
            VoteWrite::Delete => self.gateway.delete_vote(&self.subject, &self.client).await,
        };

        match result {
            Ok(()) => {
                if !self.cell.commit(ticket, |_| {}) {
                    return Ok(VoteOutcome::Discarded);
                }
                let state = self.cell.state();
                info!(?transition, score = state.score, "vote reconciled");
                Ok(VoteOutcome::Reconciled(state))
            }
            Err(e) => {
                let restored = *ticket.previous();
                warn!(?transition, error = %e, "vote write failed, rolling back");
                if !self.cell.rollback(ticket) {
                    return Ok(VoteOutcome::Discarded);
                }

                self.notifier.notify(Notice::error(
                    "Vote failed",
                    "Your vote could not be saved. Please try again.",
                ));
                Ok(VoteOutcome::RolledBack {
                    restored,
                    reason: e.to_string(),
                })
            }
        }
    }

    /// The view is gone: late completions must not touch state or notify
    pub fn unmount(&self) {
        self.cell.unmount();
    }

    fn map_cell_error(&self, error: OptimisticError, operation: &str) -> ApplicationError {
        match error {
            OptimisticError::AlreadyPending => {
                ApplicationError::in_flight("vote", self.subject.as_str())
            }
            OptimisticError::Unmounted => ApplicationError::Unmounted {
                operation: operation.to_string(),
            },
        }
    }
}
