//! Tests for the optimistic vote updater
//!
//! Coverage areas:
//! - add / retract / switch scenarios
//! - rollback exactness and failure notices
//! - in-flight rejection (no double counting)
//! - unmount guard
//! - replay property over random click sequences

use application::adapters::RecordingNotifier;
use application::ports::{GatewayError, GatewayResult, VoteGateway};
use application::services::{SyncPhase, VoteOutcome, VoteUpdater};
use application::ApplicationError;
use async_trait::async_trait;
use domain::{ClientIdentity, SubjectId, VoteCounts, VoteState, VoteType};
use mockall::mock;
use mockall::predicate::*;
use proptest::prelude::*;
use std::sync::Arc;
use tokio::sync::Notify;

mock! {
    pub Gateway {}

    #[async_trait]
    impl VoteGateway for Gateway {
        async fn fetch_counts(&self, subject: &SubjectId) -> GatewayResult<Option<VoteCounts>>;
        async fn fetch_user_vote(
            &self,
            subject: &SubjectId,
            client: &ClientIdentity,
        ) -> GatewayResult<Option<VoteType>>;
        async fn upsert_vote(
            &self,
            subject: &SubjectId,
            client: &ClientIdentity,
            vote: VoteType,
        ) -> GatewayResult<()>;
        async fn delete_vote(&self, subject: &SubjectId, client: &ClientIdentity) -> GatewayResult<()>;
    }
}

/// Gateway whose writes block until the test opens the gate
struct GatedGateway {
    gate: Arc<Notify>,
    fail: bool,
}

#[async_trait]
impl VoteGateway for GatedGateway {
    async fn fetch_counts(&self, _subject: &SubjectId) -> GatewayResult<Option<VoteCounts>> {
        Ok(None)
    }

    async fn fetch_user_vote(
        &self,
        _subject: &SubjectId,
        _client: &ClientIdentity,
    ) -> GatewayResult<Option<VoteType>> {
        Ok(None)
    }

    async fn upsert_vote(
        &self,
        _subject: &SubjectId,
        _client: &ClientIdentity,
        _vote: VoteType,
    ) -> GatewayResult<()> {
        self.gate.notified().await;
        if self.fail {
            return Err(GatewayError::Transport("connection reset".to_string()));
        }
        Ok(())
    }

    async fn delete_vote(&self, _subject: &SubjectId, _client: &ClientIdentity) -> GatewayResult<()> {
        self.gate.notified().await;
        Ok(())
    }
}

fn subject() -> SubjectId {
    SubjectId::new("tool-42").unwrap()
}

fn client() -> ClientIdentity {
    ClientIdentity::from_stored("client-abc").unwrap()
}

fn accepting_gateway() -> MockGateway {
    let mut gateway = MockGateway::new();
    gateway.expect_upsert_vote().returning(|_, _, _| Ok(()));
    gateway.expect_delete_vote().returning(|_, _| Ok(()));
    gateway
}

fn build_updater(gateway: impl VoteGateway + 'static, initial: VoteState) -> (VoteUpdater, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let updater = VoteUpdater::with_state(subject(), client(), Arc::new(gateway), notifier.clone(), initial);
    (updater, notifier)
}

#[tokio::test]
async fn test_fresh_subject_upvote_then_retract() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_upsert_vote()
        .with(eq(subject()), eq(client()), eq(VoteType::Upvote))
        .times(1)
        .returning(|_, _, _| Ok(()));
    gateway
        .expect_delete_vote()
        .with(eq(subject()), eq(client()))
        .times(1)
        .returning(|_, _| Ok(()));

    let (updater, notifier) = build_updater(gateway, VoteState::default());

    let outcome = updater.vote(VoteType::Upvote).await.unwrap();
    let after_up = VoteState {
        upvotes: 1,
        downvotes: 0,
        score: 1,
        user_vote: Some(VoteType::Upvote),
    };
    assert_eq!(outcome, VoteOutcome::Reconciled(after_up));
    assert_eq!(updater.phase(), SyncPhase::Reconciled);

    let outcome = updater.vote(VoteType::Upvote).await.unwrap();
    assert_eq!(outcome, VoteOutcome::Reconciled(VoteState::default()));
    assert_eq!(updater.state().user_vote, None);
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn test_switch_vote_moves_count() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_upsert_vote()
        .with(always(), always(), eq(VoteType::Downvote))
        .times(1)
        .returning(|_, _, _| Ok(()));

    let initial = VoteState {
        upvotes: 1,
        downvotes: 0,
        score: 1,
        user_vote: Some(VoteType::Upvote),
    };
    let (updater, _) = build_updater(gateway, initial);

    updater.vote(VoteType::Downvote).await.unwrap();
    let state = updater.state();
    assert_eq!(state.upvotes, 0);
    assert_eq!(state.downvotes, 1);
    assert_eq!(state.score, -1);
    assert_eq!(state.user_vote, Some(VoteType::Downvote));
}

#[tokio::test]
async fn test_failed_write_restores_exact_state_and_notifies() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_upsert_vote()
        .returning(|_, _, _| Err(GatewayError::Status { status: 503, body: "unavailable".to_string() }));

    let initial = VoteState {
        upvotes: 7,
        downvotes: 3,
        score: 4,
        user_vote: Some(VoteType::Downvote),
    };
    let (updater, notifier) = build_updater(gateway, initial);
    let mut rx = updater.subscribe();

    let outcome = updater.vote(VoteType::Upvote).await.unwrap();
    match outcome {
        VoteOutcome::RolledBack { restored, reason } => {
            assert_eq!(restored, initial);
            assert!(reason.contains("503"));
        }
        other => panic!("expected rollback, got {other:?}"),
    }

    assert_eq!(updater.state(), initial);
    assert_eq!(updater.phase(), SyncPhase::Idle);
    assert_eq!(rx.borrow_and_update().state, initial);
    assert_eq!(notifier.errors().len(), 1);
    assert_eq!(notifier.errors()[0].title, "Vote failed");
}

#[tokio::test]
async fn test_second_vote_while_pending_is_rejected() {
    let gate = Arc::new(Notify::new());
    let (updater, _) = build_updater(
        GatedGateway {
            gate: gate.clone(),
            fail: false,
        },
        VoteState::default(),
    );

    let (first, second, ()) = tokio::join!(
        updater.vote(VoteType::Upvote),
        async {
            tokio::task::yield_now().await;
            assert!(updater.is_pending());
            updater.vote(VoteType::Upvote).await
        },
        async {
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
            gate.notify_one();
        },
    );

    assert!(matches!(first.unwrap(), VoteOutcome::Reconciled(_)));
    assert!(matches!(
        second,
        Err(ApplicationError::MutationInFlight { .. })
    ));

    // Counted exactly once
    assert_eq!(updater.state().upvotes, 1);
    assert_eq!(updater.state().score, 1);
}

#[tokio::test]
async fn test_next_action_after_rollback_starts_fresh() {
    let gate = Arc::new(Notify::new());
    let (updater, notifier) = build_updater(
        GatedGateway {
            gate: gate.clone(),
            fail: true,
        },
        VoteState::default(),
    );

    gate.notify_one();
    let outcome = updater.vote(VoteType::Downvote).await.unwrap();
    assert!(matches!(outcome, VoteOutcome::RolledBack { .. }));
    assert!(!updater.is_pending());

    gate.notify_one();
    let outcome = updater.vote(VoteType::Downvote).await.unwrap();
    assert!(matches!(outcome, VoteOutcome::RolledBack { .. }));
    assert_eq!(notifier.errors().len(), 2);
}

#[tokio::test]
async fn test_completion_after_unmount_is_ignored() {
    let gate = Arc::new(Notify::new());
    let (updater, notifier) = build_updater(
        GatedGateway {
            gate: gate.clone(),
            fail: true,
        },
        VoteState::default(),
    );

    let (outcome, ()) = tokio::join!(updater.vote(VoteType::Upvote), async {
        tokio::task::yield_now().await;
        updater.unmount();
        gate.notify_one();
    });

    assert_eq!(outcome.unwrap(), VoteOutcome::Discarded);
    assert!(notifier.notices().is_empty());
    assert!(matches!(
        updater.vote(VoteType::Upvote).await,
        Err(ApplicationError::Unmounted { .. })
    ));
}

#[tokio::test]
async fn test_load_treats_missing_counts_as_zero() {
    let mut gateway = MockGateway::new();
    gateway.expect_fetch_counts().returning(|_| Ok(None));
    gateway
        .expect_fetch_user_vote()
        .returning(|_, _| Ok(Some(VoteType::Upvote)));

    let (updater, _) = build_updater(gateway, VoteState::default());
    let state = updater.load().await.unwrap();

    assert_eq!(state.upvotes, 0);
    assert_eq!(state.user_vote, Some(VoteType::Upvote));
}

#[tokio::test]
async fn test_load_failure_keeps_previous_state() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_fetch_counts()
        .returning(|_| Err(GatewayError::Transport("offline".to_string())));
    gateway.expect_fetch_user_vote().returning(|_, _| Ok(None));

    let initial = VoteState {
        upvotes: 2,
        downvotes: 0,
        score: 2,
        user_vote: None,
    };
    let (updater, _) = build_updater(gateway, initial);

    let err = updater.load().await.unwrap_err();
    assert_eq!(err.category(), "gateway");
    assert_eq!(updater.state(), initial);
}

/// Independent model of the click rules, kept deliberately simple
fn model_click(state: &mut (i64, i64, Option<VoteType>), requested: VoteType) {
    let (up, down, current) = state;
    match (*current, requested) {
        (Some(VoteType::Upvote), VoteType::Upvote) => {
            *up = (*up - 1).max(0);
            *current = None;
        }
        (Some(VoteType::Downvote), VoteType::Downvote) => {
            *down = (*down - 1).max(0);
            *current = None;
        }
        (None, VoteType::Upvote) => {
            *up += 1;
            *current = Some(VoteType::Upvote);
        }
        (None, VoteType::Downvote) => {
            *down += 1;
            *current = Some(VoteType::Downvote);
        }
        (Some(VoteType::Downvote), VoteType::Upvote) => {
            *down = (*down - 1).max(0);
            *up += 1;
            *current = Some(VoteType::Upvote);
        }
        (Some(VoteType::Upvote), VoteType::Downvote) => {
            *up = (*up - 1).max(0);
            *down += 1;
            *current = Some(VoteType::Downvote);
        }
    }
}

fn vote_type() -> impl Strategy<Value = VoteType> {
    prop_oneof![Just(VoteType::Upvote), Just(VoteType::Downvote)]
}

proptest! {
    #[test]
    fn prop_reconciled_state_matches_replay(
        base_up in 0u32..50,
        base_down in 0u32..50,
        clicks in proptest::collection::vec(vote_type(), 0..30),
    ) {
        let initial = VoteState {
            upvotes: base_up,
            downvotes: base_down,
            score: i64::from(base_up) - i64::from(base_down),
            user_vote: None,
        };
        let (updater, _) = build_updater(accepting_gateway(), initial);
        let mut model = (i64::from(base_up), i64::from(base_down), None);

        for click in clicks {
            let outcome = tokio_test::block_on(updater.vote(click)).unwrap();
            model_click(&mut model, click);

            let state = match outcome {
                VoteOutcome::Reconciled(state) => state,
                other => panic!("unexpected outcome {other:?}"),
            };
            prop_assert_eq!(i64::from(state.upvotes), model.0);
            prop_assert_eq!(i64::from(state.downvotes), model.1);
            prop_assert_eq!(state.user_vote, model.2);
            // The base had no user vote, so counts never hit the floor and score stays consistent
            prop_assert_eq!(state.score, model.0 - model.1);
        }
    }
}
