//! Vote - per-subject vote tallies and the current identity's vote
//!
//! Правила перехода (retract / add / switch) живут здесь, чтобы
//! optimistic prediction на клиенте и любые replay-проверки
//! использовали одну и ту же логику.

use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a single vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Upvote,
    Downvote,
}

impl VoteType {
    pub fn opposite(self) -> Self {
        match self {
            VoteType::Upvote => VoteType::Downvote,
            VoteType::Downvote => VoteType::Upvote,
        }
    }

    /// Contribution of one vote of this type to the score
    pub fn weight(self) -> i64 {
        match self {
            VoteType::Upvote => 1,
            VoteType::Downvote => -1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VoteType::Upvote => "upvote",
            VoteType::Downvote => "downvote",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upvote" | "up" => Ok(VoteType::Upvote),
            "downvote" | "down" => Ok(VoteType::Downvote),
            other => Err(DomainError::InvalidVoteType(other.to_string())),
        }
    }
}

/// Server-side aggregate for a subject
///
/// A subject without any row is a valid "zero votes" state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCounts {
    pub upvotes: u32,
    pub downvotes: u32,
    pub score: i64,
}

/// What a vote action does relative to the current user vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// Same type clicked again: remove the vote
    Retract(VoteType),
    /// No previous vote
    Add(VoteType),
    /// Opposite type clicked: move the vote
    Switch { from: VoteType, to: VoteType },
}

impl VoteTransition {
    pub fn plan(current: Option<VoteType>, requested: VoteType) -> Self {
        match current {
            Some(existing) if existing == requested => VoteTransition::Retract(requested),
            Some(existing) => VoteTransition::Switch {
                from: existing,
                to: requested,
            },
            None => VoteTransition::Add(requested),
        }
    }

    /// Remote write that makes the server agree with the predicted state
    pub fn write(self) -> VoteWrite {
        match self {
            VoteTransition::Retract(_) => VoteWrite::Delete,
            VoteTransition::Add(vote) | VoteTransition::Switch { to: vote, .. } => {
                VoteWrite::Upsert(vote)
            }
        }
    }
}

/// Remote mutation for the (subject, identity) vote row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteWrite {
    Upsert(VoteType),
    Delete,
}

/// Displayed vote state for one subject from one identity's point of view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteState {
    pub upvotes: u32,
    pub downvotes: u32,
    pub score: i64,
    pub user_vote: Option<VoteType>,
}

impl VoteState {
    pub fn new(counts: VoteCounts, user_vote: Option<VoteType>) -> Self {
        Self {
            upvotes: counts.upvotes,
            downvotes: counts.downvotes,
            score: counts.score,
            user_vote,
        }
    }

    pub fn counts(&self) -> VoteCounts {
        VoteCounts {
            upvotes: self.upvotes,
            downvotes: self.downvotes,
            score: self.score,
        }
    }

    /// Predict the state after `requested` is clicked, plus the write to issue
    pub fn apply(&self, requested: VoteType) -> (VoteState, VoteTransition) {
        let transition = VoteTransition::plan(self.user_vote, requested);
        let mut next = *self;

        match transition {
            VoteTransition::Retract(vote) => {
                *next.count_mut(vote) = next.count(vote).saturating_sub(1);
                next.score = next.score.saturating_sub(vote.weight());
                next.user_vote = None;
            }
            VoteTransition::Add(vote) => {
                *next.count_mut(vote) = next.count(vote).saturating_add(1);
                next.score = next.score.saturating_add(vote.weight());
                next.user_vote = Some(vote);
            }
            VoteTransition::Switch { from, to } => {
                *next.count_mut(from) = next.count(from).saturating_sub(1);
                *next.count_mut(to) = next.count(to).saturating_add(1);
                next.score = next.score.saturating_add(2 * to.weight());
                next.user_vote = Some(to);
            }
        }

        (next, transition)
    }

    fn count(&self, vote: VoteType) -> u32 {
        match vote {
            VoteType::Upvote => self.upvotes,
            VoteType::Downvote => self.downvotes,
        }
    }

    fn count_mut(&mut self, vote: VoteType) -> &mut u32 {
        match vote {
            VoteType::Upvote => &mut self.upvotes,
            VoteType::Downvote => &mut self.downvotes,
        }
    }
}
