//! Per-user claim history and reward grants.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::error::ClaimError;
use crate::trophies::{
    clamp_points, ClaimHistory, Milestone, MilestoneReward, MilestoneView, TrophyBook,
};

/// Record of a claimed milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub claimed_at: i64,
}

/// Everything one user has claimed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    /// Claimed milestone ids.
    pub claimed: BTreeMap<String, ClaimRecord>,
    /// Tickets granted by ticket milestones.
    pub tickets: u64,
    /// Border keys granted by tier milestones, in claim order.
    pub borders: Vec<String>,
}

impl UserClaims {
    fn record(&mut self, milestone: &Milestone, claimed_at: i64) {
        self.claimed
            .insert(milestone.id.to_string(), ClaimRecord { claimed_at });
        match &milestone.reward {
            MilestoneReward::Ticket { amount } => {
                self.tickets = self.tickets.saturating_add(u64::from(*amount));
            }
            MilestoneReward::Tier { border_key } => {
                if !self.borders.iter().any(|b| b == border_key) {
                    self.borders.push(border_key.to_string());
                }
            }
        }
    }

    pub fn claimed_count(&self) -> usize {
        self.claimed.len()
    }
}

impl ClaimHistory for UserClaims {
    fn has_claimed(&self, milestone_id: &str) -> bool {
        self.claimed.contains_key(milestone_id)
    }
}

/// Result of a claim that was not rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ClaimOutcome {
    /// First claim: the reward was granted.
    Granted { reward: MilestoneReward },
    /// Claimed before; nothing changed and nothing was granted.
    AlreadyClaimed,
}

/// Claim history for every user (saved to disk).
///
/// Claims take `&mut self`, so two attempts on the same ledger are always
/// serialized; share a ledger across threads behind a `Mutex`, and across
/// processes through [`crate::ledger::LockedLedger`].
///
/// Users are keyed in sorted order so the saved file is stable between saves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimLedger {
    pub users: BTreeMap<String, UserClaims>,
}

impl ClaimLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims for a user, if they have ever claimed anything.
    pub fn user(&self, user_id: &str) -> Option<&UserClaims> {
        self.users.get(user_id)
    }

    pub fn has_claimed(&self, user_id: &str, milestone_id: &str) -> bool {
        self.user(user_id)
            .is_some_and(|claims| claims.has_claimed(milestone_id))
    }

    /// Claim a milestone for a user holding `points`.
    ///
    /// Idempotent: claiming again returns [`ClaimOutcome::AlreadyClaimed`]
    /// without granting the reward a second time.
    pub fn claim(
        &mut self,
        book: &TrophyBook,
        user_id: &str,
        milestone_id: &str,
        points: i64,
    ) -> Result<ClaimOutcome, ClaimError> {
        self.claim_at(
            book,
            user_id,
            milestone_id,
            points,
            chrono::Utc::now().timestamp(),
        )
    }

    /// [`ClaimLedger::claim`] with an explicit timestamp.
    pub fn claim_at(
        &mut self,
        book: &TrophyBook,
        user_id: &str,
        milestone_id: &str,
        points: i64,
        claimed_at: i64,
    ) -> Result<ClaimOutcome, ClaimError> {
        let milestone = book
            .milestone(milestone_id)
            .ok_or_else(|| ClaimError::UnknownMilestone(milestone_id.to_string()))?;

        if self.has_claimed(user_id, milestone_id) {
            debug!(user_id, milestone_id, "Milestone already claimed");
            return Ok(ClaimOutcome::AlreadyClaimed);
        }

        let have = clamp_points(points);
        if have < milestone.points {
            return Err(ClaimError::Locked {
                milestone: milestone_id.to_string(),
                needed: milestone.points,
                have,
            });
        }

        self.users
            .entry(user_id.to_string())
            .or_default()
            .record(milestone, claimed_at);
        info!(
            user_id,
            milestone_id,
            reward = %milestone.reward.describe(),
            "Milestone claimed"
        );

        Ok(ClaimOutcome::Granted {
            reward: milestone.reward.clone(),
        })
    }

    /// Milestone statuses for a user, combining their claims with `points`.
    pub fn statuses<'b>(
        &self,
        book: &'b TrophyBook,
        user_id: &str,
        points: i64,
    ) -> Vec<MilestoneView<'b>> {
        match self.user(user_id) {
            Some(claims) => book.milestone_statuses(points, claims),
            None => book.milestone_statuses(points, &UserClaims::default()),
        }
    }
}
