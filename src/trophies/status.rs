//! Per-milestone claim status.

use super::book::TrophyBook;
use super::types::{clamp_points, ClaimHistory, Milestone, MilestoneStatus, MilestoneView};

/// Status of a single milestone for a user with `points` and the given claim history.
///
/// A claimed milestone stays claimed regardless of points; otherwise the
/// threshold alone decides between claimable and locked.
pub fn milestone_status<H: ClaimHistory + ?Sized>(
    milestone: &Milestone,
    points: i64,
    claimed: &H,
) -> MilestoneStatus {
    if claimed.has_claimed(&milestone.id) {
        MilestoneStatus::Claimed
    } else if clamp_points(points) >= milestone.points {
        MilestoneStatus::Claimable
    } else {
        MilestoneStatus::Locked
    }
}

impl TrophyBook {
    /// Every milestone in table order with its status.
    pub fn milestone_statuses<H: ClaimHistory + ?Sized>(
        &self,
        points: i64,
        claimed: &H,
    ) -> Vec<MilestoneView<'_>> {
        self.milestones()
            .iter()
            .map(|milestone| MilestoneView {
                milestone,
                status: milestone_status(milestone, points, claimed),
            })
            .collect()
    }

    /// Ids of milestones the user could claim right now.
    pub fn claimable_ids<H: ClaimHistory + ?Sized>(&self, points: i64, claimed: &H) -> Vec<&str> {
        self.milestone_statuses(points, claimed)
            .into_iter()
            .filter(|view| view.status == MilestoneStatus::Claimable)
            .map(|view| &*view.milestone.id)
            .collect()
    }
}
