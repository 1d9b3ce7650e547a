//! Trophy table types and the computed progress/status values.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};

/// A cosmetic profile border unlocked at a point threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub key: Cow<'static, str>,
    pub label: Cow<'static, str>,
    pub min_points: u32,
}

impl Tier {
    pub const fn new(key: &'static str, label: &'static str, min_points: u32) -> Self {
        Self {
            key: Cow::Borrowed(key),
            label: Cow::Borrowed(label),
            min_points,
        }
    }
}

/// What a milestone hands out when claimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MilestoneReward {
    /// Grants the profile border named by `border_key`.
    #[serde(rename_all = "camelCase")]
    Tier { border_key: Cow<'static, str> },
    /// Grants consumable tickets.
    Ticket { amount: u32 },
}

impl MilestoneReward {
    /// Short human description, used by the CLI.
    pub fn describe(&self) -> String {
        match self {
            MilestoneReward::Tier { border_key } => format!("border '{}'", border_key),
            MilestoneReward::Ticket { amount: 1 } => "1 ticket".to_string(),
            MilestoneReward::Ticket { amount } => format!("{} tickets", amount),
        }
    }
}

/// A claimable reward event tied to a point threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: Cow<'static, str>,
    #[serde(flatten)]
    pub reward: MilestoneReward,
    pub points: u32,
}

impl Milestone {
    pub const fn tier(id: &'static str, border_key: &'static str, points: u32) -> Self {
        Self {
            id: Cow::Borrowed(id),
            reward: MilestoneReward::Tier {
                border_key: Cow::Borrowed(border_key),
            },
            points,
        }
    }

    pub const fn ticket(id: &'static str, amount: u32, points: u32) -> Self {
        Self {
            id: Cow::Borrowed(id),
            reward: MilestoneReward::Ticket { amount },
            points,
        }
    }
}

/// Where a point total sits on the milestone path.
///
/// `segment_start..segment_end` is the interval between the last milestone
/// reached and the next one. Both fractions are always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDescriptor {
    pub segment_start: u32,
    pub segment_end: u32,
    pub segment_progress: f64,
    pub absolute: f64,
}

impl ProgressDescriptor {
    /// Absolute progress as a whole percentage (0-100), for "percent to max" displays.
    pub fn percent(&self) -> u8 {
        (self.absolute * 100.0).floor() as u8
    }
}

/// Claim state of one milestone for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneStatus {
    Locked,
    Claimable,
    Claimed,
}

/// A milestone paired with its status, in table order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneView<'a> {
    #[serde(flatten)]
    pub milestone: &'a Milestone,
    pub status: MilestoneStatus,
}

/// Read access to the set of milestone ids a user has already claimed.
///
/// The claim record is owned by whoever persists user state; anything that
/// can answer "was this id claimed" plugs into status derivation.
pub trait ClaimHistory {
    fn has_claimed(&self, milestone_id: &str) -> bool;
}

impl ClaimHistory for HashSet<String> {
    fn has_claimed(&self, milestone_id: &str) -> bool {
        self.contains(milestone_id)
    }
}

impl ClaimHistory for BTreeSet<String> {
    fn has_claimed(&self, milestone_id: &str) -> bool {
        self.contains(milestone_id)
    }
}

impl ClaimHistory for [&str] {
    fn has_claimed(&self, milestone_id: &str) -> bool {
        self.iter().any(|id| *id == milestone_id)
    }
}

/// Normalize an externally supplied point total.
///
/// Negative totals indicate an upstream bug and are treated as zero.
pub fn clamp_points(points: i64) -> u32 {
    u32::try_from(points.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_points() {
        assert_eq!(clamp_points(-5), 0);
        assert_eq!(clamp_points(0), 0);
        assert_eq!(clamp_points(1234), 1234);
        assert_eq!(clamp_points(i64::MAX), u32::MAX);
    }

    #[test]
    fn test_milestone_json_shape() {
        let m = Milestone::tier("tier-bronzo", "bronzo", 50);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["id"], "tier-bronzo");
        assert_eq!(json["type"], "tier");
        assert_eq!(json["borderKey"], "bronzo");
        assert_eq!(json["points"], 50);

        let parsed: Milestone =
            serde_json::from_str(r#"{"id":"ticket-9","type":"ticket","amount":4,"points":10}"#)
                .unwrap();
        assert_eq!(parsed, Milestone::ticket("ticket-9", 4, 10));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MilestoneStatus::Claimable).unwrap(),
            "\"claimable\""
        );
    }

    #[test]
    fn test_reward_describe() {
        assert_eq!(MilestoneReward::Ticket { amount: 1 }.describe(), "1 ticket");
        assert_eq!(MilestoneReward::Ticket { amount: 3 }.describe(), "3 tickets");
        assert_eq!(
            Milestone::tier("t", "oro", 900).reward.describe(),
            "border 'oro'"
        );
    }

    #[test]
    fn test_percent_floors() {
        let p = ProgressDescriptor {
            segment_start: 0,
            segment_end: 50,
            segment_progress: 0.0,
            absolute: 0.999,
        };
        assert_eq!(p.percent(), 99);
    }
}
