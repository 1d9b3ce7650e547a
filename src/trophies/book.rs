//! Validated trophy tables.

use std::collections::HashSet;
use std::sync::OnceLock;

use super::data::{MILESTONES, TIERS};
use super::types::{Milestone, MilestoneReward, Tier};
use crate::error::TableError;

/// An immutable pair of tier and milestone tables that passed validation.
///
/// Both tables are sorted by strictly increasing threshold, which is what
/// lets the progress queries binary search them.
#[derive(Debug, Clone, PartialEq)]
pub struct TrophyBook {
    tiers: Vec<Tier>,
    milestones: Vec<Milestone>,
}

impl TrophyBook {
    /// Validate and wrap a pair of tables.
    pub fn new(tiers: Vec<Tier>, milestones: Vec<Milestone>) -> Result<Self, TableError> {
        validate_tiers(&tiers)?;
        validate_milestones(&milestones, &tiers)?;
        Ok(Self { tiers, milestones })
    }

    /// A fresh copy of the built-in tables.
    pub fn standard() -> Result<Self, TableError> {
        Self::new(TIERS.to_vec(), MILESTONES.to_vec())
    }

    /// The process-wide built-in book, validated on first use.
    pub fn builtin() -> Result<&'static TrophyBook, TableError> {
        static BUILTIN: OnceLock<Result<TrophyBook, TableError>> = OnceLock::new();
        BUILTIN.get_or_init(Self::standard).as_ref().map_err(Clone::clone)
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn tier(&self, key: &str) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.key == key)
    }

    pub fn milestone(&self, id: &str) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == id)
    }

    /// Threshold of the final milestone; the denominator for absolute progress.
    pub fn max_points(&self) -> u32 {
        // Non-empty by construction
        self.milestones.last().map_or(1, |m| m.points)
    }
}

fn validate_tiers(tiers: &[Tier]) -> Result<(), TableError> {
    if tiers.is_empty() {
        return Err(TableError::EmptyTiers);
    }

    let mut keys = HashSet::new();
    for tier in tiers {
        if !keys.insert(&*tier.key) {
            return Err(TableError::DuplicateTierKey(tier.key.to_string()));
        }
    }

    for pair in tiers.windows(2) {
        if pair[1].min_points <= pair[0].min_points {
            return Err(TableError::TierOrder {
                key: pair[1].key.to_string(),
                points: pair[1].min_points,
                previous: pair[0].min_points,
            });
        }
    }
    Ok(())
}

fn validate_milestones(milestones: &[Milestone], tiers: &[Tier]) -> Result<(), TableError> {
    let last = milestones.last().ok_or(TableError::EmptyMilestones)?;

    let mut ids = HashSet::new();
    for milestone in milestones {
        if !ids.insert(&*milestone.id) {
            return Err(TableError::DuplicateMilestoneId(milestone.id.to_string()));
        }
    }

    for pair in milestones.windows(2) {
        if pair[1].points <= pair[0].points {
            return Err(TableError::MilestoneOrder {
                id: pair[1].id.to_string(),
                points: pair[1].points,
                previous: pair[0].points,
            });
        }
    }

    if last.points == 0 {
        return Err(TableError::ZeroFinalMilestone);
    }

    for milestone in milestones {
        match &milestone.reward {
            MilestoneReward::Tier { border_key } => {
                let tier = tiers.iter().find(|t| t.key == *border_key).ok_or_else(|| {
                    TableError::UnknownBorder {
                        id: milestone.id.to_string(),
                        border_key: border_key.to_string(),
                    }
                })?;
                if milestone.points < tier.min_points {
                    return Err(TableError::BorderBeforeUnlock {
                        id: milestone.id.to_string(),
                        points: milestone.points,
                        unlock: tier.min_points,
                    });
                }
            }
            MilestoneReward::Ticket { amount: 0 } => {
                return Err(TableError::EmptyTicketGrant(milestone.id.to_string()));
            }
            MilestoneReward::Ticket { .. } => {}
        }
    }
    Ok(())
}
