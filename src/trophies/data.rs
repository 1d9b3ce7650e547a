//! Built-in tier and milestone tables.

use super::types::{Milestone, Tier};

/// Profile borders in unlock order.
pub const TIERS: &[Tier] = &[
    Tier::new("bronzo", "Bronzo", 50),
    Tier::new("argento", "Argento", 300),
    Tier::new("oro", "Oro", 900),
    Tier::new("platino", "Platino", 1800),
    Tier::new("diamante", "Diamante", 3500),
];

/// Claimable rewards along the rocket path. The last threshold is the
/// maximum attainable progress.
pub const MILESTONES: &[Milestone] = &[
    Milestone::tier("tier-bronzo", "bronzo", 50),
    Milestone::ticket("ticket-1", 1, 300),
    Milestone::tier("tier-argento", "argento", 500),
    Milestone::ticket("ticket-2", 2, 700),
    Milestone::tier("tier-oro", "oro", 900),
    Milestone::ticket("ticket-3", 3, 1300),
    Milestone::tier("tier-platino", "platino", 1800),
    Milestone::ticket("ticket-4", 5, 2600),
    Milestone::tier("tier-diamante", "diamante", 3500),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trophies::{MilestoneReward, TrophyBook};

    #[test]
    fn test_builtin_tables_validate() {
        assert!(TrophyBook::new(TIERS.to_vec(), MILESTONES.to_vec()).is_ok());
    }

    #[test]
    fn test_every_tier_has_a_border_milestone() {
        for tier in TIERS {
            let found = MILESTONES.iter().any(|m| match &m.reward {
                MilestoneReward::Tier { border_key } => *border_key == tier.key,
                MilestoneReward::Ticket { .. } => false,
            });
            assert!(found, "No milestone grants border {}", tier.key);
        }
    }

    #[test]
    fn test_final_milestone_is_max() {
        let last = MILESTONES.last().unwrap();
        assert_eq!(last.points, 3500);
        assert!(MILESTONES.iter().all(|m| m.points <= last.points));
    }
}
