//! StarTribe - trophy progress engine
//!
//! Maps a user's point total to the profile borders they have unlocked, the
//! position of the progress rocket along the milestone path, and the claim
//! status of every milestone reward.

pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod trophies;
pub mod utils;

pub use config::Config;
pub use error::{ClaimError, CliError, ConfigError, LedgerError, TableError};
pub use ledger::{ClaimLedger, ClaimOutcome, LockedLedger, UserClaims};
pub use trophies::{
    ClaimHistory, Milestone, MilestoneReward, MilestoneStatus, MilestoneView, ProgressDescriptor,
    Tier, TrophyBook,
};
