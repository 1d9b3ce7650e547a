//! Trophy tables, progress queries and milestone claim status.
//!
//! A [`TrophyBook`] is built once at startup from validated tables and is
//! read-only afterwards, so it can be shared freely across threads.

pub mod book;
pub mod data;
pub mod progress;
pub mod status;
pub mod types;

pub use book::TrophyBook;
pub use status::milestone_status;
pub use types::{
    clamp_points, ClaimHistory, Milestone, MilestoneReward, MilestoneStatus, MilestoneView,
    ProgressDescriptor, Tier,
};
