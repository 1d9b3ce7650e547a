//! Claim ledger: which milestones each user has claimed and what they received.
//!
//! Stored as JSON in the data directory (`~/.startribe/claims.json` by default).

pub mod persistence;
pub mod types;

pub use persistence::{ledger_path, load_ledger, save_ledger, LockedLedger};
pub use types::{ClaimLedger, ClaimOutcome, ClaimRecord, UserClaims};
