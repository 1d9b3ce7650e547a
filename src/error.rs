use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// A tier or milestone table that cannot back a [`crate::TrophyBook`].
///
/// Tables are validated once at startup; none of these surface per request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Tier table is empty")]
    EmptyTiers,

    #[error("Milestone table is empty")]
    EmptyMilestones,

    #[error("Duplicate tier key '{0}'")]
    DuplicateTierKey(String),

    #[error("Duplicate milestone id '{0}'")]
    DuplicateMilestoneId(String),

    #[error("Tier '{key}' threshold {points} does not exceed the previous tier's {previous}")]
    TierOrder {
        key: String,
        points: u32,
        previous: u32,
    },

    #[error("Milestone '{id}' threshold {points} does not exceed the previous milestone's {previous}")]
    MilestoneOrder {
        id: String,
        points: u32,
        previous: u32,
    },

    #[error("Final milestone threshold must be greater than zero")]
    ZeroFinalMilestone,

    #[error("Milestone '{id}' rewards unknown border '{border_key}'")]
    UnknownBorder { id: String, border_key: String },

    #[error("Milestone '{id}' at {points} points precedes its border's unlock at {unlock}")]
    BorderBeforeUnlock { id: String, points: u32, unlock: u32 },

    #[error("Milestone '{0}' grants zero tickets")]
    EmptyTicketGrant(String),
}

/// A claim request that cannot be honoured.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimError {
    #[error("Unknown milestone '{0}'")]
    UnknownMilestone(String),

    #[error("Milestone '{milestone}' needs {needed} points, user has {have}")]
    Locked {
        milestone: String,
        needed: u32,
        have: u32,
    },
}

/// Startup configuration failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed trophy tables in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid trophy tables: {0}")]
    Table(#[from] TableError),
}

/// Failures reading, locking or writing the claim ledger file.
///
/// A ledger that cannot be read is never treated as empty: doing so would
/// let every milestone be claimed a second time.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Failed to read claim ledger {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Claim ledger {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to lock claim ledger {}: {source}", .path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write claim ledger {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failures of the `startribe` command line.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}\nRun 'startribe --help' for usage.")]
    Usage(String),

    #[error("Invalid point total '{raw}': {source}")]
    InvalidPoints {
        raw: String,
        #[source]
        source: ParseIntError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Claim(#[from] ClaimError),
}
