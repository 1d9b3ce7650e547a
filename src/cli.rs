//! `startribe` command-line parsing and execution.

use std::path::Path;

use serde_json::{json, Value};

use crate::error::CliError;
use crate::ledger::{load_ledger, ClaimOutcome, LockedLedger};
use crate::trophies::TrophyBook;

pub const USAGE: &str = "\
StarTribe - trophy progress

Usage: startribe <command> [args]

Commands:
  tiers <points>                         Borders unlocked at a point total
  progress <points>                      Rocket position on the milestone path
  milestones <user> <points>             Status of every milestone for a user
  claim <user> <milestone-id> <points>   Claim a milestone reward
  --version                              Show version information
  --help                                 Show this help message

Environment:
  STARTRIBE_DATA_DIR   Ledger directory (default ~/.startribe)
  STARTRIBE_TABLES     JSON file replacing the built-in trophy tables
  RUST_LOG             Log filter, e.g. RUST_LOG=startribe=debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Tiers {
        points: i64,
    },
    Progress {
        points: i64,
    },
    Milestones {
        user: String,
        points: i64,
    },
    Claim {
        user: String,
        milestone_id: String,
        points: i64,
    },
}

impl Command {
    /// Parse the arguments after the program name. No arguments means help.
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let (name, rest) = match args.split_first() {
            Some((name, rest)) => (name.as_str(), rest),
            None => return Ok(Command::Help),
        };

        match (name, rest) {
            ("--help" | "-h", []) => Ok(Command::Help),
            ("--version" | "-v", []) => Ok(Command::Version),
            ("tiers", [points]) => Ok(Command::Tiers {
                points: parse_points(points)?,
            }),
            ("progress", [points]) => Ok(Command::Progress {
                points: parse_points(points)?,
            }),
            ("milestones", [user, points]) => Ok(Command::Milestones {
                user: user.clone(),
                points: parse_points(points)?,
            }),
            ("claim", [user, milestone_id, points]) => Ok(Command::Claim {
                user: user.clone(),
                milestone_id: milestone_id.clone(),
                points: parse_points(points)?,
            }),
            ("--help" | "-h" | "--version" | "-v", _) => Err(CliError::Usage(format!(
                "'{}' takes no arguments",
                name
            ))),
            ("tiers" | "progress", _) => Err(CliError::Usage(format!(
                "'{}' expects <points>, got {} argument(s)",
                name,
                rest.len()
            ))),
            ("milestones", _) => Err(CliError::Usage(format!(
                "'milestones' expects <user> <points>, got {} argument(s)",
                rest.len()
            ))),
            ("claim", _) => Err(CliError::Usage(format!(
                "'claim' expects <user> <milestone-id> <points>, got {} argument(s)",
                rest.len()
            ))),
            (other, _) => Err(CliError::Usage(format!("Unknown command: {}", other))),
        }
    }
}

fn parse_points(raw: &str) -> Result<i64, CliError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|source| CliError::InvalidPoints {
            raw: raw.to_string(),
            source,
        })
}

/// Run a query or claim command and return its JSON output.
///
/// `Help` and `Version` produce plain text and are handled by the binary.
pub fn execute(command: &Command, book: &TrophyBook, ledger_path: &Path) -> Result<Value, CliError> {
    let output = match command {
        Command::Help | Command::Version => {
            return Err(CliError::Usage("help and version print text, not JSON".to_string()))
        }
        Command::Tiers { points } => {
            json!({ "points": points, "tiers": book.unlocked_tiers(*points) })
        }
        Command::Progress { points } => {
            let progress = book.compute_progress(*points);
            json!({
                "points": points,
                "progress": progress,
                "percent": progress.percent(),
                "next": book.next_milestone(*points),
            })
        }
        Command::Milestones { user, points } => {
            let ledger = load_ledger(ledger_path)?;
            json!({
                "user": user,
                "points": points,
                "milestones": ledger.statuses(book, user, *points),
            })
        }
        Command::Claim {
            user,
            milestone_id,
            points,
        } => {
            let mut locked = LockedLedger::open(ledger_path)?;
            let outcome = locked
                .ledger_mut()
                .claim(book, user, milestone_id, *points)?;
            if let ClaimOutcome::Granted { .. } = outcome {
                locked.commit()?;
            }
            json!({
                "user": user,
                "milestone": milestone_id,
                "result": outcome,
                "tickets": locked.ledger().user(user).map_or(0, |c| c.tickets),
            })
        }
    };
    Ok(output)
}
