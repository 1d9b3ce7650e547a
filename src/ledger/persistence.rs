//! Claim ledger persistence (load/save to disk).

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use fs4::fs_std::FileExt;
use tracing::debug;

use super::types::ClaimLedger;
use crate::error::LedgerError;
use crate::utils::persistence::{read_if_exists, save_json, sibling_path};

/// Ledger file name inside the data directory.
pub const LEDGER_FILE: &str = "claims.json";

pub fn ledger_path(data_dir: &Path) -> PathBuf {
    data_dir.join(LEDGER_FILE)
}

/// Load the ledger. Only a missing file yields an empty ledger; unreadable
/// or corrupt files are errors.
pub fn load_ledger(path: &Path) -> Result<ClaimLedger, LedgerError> {
    let json = read_if_exists(path).map_err(|source| LedgerError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let ledger: ClaimLedger = match json {
        Some(json) => serde_json::from_str(&json).map_err(|source| LedgerError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?,
        None => ClaimLedger::default(),
    };
    debug!(users = ledger.users.len(), "Loaded claim ledger from {}", path.display());
    Ok(ledger)
}

/// Write the ledger atomically (temp file + rename).
pub fn save_ledger(path: &Path, ledger: &ClaimLedger) -> Result<(), LedgerError> {
    save_json(path, ledger).map_err(|source| LedgerError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Saved claim ledger to {}", path.display());
    Ok(())
}

/// A ledger loaded under an exclusive lock, for load-claim-save cycles.
///
/// The lock lives on a `<ledger>.lock` file next to the ledger, since the
/// ledger itself is replaced by rename on every save. It is held from
/// [`LockedLedger::open`] until the value is dropped, so two processes
/// claiming against the same file run one after the other and the second
/// sees the first one's claims.
#[derive(Debug)]
pub struct LockedLedger {
    path: PathBuf,
    ledger: ClaimLedger,
    _lock: File,
}

impl LockedLedger {
    /// Block until the lock is acquired, then load the ledger.
    pub fn open(path: &Path) -> Result<Self, LedgerError> {
        let lock_path = sibling_path(path, ".lock");
        let lock_err = |source: io::Error| LedgerError::Lock {
            path: lock_path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(lock_err)?;
        }
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(lock_err)?;
        lock.lock_exclusive().map_err(lock_err)?;

        let ledger = load_ledger(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            ledger,
            _lock: lock,
        })
    }

    pub fn ledger(&self) -> &ClaimLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut ClaimLedger {
        &mut self.ledger
    }

    /// Save the ledger while still holding the lock.
    pub fn commit(&self) -> Result<(), LedgerError> {
        save_ledger(&self.path, &self.ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::ClaimOutcome;
    use crate::trophies::TrophyBook;
    use crate::utils::persistence::scratch_path;

    fn book() -> &'static TrophyBook {
        TrophyBook::builtin().unwrap()
    }

    #[test]
    fn test_ledger_survives_save_and_load() {
        let mut ledger = ClaimLedger::new();
        ledger.claim(book(), "ada", "tier-bronzo", 60).unwrap();
        ledger.claim(book(), "ada", "ticket-1", 310).unwrap();

        let dir = scratch_path("ledger");
        let path = ledger_path(&dir);
        save_ledger(&path, &ledger).unwrap();

        let loaded = load_ledger(&path).unwrap();
        assert_eq!(loaded, ledger);
        assert_eq!(loaded.user("ada").unwrap().tickets, 1);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_missing_ledger_is_empty() {
        let loaded = load_ledger(&scratch_path("no-ledger.json")).unwrap();
        assert!(loaded.users.is_empty());
    }

    #[test]
    fn test_truncated_ledger_is_rejected() {
        let dir = scratch_path("truncated-ledger");
        let path = ledger_path(&dir);
        let mut ledger = ClaimLedger::new();
        ledger.claim(book(), "ada", "ticket-4", 2600).unwrap();
        ledger.claim(book(), "bob", "ticket-1", 300).unwrap();
        save_ledger(&path, &ledger).unwrap();

        let json = fs::read_to_string(&path).unwrap();
        fs::write(&path, &json[..json.len() / 2]).unwrap();

        assert!(matches!(load_ledger(&path), Err(LedgerError::Corrupt { .. })));
        assert!(matches!(LockedLedger::open(&path), Err(LedgerError::Corrupt { .. })));
        // The damaged file is left for inspection, not overwritten
        assert_eq!(fs::read_to_string(&path).unwrap(), json[..json.len() / 2]);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_unreadable_ledger_is_rejected() {
        let dir = scratch_path("dir-ledger");
        let path = ledger_path(&dir);
        fs::create_dir_all(&path).unwrap();
        assert!(matches!(load_ledger(&path), Err(LedgerError::Read { .. })));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_locked_ledger_commit() {
        let dir = scratch_path("locked-ledger");
        let path = ledger_path(&dir);

        let mut locked = LockedLedger::open(&path).unwrap();
        let outcome = locked
            .ledger_mut()
            .claim(book(), "ada", "tier-bronzo", 50)
            .unwrap();
        assert!(matches!(outcome, ClaimOutcome::Granted { .. }));
        locked.commit().unwrap();
        drop(locked);

        let reopened = LockedLedger::open(&path).unwrap();
        assert!(reopened.ledger().has_claimed("ada", "tier-bronzo"));
        assert!(sibling_path(&path, ".lock").exists());

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_ledger_path() {
        let path = ledger_path(Path::new("/tmp/st"));
        assert!(path.ends_with("claims.json"));
    }
}
