//! Runtime configuration from environment variables.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::ledger::ledger_path;
use crate::trophies::{Milestone, Tier, TrophyBook};
use crate::utils::persistence::default_data_dir;

/// Directory holding the claim ledger.
pub const DATA_DIR_VAR: &str = "STARTRIBE_DATA_DIR";
/// Optional JSON file replacing the built-in trophy tables.
pub const TABLES_VAR: &str = "STARTRIBE_TABLES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub tables_path: Option<PathBuf>,
}

/// On-disk shape of a trophy table override.
#[derive(Debug, Deserialize)]
struct TableFile {
    tiers: Vec<Tier>,
    milestones: Vec<Milestone>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_vars(var(DATA_DIR_VAR), var(TABLES_VAR))
    }

    /// Build a config from raw variable values; unset values fall back to defaults.
    pub fn from_vars(
        data_dir: Option<String>,
        tables_path: Option<String>,
    ) -> Result<Self, ConfigError> {
        let data_dir = match data_dir {
            Some(dir) => PathBuf::from(dir),
            None => {
                let dir = default_data_dir().map_err(|_| ConfigError::NoHomeDir)?;
                info!("{DATA_DIR_VAR} not set, using default: {}", dir.display());
                dir
            }
        };

        Ok(Self {
            data_dir,
            tables_path: tables_path.map(PathBuf::from),
        })
    }

    pub fn ledger_path(&self) -> PathBuf {
        ledger_path(&self.data_dir)
    }

    /// The trophy tables this process runs with, validated.
    pub fn trophy_book(&self) -> Result<TrophyBook, ConfigError> {
        match &self.tables_path {
            Some(path) => {
                let book = load_tables(path)?;
                info!(
                    tiers = book.tiers().len(),
                    milestones = book.milestones().len(),
                    "Loaded trophy tables from {}",
                    path.display()
                );
                Ok(book)
            }
            None => Ok(TrophyBook::standard()?),
        }
    }
}

fn var(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        Ok(_) => {
            warn!("Environment variable {key} is blank, using default");
            None
        }
        Err(_) => None,
    }
}

/// Read and validate a trophy table file.
pub fn load_tables(path: &Path) -> Result<TrophyBook, ConfigError> {
    let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: TableFile = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(TrophyBook::new(file.tiers, file.milestones)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;
    use crate::utils::persistence::scratch_path;

    #[test]
    fn test_explicit_data_dir() {
        let config = Config::from_vars(Some("/srv/startribe".to_string()), None).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/startribe"));
        assert_eq!(
            config.ledger_path(),
            PathBuf::from("/srv/startribe/claims.json")
        );
        assert!(config.tables_path.is_none());
    }

    #[test]
    fn test_default_tables() {
        let config = Config::from_vars(Some("/tmp".to_string()), None).unwrap();
        let book = config.trophy_book().unwrap();
        assert_eq!(book.max_points(), 3500);
    }

    #[test]
    fn test_table_override() {
        let path = scratch_path("tables.json");
        fs::write(
            &path,
            r#"{
                "tiers": [{"key": "luna", "label": "Luna", "minPoints": 10}],
                "milestones": [
                    {"id": "ticket-1", "type": "ticket", "amount": 2, "points": 5},
                    {"id": "tier-luna", "type": "tier", "borderKey": "luna", "points": 10}
                ]
            }"#,
        )
        .unwrap();

        let config = Config::from_vars(
            Some("/tmp".to_string()),
            Some(path.to_string_lossy().into_owned()),
        )
        .unwrap();
        let book = config.trophy_book().unwrap();
        assert_eq!(book.unlocked_tiers(10), vec!["luna"]);
        assert_eq!(book.compute_progress(5).absolute, 0.5);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_invalid_override_rejected() {
        let path = scratch_path("bad-tables.json");
        fs::write(&path, r#"{"tiers": [], "milestones": []}"#).unwrap();
        assert!(matches!(
            load_tables(&path),
            Err(ConfigError::Table(TableError::EmptyTiers))
        ));

        fs::write(&path, "[]").unwrap();
        assert!(matches!(load_tables(&path), Err(ConfigError::Parse { .. })));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_override_file() {
        let err = load_tables(&scratch_path("absent-tables.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("absent-tables.json"));
    }
}
