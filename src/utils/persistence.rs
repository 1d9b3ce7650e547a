//! JSON persistence helpers for StarTribe data files.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default data directory (~/.startribe/), not created until something is saved.
pub fn default_data_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    Ok(home_dir.join(".startribe"))
}

/// Read a file to a string. A missing file is `Ok(None)`; every other
/// failure is returned to the caller.
pub fn read_if_exists(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// `path` with `suffix` appended to its file name (`claims.json` -> `claims.json.lock`).
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Save a value as pretty-printed JSON, creating parent directories.
///
/// The JSON goes to a sibling temp file which is synced and then renamed
/// over `path`, so readers see either the old file or the new one, never a
/// partial write.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let tmp = sibling_path(path, &format!(".tmp-{}", std::process::id()));
    let written = File::create(&tmp).and_then(|mut file| {
        file.write_all(json.as_bytes())?;
        file.sync_all()
    });
    if let Err(e) = written.and_then(|()| fs::rename(&tmp, path)) {
        fs::remove_file(&tmp).ok();
        return Err(e);
    }
    Ok(())
}

/// A unique scratch path under the system temp dir, for tests.
#[cfg(test)]
pub(crate) fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("startribe-{}-{}", std::process::id(), name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_data_dir_format() {
        let dir = default_data_dir().expect("home dir should resolve");
        assert!(dir.ends_with(".startribe"));
    }

    #[test]
    fn test_read_missing_is_none() {
        assert_eq!(read_if_exists(&scratch_path("missing.json")).unwrap(), None);
    }

    #[test]
    fn test_read_directory_is_error() {
        let dir = scratch_path("read-dir");
        fs::create_dir_all(&dir).unwrap();
        assert!(read_if_exists(&dir).is_err());
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_sibling_path() {
        let path = sibling_path(Path::new("/data/claims.json"), ".lock");
        assert_eq!(path, PathBuf::from("/data/claims.json.lock"));
    }

    #[test]
    fn test_save_replaces_and_leaves_no_temp_file() {
        let dir = scratch_path("nested");
        let path = dir.join("roundtrip.json");
        save_json(&path, &vec!["old".to_string()]).unwrap();
        save_json(&path, &vec!["hello".to_string(), "world".to_string()]).unwrap();

        let loaded: Vec<String> =
            serde_json::from_str(&read_if_exists(&path).unwrap().unwrap()).unwrap();
        assert_eq!(loaded, vec!["hello", "world"]);

        let leftovers = fs::read_dir(&dir).unwrap().count();
        assert_eq!(leftovers, 1);

        fs::remove_dir_all(dir).ok();
    }
}
