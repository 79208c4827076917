//! # Catalog Persistence
//!
//! Saves and loads the catalog as two flat JSON objects:
//!
//! ```text
//! <data_dir>/codeToName.json   { "4011": "banana", ... }
//! <data_dir>/nameToCode.json   { "banana": "4011", ... }
//! ```
//!
//! The files live or die together. Exactly one of them on disk is reported
//! as `StorageError::Inconsistent` and never repaired automatically.
//!
//! Each file is written atomically (`.tmp` then `rename()`). The pair as a
//! whole is not: a crash between the two renames leaves the directions out
//! of step, which `load` reports as `StorageError::Corrupt`.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;

use super::catalog::{Catalog, CatalogError};

pub const DEFAULT_CODE_FILE: &str = "codeToName.json";
pub const DEFAULT_NAME_FILE: &str = "nameToCode.json";

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum StorageError {
    /// One file exists without the other.
    Inconsistent { present: PathBuf, missing: PathBuf },
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    /// Both files parsed but do not describe the same bijection.
    Corrupt(CatalogError),
    Write { path: PathBuf, source: io::Error },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Inconsistent { present, missing } => write!(
                f,
                "inconsistent database state: {} exists but {} does not",
                present.display(),
                missing.display()
            ),
            StorageError::Read { path, source } => {
                write!(f, "could not read {}: {source}", path.display())
            }
            StorageError::Parse { path, source } => {
                write!(f, "could not parse {}: {source}", path.display())
            }
            StorageError::Corrupt(e) => write!(f, "saved catalog is inconsistent: {e}"),
            StorageError::Write { path, source } => {
                write!(f, "could not write {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StorageError {}

// ============================================================================
// Store Trait
// ============================================================================

/// What is on disk before anything is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreState {
    /// Both files exist.
    Complete,
    /// Neither file exists.
    Empty,
    /// Only one file exists.
    Partial { present: PathBuf, missing: PathBuf },
}

/// Where a persistent catalog lives.
pub trait CatalogStore {
    /// Human-readable location, for messages.
    fn location(&self) -> String;

    fn probe(&self) -> StoreState;

    fn load(&self) -> Result<Catalog, StorageError>;

    /// Overwrites both files with the current catalog.
    fn save(&self, catalog: &Catalog) -> Result<(), StorageError>;
}

// ============================================================================
// JSON File Store
// ============================================================================

pub struct JsonFileStore {
    code_path: PathBuf,
    name_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(code_path: PathBuf, name_path: PathBuf) -> Self {
        Self {
            code_path,
            name_path,
        }
    }

    /// Store using the default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DEFAULT_CODE_FILE), dir.join(DEFAULT_NAME_FILE))
    }

    pub fn code_path(&self) -> &Path {
        &self.code_path
    }

    pub fn name_path(&self) -> &Path {
        &self.name_path
    }
}

impl CatalogStore for JsonFileStore {
    fn location(&self) -> String {
        format!(
            "{} and {}",
            self.code_path.display(),
            self.name_path.display()
        )
    }

    fn probe(&self) -> StoreState {
        match (self.code_path.exists(), self.name_path.exists()) {
            (true, true) => StoreState::Complete,
            (false, false) => StoreState::Empty,
            (true, false) => StoreState::Partial {
                present: self.code_path.clone(),
                missing: self.name_path.clone(),
            },
            (false, true) => StoreState::Partial {
                present: self.name_path.clone(),
                missing: self.code_path.clone(),
            },
        }
    }

    fn load(&self) -> Result<Catalog, StorageError> {
        if let StoreState::Partial { present, missing } = self.probe() {
            return Err(StorageError::Inconsistent { present, missing });
        }
        let code_to_name = read_map(&self.code_path)?;
        let name_to_code = read_map(&self.name_path)?;
        let catalog =
            Catalog::from_maps(code_to_name, name_to_code).map_err(StorageError::Corrupt)?;
        info!("Loaded {} entries from {}", catalog.len(), self.location());
        Ok(catalog)
    }

    fn save(&self, catalog: &Catalog) -> Result<(), StorageError> {
        atomic_write_json(&self.code_path, catalog.code_map())?;
        atomic_write_json(&self.name_path, catalog.name_map())?;
        debug!("Saved {} entries to {}", catalog.len(), self.location());
        Ok(())
    }
}

fn read_map(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    let json = fs::read_to_string(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| StorageError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Atomically write `data` as pretty JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StorageError> {
    let write_err = |source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| write_err(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    fs::write(&tmp_path, json).map_err(write_err)?;
    fs::rename(&tmp_path, path).map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed::default_catalog;

    fn store_in(dir: &tempfile::TempDir) -> JsonFileStore {
        JsonFileStore::in_dir(dir.path())
    }

    #[test]
    fn test_probe_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store_in(&dir).probe(), StoreState::Empty);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let catalog = default_catalog();

        store.save(&catalog).unwrap();
        assert_eq!(store.probe(), StoreState::Complete);
        assert_eq!(store.load().unwrap(), catalog);
    }

    #[test]
    fn test_save_writes_two_space_indented_objects() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut catalog = Catalog::new();
        catalog.add("banana", "4011").unwrap();
        store.save(&catalog).unwrap();

        let codes = fs::read_to_string(store.code_path()).unwrap();
        let names = fs::read_to_string(store.name_path()).unwrap();
        assert_eq!(codes, "{\n  \"4011\": \"banana\"\n}");
        assert_eq!(names, "{\n  \"banana\": \"4011\"\n}");
        assert!(!dir.path().join("codeToName.tmp").exists());
    }

    #[test]
    fn test_save_creates_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(&dir.path().join("nested").join("plu"));
        store.save(&default_catalog()).unwrap();
        assert_eq!(store.probe(), StoreState::Complete);
    }

    #[test]
    fn test_single_file_is_partial_and_refuses_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.code_path(), "{}").unwrap();

        assert_eq!(
            store.probe(),
            StoreState::Partial {
                present: store.code_path().to_path_buf(),
                missing: store.name_path().to_path_buf(),
            }
        );
        assert!(matches!(
            store.load(),
            Err(StorageError::Inconsistent { .. })
        ));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.code_path(), "{ not json").unwrap();
        fs::write(store.name_path(), "{}").unwrap();
        assert!(matches!(store.load(), Err(StorageError::Parse { .. })));
    }

    #[test]
    fn test_disagreeing_files_are_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.code_path(), r#"{"4011": "banana"}"#).unwrap();
        fs::write(store.name_path(), r#"{"banana": "4012"}"#).unwrap();
        assert!(matches!(store.load(), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the data directory should be.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let store = JsonFileStore::in_dir(&blocker);

        let err = store.save(&default_catalog()).unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
    }
}
