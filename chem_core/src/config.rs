//! # Configuration and Data Files
//!
//! JSON files read and written by the engine:
//!
//! - **Engine config**: parse mode and an optional path to a custom atomic
//!   mass table. A relative table path is resolved against the config file's
//!   directory.
//! - **Mass table**: a flat JSON object of symbol → g/mol, e.g.
//!   `{ "H": 1.008, "O": 15.999 }`.
//!
//! Saves are atomic: write to a `.tmp` sibling, fsync, then rename over the
//! target, so an interrupted save never leaves a truncated file.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use chem_core::config::{load_config, save_config, EngineConfig};
//! use chem_core::engine::ChemEngine;
//! use chem_core::formula::ParseMode;
//!
//! let config = EngineConfig { parse_mode: ParseMode::Strict, ..EngineConfig::default() };
//! save_config(&config, Path::new("beaker.json"))?;
//!
//! let engine = ChemEngine::from_config(&load_config(Path::new("beaker.json"))?)?;
//! assert_eq!(engine.parse_mode(), ParseMode::Strict);
//! # Ok::<(), chem_core::errors::CalcError>(())
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::elements::AtomicMassTable;
use crate::errors::{CalcError, CalcResult};
use crate::formula::ParseMode;

/// Engine settings.
///
/// ## JSON Example
///
/// ```json
/// { "parse_mode": "strict", "atomic_mass_table": "masses.json" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub parse_mode: ParseMode,
    /// Custom atomic mass table; the built-in table when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atomic_mass_table: Option<PathBuf>,
}

/// Load engine config. A relative `atomic_mass_table` path is made relative
/// to the config file's directory.
pub fn load_config(path: &Path) -> CalcResult<EngineConfig> {
    let mut config: EngineConfig = read_json(path)?;
    if let Some(table) = &config.atomic_mass_table {
        if table.is_relative() {
            if let Some(dir) = path.parent() {
                config.atomic_mass_table = Some(dir.join(table));
            }
        }
    }
    debug!("loaded config from {}: {:?}", path.display(), config);
    Ok(config)
}

/// Save engine config atomically.
pub fn save_config(config: &EngineConfig, path: &Path) -> CalcResult<()> {
    write_json_atomic(config, path)
}

/// Load and validate an atomic mass table.
///
/// # Returns
///
/// * `Ok(AtomicMassTable)` - Every entry has a valid symbol and positive mass
/// * `Err(CalcError::InvalidInput)` - Bad symbol or non-positive mass
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_mass_table(path: &Path) -> CalcResult<AtomicMassTable> {
    let masses: BTreeMap<String, f64> = read_json(path)?;
    let table = AtomicMassTable::new(masses)?;
    info!("loaded {} atomic masses from {}", table.len(), path.display());
    Ok(table)
}

/// Save an atomic mass table atomically.
pub fn save_mass_table(table: &AtomicMassTable, path: &Path) -> CalcResult<()> {
    write_json_atomic(table, path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let written = write_and_sync(&tmp_path, json.as_bytes()).and_then(|()| {
        fs::rename(&tmp_path, path).map_err(|e| {
            CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
        })
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    debug!("saved {}", path.display());
    Ok(())
}

fn write_and_sync(tmp_path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let mut tmp_file = File::create(tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("beaker.json");

        let config = EngineConfig {
            parse_mode: ParseMode::Strict,
            atomic_mass_table: Some(dir.path().join("masses.json")),
        };
        save_config(&config, &path).unwrap();
        assert!(!dir.path().join("beaker.json.tmp").exists());

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, "{}").unwrap();
        assert_eq!(load_config(&path).unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_relative_table_path_resolved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("beaker.json");
        fs::write(&path, r#"{"atomic_mass_table":"masses.json"}"#).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.atomic_mass_table, Some(dir.path().join("masses.json")));
    }

    #[test]
    fn test_mass_table_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("masses.json");

        let table = AtomicMassTable::new(BTreeMap::from([
            ("H".to_string(), 1.0),
            ("O".to_string(), 16.0),
        ]))
        .unwrap();
        save_mass_table(&table, &path).unwrap();

        let loaded = load_mass_table(&path).unwrap();
        assert_eq!(loaded, table);
        assert_eq!(loaded.get("O"), Some(16.0));
    }

    #[test]
    fn test_invalid_mass_table_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"H": -1.0}"#).unwrap();

        let err = load_mass_table(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        fs::write(&path, "not json").unwrap();
        let err = load_mass_table(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_failed_save_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        // The target is a non-empty directory, so the rename over it fails.
        let path = dir.path().join("occupied");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let err = save_config(&EngineConfig::default(), &path).unwrap_err();
        assert!(matches!(err, CalcError::FileError { .. }));
        assert!(!dir.path().join("occupied.tmp").exists());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_config(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CalcError::FileError { .. }));
    }
}
