// src/config.rs
//! Discovered configuration file (`.exgenrc.json`): default flags, named
//! custom presets and a package-manager preference. Read-only once loaded;
//! the only write path is the explicit `config export` subcommand.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::error::ExgenError;
use crate::options::RawOptions;

pub const CONFIG_FILE_NAME: &str = ".exgenrc.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)] // Good practice to catch typos in the file
#[serde(rename_all = "camelCase")]
pub struct ExgenConfig {
  /// Flag defaults merged at lowest precedence.
  pub defaults: RawOptions,
  /// User-named presets, looked up via `--preset <name>`.
  pub presets: HashMap<String, RawOptions>,
  /// Preferred package manager (npm, yarn, pnpm, bun).
  pub package_manager: Option<String>,
}

/// Locates and loads the configuration.
/// Order of preference:
/// 1. --config CLI argument (or EXGEN_CONFIG env var via clap)
/// 2. .exgenrc.json in the current working directory
/// 3. .exgenrc.json in the home directory
///
/// An explicitly given path that cannot be read is an error; a missing
/// discovered file simply means no configuration.
pub fn discover(explicit: Option<&Path>) -> Result<Option<(PathBuf, ExgenConfig)>, ExgenError> {
  if let Some(path) = explicit {
    let config = load(path)?;
    return Ok(Some((path.to_path_buf(), config)));
  }

  let cwd_candidate = PathBuf::from(CONFIG_FILE_NAME);
  if cwd_candidate.is_file() {
    let config = load(&cwd_candidate)?;
    return Ok(Some((cwd_candidate, config)));
  }

  if let Some(base_dirs) = BaseDirs::new() {
    let home_candidate = base_dirs.home_dir().join(CONFIG_FILE_NAME);
    if home_candidate.is_file() {
      let config = load(&home_candidate)?;
      return Ok(Some((home_candidate, config)));
    }
  }

  Ok(None)
}

pub fn load(path: &Path) -> Result<ExgenConfig, ExgenError> {
  let content = fs::read_to_string(path).map_err(|e| ExgenError::ConfigReadError {
    path: path.to_path_buf(),
    source: e,
  })?;
  serde_json::from_str(&content).map_err(|e| ExgenError::ConfigParseError {
    path: path.to_path_buf(),
    source: e,
  })
}

/// Writes a starter configuration with one example preset. This is the
/// only place the tool writes configuration.
pub fn export(path: &Path) -> Result<(), ExgenError> {
  let mut starter = ExgenConfig::default();
  starter.package_manager = Some("npm".to_string());

  let mut example = RawOptions::default();
  example.cors = true;
  example.helmet = true;
  example.test = true;
  starter.presets.insert("team-api".to_string(), example);

  let body = serde_json::to_string_pretty(&starter)
    .expect("starter config serializes") // Static value, cannot fail
    + "\n";
  fs::write(path, body).map_err(|e| ExgenError::ConfigWriteError {
    path: path.to_path_buf(),
    source: e,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn load_parses_defaults_and_presets() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(
      &path,
      r#"{
        "defaults": { "helmet": true, "view": "pug" },
        "presets": { "cache": { "redis": true } },
        "packageManager": "pnpm"
      }"#,
    )
    .unwrap();

    let config = load(&path).unwrap();
    assert!(config.defaults.helmet);
    assert_eq!(config.defaults.view.as_deref(), Some("pug"));
    assert!(config.presets["cache"].redis);
    assert_eq!(config.package_manager.as_deref(), Some("pnpm"));
  }

  #[test]
  fn load_rejects_unknown_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, r#"{ "defaults": { "helmet": true }, "typo": 1 }"#).unwrap();

    let result = load(&path);
    assert!(matches!(result, Err(ExgenError::ConfigParseError { .. })));
  }

  #[test]
  fn explicit_missing_path_is_an_error() {
    let result = discover(Some(Path::new("/nonexistent/exgenrc.json")));
    assert!(matches!(result, Err(ExgenError::ConfigReadError { .. })));
  }

  #[test]
  fn export_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    export(&path).unwrap();

    let config = load(&path).unwrap();
    assert_eq!(config.package_manager.as_deref(), Some("npm"));
    assert!(config.presets.contains_key("team-api"));
  }
}
