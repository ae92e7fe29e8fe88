// src/error.rs
use std::{path::PathBuf, process::ExitStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExgenError {
  #[error("IO Error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Could not read config file '{path}': {source}")]
  ConfigReadError {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Could not parse config file '{path}': {source}")]
  ConfigParseError {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("Could not write config file '{path}': {source}")]
  ConfigWriteError {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Validation failed:\n{}", .errors.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
  Validation { errors: Vec<String> },

  #[error("Failed to create project directory '{path}': {source}")]
  ProjectDirCreation {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to write project file '{path}': {source}")]
  FileWrite {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Command Execution Error for step '{step_name}': {source}")]
  CommandExecError {
    step_name: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>, // Box to handle different error types
  },

  #[error("Command for step '{step_name}' failed with status {status}. Stderr: {stderr}")]
  CommandFailedStatus {
    step_name: String,
    status: ExitStatus, // Store the actual status
    stdout: String,
    stderr: String,
  },

  #[error("User interaction failed: {0}")]
  DialoguerError(#[from] dialoguer::Error),
}
