// src/pm.rs
//! Package-manager identification. Detection is best-effort and never
//! raises: lockfile signature at the target, then the config preference,
//! then executable probes in a fixed priority order, then the npm fallback.

use std::fmt;
use std::path::Path;

use crate::exec::{self, Probe};
use crate::logger::Reporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
  Npm,
  Yarn,
  Pnpm,
  Bun,
}

/// Probe order when neither a lockfile nor a config preference decides.
/// Npm is the universal fallback and is never probed.
const PROBE_PRIORITY: [PackageManager; 3] =
  [PackageManager::Pnpm, PackageManager::Yarn, PackageManager::Bun];

impl PackageManager {
  pub fn command(&self) -> &'static str {
    match self {
      PackageManager::Npm => "npm",
      PackageManager::Yarn => "yarn",
      PackageManager::Pnpm => "pnpm",
      PackageManager::Bun => "bun",
    }
  }

  pub fn lockfile(&self) -> &'static str {
    match self {
      PackageManager::Npm => "package-lock.json",
      PackageManager::Yarn => "yarn.lock",
      PackageManager::Pnpm => "pnpm-lock.yaml",
      PackageManager::Bun => "bun.lockb",
    }
  }

  /// Subcommand and flags prefixing an explicit package list.
  pub fn install_args(&self, dev: bool) -> Vec<&'static str> {
    match (self, dev) {
      (PackageManager::Npm, false) => vec!["install", "--save"],
      (PackageManager::Npm, true) => vec!["install", "--save-dev"],
      (PackageManager::Yarn, false) => vec!["add"],
      (PackageManager::Yarn, true) => vec!["add", "--dev"],
      (PackageManager::Pnpm, false) => vec!["add"],
      (PackageManager::Pnpm, true) => vec!["add", "-D"],
      (PackageManager::Bun, false) => vec!["add"],
      (PackageManager::Bun, true) => vec!["add", "-d"],
    }
  }

  pub fn from_name(name: &str) -> Option<PackageManager> {
    match name {
      "npm" => Some(PackageManager::Npm),
      "yarn" => Some(PackageManager::Yarn),
      "pnpm" => Some(PackageManager::Pnpm),
      "bun" => Some(PackageManager::Bun),
      _ => None,
    }
  }
}

impl fmt::Display for PackageManager {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.command())
  }
}

/// Detects the package manager for `target`. Any probe failure is treated
/// as "unavailable"; the result is always a usable manager.
pub fn detect(target: &Path, preference: Option<&str>, reporter: &Reporter) -> PackageManager {
  // 1. Lockfile signature wins: re-running in an existing project keeps
  //    its manager.
  for candidate in [
    PackageManager::Npm,
    PackageManager::Yarn,
    PackageManager::Pnpm,
    PackageManager::Bun,
  ] {
    if target.join(candidate.lockfile()).is_file() {
      reporter.debug(&format!(
        "Detected {} via lockfile '{}'",
        candidate,
        candidate.lockfile()
      ));
      return candidate;
    }
  }

  // 2. Config preference.
  if let Some(name) = preference {
    match PackageManager::from_name(name) {
      Some(candidate) => {
        reporter.debug(&format!("Using configured package manager '{}'", candidate));
        return candidate;
      }
      None => reporter.warn(&format!(
        "Unknown package manager '{}' in config, falling back to detection",
        name
      )),
    }
  }

  // 3. Executable probes in priority order.
  for candidate in PROBE_PRIORITY {
    match exec::probe(candidate.command()) {
      Probe::Available { version } => {
        reporter.debug(&format!("Probe found {} ({})", candidate, version));
        return candidate;
      }
      Probe::Unavailable { reason } => {
        reporter.debug(&format!("Probe {}: {}", candidate, reason));
      }
    }
  }

  // 4. Universal fallback.
  reporter.debug("No package manager detected, falling back to npm");
  PackageManager::Npm
}
