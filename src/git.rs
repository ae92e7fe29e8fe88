// src/git.rs
//! Best-effort git initialization: repository, .gitignore, initial commit.
//! Any failure (git missing, no user identity configured) is downgraded to
//! a warning; project creation succeeds regardless.

use std::fs;
use std::time::Duration;

use crate::error::ExgenError;
use crate::exec::{self, Probe};
use crate::logger::Reporter;
use crate::options::ResolvedOptions;
use crate::templates;

const GIT_TIMEOUT: Duration = Duration::from_secs(30);

pub fn run(resolved: &ResolvedOptions, reporter: &Reporter) {
  match exec::probe("git") {
    Probe::Available { version } => {
      reporter.debug(&format!("git available: {}", version));
    }
    Probe::Unavailable { reason } => {
      reporter.warn(&format!(
        "Skipping git initialization: git unavailable ({})",
        reason
      ));
      return;
    }
  }

  if let Err(e) = init_repository(resolved) {
    reporter.warn(&format!("Git initialization failed: {}", e));
    return;
  }
  reporter.success("Initialized git repository with an initial commit");
}

fn init_repository(resolved: &ResolvedOptions) -> Result<(), ExgenError> {
  git_step(resolved, "git-init", &["init"])?;

  let gitignore_path = resolved.path.join(".gitignore");
  fs::write(&gitignore_path, templates::GITIGNORE).map_err(|e| ExgenError::FileWrite {
    path: gitignore_path,
    source: e,
  })?;

  git_step(resolved, "git-add", &["add", "-A"])?;
  git_step(resolved, "git-commit", &["commit", "-m", "Initial commit"])?;
  Ok(())
}

fn git_step(resolved: &ResolvedOptions, step_name: &str, args: &[&str]) -> Result<(), ExgenError> {
  let output = exec::execute(step_name, "git", args, &resolved.path, Some(GIT_TIMEOUT))?;
  if !output.status.success() {
    return Err(ExgenError::CommandFailedStatus {
      step_name: step_name.to_string(),
      status: output.status,
      stdout: String::from_utf8_lossy(&output.stdout).to_string(),
      stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    });
  }
  Ok(())
}
