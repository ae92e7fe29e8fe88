// src/install.rs
//! Dependency installation: one subprocess per dependency class with the
//! detected package manager. Failures here never abort the run; the caller
//! downgrades them to warnings and the user installs manually.

use std::time::Duration;

use crate::deps::{self, Dep};
use crate::error::ExgenError;
use crate::exec;
use crate::logger::Reporter;
use crate::options::ResolvedOptions;

/// Bound on each install subprocess. A hung registry should not wedge the
/// whole run.
const INSTALL_TIMEOUT: Duration = Duration::from_secs(300);

pub fn run(resolved: &ResolvedOptions, reporter: &Reporter) -> Result<(), ExgenError> {
  reporter.plain(&format!(
    "Installing dependencies with {}...",
    resolved.package_manager
  ));
  install_class(resolved, "install-dependencies", deps::dependencies(resolved), false, reporter)?;
  install_class(
    resolved,
    "install-dev-dependencies",
    deps::dev_dependencies(resolved),
    true,
    reporter,
  )?;
  Ok(())
}

fn install_class(
  resolved: &ResolvedOptions,
  step_name: &str,
  packages: Vec<Dep>,
  dev: bool,
  reporter: &Reporter,
) -> Result<(), ExgenError> {
  if packages.is_empty() {
    return Ok(());
  }

  let pm = resolved.package_manager;
  let mut args: Vec<String> = pm.install_args(dev).iter().map(|s| s.to_string()).collect();
  for (name, version) in &packages {
    args.push(format!("{}@{}", name, version));
  }
  let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();

  reporter.info(&format!(
    "Running step '{}' ({} packages)",
    step_name,
    packages.len()
  ));

  let output = exec::execute(
    step_name,
    pm.command(),
    &arg_refs,
    &resolved.path,
    Some(INSTALL_TIMEOUT),
  )?;

  if !output.status.success() {
    let stderr_string = String::from_utf8_lossy(&output.stderr).to_string();
    let stdout_string = String::from_utf8_lossy(&output.stdout).to_string();
    reporter.error(&format!(
      "Step '{}' failed (status: {:?}). Stderr: {}",
      step_name,
      output.status.code(),
      stderr_string.lines().next().unwrap_or("<empty stderr>")
    ));
    return Err(ExgenError::CommandFailedStatus {
      step_name: step_name.to_string(),
      status: output.status,
      stdout: stdout_string,
      stderr: stderr_string,
    });
  }

  reporter.success(&format!(
    "Installed {} {}",
    packages.len(),
    if dev { "dev dependencies" } else { "dependencies" }
  ));
  Ok(())
}
