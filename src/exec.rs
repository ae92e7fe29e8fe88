// src/exec.rs
//! Subprocess plumbing shared by the installer, the git initializer and the
//! package-manager probes. Commands are run through duct with captured
//! output and `unchecked()`, so a non-zero exit still yields an `Output`.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Output;
use std::thread;
use std::time::{Duration, Instant};

use duct::{cmd, Handle};
use log::{debug, error, info, trace, warn};

use crate::error::ExgenError;

/// Result of a best-effort executable availability check. Probing never
/// raises; every failure mode is captured as `Unavailable` with a reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
  Available { version: String },
  Unavailable { reason: String },
}

impl Probe {
  pub fn is_available(&self) -> bool {
    matches!(self, Probe::Available { .. })
  }
}

/// Checks whether `program` is runnable by invoking `program --version`.
pub fn probe(program: &str) -> Probe {
  let result = cmd(program, ["--version"])
    .stdout_capture()
    .stderr_capture()
    .unchecked()
    .run();

  match result {
    Ok(output) if output.status.success() => {
      let version = String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .unwrap_or("")
        .trim()
        .to_string();
      trace!("Probe '{}': available ({})", program, version);
      Probe::Available { version }
    }
    Ok(output) => {
      let reason = format!("exited with status {:?}", output.status.code());
      trace!("Probe '{}': {}", program, reason);
      Probe::Unavailable { reason }
    }
    Err(e) => {
      let reason = if e.kind() == ErrorKind::NotFound {
        "executable not found".to_string()
      } else {
        e.to_string()
      };
      trace!("Probe '{}': {}", program, reason);
      Probe::Unavailable { reason }
    }
  }
}

/// Runs a command to completion (or timeout) in `working_dir`, capturing
/// output. Timed-out processes are killed and reported as an execution
/// error for the named step.
pub fn execute(
  step_name: &str,
  program: &str,
  args: &[&str],
  working_dir: &Path,
  timeout: Option<Duration>,
) -> Result<Output, ExgenError> {
  info!(
    "Executing: Step '{}', Command: `{} {}` in {}",
    step_name,
    program,
    args.join(" "),
    working_dir.display()
  );

  let expr = cmd(program, args)
    .dir(working_dir)
    .stdout_capture()
    .stderr_capture()
    .unchecked();

  let handle: Handle = match expr.start() {
    Ok(h) => h,
    Err(e) => {
      error!("Failed to start command for step '{}': {}", step_name, e);
      if e.kind() == ErrorKind::NotFound {
        return Err(ExgenError::CommandExecError {
          step_name: step_name.to_string(),
          source: format!("Command '{}' not found for step '{}'", program, step_name).into(),
        });
      }
      return Err(ExgenError::CommandExecError {
        step_name: step_name.to_string(),
        source: Box::new(e),
      });
    }
  };

  let final_result: Result<Output, ExgenError> = match timeout {
    None => match handle.wait() {
      Ok(output) => {
        debug!(
          "Step '{}' finished. Status: {:?}",
          step_name, output.status
        );
        Ok(output.clone())
      }
      Err(wait_error) => {
        error!("Error waiting for step '{}': {}", step_name, wait_error);
        Err(ExgenError::CommandExecError {
          step_name: step_name.to_string(),
          source: Box::new(wait_error),
        })
      }
    },
    Some(duration) => {
      let start = Instant::now();
      let poll_interval = Duration::from_millis(50); // How often to check

      loop {
        match handle.try_wait() {
          Ok(Some(output)) => {
            debug!(
              "Step '{}' finished within timeout. Status: {:?}",
              step_name, output.status
            );
            break Ok(output.clone());
          }
          Ok(None) => {
            if start.elapsed() >= duration {
              error!(
                "Step '{}' timed out after {:?}. Killing process.",
                step_name, duration
              );
              if let Err(kill_err) = handle.kill() {
                warn!(
                  "Failed to kill timed-out process for step '{}': {}",
                  step_name, kill_err
                );
              }
              break Err(ExgenError::CommandExecError {
                step_name: step_name.to_string(),
                source: format!("Step timed out after {} seconds", duration.as_secs()).into(),
              });
            } else {
              thread::sleep(poll_interval);
            }
          }
          Err(wait_error) => {
            error!(
              "Error during try_wait for step '{}': {}",
              step_name, wait_error
            );
            break Err(ExgenError::CommandExecError {
              step_name: step_name.to_string(),
              source: Box::new(wait_error),
            });
          }
        }
      }
    }
  };

  if let Ok(output) = &final_result {
    if log::log_enabled!(log::Level::Trace) {
      trace!(
        "Step '{}' stdout:\n{}",
        step_name,
        String::from_utf8_lossy(&output.stdout)
      );
      trace!(
        "Step '{}' stderr:\n{}",
        step_name,
        String::from_utf8_lossy(&output.stderr)
      );
    }
  }

  final_result
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn probe_reports_missing_executable() {
    let result = probe("definitely-not-a-real-binary-3981");
    assert!(matches!(result, Probe::Unavailable { .. }));
  }

  #[test]
  fn execute_captures_failing_status() {
    let dir = std::env::temp_dir();
    let output = execute("false-step", "sh", &["-c", "exit 3"], &dir, None).unwrap();
    assert_eq!(output.status.code(), Some(3));
  }

  #[test]
  fn execute_kills_on_timeout() {
    let dir = std::env::temp_dir();
    let result = execute(
      "sleep-step",
      "sh",
      &["-c", "sleep 30"],
      &dir,
      Some(Duration::from_millis(200)),
    );
    assert!(matches!(result, Err(ExgenError::CommandExecError { .. })));
  }
}
