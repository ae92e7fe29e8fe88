// src/logger.rs
//! Logging capability constructed once per invocation and passed explicitly
//! through the pipeline instead of being fetched from shared module state.
//! Diagnostics delegate to the `log` facade; user-facing result lines go to
//! stdout.

#[derive(Debug, Clone, Copy)]
pub struct Reporter {
  verbose: u8,
}

impl Reporter {
  pub fn new(verbose: u8) -> Self {
    Reporter { verbose }
  }

  pub fn info(&self, msg: &str) {
    log::info!("{}", msg);
  }

  pub fn debug(&self, msg: &str) {
    log::debug!("{}", msg);
  }

  pub fn warn(&self, msg: &str) {
    log::warn!("{}", msg);
  }

  pub fn error(&self, msg: &str) {
    log::error!("{}", msg);
  }

  pub fn success(&self, msg: &str) {
    println!("✅ {}", msg);
  }

  /// Plain stdout line (tables, summaries, dry-run plans).
  pub fn plain(&self, msg: &str) {
    println!("{}", msg);
  }

  pub fn is_verbose(&self) -> bool {
    self.verbose > 0
  }
}
