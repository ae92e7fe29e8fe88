// src/validate.rs
//! Pre-flight checks gating filesystem mutation. Each check is independent
//! and composable; the caller merges every result, prints every warning and
//! aborts with the full aggregated error list rather than the first hit.

use std::fs;
use std::path::Path;

use crate::config::ExgenConfig;
use crate::options::RawOptions;
use crate::presets;

pub const VIEW_ENGINES: [&str; 5] = ["ejs", "hbs", "pug", "twig", "vash"];
pub const CSS_ENGINES: [&str; 5] = ["css", "less", "sass", "scss", "stylus"];

/// Published package-name length ceiling.
pub const MAX_NAME_LENGTH: usize = 214;

#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
  pub errors: Vec<String>,
  pub warnings: Vec<String>,
}

impl ValidationResult {
  pub fn ok() -> Self {
    ValidationResult::default()
  }

  pub fn valid(&self) -> bool {
    self.errors.is_empty()
  }

  pub fn push_error(&mut self, msg: impl Into<String>) {
    self.errors.push(msg.into());
  }

  pub fn push_warning(&mut self, msg: impl Into<String>) {
    self.warnings.push(msg.into());
  }

  pub fn merge(mut self, other: ValidationResult) -> Self {
    self.errors.extend(other.errors);
    self.warnings.extend(other.warnings);
    self
  }
}

/// Enforces the package-naming grammar: lowercase alphanumerics plus
/// `.`, `_` and `-`, no leading punctuation, bounded length. Uppercase is
/// a warning only; the canonical name is lowercased downstream.
pub fn validate_project_name(name: &str) -> ValidationResult {
  let mut result = ValidationResult::ok();

  if name.is_empty() {
    result.push_error("Project name must not be empty");
    return result;
  }

  if name.len() > MAX_NAME_LENGTH {
    result.push_error(format!(
      "Project name exceeds {} characters",
      MAX_NAME_LENGTH
    ));
  }

  if let Some(first) = name.chars().next() {
    if matches!(first, '.' | '_' | '-') {
      result.push_error(format!("Project name must not start with '{}'", first));
    }
  }

  for c in name.chars() {
    if c == ' ' {
      result.push_error("Project name must not contain spaces");
      break;
    }
  }
  for c in name.chars() {
    if c != ' ' && !c.is_ascii_alphanumeric() && !matches!(c, '.' | '_' | '-') {
      result.push_error(format!("Project name contains invalid character '{}'", c));
      break;
    }
  }

  if name.chars().any(|c| c.is_ascii_uppercase()) {
    result.push_warning("Project name contains uppercase letters; the package name will be lowercased");
  }

  result
}

/// Checks the target path. Existing content is not protected: a non-empty
/// directory only warns that files may be overwritten.
pub fn validate_project_path(target: &Path) -> ValidationResult {
  let mut result = ValidationResult::ok();

  if target.exists() {
    if target.is_file() {
      result.push_error(format!(
        "Target path '{}' exists and is a file",
        target.display()
      ));
      return result;
    }
    if target.is_dir() {
      match fs::read_dir(target) {
        Ok(mut entries) => {
          if entries.next().is_some() {
            result.push_warning(format!(
              "Target directory '{}' is not empty; files may be overwritten",
              target.display()
            ));
          }
        }
        Err(e) => {
          result.push_error(format!(
            "Cannot read target directory '{}': {}",
            target.display(),
            e
          ));
        }
      }
    }
  }

  // Nearest existing ancestor must be writable; missing intermediate
  // directories are created during materialization.
  let mut ancestor = target.parent();
  while let Some(dir) = ancestor {
    if dir.as_os_str().is_empty() {
      break;
    }
    if dir.exists() {
      match fs::metadata(dir) {
        Ok(meta) if meta.permissions().readonly() => {
          result.push_error(format!("Parent directory '{}' is not writable", dir.display()));
        }
        Ok(_) => {}
        Err(e) => {
          result.push_error(format!(
            "Cannot inspect parent directory '{}': {}",
            dir.display(),
            e
          ));
        }
      }
      break;
    }
    ancestor = dir.parent();
  }

  result
}

/// Flag-combination sanity. Contradictory view flags and unknown engine or
/// preset names are fatal; everything else downgrades to a warning with a
/// deterministic resolution rule.
pub fn validate_options(raw: &RawOptions, config: Option<&ExgenConfig>) -> ValidationResult {
  let mut result = ValidationResult::ok();

  if let Some(view) = &raw.view {
    if !VIEW_ENGINES.contains(&view.as_str()) {
      result.push_error(format!(
        "Unsupported view engine '{}' (supported: {})",
        view,
        VIEW_ENGINES.join(", ")
      ));
    }
    if raw.no_view {
      result.push_error("--no-view and --view are mutually exclusive");
    }
  }

  if let Some(css) = &raw.css {
    if !CSS_ENGINES.contains(&css.as_str()) {
      result.push_error(format!(
        "Unsupported CSS engine '{}' (supported: {})",
        css,
        CSS_ENGINES.join(", ")
      ));
    }
  }

  if raw.typescript && raw.javascript {
    result.push_warning("Both --ts and --js given; TypeScript wins");
  }

  let database_count = [raw.mongo, raw.pg, raw.redis].iter().filter(|&&b| b).count();
  if database_count > 1 {
    result.push_warning("Multiple databases selected; all will be included");
  }

  let active = presets::active_presets(raw);
  if active.len() > 1 {
    let names: Vec<&str> = active.iter().map(|k| k.name()).collect();
    result.push_warning(format!(
      "Multiple presets active ({}); later presets take precedence",
      names.join(", ")
    ));
  }

  if let Some(preset_name) = &raw.preset {
    let known = config
      .map(|c| c.presets.contains_key(preset_name))
      .unwrap_or(false);
    if !known {
      result.push_error(format!(
        "Unknown preset '{}' (not defined in the config file)",
        preset_name
      ));
    }
  }

  result
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;

  #[test]
  fn name_with_space_is_invalid() {
    let result = validate_project_name("My App");
    assert!(!result.valid());
    assert!(result.errors.iter().any(|e| e.contains("spaces")));
  }

  #[test]
  fn lowercase_name_is_clean() {
    let result = validate_project_name("my-app");
    assert!(result.valid());
    assert!(result.warnings.is_empty());
  }

  #[test]
  fn mixed_case_name_warns_but_passes() {
    let result = validate_project_name("My-App");
    assert!(result.valid());
    assert_eq!(result.warnings.len(), 1);
  }

  #[test]
  fn empty_and_leading_punctuation_names_fail() {
    assert!(!validate_project_name("").valid());
    assert!(!validate_project_name(".hidden").valid());
    assert!(!validate_project_name("_private").valid());
  }

  #[test]
  fn overlong_name_fails() {
    let name = "a".repeat(MAX_NAME_LENGTH + 1);
    assert!(!validate_project_name(&name).valid());
  }

  #[test]
  fn empty_existing_dir_is_clean() {
    let dir = tempfile::tempdir().unwrap();
    let result = validate_project_path(dir.path());
    assert!(result.valid());
    assert!(result.warnings.is_empty());
  }

  #[test]
  fn nonempty_dir_warns_only() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("existing.txt"), "x").unwrap();
    let result = validate_project_path(dir.path());
    assert!(result.valid());
    assert!(result.warnings.iter().any(|w| w.contains("overwritten")));
  }

  #[test]
  fn file_at_target_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("occupied");
    fs::write(&file, "x").unwrap();
    let result = validate_project_path(&file);
    assert!(!result.valid());
  }

  #[test]
  fn missing_target_under_writable_parent_is_clean() {
    let dir = tempfile::tempdir().unwrap();
    let result = validate_project_path(&dir.path().join("new-project"));
    assert!(result.valid());
    assert!(result.warnings.is_empty());
  }

  #[test]
  fn no_view_with_view_is_fatal() {
    let mut raw = RawOptions::default();
    raw.no_view = true;
    raw.view = Some("ejs".to_string());
    let result = validate_options(&raw, None);
    assert!(!result.valid());
    assert!(result.errors.iter().any(|e| e.contains("mutually exclusive")));
  }

  #[test]
  fn unknown_view_engine_is_fatal() {
    let mut raw = RawOptions::default();
    raw.view = Some("mustache".to_string());
    assert!(!validate_options(&raw, None).valid());
  }

  #[test]
  fn ts_and_js_together_only_warns() {
    let mut raw = RawOptions::default();
    raw.typescript = true;
    raw.javascript = true;
    let result = validate_options(&raw, None);
    assert!(result.valid());
    assert_eq!(result.warnings.len(), 1);
  }

  #[test]
  fn multiple_databases_only_warn() {
    let mut raw = RawOptions::default();
    raw.mongo = true;
    raw.pg = true;
    let result = validate_options(&raw, None);
    assert!(result.valid());
    assert!(result.warnings.iter().any(|w| w.contains("databases")));
  }

  #[test]
  fn multiple_presets_only_warn() {
    let mut raw = RawOptions::default();
    raw.light = true;
    raw.prod = true;
    let result = validate_options(&raw, None);
    assert!(result.valid());
    assert!(result.warnings.iter().any(|w| w.contains("presets")));
  }

  #[test]
  fn unknown_custom_preset_is_fatal() {
    let mut raw = RawOptions::default();
    raw.preset = Some("missing".to_string());
    assert!(!validate_options(&raw, None).valid());
  }

  #[test]
  fn all_errors_are_collected_not_short_circuited() {
    let mut raw = RawOptions::default();
    raw.no_view = true;
    raw.view = Some("mustache".to_string());
    let result = validate_options(&raw, None);
    assert_eq!(result.errors.len(), 2);
  }
}
