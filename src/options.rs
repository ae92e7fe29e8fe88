// src/options.rs
//! Option resolution: merges config-file defaults, preset bundles and
//! explicit CLI flags into one immutable `ResolvedOptions` record that every
//! downstream stage reads and none mutates.

use std::env;
use std::path::{Path, PathBuf};

use heck::ToKebabCase;
use serde::{Deserialize, Serialize};

use crate::config::ExgenConfig;
use crate::logger::Reporter;
use crate::pm::{self, PackageManager};
use crate::presets::{PRESET_PRIORITY, TYPESCRIPT_PRESETS};

/// Raw feature intent, reconstructed per invocation from up to three
/// sources: config-file defaults, preset bundles, explicit flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[serde(rename_all = "camelCase")]
pub struct RawOptions {
  pub typescript: bool,
  pub javascript: bool,
  pub view: Option<String>,
  pub no_view: bool,
  pub css: Option<String>,
  pub mongo: bool,
  pub pg: bool,
  pub redis: bool,
  pub auth: bool,
  pub cors: bool,
  pub helmet: bool,
  pub rate_limit: bool,
  pub validation: bool,
  pub swagger: bool,
  pub test: bool,
  pub docker: bool,
  pub elk: bool,
  // Preset toggles
  pub light: bool,
  pub api: bool,
  pub fullstack: bool,
  pub microservice: bool,
  pub startup: bool,
  pub min: bool,
  pub prod: bool,
  pub all: bool,
  /// Custom preset name, looked up in the config file. Never persisted.
  #[serde(skip)]
  pub preset: Option<String>,
}

impl RawOptions {
  /// True when no feature, language, view or preset intent was supplied.
  /// Gates the interactive front-end.
  pub fn is_empty(&self) -> bool {
    *self == RawOptions::default()
  }
}

/// Shallow overwrite merge: boolean flags are unary (a layer can only set
/// them), string-valued options follow last-Some-wins.
pub fn merge_over(acc: &mut RawOptions, layer: &RawOptions) {
  acc.typescript |= layer.typescript;
  acc.javascript |= layer.javascript;
  if layer.view.is_some() {
    acc.view = layer.view.clone();
  }
  acc.no_view |= layer.no_view;
  if layer.css.is_some() {
    acc.css = layer.css.clone();
  }
  acc.mongo |= layer.mongo;
  acc.pg |= layer.pg;
  acc.redis |= layer.redis;
  acc.auth |= layer.auth;
  acc.cors |= layer.cors;
  acc.helmet |= layer.helmet;
  acc.rate_limit |= layer.rate_limit;
  acc.validation |= layer.validation;
  acc.swagger |= layer.swagger;
  acc.test |= layer.test;
  acc.docker |= layer.docker;
  acc.elk |= layer.elk;
  acc.light |= layer.light;
  acc.api |= layer.api;
  acc.fullstack |= layer.fullstack;
  acc.microservice |= layer.microservice;
  acc.startup |= layer.startup;
  acc.min |= layer.min;
  acc.prod |= layer.prod;
  acc.all |= layer.all;
  if layer.preset.is_some() {
    acc.preset = layer.preset.clone();
  }
}

/// Closed enumeration of toggleable features. The interactive front-end
/// produces `(Feature, enabled)` pairs against this list instead of
/// assigning dynamically-computed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
  Mongo,
  Postgres,
  Redis,
  Auth,
  Cors,
  Helmet,
  RateLimit,
  Validation,
  Swagger,
  Test,
  Docker,
  Elk,
}

impl Feature {
  pub const ALL: [Feature; 12] = [
    Feature::Mongo,
    Feature::Postgres,
    Feature::Redis,
    Feature::Auth,
    Feature::Cors,
    Feature::Helmet,
    Feature::RateLimit,
    Feature::Validation,
    Feature::Swagger,
    Feature::Test,
    Feature::Docker,
    Feature::Elk,
  ];

  pub fn label(&self) -> &'static str {
    match self {
      Feature::Mongo => "MongoDB",
      Feature::Postgres => "PostgreSQL",
      Feature::Redis => "Redis",
      Feature::Auth => "JWT Auth",
      Feature::Cors => "CORS",
      Feature::Helmet => "Helmet",
      Feature::RateLimit => "Rate Limiting",
      Feature::Validation => "Joi Validation",
      Feature::Swagger => "Swagger Docs",
      Feature::Test => "Jest Testing",
      Feature::Docker => "Docker",
      Feature::Elk => "ELK Logging",
    }
  }

  pub fn apply(&self, enabled: bool, raw: &mut RawOptions) {
    if !enabled {
      return;
    }
    match self {
      Feature::Mongo => raw.mongo = true,
      Feature::Postgres => raw.pg = true,
      Feature::Redis => raw.redis = true,
      Feature::Auth => raw.auth = true,
      Feature::Cors => raw.cors = true,
      Feature::Helmet => raw.helmet = true,
      Feature::RateLimit => raw.rate_limit = true,
      Feature::Validation => raw.validation = true,
      Feature::Swagger => raw.swagger = true,
      Feature::Test => raw.test = true,
      Feature::Docker => raw.docker = true,
      Feature::Elk => raw.elk = true,
    }
  }
}

/// The single authoritative configuration for one project-creation run.
/// Constructed once by `resolve`, read-only afterwards.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
  /// Canonical package name (lowercase, kebab-cased when needed).
  pub name: String,
  /// Name exactly as the user typed it, for display.
  pub display_name: String,
  /// Absolute target path of the project directory.
  pub path: PathBuf,
  /// Fully merged option record.
  pub options: RawOptions,
  pub is_typescript: bool,
  pub package_manager: PackageManager,
  /// Human-readable enabled-feature labels in fixed enumeration order.
  /// Display only; downstream logic consults `options`.
  pub features: Vec<String>,
}

/// Produces the resolved configuration. Total for validated input: this
/// never raises; probe failures during package-manager detection collapse
/// to the npm fallback.
pub fn resolve(
  name: &str,
  output_dir: &Path,
  explicit: &RawOptions,
  config: Option<&ExgenConfig>,
  with_git: bool,
  reporter: &Reporter,
) -> ResolvedOptions {
  let merged = apply_layers(explicit, config, reporter);
  let is_typescript = resolve_language(explicit, &merged);
  let package_name = canonical_name(name);

  let target = output_dir.join(&package_name);
  let path = if target.is_absolute() {
    target
  } else {
    env::current_dir().map(|cwd| cwd.join(&target)).unwrap_or(target)
  };

  let package_manager = pm::detect(
    &path,
    config.and_then(|c| c.package_manager.as_deref()),
    reporter,
  );
  let features = feature_labels(&merged, is_typescript, with_git);

  ResolvedOptions {
    name: package_name,
    display_name: name.to_string(),
    path,
    options: merged,
    is_typescript,
    package_manager,
    features,
  }
}

/// Folds the explicit ordered list of override layers:
/// defaults < config defaults < custom preset < built-in presets in
/// priority order < explicit flags.
fn apply_layers(
  explicit: &RawOptions,
  config: Option<&ExgenConfig>,
  reporter: &Reporter,
) -> RawOptions {
  let mut layers: Vec<RawOptions> = Vec::new();

  if let Some(cfg) = config {
    layers.push(cfg.defaults.clone());
  }

  if let Some(preset_name) = &explicit.preset {
    match config.and_then(|c| c.presets.get(preset_name)) {
      Some(bundle) => layers.push(bundle.clone()),
      // The Validator rejects unknown preset names before resolution;
      // this path is only reachable when validation was skipped.
      None => reporter.debug(&format!("custom preset '{}' not found, ignoring", preset_name)),
    }
  }

  // Active presets are judged against config defaults plus explicit flags,
  // so a preset enabled from the config file counts too.
  let mut probe = RawOptions::default();
  for layer in &layers {
    merge_over(&mut probe, layer);
  }
  merge_over(&mut probe, explicit);

  for kind in PRESET_PRIORITY {
    if kind.is_active(&probe) {
      layers.push(kind.bundle());
    }
  }

  // Explicit flags re-merged last so they always win over preset bundles.
  layers.push(explicit.clone());

  layers.into_iter().fold(RawOptions::default(), |mut acc, layer| {
    merge_over(&mut acc, &layer);
    acc
  })
}

/// Language rule: an explicit `--js` (without `--ts`) forces JavaScript.
/// Otherwise TypeScript is chosen when explicit or implied by an active
/// preset from the fixed implication set. Default is JavaScript.
fn resolve_language(explicit: &RawOptions, merged: &RawOptions) -> bool {
  if explicit.javascript && !explicit.typescript {
    return false;
  }
  if explicit.typescript {
    return true;
  }
  TYPESCRIPT_PRESETS.iter().any(|kind| kind.is_active(merged))
}

fn canonical_name(name: &str) -> String {
  if name.chars().any(|c| c.is_ascii_uppercase()) {
    name.to_kebab_case()
  } else {
    name.to_string()
  }
}

pub fn view_label(engine: &str) -> String {
  match engine {
    "ejs" => "EJS Views".to_string(),
    "pug" => "Pug Views".to_string(),
    "hbs" => "Handlebars Views".to_string(),
    "twig" => "Twig Views".to_string(),
    "vash" => "Vash Views".to_string(),
    other => format!("{} Views", other),
  }
}

pub fn css_label(engine: &str) -> String {
  match engine {
    "css" => "Plain CSS".to_string(),
    "sass" | "scss" => "Sass Styling".to_string(),
    "less" => "Less Styling".to_string(),
    "stylus" => "Stylus Styling".to_string(),
    other => format!("{} Styling", other),
  }
}

/// Ordered label list: language, view engine, CSS engine, databases,
/// auth/security, validation/docs, testing/ops, git.
fn feature_labels(merged: &RawOptions, is_typescript: bool, with_git: bool) -> Vec<String> {
  let mut labels = Vec::new();
  labels.push(if is_typescript { "TypeScript" } else { "JavaScript" }.to_string());

  if !merged.no_view {
    if let Some(view) = &merged.view {
      labels.push(view_label(view));
      if let Some(css) = &merged.css {
        labels.push(css_label(css));
      }
    }
  }

  if merged.mongo {
    labels.push(Feature::Mongo.label().to_string());
  }
  if merged.pg {
    labels.push(Feature::Postgres.label().to_string());
  }
  if merged.redis {
    labels.push(Feature::Redis.label().to_string());
  }
  if merged.auth {
    labels.push(Feature::Auth.label().to_string());
  }
  if merged.cors {
    labels.push(Feature::Cors.label().to_string());
  }
  if merged.helmet {
    labels.push(Feature::Helmet.label().to_string());
  }
  if merged.rate_limit {
    labels.push(Feature::RateLimit.label().to_string());
  }
  if merged.validation {
    labels.push(Feature::Validation.label().to_string());
  }
  if merged.swagger {
    labels.push(Feature::Swagger.label().to_string());
  }
  if merged.test {
    labels.push(Feature::Test.label().to_string());
  }
  if merged.docker {
    labels.push(Feature::Docker.label().to_string());
  }
  if merged.elk {
    labels.push(Feature::Elk.label().to_string());
  }
  if with_git {
    labels.push("Git".to_string());
  }
  labels
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn npm_config() -> ExgenConfig {
    ExgenConfig {
      defaults: RawOptions::default(),
      presets: HashMap::new(),
      package_manager: Some("npm".to_string()),
    }
  }

  fn resolve_with(name: &str, explicit: &RawOptions, config: &ExgenConfig) -> ResolvedOptions {
    resolve(
      name,
      Path::new("/tmp/exgen-tests"),
      explicit,
      Some(config),
      true,
      &Reporter::new(0),
    )
  }

  #[test]
  fn explicit_flags_override_presets() {
    let mut explicit = RawOptions::default();
    explicit.prod = true;
    explicit.javascript = true;
    let resolved = resolve_with("demo", &explicit, &npm_config());
    assert!(!resolved.is_typescript, "explicit --js must beat the prod preset");
  }

  #[test]
  fn preset_application_is_deterministic() {
    let mut explicit = RawOptions::default();
    explicit.light = true;
    explicit.prod = true;
    let config = npm_config();
    let first = resolve_with("demo", &explicit, &config);
    let second = resolve_with("demo", &explicit, &config);
    assert_eq!(first.options, second.options);
    assert_eq!(first.features, second.features);
    assert!(first.is_typescript);
  }

  #[test]
  fn api_preset_resolves_to_typescript_api() {
    let mut explicit = RawOptions::default();
    explicit.api = true;
    let resolved = resolve_with("demo-api", &explicit, &npm_config());

    assert!(resolved.is_typescript);
    for expected in ["TypeScript", "CORS", "Helmet", "Joi Validation", "Jest Testing"] {
      assert!(
        resolved.features.iter().any(|f| f == expected),
        "missing feature label '{}' in {:?}",
        expected,
        resolved.features
      );
    }
    assert!(resolved.options.no_view);
    assert!(
      !resolved.features.iter().any(|f| f.ends_with("Views")),
      "api preset must not include a view engine"
    );
  }

  #[test]
  fn fullstack_defaults_to_javascript_with_ejs() {
    let mut explicit = RawOptions::default();
    explicit.fullstack = true;
    let resolved = resolve_with("demo", &explicit, &npm_config());

    assert!(!resolved.is_typescript);
    assert_eq!(resolved.options.view.as_deref(), Some("ejs"));
    assert!(resolved.features.iter().any(|f| f == "JavaScript"));
    assert!(resolved.features.iter().any(|f| f == "EJS Views"));
  }

  #[test]
  fn config_defaults_sit_below_presets_and_flags() {
    let mut config = npm_config();
    config.defaults.view = Some("pug".to_string());
    config.defaults.docker = true;

    let mut explicit = RawOptions::default();
    explicit.fullstack = true;
    let resolved = resolve_with("demo", &explicit, &config);

    // Fullstack's bundle overwrites the config default view.
    assert_eq!(resolved.options.view.as_deref(), Some("ejs"));
    // Untouched config default survives the fold.
    assert!(resolved.options.docker);
  }

  #[test]
  fn custom_preset_bundle_is_applied() {
    let mut bundle = RawOptions::default();
    bundle.redis = true;
    bundle.helmet = true;
    let mut config = npm_config();
    config.presets.insert("cache-layer".to_string(), bundle);

    let mut explicit = RawOptions::default();
    explicit.preset = Some("cache-layer".to_string());
    let resolved = resolve_with("demo", &explicit, &config);

    assert!(resolved.options.redis);
    assert!(resolved.options.helmet);
  }

  #[test]
  fn canonical_name_kebab_cases_mixed_case() {
    assert_eq!(canonical_name("MyApp"), "my-app");
    assert_eq!(canonical_name("my-app"), "my-app");
    assert_eq!(canonical_name("my_app"), "my_app");
  }

  #[test]
  fn feature_labels_keep_enumeration_order() {
    let mut explicit = RawOptions::default();
    explicit.prod = true;
    let resolved = resolve_with("demo", &explicit, &npm_config());

    let idx = |label: &str| {
      resolved
        .features
        .iter()
        .position(|f| f == label)
        .unwrap_or_else(|| panic!("label '{}' missing from {:?}", label, resolved.features))
    };
    assert!(idx("TypeScript") < idx("MongoDB"));
    assert!(idx("MongoDB") < idx("CORS"));
    assert!(idx("CORS") < idx("Joi Validation"));
    assert!(idx("Joi Validation") < idx("Jest Testing"));
    assert!(idx("Jest Testing") < idx("Git"));
  }
}
