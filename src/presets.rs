// src/presets.rs
//! Built-in preset catalog. Each preset is a fixed bundle of raw options
//! representing a common project archetype. The application order and the
//! set of presets that imply TypeScript are fixed data, not source order.

use crate::options::RawOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetKind {
  Light,
  Api,
  Fullstack,
  Microservice,
  Startup,
  Min,
  Prod,
  All,
}

/// Fixed application order. When several presets are active at once, later
/// entries are merged over earlier ones (the Validator warns about the
/// combination; resolution stays deterministic).
pub const PRESET_PRIORITY: [PresetKind; 8] = [
  PresetKind::Light,
  PresetKind::Api,
  PresetKind::Fullstack,
  PresetKind::Microservice,
  PresetKind::Startup,
  PresetKind::Min,
  PresetKind::Prod,
  PresetKind::All,
];

/// Presets that imply TypeScript when no explicit language flag is given.
/// Fullstack keeps the beginner-friendly JavaScript default.
pub const TYPESCRIPT_PRESETS: [PresetKind; 6] = [
  PresetKind::Api,
  PresetKind::Microservice,
  PresetKind::Startup,
  PresetKind::Prod,
  PresetKind::Min,
  PresetKind::Light,
];

impl PresetKind {
  pub fn name(&self) -> &'static str {
    match self {
      PresetKind::Light => "light",
      PresetKind::Api => "api",
      PresetKind::Fullstack => "fullstack",
      PresetKind::Microservice => "microservice",
      PresetKind::Startup => "startup",
      PresetKind::Min => "min",
      PresetKind::Prod => "prod",
      PresetKind::All => "all",
    }
  }

  pub fn description(&self) -> &'static str {
    match self {
      PresetKind::Light => "Lightweight TypeScript app with no view layer",
      PresetKind::Api => "REST API: TypeScript, CORS, Helmet, Joi validation, Jest",
      PresetKind::Fullstack => "Server-rendered app: EJS views, Sass, MongoDB, JWT auth",
      PresetKind::Microservice => "Containerized service: TypeScript, Redis, Docker",
      PresetKind::Startup => "Product backend: MongoDB, auth, validation, Swagger, Jest",
      PresetKind::Min => "Minimal production API: TypeScript, Helmet, CORS, Docker",
      PresetKind::Prod => "Full production stack: databases, security, docs, ELK, Docker",
      PresetKind::All => "Every feature enabled",
    }
  }

  pub fn example(&self) -> &'static str {
    match self {
      PresetKind::Light => "exgen new my-app --light",
      PresetKind::Api => "exgen new my-api --api",
      PresetKind::Fullstack => "exgen new my-site --fullstack",
      PresetKind::Microservice => "exgen new my-service --microservice",
      PresetKind::Startup => "exgen new my-startup --startup",
      PresetKind::Min => "exgen new my-app --min",
      PresetKind::Prod => "exgen new my-app --prod",
      PresetKind::All => "exgen new my-app --all",
    }
  }

  /// Whether this preset's toggle is set on the given options record.
  pub fn is_active(&self, raw: &RawOptions) -> bool {
    match self {
      PresetKind::Light => raw.light,
      PresetKind::Api => raw.api,
      PresetKind::Fullstack => raw.fullstack,
      PresetKind::Microservice => raw.microservice,
      PresetKind::Startup => raw.startup,
      PresetKind::Min => raw.min,
      PresetKind::Prod => raw.prod,
      PresetKind::All => raw.all,
    }
  }

  /// The option bundle this preset merges into the accumulator. Bundles
  /// never carry a language key; the resolver decides TypeScript vs
  /// JavaScript from the explicit flags and `TYPESCRIPT_PRESETS`.
  pub fn bundle(&self) -> RawOptions {
    let mut o = RawOptions::default();
    match self {
      PresetKind::Light => {
        o.no_view = true;
      }
      PresetKind::Api => {
        o.no_view = true;
        o.cors = true;
        o.helmet = true;
        o.validation = true;
        o.test = true;
      }
      PresetKind::Fullstack => {
        o.view = Some("ejs".to_string());
        o.css = Some("sass".to_string());
        o.mongo = true;
        o.auth = true;
      }
      PresetKind::Microservice => {
        o.no_view = true;
        o.redis = true;
        o.docker = true;
        o.cors = true;
        o.helmet = true;
      }
      PresetKind::Startup => {
        o.no_view = true;
        o.mongo = true;
        o.auth = true;
        o.cors = true;
        o.helmet = true;
        o.validation = true;
        o.swagger = true;
        o.test = true;
      }
      PresetKind::Min => {
        o.no_view = true;
        o.helmet = true;
        o.cors = true;
        o.docker = true;
      }
      PresetKind::Prod => {
        o.no_view = true;
        o.mongo = true;
        o.redis = true;
        o.auth = true;
        o.cors = true;
        o.helmet = true;
        o.rate_limit = true;
        o.validation = true;
        o.swagger = true;
        o.test = true;
        o.docker = true;
        o.elk = true;
      }
      PresetKind::All => {
        o.view = Some("ejs".to_string());
        o.css = Some("sass".to_string());
        o.mongo = true;
        o.pg = true;
        o.redis = true;
        o.auth = true;
        o.cors = true;
        o.helmet = true;
        o.rate_limit = true;
        o.validation = true;
        o.swagger = true;
        o.test = true;
        o.docker = true;
        o.elk = true;
      }
    }
    o
  }
}

/// Presets active on the given options record, in priority order.
pub fn active_presets(raw: &RawOptions) -> Vec<PresetKind> {
  PRESET_PRIORITY
    .iter()
    .copied()
    .filter(|kind| kind.is_active(raw))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bundles_never_set_a_language() {
    for kind in PRESET_PRIORITY {
      let bundle = kind.bundle();
      assert!(
        !bundle.typescript && !bundle.javascript,
        "preset '{}' must not carry a language key",
        kind.name()
      );
    }
  }

  #[test]
  fn priority_order_is_stable() {
    let names: Vec<&str> = PRESET_PRIORITY.iter().map(|k| k.name()).collect();
    assert_eq!(
      names,
      vec!["light", "api", "fullstack", "microservice", "startup", "min", "prod", "all"]
    );
  }

  #[test]
  fn active_presets_follows_priority_not_flag_order() {
    let mut raw = RawOptions::default();
    raw.prod = true;
    raw.light = true;
    let active = active_presets(&raw);
    assert_eq!(active, vec![PresetKind::Light, PresetKind::Prod]);
  }
}
