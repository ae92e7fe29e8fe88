// src/deps.rs
//! Dependency tables: a pure, total mapping from resolved feature flags to
//! fixed `(package, version)` lists. Versions are hard-coded; no resolution
//! happens here. Runtime and development sets are disjoint.

use crate::options::ResolvedOptions;

pub type Dep = (&'static str, &'static str);

pub fn dependencies(resolved: &ResolvedOptions) -> Vec<Dep> {
  let o = &resolved.options;
  let mut deps: Vec<Dep> = vec![
    ("express", "^4.18.2"),
    ("dotenv", "^16.3.1"),
    ("morgan", "^1.10.0"),
  ];

  if !o.no_view {
    match o.view.as_deref() {
      Some("ejs") => deps.push(("ejs", "^3.1.9")),
      Some("pug") => deps.push(("pug", "^3.0.2")),
      Some("hbs") => deps.push(("hbs", "^4.2.0")),
      Some("twig") => deps.push(("twig", "^1.17.1")),
      Some("vash") => deps.push(("vash", "^0.13.0")),
      _ => {}
    }
  }

  if o.mongo {
    deps.push(("mongoose", "^8.0.3"));
  }
  if o.pg {
    deps.push(("pg", "^8.11.3"));
  }
  if o.redis {
    deps.push(("redis", "^4.6.11"));
  }
  if o.auth {
    deps.push(("jsonwebtoken", "^9.0.2"));
    deps.push(("bcryptjs", "^2.4.3"));
  }
  if o.cors {
    deps.push(("cors", "^2.8.5"));
  }
  if o.helmet {
    deps.push(("helmet", "^7.1.0"));
  }
  if o.rate_limit {
    deps.push(("express-rate-limit", "^7.1.5"));
  }
  if o.validation {
    deps.push(("joi", "^17.11.0"));
  }
  if o.swagger {
    deps.push(("swagger-ui-express", "^5.0.0"));
    deps.push(("swagger-jsdoc", "^6.2.8"));
  }
  if o.elk {
    deps.push(("winston", "^3.11.0"));
    deps.push(("winston-elasticsearch", "^0.17.4"));
  }

  deps
}

pub fn dev_dependencies(resolved: &ResolvedOptions) -> Vec<Dep> {
  let o = &resolved.options;
  let mut deps: Vec<Dep> = vec![("nodemon", "^3.0.2")];

  if !o.no_view {
    match o.css.as_deref() {
      Some("sass") | Some("scss") => deps.push(("sass", "^1.69.5")),
      Some("less") => deps.push(("less", "^4.2.0")),
      Some("stylus") => deps.push(("stylus", "^0.62.0")),
      _ => {}
    }
  }

  if o.test {
    deps.push(("jest", "^29.7.0"));
    deps.push(("supertest", "^6.3.3"));
  }

  if resolved.is_typescript {
    deps.push(("typescript", "^5.3.3"));
    deps.push(("ts-node", "^10.9.2"));
    deps.push(("@types/node", "^20.10.5"));
    deps.push(("@types/express", "^4.17.21"));
    deps.push(("@types/morgan", "^1.9.9"));
    if o.cors {
      deps.push(("@types/cors", "^2.8.17"));
    }
    if o.auth {
      deps.push(("@types/jsonwebtoken", "^9.0.5"));
      deps.push(("@types/bcryptjs", "^2.4.6"));
    }
    if o.swagger {
      deps.push(("@types/swagger-ui-express", "^4.1.6"));
      deps.push(("@types/swagger-jsdoc", "^6.0.4"));
    }
    if o.test {
      deps.push(("ts-jest", "^29.1.1"));
      deps.push(("@types/jest", "^29.5.11"));
      deps.push(("@types/supertest", "^6.0.2"));
    }
  }

  deps
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::ExgenConfig;
  use crate::logger::Reporter;
  use crate::options::{resolve, RawOptions};
  use std::path::Path;

  fn resolved_for(explicit: RawOptions) -> ResolvedOptions {
    let config = ExgenConfig {
      package_manager: Some("npm".to_string()),
      ..ExgenConfig::default()
    };
    resolve(
      "demo",
      Path::new("/tmp/exgen-tests"),
      &explicit,
      Some(&config),
      true,
      &Reporter::new(0),
    )
  }

  #[test]
  fn mongo_auth_typescript_tables() {
    let mut explicit = RawOptions::default();
    explicit.mongo = true;
    explicit.auth = true;
    explicit.typescript = true;
    let resolved = resolved_for(explicit);

    let runtime = dependencies(&resolved);
    let dev = dev_dependencies(&resolved);

    let runtime_names: Vec<&str> = runtime.iter().map(|(n, _)| *n).collect();
    let dev_names: Vec<&str> = dev.iter().map(|(n, _)| *n).collect();

    assert!(runtime_names.contains(&"mongoose"));
    assert!(runtime_names.contains(&"jsonwebtoken"));
    assert!(runtime_names.contains(&"bcryptjs"));
    assert!(dev_names.contains(&"typescript"));
    assert!(dev_names.contains(&"ts-node"));
    assert!(dev_names.contains(&"@types/jsonwebtoken"));
    assert!(dev_names.contains(&"@types/bcryptjs"));
  }

  #[test]
  fn computation_is_idempotent() {
    let mut explicit = RawOptions::default();
    explicit.prod = true;
    let resolved = resolved_for(explicit);

    assert_eq!(dependencies(&resolved), dependencies(&resolved));
    assert_eq!(dev_dependencies(&resolved), dev_dependencies(&resolved));
  }

  #[test]
  fn runtime_and_dev_sets_are_disjoint() {
    let mut explicit = RawOptions::default();
    explicit.all = true;
    explicit.typescript = true;
    let resolved = resolved_for(explicit);

    let runtime = dependencies(&resolved);
    let dev = dev_dependencies(&resolved);
    for (name, _) in &runtime {
      assert!(
        !dev.iter().any(|(d, _)| d == name),
        "'{}' appears in both dependency classes",
        name
      );
    }
  }

  #[test]
  fn no_view_suppresses_view_and_css_packages() {
    let mut explicit = RawOptions::default();
    explicit.api = true;
    let resolved = resolved_for(explicit);

    let runtime = dependencies(&resolved);
    assert!(!runtime.iter().any(|(n, _)| *n == "ejs" || *n == "pug"));
    let dev = dev_dependencies(&resolved);
    assert!(!dev.iter().any(|(n, _)| *n == "sass"));
  }

  #[test]
  fn type_packages_track_their_feature() {
    let mut explicit = RawOptions::default();
    explicit.cors = true;
    explicit.javascript = true;
    let resolved = resolved_for(explicit);

    let dev = dev_dependencies(&resolved);
    assert!(
      !dev.iter().any(|(n, _)| n.starts_with("@types/")),
      "JavaScript projects get no @types packages"
    );
  }
}
