// src/materialize.rs
//! Project materialization: turns a resolved configuration into a planned
//! file list, then writes the directory tree. Planning is pure; writing is
//! fail-fast with no rollback, so a failure leaves the partial tree in place.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use crate::deps;
use crate::error::ExgenError;
use crate::logger::Reporter;
use crate::options::ResolvedOptions;
use crate::templates;

#[derive(Debug, Clone)]
pub struct PlannedFile {
  /// Path relative to the project root.
  pub path: PathBuf,
  pub contents: String,
}

impl PlannedFile {
  fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
    PlannedFile {
      path: path.into(),
      contents: contents.into(),
    }
  }
}

/// Computes every file the project will contain. Pure function of the
/// resolved configuration.
pub fn plan(resolved: &ResolvedOptions) -> Vec<PlannedFile> {
  let o = &resolved.options;
  let ext = if resolved.is_typescript { "ts" } else { "js" };
  let subs: [(&str, &str); 1] = [("__APP_NAME__", &resolved.name)];
  let mut files = Vec::new();

  files.push(PlannedFile::new("package.json", package_manifest(resolved)));
  files.push(PlannedFile::new(
    format!("src/server.{}", ext),
    templates::server_source(resolved),
  ));
  files.push(PlannedFile::new(
    format!("src/app.{}", ext),
    templates::app_source(resolved),
  ));

  let has_view = !o.no_view && o.view.is_some();
  let index_template = match (resolved.is_typescript, has_view) {
    (true, true) => templates::ROUTES_INDEX_VIEW_TS,
    (true, false) => templates::ROUTES_INDEX_TS,
    (false, true) => templates::ROUTES_INDEX_VIEW_JS,
    (false, false) => templates::ROUTES_INDEX_JS,
  };
  files.push(PlannedFile::new(
    format!("src/routes/index.{}", ext),
    templates::render(index_template, &subs),
  ));
  files.push(PlannedFile::new(
    format!("src/routes/users.{}", ext),
    if resolved.is_typescript {
      templates::ROUTES_USERS_TS
    } else {
      templates::ROUTES_USERS_JS
    },
  ));

  files.push(PlannedFile::new(
    format!("src/middleware/errorHandler.{}", ext),
    if resolved.is_typescript {
      templates::MIDDLEWARE_ERROR_TS
    } else {
      templates::MIDDLEWARE_ERROR_JS
    },
  ));
  if o.auth {
    files.push(PlannedFile::new(
      format!("src/middleware/auth.{}", ext),
      if resolved.is_typescript {
        templates::MIDDLEWARE_AUTH_TS
      } else {
        templates::MIDDLEWARE_AUTH_JS
      },
    ));
  }
  if o.rate_limit {
    files.push(PlannedFile::new(
      format!("src/middleware/rateLimit.{}", ext),
      if resolved.is_typescript {
        templates::MIDDLEWARE_RATE_LIMIT_TS
      } else {
        templates::MIDDLEWARE_RATE_LIMIT_JS
      },
    ));
  }

  if o.mongo {
    files.push(PlannedFile::new(
      format!("src/config/mongo.{}", ext),
      templates::render(
        if resolved.is_typescript {
          templates::CONFIG_MONGO_TS
        } else {
          templates::CONFIG_MONGO_JS
        },
        &subs,
      ),
    ));
  }
  if o.pg {
    files.push(PlannedFile::new(
      format!("src/config/postgres.{}", ext),
      templates::render(
        if resolved.is_typescript {
          templates::CONFIG_PG_TS
        } else {
          templates::CONFIG_PG_JS
        },
        &subs,
      ),
    ));
  }
  if o.redis {
    files.push(PlannedFile::new(
      format!("src/config/redis.{}", ext),
      if resolved.is_typescript {
        templates::CONFIG_REDIS_TS
      } else {
        templates::CONFIG_REDIS_JS
      },
    ));
  }
  if o.elk {
    files.push(PlannedFile::new(
      format!("src/config/logger.{}", ext),
      templates::render(
        if resolved.is_typescript {
          templates::CONFIG_LOGGER_TS
        } else {
          templates::CONFIG_LOGGER_JS
        },
        &subs,
      ),
    ));
  }
  if o.swagger {
    files.push(PlannedFile::new(
      format!("src/config/swagger.{}", ext),
      templates::render(
        if resolved.is_typescript {
          templates::CONFIG_SWAGGER_TS
        } else {
          templates::CONFIG_SWAGGER_JS
        },
        &subs,
      ),
    ));
  }

  if o.test {
    files.push(PlannedFile::new(
      format!("src/__tests__/app.test.{}", ext),
      if resolved.is_typescript {
        templates::TEST_APP_TS
      } else {
        templates::TEST_APP_JS
      },
    ));
    files.push(PlannedFile::new(
      "jest.config.js",
      if resolved.is_typescript {
        templates::JEST_CONFIG_TS
      } else {
        templates::JEST_CONFIG_JS
      },
    ));
  }

  if resolved.is_typescript {
    files.push(PlannedFile::new("tsconfig.json", templates::TSCONFIG_JSON));
  }

  files.push(PlannedFile::new(".env", templates::env_file(resolved, true)));
  files.push(PlannedFile::new(
    ".env.example",
    templates::env_file(resolved, false),
  ));

  if o.docker {
    files.push(PlannedFile::new(
      "Dockerfile",
      if resolved.is_typescript {
        templates::DOCKERFILE_TS
      } else {
        templates::DOCKERFILE_JS
      },
    ));
    files.push(PlannedFile::new(".dockerignore", templates::DOCKERIGNORE));
    files.push(PlannedFile::new(
      "docker-compose.yml",
      templates::docker_compose(resolved),
    ));
  }

  if has_view {
    if let Some(view) = o.view.as_deref() {
      let (view_file, view_template) = match view {
        "pug" => ("views/index.pug", templates::VIEW_INDEX_PUG),
        "hbs" => ("views/index.hbs", templates::VIEW_INDEX_HBS),
        "twig" => ("views/index.twig", templates::VIEW_INDEX_TWIG),
        "vash" => ("views/index.vash", templates::VIEW_INDEX_VASH),
        _ => ("views/index.ejs", templates::VIEW_INDEX_EJS),
      };
      files.push(PlannedFile::new(view_file, view_template));
    }
    let (style_file, style_template) = match o.css.as_deref() {
      Some("sass") | Some("scss") => ("public/stylesheets/style.scss", templates::STYLE_SCSS),
      Some("less") => ("public/stylesheets/style.less", templates::STYLE_LESS),
      Some("stylus") => ("public/stylesheets/style.styl", templates::STYLE_STYLUS),
      _ => ("public/stylesheets/style.css", templates::STYLE_CSS),
    };
    files.push(PlannedFile::new(style_file, style_template));
  }

  files.push(PlannedFile::new("README.md", templates::readme(resolved)));

  files
}

/// Writes the planned tree. With `dry_run` the plan is reported and nothing
/// touches the filesystem.
pub fn run(resolved: &ResolvedOptions, dry_run: bool, reporter: &Reporter) -> Result<(), ExgenError> {
  let files = plan(resolved);

  if dry_run {
    reporter.plain(&format!(
      "Dry run: would create {} files under {}",
      files.len(),
      resolved.path.display()
    ));
    for file in &files {
      reporter.plain(&format!("  {}", file.path.display()));
    }
    return Ok(());
  }

  fs::create_dir_all(&resolved.path).map_err(|e| ExgenError::ProjectDirCreation {
    path: resolved.path.clone(),
    source: e,
  })?;

  let pb = ProgressBar::new(files.len() as u64);
  pb.set_style(
    ProgressStyle::default_bar()
      .template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
      )
      .expect("Failed to set progress bar style") // Panic if template is invalid
      .progress_chars("#>-"),
  );
  pb.set_message("Writing files...");

  for file in &files {
    let output_path = resolved.path.join(&file.path);
    pb.set_message(format!("Writing {}", file.path.display()));

    if let Some(parent) = output_path.parent() {
      if !parent.exists() {
        fs::create_dir_all(parent).map_err(|e| ExgenError::ProjectDirCreation {
          path: parent.to_path_buf(),
          source: e,
        })?;
      }
    }
    fs::write(&output_path, &file.contents).map_err(|e| ExgenError::FileWrite {
      path: output_path.clone(),
      source: e,
    })?;
    pb.inc(1);
  }

  pb.finish_with_message("File generation complete.");
  reporter.info(&format!(
    "Wrote {} files to {}",
    files.len(),
    resolved.path.display()
  ));
  Ok(())
}

fn package_manifest(resolved: &ResolvedOptions) -> String {
  let mut scripts = BTreeMap::new();
  if resolved.is_typescript {
    scripts.insert("build", "tsc".to_string());
    scripts.insert("start", "node dist/server.js".to_string());
    scripts.insert("dev", "nodemon --exec ts-node src/server.ts".to_string());
  } else {
    scripts.insert("start", "node src/server.js".to_string());
    scripts.insert("dev", "nodemon src/server.js".to_string());
  }
  if resolved.options.test {
    scripts.insert("test", "jest".to_string());
  }

  let dependencies: BTreeMap<&str, &str> = deps::dependencies(resolved).into_iter().collect();
  let dev_dependencies: BTreeMap<&str, &str> =
    deps::dev_dependencies(resolved).into_iter().collect();

  let manifest = json!({
    "name": resolved.name,
    "version": "0.1.0",
    "private": true,
    "description": format!("{} - generated with exgen", resolved.display_name),
    "main": if resolved.is_typescript { "dist/server.js" } else { "src/server.js" },
    "scripts": scripts,
    "dependencies": dependencies,
    "devDependencies": dev_dependencies,
  });

  serde_json::to_string_pretty(&manifest).expect("manifest serializes") + "\n"
}
