// src/cli.rs
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::options::RawOptions;

#[derive(Parser, Debug)]
#[command(
    name = "exgen", // Command name users type
    author,
    version,
    about = "Scaffolds Express.js projects from feature flags and presets.",
    long_about = None
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Increase verbosity level (e.g., -v, -vv)
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  pub verbose: u8,

  /// Path to a config file (default: discover .exgenrc.json in cwd or home)
  #[arg(long, global = true)]
  #[clap(env = "EXGEN_CONFIG")]
  pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Create a new project
  New(NewArgs),
  /// List available presets
  Presets,
  /// Inspect or export the configuration file
  Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct NewArgs {
  /// Project name (becomes the package name)
  pub name: String,

  /// Directory to create the project under
  #[arg(short, long, default_value = ".")]
  pub output_dir: PathBuf,

  /// Use TypeScript
  #[arg(long = "ts")]
  pub typescript: bool,

  /// Use JavaScript
  #[arg(long = "js")]
  pub javascript: bool,

  /// View engine (ejs, hbs, pug, twig, vash)
  #[arg(long)]
  pub view: Option<String>,

  /// Skip the view layer entirely
  #[arg(long)]
  pub no_view: bool,

  /// CSS engine (css, less, sass, scss, stylus)
  #[arg(long)]
  pub css: Option<String>,

  /// Include MongoDB (mongoose)
  #[arg(long)]
  pub mongo: bool,

  /// Include PostgreSQL (pg)
  #[arg(long)]
  pub pg: bool,

  /// Include Redis
  #[arg(long)]
  pub redis: bool,

  /// Include JWT authentication
  #[arg(long)]
  pub auth: bool,

  /// Include CORS middleware
  #[arg(long)]
  pub cors: bool,

  /// Include Helmet security headers
  #[arg(long)]
  pub helmet: bool,

  /// Include rate limiting
  #[arg(long)]
  pub rate_limit: bool,

  /// Include Joi request validation
  #[arg(long)]
  pub validation: bool,

  /// Include Swagger API docs
  #[arg(long)]
  pub swagger: bool,

  /// Include Jest testing setup
  #[arg(long)]
  pub test: bool,

  /// Include Dockerfile and docker-compose
  #[arg(long)]
  pub docker: bool,

  /// Include ELK logging (winston + Elasticsearch)
  #[arg(long)]
  pub elk: bool,

  /// Lightweight preset
  #[arg(long)]
  pub light: bool,

  /// REST API preset
  #[arg(long)]
  pub api: bool,

  /// Fullstack preset (views, Sass, MongoDB, auth)
  #[arg(long)]
  pub fullstack: bool,

  /// Microservice preset
  #[arg(long)]
  pub microservice: bool,

  /// Startup preset
  #[arg(long)]
  pub startup: bool,

  /// Minimal production preset
  #[arg(long)]
  pub min: bool,

  /// Full production preset
  #[arg(long)]
  pub prod: bool,

  /// Every feature
  #[arg(long)]
  pub all: bool,

  /// Custom preset name from the config file
  #[arg(long)]
  pub preset: Option<String>,

  /// Skip dependency installation
  #[arg(long)]
  pub skip_install: bool,

  /// Skip git initialization
  #[arg(long)]
  pub skip_git: bool,

  /// Report the file plan without writing anything
  #[arg(long)]
  pub dry_run: bool,
}

impl NewArgs {
  /// The explicit flag layer handed to the resolver. Pipeline-control
  /// flags (--skip-install, --skip-git, --dry-run) are not options and
  /// never affect generated content.
  pub fn raw_options(&self) -> RawOptions {
    RawOptions {
      typescript: self.typescript,
      javascript: self.javascript,
      view: self.view.clone(),
      no_view: self.no_view,
      css: self.css.clone(),
      mongo: self.mongo,
      pg: self.pg,
      redis: self.redis,
      auth: self.auth,
      cors: self.cors,
      helmet: self.helmet,
      rate_limit: self.rate_limit,
      validation: self.validation,
      swagger: self.swagger,
      test: self.test,
      docker: self.docker,
      elk: self.elk,
      light: self.light,
      api: self.api,
      fullstack: self.fullstack,
      microservice: self.microservice,
      startup: self.startup,
      min: self.min,
      prod: self.prod,
      all: self.all,
      preset: self.preset.clone(),
    }
  }
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
  #[command(subcommand)]
  pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
  /// Write a starter config file
  Export {
    /// Where to write the file
    #[arg(long, default_value = ".exgenrc.json")]
    path: PathBuf,
  },
  /// Show the discovered configuration
  Show,
}
