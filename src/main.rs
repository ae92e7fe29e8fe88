// src/main.rs
mod cli;
mod config;
mod deps;
mod error;
mod exec;
mod git;
mod install;
mod logger;
mod materialize;
mod options;
mod pm;
mod presets;
mod prompt;
mod templates;
mod validate;

use clap::Parser;
use log::LevelFilter;

use cli::{Cli, Commands, ConfigCommands, NewArgs};
use config::ExgenConfig;
use error::ExgenError;
use logger::Reporter;
use presets::PRESET_PRIORITY;

fn main() {
  if let Err(err) = run() {
    log::error!("{}", err);
    eprintln!("❌ {}", err);
    std::process::exit(1);
  }
}

fn run() -> Result<(), ExgenError> {
  let cli = Cli::parse();

  // Setup logging based on verbosity
  let log_level = match cli.verbose {
    0 => LevelFilter::Info,
    1 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };
  env_logger::Builder::new().filter_level(log_level).init();

  log::debug!("CLI args: {:?}", cli);

  let reporter = Reporter::new(cli.verbose);
  let discovered = config::discover(cli.config.as_deref())?;
  if let Some((path, _)) = &discovered {
    reporter.info(&format!("Loaded config from {}", path.display()));
  }
  let config = discovered.as_ref().map(|(_, c)| c);

  match &cli.command {
    Commands::New(args) => run_new(args, config, &reporter),
    Commands::Presets => {
      run_presets(config, &reporter);
      Ok(())
    }
    Commands::Config(config_args) => match &config_args.command {
      ConfigCommands::Export { path } => {
        config::export(path)?;
        reporter.success(&format!("Wrote starter config to {}", path.display()));
        Ok(())
      }
      ConfigCommands::Show => {
        run_config_show(&discovered, &reporter);
        Ok(())
      }
    },
  }
}

fn run_new(
  args: &NewArgs,
  config: Option<&ExgenConfig>,
  reporter: &Reporter,
) -> Result<(), ExgenError> {
  let mut explicit = args.raw_options();
  if explicit.is_empty() {
    explicit = prompt::gather()?;
  }

  let resolved = options::resolve(
    &args.name,
    &args.output_dir,
    &explicit,
    config,
    !args.skip_git,
    reporter,
  );
  reporter.debug(&format!("Resolved options: {:?}", resolved));

  // All checks run; every warning is shown and every error is aggregated
  // into one message before anything touches the filesystem.
  let result = validate::validate_project_name(&args.name)
    .merge(validate::validate_project_path(&resolved.path))
    .merge(validate::validate_options(&explicit, config));
  for warning in &result.warnings {
    reporter.warn(warning);
  }
  if !result.valid() {
    return Err(ExgenError::Validation {
      errors: result.errors,
    });
  }

  reporter.plain(&format!(
    "Creating '{}' at {}",
    resolved.name,
    resolved.path.display()
  ));
  reporter.plain(&format!("Features: {}", resolved.features.join(", ")));
  if reporter.is_verbose() {
    reporter.plain(&format!("Package manager: {}", resolved.package_manager));
  }

  materialize::run(&resolved, args.dry_run, reporter)?;

  if args.dry_run {
    reporter.success("Dry run complete; nothing was written.");
    return Ok(());
  }

  if args.skip_install {
    reporter.info("Skipping dependency installation (--skip-install)");
  } else if let Err(e) = install::run(&resolved, reporter) {
    reporter.warn(&format!(
      "Dependency installation failed: {}. Run '{} install' in the project directory to retry.",
      e, resolved.package_manager
    ));
  }

  if args.skip_git {
    reporter.info("Skipping git initialization (--skip-git)");
  } else {
    git::run(&resolved, reporter);
  }

  reporter.success(&format!(
    "Project '{}' created at {}",
    resolved.name,
    resolved.path.display()
  ));
  reporter.plain(&format!(
    "\nNext steps:\n  cd {}\n  {} run dev",
    resolved.name, resolved.package_manager
  ));
  Ok(())
}

fn run_presets(config: Option<&ExgenConfig>, reporter: &Reporter) {
  reporter.plain("Available presets:");
  reporter.plain(&format!("{:<14} | {:<62} | {}", "Name", "Description", "Example"));
  reporter.plain(&format!("{:-<14}-+-{:-<62}-+-{:-<30}", "", "", "")); // Separator
  for kind in PRESET_PRIORITY {
    reporter.plain(&format!(
      "{:<14} | {:<62} | {}",
      kind.name(),
      kind.description(),
      kind.example()
    ));
  }

  if let Some(config) = config {
    if !config.presets.is_empty() {
      let mut names: Vec<&String> = config.presets.keys().collect();
      names.sort();
      reporter.plain("\nCustom presets (from config file):");
      for name in names {
        reporter.plain(&format!("  {} (use with --preset {})", name, name));
      }
    }
  }
}

fn run_config_show(
  discovered: &Option<(std::path::PathBuf, ExgenConfig)>,
  reporter: &Reporter,
) {
  match discovered {
    Some((path, config)) => {
      reporter.plain(&format!("Config file: {}", path.display()));
      match serde_json::to_string_pretty(config) {
        Ok(body) => reporter.plain(&body),
        Err(e) => reporter.error(&format!("Could not render config: {}", e)),
      }
    }
    None => {
      reporter.plain("No config file found (.exgenrc.json in cwd or home).");
      reporter.plain("Create one with: exgen config export");
    }
  }
}
