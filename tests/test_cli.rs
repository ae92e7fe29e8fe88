use assert_cmd::Command;

fn exgen() -> Command {
  Command::cargo_bin("exgen").unwrap()
}

#[test]
fn test_help() {
  exgen().arg("--help").assert().success();
}

#[test]
fn test_invalid_flag() {
  exgen()
    .arg("--invalid-flag")
    .assert()
    .failure()
    .stderr(predicates::str::contains(
      "unexpected argument '--invalid-flag'",
    ));
}

#[test]
fn test_dry_run_api_preset() {
  let dir = tempfile::tempdir().unwrap();
  exgen()
    .current_dir(dir.path())
    .args(["new", "demo-api", "--api", "--dry-run", "--skip-install", "--skip-git"])
    .assert()
    .success()
    .stdout(predicates::str::contains("Dry run"))
    .stdout(predicates::str::contains("tsconfig.json"));

  // Nothing may be written on a dry run.
  assert!(!dir.path().join("demo-api").exists());
}

#[test]
fn test_invalid_name_aggregates_errors() {
  let dir = tempfile::tempdir().unwrap();
  exgen()
    .current_dir(dir.path())
    .args(["new", "My App", "--api", "--dry-run", "--skip-install", "--skip-git"])
    .assert()
    .failure()
    .stderr(predicates::str::contains("Validation failed"))
    .stderr(predicates::str::contains("spaces"));
}

#[test]
fn test_contradictory_view_flags() {
  let dir = tempfile::tempdir().unwrap();
  exgen()
    .current_dir(dir.path())
    .args([
      "new", "demo", "--no-view", "--view", "ejs", "--dry-run", "--skip-install", "--skip-git",
    ])
    .assert()
    .failure()
    .stderr(predicates::str::contains("mutually exclusive"));
}

#[test]
fn test_unsupported_view_engine() {
  let dir = tempfile::tempdir().unwrap();
  exgen()
    .current_dir(dir.path())
    .args(["new", "demo", "--view", "mustache", "--dry-run", "--skip-install", "--skip-git"])
    .assert()
    .failure()
    .stderr(predicates::str::contains("Unsupported view engine"));
}

#[test]
fn test_new_writes_project_tree() {
  let dir = tempfile::tempdir().unwrap();
  exgen()
    .current_dir(dir.path())
    .args(["new", "demo", "--fullstack", "--skip-install", "--skip-git"])
    .assert()
    .success()
    .stdout(predicates::str::contains("created"));

  let project = dir.path().join("demo");
  assert!(project.join("package.json").is_file());
  assert!(project.join("src/server.js").is_file());
  assert!(project.join("views/index.ejs").is_file());
  assert!(project.join(".env.example").is_file());
}

#[test]
fn test_presets_listing() {
  exgen()
    .arg("presets")
    .assert()
    .success()
    .stdout(predicates::str::contains("fullstack"))
    .stdout(predicates::str::contains("microservice"));
}

#[test]
fn test_config_export_and_show() {
  let dir = tempfile::tempdir().unwrap();
  let config_path = dir.path().join(".exgenrc.json");

  exgen()
    .current_dir(dir.path())
    .args(["config", "export"])
    .assert()
    .success();
  assert!(config_path.is_file());

  exgen()
    .args(["--config", config_path.to_str().unwrap(), "config", "show"])
    .assert()
    .success()
    .stdout(predicates::str::contains("team-api"));
}

#[test]
fn test_unknown_custom_preset_fails() {
  let dir = tempfile::tempdir().unwrap();
  exgen()
    .current_dir(dir.path())
    .args(["new", "demo", "--preset", "nope", "--dry-run", "--skip-install", "--skip-git"])
    .assert()
    .failure()
    .stderr(predicates::str::contains("Unknown preset"));
}
