//! Config and lint

use crate::common;

use std::fs;
use tempfile::TempDir;

#[test]
fn test_lint_clean_project() {
    let tmp = TempDir::new().unwrap();
    common::scaffold_project(tmp.path()).unwrap();

    let output = common::run_freightdesk(tmp.path(), &["lint"]).unwrap();
    assert!(
        output.status.success(),
        "stdout: {}",
        common::stdout_of(&output)
    );
    assert!(common::stdout_of(&output).contains("clean"));
}

#[test]
fn test_lint_reports_malformed_criterion() {
    let tmp = TempDir::new().unwrap();
    common::scaffold_project(tmp.path()).unwrap();
    fs::write(
        tmp.path().join(".freightdesk/criteria.md"),
        r#"---
criteria:
  - code: broken
    name: Broken rule
    condition: cargo_weight_kg >> 10
    weight: 5
---
"#,
    )
    .unwrap();

    let output = common::run_freightdesk(tmp.path(), &["lint"]).unwrap();
    assert!(!output.status.success());
    let stdout = common::stdout_of(&output);
    assert!(stdout.contains("broken"));
    assert!(stdout.contains("malformed"));
}

#[test]
fn test_lint_reports_unknown_role() {
    let tmp = TempDir::new().unwrap();
    common::scaffold_project(tmp.path()).unwrap();
    fs::write(
        tmp.path().join(".freightdesk/visibility.md"),
        r#"---
rules:
  - role: warehouse
    module: invoices
---
"#,
    )
    .unwrap();

    let output = common::run_freightdesk(tmp.path(), &["lint"]).unwrap();
    assert!(!output.status.success());
    assert!(common::stdout_of(&output).contains("warehouse"));
}

#[test]
fn test_config_show_effective_values() {
    let tmp = TempDir::new().unwrap();
    common::scaffold_project(tmp.path()).unwrap();

    let output = common::run_freightdesk(tmp.path(), &["config"]).unwrap();
    assert!(output.status.success());

    let stdout = common::stdout_of(&output);
    assert!(stdout.contains("test-agency"));
    assert!(stdout.contains("50"));
    assert!(stdout.contains(".freightdesk/criteria.md"));
}

#[test]
fn test_commands_require_init() {
    let tmp = TempDir::new().unwrap();

    let output = common::run_freightdesk(tmp.path(), &["list"]).unwrap();
    assert!(!output.status.success());
    assert!(common::stderr_of(&output).contains("freightdesk init"));
}

#[test]
fn test_init_scaffolds_project() {
    let tmp = TempDir::new().unwrap();

    let output =
        common::run_freightdesk(tmp.path(), &["init", "--name", "harbor-east"]).unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        common::stderr_of(&output)
    );

    assert!(tmp.path().join(".freightdesk/config.md").exists());
    assert!(tmp.path().join(".freightdesk/criteria.md").exists());
    assert!(tmp.path().join(".freightdesk/visibility.md").exists());
    assert!(tmp.path().join(".freightdesk/orders").is_dir());

    let config = fs::read_to_string(tmp.path().join(".freightdesk/config.md")).unwrap();
    assert!(config.contains("harbor-east"));
    assert!(config.contains("complex_min_threshold: 50"));

    // The scaffolded project lints clean
    let lint = common::run_freightdesk(tmp.path(), &["lint"]).unwrap();
    assert!(lint.status.success(), "stdout: {}", common::stdout_of(&lint));
}

#[test]
fn test_init_minimal_skips_starters() {
    let tmp = TempDir::new().unwrap();

    let output = common::run_freightdesk(
        tmp.path(),
        &["init", "--name", "harbor-east", "--minimal"],
    )
    .unwrap();
    assert!(output.status.success());

    assert!(tmp.path().join(".freightdesk/config.md").exists());
    assert!(!tmp.path().join(".freightdesk/criteria.md").exists());
    assert!(!tmp.path().join(".freightdesk/visibility.md").exists());
}

#[test]
fn test_init_refuses_to_overwrite_without_force() {
    let tmp = TempDir::new().unwrap();
    common::scaffold_project(tmp.path()).unwrap();

    let output = common::run_freightdesk(tmp.path(), &["init", "--name", "again"]).unwrap();
    assert!(!output.status.success());
    assert!(common::stderr_of(&output).contains("--force"));
}
