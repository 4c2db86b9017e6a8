//! Visibility resolution through the CLI

use crate::common;

use tempfile::TempDir;

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    common::scaffold_project(tmp.path()).unwrap();
    tmp
}

#[test]
fn test_module_hidden_for_viewer() {
    let tmp = project();

    let output =
        common::run_freightdesk(tmp.path(), &["visibility", "invoices", "viewer"]).unwrap();
    assert!(output.status.success());
    assert!(common::stdout_of(&output).contains("hidden"));
}

#[test]
fn test_module_visible_for_unmatched_role() {
    let tmp = project();

    let output =
        common::run_freightdesk(tmp.path(), &["visibility", "invoices", "finance"]).unwrap();
    assert!(output.status.success());
    assert!(common::stdout_of(&output).contains("visible"));
}

#[test]
fn test_field_rule_hides_field() {
    let tmp = project();

    let output = common::run_freightdesk(
        tmp.path(),
        &["visibility", "job_orders", "marketing", "--field", "crew_cost"],
    )
    .unwrap();
    assert!(output.status.success());
    assert!(common::stdout_of(&output).contains("hidden"));

    // The same field is visible to an unmatched role
    let other = common::run_freightdesk(
        tmp.path(),
        &["visibility", "job_orders", "operations", "--field", "crew_cost"],
    )
    .unwrap();
    assert!(common::stdout_of(&other).contains("visible"));
}

#[test]
fn test_module_hide_covers_all_fields() {
    let tmp = project();

    let output = common::run_freightdesk(
        tmp.path(),
        &["visibility", "invoices", "viewer", "--field", "any_field_at_all"],
    )
    .unwrap();
    assert!(output.status.success());
    assert!(common::stdout_of(&output).contains("hidden"));
}

#[test]
fn test_anonymous_viewer_is_fail_closed() {
    let tmp = project();

    // No rule hides job_orders, but an anonymous viewer sees nothing
    let output = common::run_freightdesk(
        tmp.path(),
        &["visibility", "job_orders", "--anonymous"],
    )
    .unwrap();
    assert!(output.status.success());
    let stdout = common::stdout_of(&output);
    assert!(stdout.contains("anonymous"));
    assert!(stdout.contains("hidden"));
}

#[test]
fn test_unknown_role_is_an_error() {
    let tmp = project();

    let output =
        common::run_freightdesk(tmp.path(), &["visibility", "invoices", "warehouse"]).unwrap();
    assert!(!output.status.success());
    assert!(common::stderr_of(&output).contains("warehouse"));
}

#[test]
fn test_fields_matrix() {
    let tmp = project();

    let output = common::run_freightdesk(tmp.path(), &["fields", "job_orders"]).unwrap();
    assert!(output.status.success());
    let stdout = common::stdout_of(&output);
    assert!(stdout.contains("marketing"));
    assert!(stdout.contains("crew_cost"));
    // Every role row is rendered
    assert!(stdout.contains("owner"));
    assert!(stdout.contains("viewer"));
}

#[test]
fn test_fields_matrix_single_role() {
    let tmp = project();

    let output =
        common::run_freightdesk(tmp.path(), &["fields", "invoices", "--role", "viewer"]).unwrap();
    assert!(output.status.success());
    let stdout = common::stdout_of(&output);
    assert!(stdout.contains("viewer"));
    assert!(!stdout.contains("owner"));
}
