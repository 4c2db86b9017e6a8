//! Order add/list/show

use crate::common;

use tempfile::TempDir;

#[test]
fn test_add_creates_order_file() {
    let tmp = TempDir::new().unwrap();
    common::scaffold_project(tmp.path()).unwrap();

    let output = common::run_freightdesk(
        tmp.path(),
        &[
            "add",
            "Balikpapan generator move",
            "--customer",
            "PT Samudera Agung",
            "--origin",
            "Surabaya",
            "--destination",
            "Balikpapan",
            "--attr",
            "cargo_weight_kg=30000",
            "--attr",
            "requires_permit=true",
        ],
    )
    .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        common::stderr_of(&output)
    );
    assert!(common::stdout_of(&output).contains("Created order"));

    let orders: Vec<_> = std::fs::read_dir(tmp.path().join(".freightdesk/orders"))
        .unwrap()
        .collect();
    assert_eq!(orders.len(), 1);

    let content =
        std::fs::read_to_string(orders[0].as_ref().unwrap().path()).unwrap();
    assert!(content.contains("customer: PT Samudera Agung"));
    assert!(content.contains("cargo_weight_kg: 30000"));
    assert!(content.contains("requires_permit: true"));
    assert!(content.contains("# Balikpapan generator move"));
}

#[test]
fn test_add_rejects_bad_attr() {
    let tmp = TempDir::new().unwrap();
    common::scaffold_project(tmp.path()).unwrap();

    let output = common::run_freightdesk(
        tmp.path(),
        &["add", "Bad order", "--attr", "no-equals-sign"],
    )
    .unwrap();
    assert!(!output.status.success());
    assert!(common::stderr_of(&output).contains("key=value"));
}

#[test]
fn test_list_and_count() {
    let tmp = TempDir::new().unwrap();
    common::scaffold_project(tmp.path()).unwrap();
    common::write_order(
        tmp.path(),
        "2026-08-08-001-aaa",
        "---\nattributes:\n  cargo_weight_kg: 1000\n---\n\n# Small move\n",
    )
    .unwrap();
    common::write_order(
        tmp.path(),
        "2026-08-08-002-bbb",
        "---\nattributes:\n  cargo_weight_kg: 90000\n---\n\n# Large move\n",
    )
    .unwrap();

    let output = common::run_freightdesk(tmp.path(), &["list"]).unwrap();
    assert!(output.status.success());
    let stdout = common::stdout_of(&output);
    assert!(stdout.contains("Small move"));
    assert!(stdout.contains("Large move"));
    assert!(stdout.contains("unclassified"));

    let count = common::run_freightdesk(tmp.path(), &["list", "--count"]).unwrap();
    assert_eq!(common::stdout_of(&count).trim(), "2");
}

#[test]
fn test_list_market_filter_after_classify() {
    let tmp = TempDir::new().unwrap();
    common::scaffold_project(tmp.path()).unwrap();
    common::write_order(
        tmp.path(),
        "2026-08-08-001-aaa",
        "---\nattributes:\n  cargo_weight_kg: 30000\n  requires_permit: true\n---\n\n# Heavy\n",
    )
    .unwrap();
    common::write_order(
        tmp.path(),
        "2026-08-08-002-bbb",
        "---\nattributes:\n  cargo_weight_kg: 1000\n---\n\n# Light\n",
    )
    .unwrap();

    let classify =
        common::run_freightdesk(tmp.path(), &["classify", "--all", "--quiet"]).unwrap();
    assert!(classify.status.success());

    let complex = common::run_freightdesk(tmp.path(), &["list", "--market", "complex"]).unwrap();
    let stdout = common::stdout_of(&complex);
    assert!(stdout.contains("Heavy"));
    assert!(!stdout.contains("Light"));

    let unclassified =
        common::run_freightdesk(tmp.path(), &["list", "--unclassified", "--count"]).unwrap();
    assert_eq!(common::stdout_of(&unclassified).trim(), "0");
}

#[test]
fn test_show_order_details() {
    let tmp = TempDir::new().unwrap();
    common::scaffold_project(tmp.path()).unwrap();
    common::write_order(
        tmp.path(),
        "2026-08-08-001-aaa",
        r#"---
customer: Meratus Line
origin: Surabaya
destination: Balikpapan
attributes:
  cargo_weight_kg: 30000
---

# Rig move

Crane slot booked for Friday.
"#,
    )
    .unwrap();

    let output = common::run_freightdesk(tmp.path(), &["show", "aaa"]).unwrap();
    assert!(output.status.success());
    let stdout = common::stdout_of(&output);
    assert!(stdout.contains("Rig move"));
    assert!(stdout.contains("Meratus Line"));
    assert!(stdout.contains("Surabaya"));
    assert!(stdout.contains("cargo_weight_kg"));
    assert!(!stdout.contains("Crane slot booked"));

    let with_body = common::run_freightdesk(tmp.path(), &["show", "aaa", "--body"]).unwrap();
    assert!(common::stdout_of(&with_body).contains("Crane slot booked"));
}
