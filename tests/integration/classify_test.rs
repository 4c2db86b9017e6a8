//! Classification workflow

use crate::common;

use std::fs;
use tempfile::TempDir;

const HEAVY_ORDER: &str = r#"---
customer: PT Samudera Agung
attributes:
  cargo_weight_kg: 30000
  requires_permit: true
---

# Balikpapan generator move
"#;

const LIGHT_ORDER: &str = r#"---
attributes:
  cargo_weight_kg: 8000
  requires_permit: false
---

# Container top-up
"#;

#[test]
fn test_classify_complex_order_and_persist() {
    let tmp = TempDir::new().unwrap();
    common::scaffold_project(tmp.path()).unwrap();
    common::write_order(tmp.path(), "2026-08-08-001-aaa", HEAVY_ORDER).unwrap();

    let output = common::run_freightdesk(tmp.path(), &["classify", "2026-08-08-001-aaa"]).unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        common::stderr_of(&output)
    );

    let stdout = common::stdout_of(&output);
    assert!(stdout.contains("70"));
    assert!(stdout.contains("complex"));
    assert!(stdout.contains("heavy_lift"));
    assert!(stdout.contains("permit_required"));
    // Entering complex with no pricing approach suggests premium
    assert!(stdout.contains("premium"));

    // The classification record is persisted to the order file
    let saved = fs::read_to_string(
        tmp.path()
            .join(".freightdesk/orders/2026-08-08-001-aaa.md"),
    )
    .unwrap();
    assert!(saved.contains("market_type: complex"));
    assert!(saved.contains("complexity_score: 70"));
    assert!(saved.contains("inputs_digest:"));
}

#[test]
fn test_classify_simple_order() {
    let tmp = TempDir::new().unwrap();
    common::scaffold_project(tmp.path()).unwrap();
    common::write_order(tmp.path(), "2026-08-08-001-bbb", LIGHT_ORDER).unwrap();

    let output = common::run_freightdesk(tmp.path(), &["classify", "2026-08-08-001-bbb"]).unwrap();
    assert!(output.status.success());

    let stdout = common::stdout_of(&output);
    assert!(stdout.contains("simple"));
    assert!(stdout.contains("no criteria triggered"));
    assert!(!stdout.contains("premium"));
}

#[test]
fn test_classify_json_output() {
    let tmp = TempDir::new().unwrap();
    common::scaffold_project(tmp.path()).unwrap();
    common::write_order(tmp.path(), "2026-08-08-001-ccc", HEAVY_ORDER).unwrap();

    let output = common::run_freightdesk(
        tmp.path(),
        &["classify", "2026-08-08-001-ccc", "--json"],
    )
    .unwrap();
    assert!(output.status.success());

    let stdout = common::stdout_of(&output);
    let event: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(event["order"], "2026-08-08-001-ccc");
    assert_eq!(event["complexity_score"], 70);
    assert_eq!(event["market_type"], "complex");
    assert_eq!(event["suggested_pricing"], "premium");
    assert_eq!(event["complexity_factors"].as_array().unwrap().len(), 2);
}

#[test]
fn test_classify_all_orders() {
    let tmp = TempDir::new().unwrap();
    common::scaffold_project(tmp.path()).unwrap();
    common::write_order(tmp.path(), "2026-08-08-001-aaa", HEAVY_ORDER).unwrap();
    common::write_order(tmp.path(), "2026-08-08-002-bbb", LIGHT_ORDER).unwrap();

    let output = common::run_freightdesk(tmp.path(), &["classify", "--all", "--quiet"]).unwrap();
    assert!(output.status.success());

    let heavy = fs::read_to_string(
        tmp.path()
            .join(".freightdesk/orders/2026-08-08-001-aaa.md"),
    )
    .unwrap();
    let light = fs::read_to_string(
        tmp.path()
            .join(".freightdesk/orders/2026-08-08-002-bbb.md"),
    )
    .unwrap();
    assert!(heavy.contains("market_type: complex"));
    assert!(light.contains("market_type: simple"));
}

#[test]
fn test_premium_not_suggested_when_pricing_chosen() {
    let tmp = TempDir::new().unwrap();
    common::scaffold_project(tmp.path()).unwrap();
    common::write_order(
        tmp.path(),
        "2026-08-08-001-ddd",
        r#"---
pricing_approach: custom
attributes:
  cargo_weight_kg: 30000
  requires_permit: true
---

# Pre-priced move
"#,
    )
    .unwrap();

    let output = common::run_freightdesk(tmp.path(), &["classify", "2026-08-08-001-ddd"]).unwrap();
    assert!(output.status.success());
    assert!(!common::stdout_of(&output).contains("premium"));
}

#[test]
fn test_missing_criteria_is_classification_unavailable() {
    let tmp = TempDir::new().unwrap();
    common::scaffold_project(tmp.path()).unwrap();
    common::write_order(tmp.path(), "2026-08-08-001-eee", HEAVY_ORDER).unwrap();
    fs::remove_file(tmp.path().join(".freightdesk/criteria.md")).unwrap();

    let output = common::run_freightdesk(tmp.path(), &["classify", "2026-08-08-001-eee"]).unwrap();
    assert!(!output.status.success());
    assert!(common::stdout_of(&output).contains("classification unavailable"));

    // No default tier was written
    let saved = fs::read_to_string(
        tmp.path()
            .join(".freightdesk/orders/2026-08-08-001-eee.md"),
    )
    .unwrap();
    assert!(!saved.contains("market_type"));
}

#[test]
fn test_missing_threshold_refuses_to_classify() {
    let tmp = TempDir::new().unwrap();
    common::scaffold_project(tmp.path()).unwrap();
    common::write_order(tmp.path(), "2026-08-08-001-fff", HEAVY_ORDER).unwrap();
    fs::write(
        tmp.path().join(".freightdesk/config.md"),
        "---\nproject:\n  name: test-agency\n---\n",
    )
    .unwrap();

    let output = common::run_freightdesk(tmp.path(), &["classify", "2026-08-08-001-fff"]).unwrap();
    assert!(!output.status.success());
    assert!(common::stderr_of(&output).contains("complex_min_threshold"));
}

#[test]
fn test_partial_id_resolution() {
    let tmp = TempDir::new().unwrap();
    common::scaffold_project(tmp.path()).unwrap();
    common::write_order(tmp.path(), "2026-08-08-001-ggg", HEAVY_ORDER).unwrap();

    let output = common::run_freightdesk(tmp.path(), &["classify", "ggg"]).unwrap();
    assert!(output.status.success());
    assert!(common::stdout_of(&output).contains("2026-08-08-001-ggg"));
}
