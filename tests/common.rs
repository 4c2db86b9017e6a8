//! Common test helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub const CONFIG: &str = r#"---
project:
  name: test-agency
classification:
  complex_min_threshold: 50
criteria:
  source: file
  path: .freightdesk/criteria.md
---

# Config
"#;

pub const CRITERIA: &str = r#"---
criteria:
  - code: heavy_lift
    name: Heavy lift cargo
    condition: cargo_weight_kg > 25000
    weight: 40
  - code: permit_required
    name: Special permit required
    condition: requires_permit == true
    weight: 30
---

# Criteria
"#;

pub const VISIBILITY: &str = r#"---
rules:
  - role: viewer
    module: invoices
  - role: marketing
    module: job_orders
    field: crew_cost
---

# Visibility
"#;

/// Scaffold a freightdesk project inside a test directory.
pub fn scaffold_project(dir: &Path) -> std::io::Result<()> {
    let root = dir.join(".freightdesk");
    fs::create_dir_all(root.join("orders"))?;
    fs::write(root.join("config.md"), CONFIG)?;
    fs::write(root.join("criteria.md"), CRITERIA)?;
    fs::write(root.join("visibility.md"), VISIBILITY)?;
    Ok(())
}

/// Write an order file and return its ID.
pub fn write_order(dir: &Path, id: &str, content: &str) -> std::io::Result<String> {
    let path = dir.join(".freightdesk/orders").join(format!("{}.md", id));
    fs::write(path, content)?;
    Ok(id.to_string())
}

pub fn freightdesk_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_freightdesk"))
}

/// Run the freightdesk binary inside the given project directory.
pub fn run_freightdesk(dir: &Path, args: &[&str]) -> std::io::Result<Output> {
    Command::new(freightdesk_binary())
        .args(args)
        .current_dir(dir)
        .output()
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
