//! Project initialization: scaffold the `.freightdesk/` directory.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"---
project:
  name: {{name}}
classification:
  # Minimum complexity score classified as the complex tier
  complex_min_threshold: 50
criteria:
  source: file
  path: .freightdesk/criteria.md
watch:
  poll_interval_ms: 2000
  debounce_ms: 300
defaults:
  orders_dir: .freightdesk/orders
---

# Freightdesk configuration

Edit the frontmatter above to tune classification and watch behavior.
"#;

const CRITERIA_TEMPLATE: &str = r#"---
criteria:
  - code: heavy_lift
    name: Heavy lift cargo
    condition: cargo_weight_kg > 25000
    weight: 40
  - code: permit_required
    name: Special permit required
    condition: requires_permit == true
    weight: 30
  - code: oversize
    name: Out-of-gauge dimensions
    condition: cargo_length_m > 12
    weight: 25
  - code: long_transit
    name: Long transit window
    condition: transit_days >= 14
    weight: 15
  - code: difficult_route
    name: Offshore or conflict-zone routing
    condition: route_kind in [offshore, conflict_zone]
    weight: 35
---

# Complexity criteria

Each criterion adds its weight to the complexity score when its condition
holds for the order's attributes. Orders at or above the configured
threshold are priced as complex market.
"#;

const VISIBILITY_TEMPLATE: &str = r#"---
rules:
  - role: viewer
    module: invoices
  - role: viewer
    module: disbursements
  - role: marketing
    module: job_orders
    field: crew_cost
  - role: marketing
    module: job_orders
    field: vendor_rates
  - role: hr
    module: job_orders
    field: revenue
---

# Visibility rules

A rule without a field hides the whole module for that role. Absence of a
rule leaves the field visible; unauthenticated viewers see nothing.
"#;

const SAMPLE_ORDER: &str = r#"---
customer: PT Samudera Agung
origin: Surabaya
destination: Balikpapan
attributes:
  cargo_weight_kg: 30000
  requires_permit: true
  transit_days: 6
---

# Balikpapan generator move

Out-of-gauge generator set; port crane slot to be confirmed.
"#;

pub fn cmd_init(name: Option<String>, force: bool, minimal: bool) -> Result<()> {
    let root = Path::new(".freightdesk");

    if root.exists() && !force {
        if atty::is(atty::Stream::Stdin) {
            let should_overwrite = dialoguer::Confirm::new()
                .with_prompt(".freightdesk already exists. Overwrite?")
                .default(false)
                .interact()?;
            if !should_overwrite {
                println!("Aborted.");
                return Ok(());
            }
        } else {
            anyhow::bail!(".freightdesk already exists. Use --force to overwrite.");
        }
    }

    let project_name = match name {
        Some(name) => name,
        None => prompt_project_name()?,
    };

    fs::create_dir_all(root.join("orders")).context("Failed to create .freightdesk/orders")?;
    fs::create_dir_all(root.join("logs")).context("Failed to create .freightdesk/logs")?;

    let config = CONFIG_TEMPLATE.replace("{{name}}", &project_name);
    fs::write(root.join("config.md"), config).context("Failed to write config.md")?;

    if !minimal {
        fs::write(root.join("criteria.md"), CRITERIA_TEMPLATE)
            .context("Failed to write criteria.md")?;
        fs::write(root.join("visibility.md"), VISIBILITY_TEMPLATE)
            .context("Failed to write visibility.md")?;

        let sample = root.join("orders").join(sample_order_filename());
        fs::write(&sample, SAMPLE_ORDER).context("Failed to write sample order")?;
    }

    println!("{} Initialized freightdesk project '{}'", "✓".green(), project_name.bold());
    println!("  {:<24} project configuration", "config.md".cyan());
    if !minimal {
        println!("  {:<24} starter complexity criteria", "criteria.md".cyan());
        println!("  {:<24} starter visibility rules", "visibility.md".cyan());
        println!("  {:<24} sample job order", "orders/".cyan());
    }
    println!();
    println!("Next: `freightdesk classify --all` to score the sample order.");

    Ok(())
}

fn prompt_project_name() -> Result<String> {
    let detected = std::env::current_dir()
        .ok()
        .and_then(|dir| {
            dir.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "freightdesk".to_string());

    if !atty::is(atty::Stream::Stdin) {
        return Ok(detected);
    }

    let name: String = dialoguer::Input::new()
        .with_prompt("Project name")
        .default(detected)
        .interact_text()?;

    Ok(name)
}

fn sample_order_filename() -> String {
    let date = chrono::Local::now().format("%Y-%m-%d");
    format!("{}-001-smp.md", date)
}
