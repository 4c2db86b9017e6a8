//! Lint command: validate config, criteria, and visibility rules.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use freightdesk::validation::lint_project;

pub fn cmd_lint() -> Result<()> {
    let report = lint_project(
        Path::new(freightdesk::paths::CONFIG_FILE),
        Path::new(freightdesk::paths::CRITERIA_FILE),
        Path::new(freightdesk::paths::VISIBILITY_FILE),
    )?;

    if report.is_clean() {
        println!("{} Project configuration is clean", "✓".green());
        return Ok(());
    }

    println!(
        "{} {} finding(s)",
        "✗".red(),
        report.findings.len().to_string().bold()
    );
    println!();

    for finding in &report.findings {
        println!("  {} {}", finding.source.cyan(), finding.message);
    }

    anyhow::bail!("lint failed");
}
