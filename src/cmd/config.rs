//! Config command: print the effective merged configuration.

use anyhow::Result;
use colored::Colorize;

use freightdesk::config::{Config, CriteriaSourceKind};

pub fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Effective configuration".bold());
    println!("═══════════════════════");
    println!();
    println!("  {:<28} {}", "project.name:", config.project.name);

    match config.classification.complex_min_threshold {
        Some(threshold) => {
            println!("  {:<28} {}", "complex_min_threshold:", threshold)
        }
        None => println!(
            "  {:<28} {}",
            "complex_min_threshold:",
            "(not set - classification will fail)".red()
        ),
    }

    match config.criteria.source {
        CriteriaSourceKind::File => {
            println!("  {:<28} file", "criteria.source:");
            println!("  {:<28} {}", "criteria.path:", config.criteria.path);
        }
        CriteriaSourceKind::Http => {
            println!("  {:<28} http", "criteria.source:");
            println!(
                "  {:<28} {}",
                "criteria.endpoint:",
                config.criteria.endpoint.as_deref().unwrap_or("(unset)")
            );
            println!("  {:<28} {}ms", "criteria.timeout:", config.criteria.timeout_ms);
        }
    }

    println!("  {:<28} {}ms", "watch.poll_interval:", config.watch.poll_interval_ms);
    println!("  {:<28} {}ms", "watch.debounce:", config.watch.debounce_ms);
    println!("  {:<28} {}", "defaults.orders_dir:", config.defaults.orders_dir);

    Ok(())
}
