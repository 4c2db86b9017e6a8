//! # Freightdesk - Market Classification & Role Visibility
//!
//! Freightdesk is the pricing-desk rules engine for a freight-forwarding
//! agency: it scores proposed job orders against weighted complexity
//! criteria and resolves which modules and fields each organizational role
//! may see.
//!
//! ## Overview
//!
//! Job orders are markdown files with YAML frontmatter stored under
//! `.freightdesk/orders/`. Complexity criteria and visibility rules are
//! configuration files with the same frontmatter convention, so the whole
//! rule set lives in the repository alongside the orders it governs.
//!
//! ## Core Concepts
//!
//! - **Criteria**: weighted predicates over cargo/route attributes
//! - **Classification**: the simple/complex market tier derived from a score
//! - **Visibility rules**: role-to-module/field hide table for render layers
//!
//! ## Modules
//!
//! - [`classify`] - Pure scoring and market-tier classification
//! - [`criteria`] - Criterion model, condition grammar, criteria sources
//! - [`visibility`] - Role/field visibility resolver and viewer context
//! - [`market`] - Pricing-approach transition state machine
//! - [`order`] - Job-order file parsing and lifecycle
//! - [`config`] - Configuration management for freightdesk projects
//! - [`id`] - Order ID generation with date-based sequencing
//! - [`debounce`] - Trailing-edge coalescing for interactive re-evaluation
//!
//! ## Example
//!
//! ```no_run
//! use freightdesk::classify::classify;
//! use freightdesk::criteria::{CriteriaSource, FileCriteriaSource};
//! use freightdesk::config::Config;
//! use freightdesk::order::JobOrder;
//! use std::path::Path;
//!
//! let config = Config::load().expect("Failed to load config");
//! let threshold = config.classification.require_threshold().expect("No threshold");
//!
//! let order = JobOrder::load(Path::new(".freightdesk/orders/2026-08-08-001-q7e.md"))
//!     .expect("Failed to load order");
//!
//! let source = FileCriteriaSource::new(Path::new(".freightdesk/criteria.md"));
//! let criteria = source.fetch().expect("Criteria unavailable");
//!
//! let result = classify(order.attributes(), &criteria, threshold);
//! println!("{}: {}", result.market_type, result.complexity_score);
//! ```

// Re-export all public modules
pub mod attributes;
pub mod classify;
pub mod config;
pub mod criteria;
pub mod debounce;
pub mod formatters;
pub mod id;
pub mod market;
pub mod order;
pub mod role;
pub mod validation;
pub mod visibility;

/// Default path constants for the freightdesk directory structure.
pub mod paths {
    /// Directory containing job order files: `.freightdesk/orders`
    pub const ORDERS_DIR: &str = ".freightdesk/orders";
    /// Project configuration file: `.freightdesk/config.md`
    pub const CONFIG_FILE: &str = ".freightdesk/config.md";
    /// Complexity criteria file: `.freightdesk/criteria.md`
    pub const CRITERIA_FILE: &str = ".freightdesk/criteria.md";
    /// Visibility rules file: `.freightdesk/visibility.md`
    pub const VISIBILITY_FILE: &str = ".freightdesk/visibility.md";
    /// Directory containing watch logs: `.freightdesk/logs`
    pub const LOGS_DIR: &str = ".freightdesk/logs";
}

/// Generate a UTC timestamp in ISO 8601 format: `YYYY-MM-DDTHH:MM:SSZ`
///
/// This function uses `chrono::Utc::now()` to ensure the timestamp is truly in UTC,
/// not local time with a misleading `Z` suffix.
pub fn utc_now_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Split content into frontmatter and body.
///
/// If the content starts with `---`, extracts the YAML frontmatter between
/// the first and second `---` delimiters, and returns the body after.
/// Otherwise returns None for frontmatter and the entire content as body.
pub fn split_frontmatter(content: &str) -> (Option<String>, &str) {
    let content = content.trim();

    if !content.starts_with("---") {
        return (None, content);
    }

    let rest = &content[3..];
    if let Some(end) = rest.find("---") {
        let frontmatter = rest[..end].to_string();
        let body = rest[end + 3..].trim_start();
        (Some(frontmatter), body)
    } else {
        (None, content)
    }
}
