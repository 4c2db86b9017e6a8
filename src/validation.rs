//! Project lint: configuration, criteria, and visibility rule checks.
//!
//! Lint parses the raw files leniently so every problem is reported as a
//! finding instead of stopping at the first parse error.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::config::Config;
use crate::criteria::Condition;
use crate::role::Role;
use crate::split_frontmatter;

/// Result of linting one project file.
#[derive(Debug)]
pub struct LintFinding {
    /// Which file the finding is about
    pub source: String,
    pub message: String,
}

/// Aggregated lint findings across the project.
#[derive(Debug, Default)]
pub struct LintReport {
    pub findings: Vec<LintFinding>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    fn push(&mut self, source: &str, message: impl Into<String>) {
        self.findings.push(LintFinding {
            source: source.to_string(),
            message: message.into(),
        });
    }
}

/// Lenient criterion entry for lint (weights may be out of range).
#[derive(Debug, Deserialize)]
struct LenientCriterion {
    #[serde(default)]
    code: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    condition: String,
    #[serde(default)]
    weight: i64,
}

#[derive(Debug, Deserialize)]
struct LenientCriteriaFile {
    #[serde(default)]
    criteria: Vec<LenientCriterion>,
}

/// Lenient visibility rule for lint (roles stay as raw strings).
#[derive(Debug, Deserialize)]
struct LenientVisibilityRule {
    #[serde(default)]
    role: String,
    #[serde(default)]
    module: String,
    #[serde(default)]
    field: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LenientVisibilityFile {
    #[serde(default)]
    rules: Vec<LenientVisibilityRule>,
}

/// Lint the whole project: config, criteria file, visibility rules.
pub fn lint_project(
    config_path: &Path,
    criteria_path: &Path,
    visibility_path: &Path,
) -> Result<LintReport> {
    let mut report = LintReport::default();

    lint_config(config_path, &mut report)?;
    lint_criteria(criteria_path, &mut report)?;
    lint_visibility(visibility_path, &mut report)?;

    Ok(report)
}

fn lint_config(path: &Path, report: &mut LintReport) -> Result<()> {
    let source = path.display().to_string();

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    match Config::parse(&content) {
        Ok(config) => {
            if let Err(e) = config.classification.require_threshold() {
                report.push(&source, e.to_string());
            }
        }
        Err(e) => report.push(&source, format!("{:#}", e)),
    }

    Ok(())
}

fn lint_criteria(path: &Path, report: &mut LintReport) -> Result<()> {
    let source = path.display().to_string();

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read criteria from {}", path.display()))?;

    let (frontmatter, _body) = split_frontmatter(&content);
    let Some(frontmatter) = frontmatter else {
        report.push(&source, "No frontmatter found");
        return Ok(());
    };

    let parsed: LenientCriteriaFile = match serde_yaml::from_str(&frontmatter) {
        Ok(parsed) => parsed,
        Err(e) => {
            report.push(&source, format!("Failed to parse criteria: {}", e));
            return Ok(());
        }
    };

    let mut seen_codes = HashSet::new();

    for (index, criterion) in parsed.criteria.iter().enumerate() {
        let label = if criterion.code.is_empty() {
            format!("criterion #{}", index + 1)
        } else {
            format!("criterion '{}'", criterion.code)
        };

        if criterion.code.trim().is_empty() {
            report.push(&source, format!("{} has an empty code", label));
        } else if !seen_codes.insert(criterion.code.clone()) {
            report.push(&source, format!("Duplicate criterion code '{}'", criterion.code));
        }

        if criterion.name.trim().is_empty() {
            report.push(&source, format!("{} has an empty name", label));
        }

        if criterion.weight < 0 {
            report.push(
                &source,
                format!("{} has a negative weight ({})", label, criterion.weight),
            );
        } else if criterion.weight == 0 {
            // Legal but inert: can never affect the score
            report.push(&source, format!("{} has weight 0 and can never fire", label));
        }

        if let Err(e) = Condition::parse(&criterion.code, &criterion.condition) {
            report.push(&source, e.to_string());
        }
    }

    Ok(())
}

fn lint_visibility(path: &Path, report: &mut LintReport) -> Result<()> {
    let source = path.display().to_string();

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read visibility rules from {}", path.display()))?;

    let (frontmatter, _body) = split_frontmatter(&content);
    let Some(frontmatter) = frontmatter else {
        report.push(&source, "No frontmatter found");
        return Ok(());
    };

    let parsed: LenientVisibilityFile = match serde_yaml::from_str(&frontmatter) {
        Ok(parsed) => parsed,
        Err(e) => {
            report.push(&source, format!("Failed to parse visibility rules: {}", e));
            return Ok(());
        }
    };

    let mut seen_rules = HashSet::new();

    for (index, rule) in parsed.rules.iter().enumerate() {
        let label = format!("rule #{}", index + 1);

        if Role::from_str(&rule.role).is_err() {
            report.push(&source, format!("{} names unknown role '{}'", label, rule.role));
        }

        if rule.module.trim().is_empty() {
            report.push(&source, format!("{} has an empty module", label));
        }

        let key = (rule.role.clone(), rule.module.clone(), rule.field.clone());
        if !seen_rules.insert(key) {
            report.push(
                &source,
                format!(
                    "Duplicate rule for ({}, {}{})",
                    rule.role,
                    rule.module,
                    rule.field
                        .as_deref()
                        .map(|f| format!(", {}", f))
                        .unwrap_or_default()
                ),
            );
        }
    }

    Ok(())
}
