//! Job order parsing and lifecycle.
//!
//! A job order is a markdown file with YAML frontmatter under
//! `.freightdesk/orders/`. The frontmatter carries the shipment attributes
//! the classifier reads, the chosen pricing approach, and the cached latest
//! classification. The cache is never the source of truth: it stores a
//! digest of the inputs that produced it, and any input change makes it
//! stale.

use anyhow::{Context, Result};
use glob::glob;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use crate::attributes::AttributeSet;
use crate::classify::{MarketClassification, MarketType};
use crate::criteria::Criterion;
use crate::market::PricingApproach;
use crate::{split_frontmatter, utc_now_iso};

/// Cached result of the most recent classification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub market_type: MarketType,
    pub complexity_score: u32,
    pub classified_at: String,
    pub inputs_digest: String,
}

impl ClassificationRecord {
    /// Whether the cached result still matches the current inputs.
    pub fn is_stale(&self, current_digest: &str) -> bool {
        self.inputs_digest != current_digest
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderFrontmatter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_approach: Option<PricingApproach>,
    #[serde(default, skip_serializing_if = "AttributeSet::is_empty")]
    pub attributes: AttributeSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<ClassificationRecord>,
}

#[derive(Debug, Clone)]
pub struct JobOrder {
    pub id: String,
    pub frontmatter: OrderFrontmatter,
    pub title: Option<String>,
    pub body: String,
}

impl JobOrder {
    /// Parse an order from file content.
    pub fn parse(id: &str, content: &str) -> Result<Self> {
        let (frontmatter_str, body) = split_frontmatter(content);

        let frontmatter: OrderFrontmatter = if let Some(fm) = frontmatter_str {
            serde_yaml::from_str(&fm).context("Failed to parse order frontmatter")?
        } else {
            OrderFrontmatter::default()
        };

        let title = extract_title(body);

        Ok(Self {
            id: id.to_string(),
            frontmatter,
            title,
            body: body.to_string(),
        })
    }

    /// Load an order from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read order from {}", path.display()))?;

        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid order filename"))?;

        Self::parse(id, &content)
    }

    /// Save the order to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let frontmatter = serde_yaml::to_string(&self.frontmatter)?;
        let content = format!("---\n{}---\n\n{}\n", frontmatter, self.body.trim_end());
        let tmp_path = path.with_extension("md.tmp");
        fs::write(&tmp_path, &content)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// The attribute set the classifier reads.
    pub fn attributes(&self) -> &AttributeSet {
        &self.frontmatter.attributes
    }

    /// Record a fresh classification result against the inputs digest that
    /// produced it.
    pub fn apply_classification(&mut self, result: &MarketClassification, inputs_digest: String) {
        self.frontmatter.classification = Some(ClassificationRecord {
            market_type: result.market_type,
            complexity_score: result.complexity_score,
            classified_at: utc_now_iso(),
            inputs_digest,
        });
    }

    /// The cached classification, only if it still matches the digest.
    pub fn fresh_classification(&self, current_digest: &str) -> Option<&ClassificationRecord> {
        self.frontmatter
            .classification
            .as_ref()
            .filter(|record| !record.is_stale(current_digest))
    }

    pub fn has_pricing_approach(&self) -> bool {
        self.frontmatter.pricing_approach.is_some()
    }
}

fn extract_title(body: &str) -> Option<String> {
    for line in body.lines() {
        let trimmed = line.trim();
        if let Some(title) = trimmed.strip_prefix("# ") {
            return Some(title.to_string());
        }
    }
    None
}

/// Digest of everything a classification run depends on: the attributes,
/// the criteria snapshot, and the threshold. Any change to any of them
/// changes the digest.
pub fn inputs_digest(attributes: &AttributeSet, criteria: &[Criterion], threshold: u32) -> String {
    let mut hasher = Sha256::new();

    for (name, value) in attributes.iter() {
        hasher.update(name.as_bytes());
        hasher.update(b"=");
        hasher.update(value.to_string().as_bytes());
        hasher.update(b";");
    }
    hasher.update(b"|");
    for criterion in criteria {
        hasher.update(criterion.code.as_bytes());
        hasher.update(b"~");
        hasher.update(criterion.condition.to_string().as_bytes());
        hasher.update(b"~");
        hasher.update(criterion.weight.to_string().as_bytes());
        hasher.update(b";");
    }
    hasher.update(b"|");
    hasher.update(threshold.to_string().as_bytes());

    format!("{:x}", hasher.finalize())
}

/// Load every order file in the directory, sorted by ID.
pub fn load_all_orders(orders_dir: &Path) -> Result<Vec<JobOrder>> {
    let pattern = orders_dir.join("*.md");
    let pattern = pattern
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid orders directory path"))?;

    let mut orders = Vec::new();
    for entry in glob(pattern).context("Failed to list order files")? {
        let path = entry.context("Failed to read order directory entry")?;
        let order = JobOrder::load(&path)?;
        orders.push(order);
    }

    orders.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(orders)
}

/// Path of an order file inside the orders directory.
pub fn order_path(orders_dir: &Path, id: &str) -> PathBuf {
    orders_dir.join(format!("{}.md", id))
}
