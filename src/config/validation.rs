//! Validation logic for configuration sections.

use anyhow::Result;
use url::Url;

use super::defaults::{ClassificationConfig, CriteriaConfig, CriteriaSourceKind, WatchConfig};

impl WatchConfig {
    /// Validate watch configuration
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            anyhow::bail!("watch.poll_interval_ms must be greater than 0");
        }

        if self.debounce_ms == 0 {
            anyhow::bail!("watch.debounce_ms must be greater than 0");
        }

        Ok(())
    }
}

impl CriteriaConfig {
    /// Validate criteria source configuration
    pub fn validate(&self) -> Result<()> {
        match self.source {
            CriteriaSourceKind::File => {
                if self.path.trim().is_empty() {
                    anyhow::bail!("criteria.path must not be empty for a file source");
                }
            }
            CriteriaSourceKind::Http => {
                let endpoint = self.endpoint.as_deref().unwrap_or("");
                if endpoint.is_empty() {
                    anyhow::bail!("criteria.endpoint is required when criteria.source is http");
                }
                Url::parse(endpoint).map_err(|e| {
                    anyhow::anyhow!("criteria.endpoint '{}' is not a valid URL: {}", endpoint, e)
                })?;
            }
        }

        if self.timeout_ms == 0 {
            anyhow::bail!("criteria.timeout_ms must be greater than 0");
        }

        Ok(())
    }
}

impl ClassificationConfig {
    /// Validate classification configuration. A missing threshold is legal
    /// here (it blocks classification, not config loading); a negative one
    /// is not.
    pub fn validate(&self) -> Result<()> {
        if let Some(threshold) = self.complex_min_threshold {
            if threshold < 0 {
                anyhow::bail!(
                    "classification.complex_min_threshold must be non-negative, got {}",
                    threshold
                );
            }
        }

        Ok(())
    }
}
