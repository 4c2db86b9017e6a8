//! Default values and configuration structs with default implementations.

use serde::{Deserialize, Serialize};

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

// =========================================================================
// DEFAULT VALUE FUNCTIONS
// =========================================================================

default_fn!(default_poll_interval_ms, u64, 2000); // 2 seconds
default_fn!(default_debounce_ms, u64, 300);
default_fn!(default_criteria_path, String, crate::paths::CRITERIA_FILE.to_string());
default_fn!(default_http_timeout_ms, u64, 5000); // 5 seconds
default_fn!(default_orders_dir, String, crate::paths::ORDERS_DIR.to_string());

// =========================================================================
// CONFIG STRUCTS WITH DEFAULTS
// =========================================================================

/// Project identity
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProjectConfig {
    /// Agency or branch name
    pub name: String,
}

/// Classification thresholds
///
/// The simple/complex boundary is deliberately not defaulted: a missing
/// threshold must surface as a configuration error, never as a silently
/// assumed tier.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ClassificationConfig {
    /// Minimum complexity score classified as the complex tier
    #[serde(default)]
    pub complex_min_threshold: Option<i64>,
}

impl ClassificationConfig {
    /// The threshold, or a configuration error when absent or negative.
    pub fn require_threshold(&self) -> anyhow::Result<u32> {
        match self.complex_min_threshold {
            Some(value) if value >= 0 => Ok(value as u32),
            Some(value) => anyhow::bail!(
                "classification.complex_min_threshold must be non-negative, got {}",
                value
            ),
            None => anyhow::bail!(
                "classification.complex_min_threshold is not configured; \
                 set it in .freightdesk/config.md before classifying"
            ),
        }
    }
}

/// Where the criteria snapshot is fetched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CriteriaSourceKind {
    /// Read `.freightdesk/criteria.md` on every run
    #[default]
    File,
    /// GET a JSON payload from a configuration service
    Http,
}

/// Criteria source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CriteriaConfig {
    #[serde(default)]
    pub source: CriteriaSourceKind,
    /// Criteria file path (file source); `~` is expanded
    #[serde(default = "default_criteria_path")]
    pub path: String,
    /// Criteria service URL (http source)
    #[serde(default)]
    pub endpoint: Option<String>,
    /// HTTP timeout in milliseconds
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for CriteriaConfig {
    fn default() -> Self {
        Self {
            source: CriteriaSourceKind::default(),
            path: default_criteria_path(),
            endpoint: None,
            timeout_ms: default_http_timeout_ms(),
        }
    }
}

/// Configuration for watch command behavior
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchConfig {
    /// Poll interval in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Trailing-edge debounce window in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Project-level defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DefaultsConfig {
    /// Directory containing job order files
    #[serde(default = "default_orders_dir")]
    pub orders_dir: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            orders_dir: default_orders_dir(),
        }
    }
}
