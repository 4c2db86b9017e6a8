//! Configuration management for freightdesk projects.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::criteria::{CriteriaSource, FileCriteriaSource, HttpCriteriaSource};
use crate::split_frontmatter;

pub mod defaults;
pub mod validation;

pub use defaults::*;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub project: ProjectConfig,
    #[serde(default)]
    pub classification: ClassificationConfig,
    #[serde(default)]
    pub criteria: CriteriaConfig,
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

impl Config {
    /// Load configuration with full merge semantics.
    /// Merge order (later overrides earlier):
    /// 1. Global config (~/.config/freightdesk/config.md)
    /// 2. Project config (.freightdesk/config.md)
    pub fn load() -> Result<Self> {
        Self::load_merged_from(
            global_config_path().as_deref(),
            Path::new(crate::paths::CONFIG_FILE),
        )
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        // Extract YAML frontmatter using shared function
        let (frontmatter, _body) = split_frontmatter(content);
        let frontmatter = frontmatter.context("Failed to extract frontmatter from config")?;

        let config: Config =
            serde_yaml::from_str(&frontmatter).context("Failed to parse config frontmatter")?;

        // Structural checks; the missing-threshold case is deferred to use
        config.watch.validate()?;
        config.criteria.validate()?;
        config.classification.validate()?;

        Ok(config)
    }

    /// Load merged configuration from specified global and project config
    /// paths. Project values override global values.
    pub fn load_merged_from(global_path: Option<&Path>, project_path: &Path) -> Result<Self> {
        // Load global config if it exists
        let global_config = global_path
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        // Load project config as partial (required, but as partial for merging)
        let project_config = PartialConfig::load_from(project_path)?;

        let config = global_config.merge_with(project_config);

        config.watch.validate()?;
        config.criteria.validate()?;
        config.classification.validate()?;

        Ok(config)
    }

    /// Orders directory as a path, with `~` expanded.
    pub fn orders_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.defaults.orders_dir).into_owned())
    }

    /// Build the configured criteria source.
    pub fn criteria_source(&self) -> Box<dyn CriteriaSource> {
        match self.criteria.source {
            CriteriaSourceKind::File => {
                let path = shellexpand::tilde(&self.criteria.path).into_owned();
                Box::new(FileCriteriaSource::new(Path::new(&path)))
            }
            CriteriaSourceKind::Http => {
                let endpoint = self.criteria.endpoint.as_deref().unwrap_or_default();
                Box::new(HttpCriteriaSource::new(
                    endpoint,
                    Duration::from_millis(self.criteria.timeout_ms),
                ))
            }
        }
    }
}

/// Returns the path to the global config file at ~/.config/freightdesk/config.md
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config/freightdesk/config.md"))
}

/// Partial config for merging - all fields optional
#[derive(Debug, Deserialize, Default)]
struct PartialConfig {
    pub project: Option<PartialProjectConfig>,
    pub classification: Option<ClassificationConfig>,
    pub criteria: Option<CriteriaConfig>,
    pub watch: Option<WatchConfig>,
    pub defaults: Option<PartialDefaultsConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct PartialProjectConfig {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct PartialDefaultsConfig {
    pub orders_dir: Option<String>,
}

impl PartialConfig {
    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        let (frontmatter, _body) = split_frontmatter(content);
        let frontmatter = frontmatter.context("Failed to extract frontmatter from config")?;

        serde_yaml::from_str(&frontmatter).context("Failed to parse config frontmatter")
    }

    /// Merge this global config with a project config, returning the merged result.
    /// Values from the project config take precedence over global.
    fn merge_with(self, project: PartialConfig) -> Config {
        let global_project = self.project.unwrap_or_default();
        let global_defaults = self.defaults.unwrap_or_default();
        let project_project = project.project.unwrap_or_default();
        let project_defaults = project.defaults.unwrap_or_default();

        Config {
            project: ProjectConfig {
                // Project name is required in project config
                name: project_project
                    .name
                    .or(global_project.name)
                    .unwrap_or_default(),
            },
            // Classification: project overrides global, or use default
            classification: project
                .classification
                .or(self.classification)
                .unwrap_or_default(),
            // Criteria source: project overrides global, or use default
            criteria: project.criteria.or(self.criteria).unwrap_or_default(),
            // Watch config: project overrides global, or use default
            watch: project.watch.or(self.watch).unwrap_or_default(),
            defaults: DefaultsConfig {
                orders_dir: project_defaults
                    .orders_dir
                    .or(global_defaults.orders_dir)
                    .unwrap_or_else(defaults::default_orders_dir),
            },
        }
    }
}
