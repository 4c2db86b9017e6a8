//! Role/field visibility resolver.
//!
//! A static rule table answers "is this field or module hidden for this
//! role?" by exact lookup. Absence of a rule means visible; the table never
//! fails and performs no I/O. Presentation call sites must go through
//! [`ViewerContext`], which treats a missing role as hidden.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::role::Role;
use crate::split_frontmatter;

/// A single hide rule. With `field` absent the rule hides the whole module,
/// including every field inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisibilityRule {
    pub role: Role,
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VisibilityFileFrontmatter {
    #[serde(default)]
    rules: Vec<VisibilityRule>,
}

/// Immutable rule table, loaded once at process start.
///
/// Lookup semantics are default-allow: an unmatched (role, module, field)
/// is visible. There is no inheritance between roles. This type is safe for
/// library callers that implement their own access policy; the CLI only
/// ever consults it through [`ViewerContext`].
#[derive(Debug, Clone, Default)]
pub struct VisibilityTable {
    module_rules: HashSet<(Role, String)>,
    field_rules: HashSet<(Role, String, String)>,
}

impl VisibilityTable {
    pub fn new(rules: Vec<VisibilityRule>) -> Self {
        let mut module_rules = HashSet::new();
        let mut field_rules = HashSet::new();

        for rule in rules {
            match rule.field {
                Some(field) => {
                    field_rules.insert((rule.role, rule.module, field));
                }
                None => {
                    module_rules.insert((rule.role, rule.module));
                }
            }
        }

        Self {
            module_rules,
            field_rules,
        }
    }

    /// Load the rule table from `.freightdesk/visibility.md`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read visibility rules from {}", path.display()))?;

        let (frontmatter, _body) = split_frontmatter(&content);
        let frontmatter =
            frontmatter.with_context(|| format!("No frontmatter in {}", path.display()))?;

        let parsed: VisibilityFileFrontmatter = serde_yaml::from_str(&frontmatter)
            .with_context(|| format!("Failed to parse visibility rules in {}", path.display()))?;

        Ok(Self::new(parsed.rules))
    }

    /// True iff a module-level hide rule exists for (role, module).
    pub fn is_module_hidden(&self, role: Role, module: &str) -> bool {
        self.module_rules
            .contains(&(role, module.to_string()))
    }

    /// True iff the field is hidden for the role, either by an exact
    /// field-level rule or by a module-wide rule (module hide is strictly
    /// broader).
    pub fn is_field_hidden(&self, role: Role, module: &str, field: &str) -> bool {
        if self.is_module_hidden(role, module) {
            return true;
        }
        self.field_rules
            .contains(&(role, module.to_string(), field.to_string()))
    }

    /// Every field of a module named by a field-level rule, across all
    /// roles. Used for matrix rendering and lint.
    pub fn known_fields(&self, module: &str) -> Vec<String> {
        let mut fields: Vec<String> = self
            .field_rules
            .iter()
            .filter(|(_, m, _)| m == module)
            .map(|(_, _, f)| f.clone())
            .collect();
        fields.sort();
        fields.dedup();
        fields
    }

    /// Every module named by any rule.
    pub fn known_modules(&self) -> Vec<String> {
        let mut modules: Vec<String> = self
            .module_rules
            .iter()
            .map(|(_, m)| m.clone())
            .chain(self.field_rules.iter().map(|(_, m, _)| m.clone()))
            .collect();
        modules.sort();
        modules.dedup();
        modules
    }

    pub fn rule_count(&self) -> usize {
        self.module_rules.len() + self.field_rules.len()
    }
}

/// The viewer's role, injected explicitly instead of read from global state
/// so tests can supply arbitrary roles without setup.
///
/// This is the fail-closed surface: with no role present, everything is
/// hidden regardless of the table's default-allow lookup.
#[derive(Debug, Clone, Copy)]
pub struct ViewerContext {
    role: Option<Role>,
}

impl ViewerContext {
    pub fn new(role: Role) -> Self {
        Self { role: Some(role) }
    }

    pub fn anonymous() -> Self {
        Self { role: None }
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Whether the module may be rendered for this viewer.
    pub fn module_visible(&self, table: &VisibilityTable, module: &str) -> bool {
        match self.role {
            Some(role) => !table.is_module_hidden(role, module),
            None => false,
        }
    }

    /// Whether the field may be rendered for this viewer.
    pub fn field_visible(&self, table: &VisibilityTable, module: &str, field: &str) -> bool {
        match self.role {
            Some(role) => !table.is_field_hidden(role, module, field),
            None => false,
        }
    }
}
