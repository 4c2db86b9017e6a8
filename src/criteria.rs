//! Complexity criteria: the weighted predicates a job order is scored against.
//!
//! Criteria are external configuration, fetched fresh for every
//! classification run so each run sees one consistent snapshot. A fetch
//! failure is an error; an empty criteria list is a valid configuration
//! state and must not be conflated with one.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::attributes::{AttributeSet, AttributeValue};
use crate::split_frontmatter;

/// JSON Schema for criteria payloads served over HTTP.
const CRITERIA_SCHEMA: &str = include_str!("criteria_schema.json");

#[derive(Debug)]
pub enum CriterionError {
    MalformedCondition { code: String, condition: String },
    EmptyCode,
    NonNumericOperand { code: String, condition: String },
}

impl fmt::Display for CriterionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriterionError::MalformedCondition { code, condition } => {
                write!(f, "Criterion '{}' has a malformed condition: '{}'", code, condition)
            }
            CriterionError::EmptyCode => write!(f, "Criterion has an empty code"),
            CriterionError::NonNumericOperand { code, condition } => write!(
                f,
                "Criterion '{}' compares with an ordering operator but a non-numeric operand: '{}'",
                code, condition
            ),
        }
    }
}

impl std::error::Error for CriterionError {}

/// Comparison operator in a criterion condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

impl Comparator {
    fn parse(op: &str) -> Option<Comparator> {
        match op {
            ">" => Some(Comparator::Gt),
            ">=" => Some(Comparator::Ge),
            "<" => Some(Comparator::Lt),
            "<=" => Some(Comparator::Le),
            "==" => Some(Comparator::Eq),
            "!=" => Some(Comparator::Ne),
            _ => None,
        }
    }

    fn is_ordering(&self) -> bool {
        matches!(
            self,
            Comparator::Gt | Comparator::Ge | Comparator::Lt | Comparator::Le
        )
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparator::Gt => write!(f, ">"),
            Comparator::Ge => write!(f, ">="),
            Comparator::Lt => write!(f, "<"),
            Comparator::Le => write!(f, "<="),
            Comparator::Eq => write!(f, "=="),
            Comparator::Ne => write!(f, "!="),
        }
    }
}

/// A parsed predicate over a single attribute.
///
/// Grammar accepted from configuration:
///
/// ```text
/// cargo_weight_kg > 25000
/// transit_days >= 14
/// requires_permit == true
/// destination_region != domestic
/// route_kind in [offshore, conflict_zone]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Compare {
        attribute: String,
        op: Comparator,
        operand: AttributeValue,
    },
    In {
        attribute: String,
        values: Vec<AttributeValue>,
    },
}

impl Condition {
    /// Parse a condition string. Malformed text is a configuration error,
    /// reported with the offending criterion code; it is never skipped.
    pub fn parse(code: &str, input: &str) -> Result<Condition, CriterionError> {
        let malformed = || CriterionError::MalformedCondition {
            code: code.to_string(),
            condition: input.to_string(),
        };

        let in_re = Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s+in\s+\[(.*)\]$").unwrap();
        let cmp_re = Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*(>=|<=|==|!=|>|<)\s*(.+)$").unwrap();

        let input = input.trim();

        if let Some(caps) = in_re.captures(input) {
            let attribute = caps[1].to_string();
            let list = caps[2].trim();
            if list.is_empty() {
                return Err(malformed());
            }
            let values = list
                .split(',')
                .map(|item| parse_operand(item.trim()))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(malformed)?;
            return Ok(Condition::In { attribute, values });
        }

        if let Some(caps) = cmp_re.captures(input) {
            let attribute = caps[1].to_string();
            let op = Comparator::parse(&caps[2]).ok_or_else(malformed)?;
            let operand = parse_operand(caps[3].trim()).ok_or_else(malformed)?;
            if op.is_ordering() && operand.as_number().is_none() {
                return Err(CriterionError::NonNumericOperand {
                    code: code.to_string(),
                    condition: input.to_string(),
                });
            }
            return Ok(Condition::Compare {
                attribute,
                op,
                operand,
            });
        }

        Err(malformed())
    }

    /// The attribute this condition reads.
    pub fn attribute(&self) -> &str {
        match self {
            Condition::Compare { attribute, .. } => attribute,
            Condition::In { attribute, .. } => attribute,
        }
    }

    /// Evaluate against an attribute set.
    ///
    /// Returns the actual attribute value when the condition triggers,
    /// `None` otherwise. An absent attribute or a type mismatch between
    /// attribute and operand is a missing-data condition: not triggered,
    /// never an error.
    pub fn evaluate(&self, attributes: &AttributeSet) -> Option<AttributeValue> {
        let value = attributes.get(self.attribute())?;

        let triggered = match self {
            Condition::Compare { op, operand, .. } => match op {
                Comparator::Gt | Comparator::Ge | Comparator::Lt | Comparator::Le => {
                    let (actual, expected) = (value.as_number()?, operand.as_number()?);
                    match op {
                        Comparator::Gt => actual > expected,
                        Comparator::Ge => actual >= expected,
                        Comparator::Lt => actual < expected,
                        Comparator::Le => actual <= expected,
                        _ => unreachable!(),
                    }
                }
                Comparator::Eq => values_equal(value, operand),
                Comparator::Ne => !values_equal(value, operand),
            },
            Condition::In { values, .. } => values.iter().any(|v| values_equal(value, v)),
        };

        if triggered {
            Some(value.clone())
        } else {
            None
        }
    }
}

impl fmt::Display for Condition {
    /// Canonical condition text; parsing the output yields an equal condition.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Compare {
                attribute,
                op,
                operand,
            } => write!(f, "{} {} {}", attribute, op, operand),
            Condition::In { attribute, values } => {
                let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "{} in [{}]", attribute, items.join(", "))
            }
        }
    }
}

fn values_equal(a: &AttributeValue, b: &AttributeValue) -> bool {
    match (a, b) {
        (AttributeValue::Number(x), AttributeValue::Number(y)) => x == y,
        (AttributeValue::Bool(x), AttributeValue::Bool(y)) => x == y,
        (AttributeValue::Text(x), AttributeValue::Text(y)) => x == y,
        _ => false,
    }
}

fn parse_operand(raw: &str) -> Option<AttributeValue> {
    if raw.is_empty() {
        return None;
    }
    if let Some(stripped) = raw
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
    {
        return Some(AttributeValue::Text(stripped.to_string()));
    }
    // Unquoted operands must be clean scalars; a stray operator character
    // means the condition itself is malformed (e.g. `weight >> 10`)
    if raw.chars().any(|c| "<>=!&|[],'\"".contains(c)) {
        return None;
    }
    Some(AttributeValue::parse(raw))
}

/// A weighted complexity criterion.
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    pub code: String,
    pub name: String,
    pub condition: Condition,
    pub weight: u32,
}

impl Criterion {
    /// Build a criterion from raw configuration fields, parsing the
    /// condition text.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        condition: &str,
        weight: u32,
    ) -> Result<Criterion, CriterionError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(CriterionError::EmptyCode);
        }
        let parsed = Condition::parse(&code, condition)?;
        Ok(Criterion {
            code,
            name: name.into(),
            condition: parsed,
            weight,
        })
    }
}

/// Raw criterion entry as written in configuration, before condition parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCriterion {
    pub code: String,
    pub name: String,
    pub condition: String,
    pub weight: u32,
}

impl RawCriterion {
    pub fn parse(&self) -> Result<Criterion, CriterionError> {
        Criterion::new(&self.code, &self.name, &self.condition, self.weight)
    }
}

#[derive(Debug, Deserialize)]
struct CriteriaFileFrontmatter {
    #[serde(default)]
    criteria: Vec<RawCriterion>,
}

/// A provider of the current criteria snapshot.
///
/// `fetch` is called once per classification run; implementations must
/// return the full ordered list or an error. Returning an empty list means
/// "no criteria configured", which is distinct from a failed fetch.
pub trait CriteriaSource {
    fn fetch(&self) -> Result<Vec<Criterion>>;
}

/// Criteria read from `.freightdesk/criteria.md` on every fetch.
pub struct FileCriteriaSource {
    path: PathBuf,
}

impl FileCriteriaSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl CriteriaSource for FileCriteriaSource {
    fn fetch(&self) -> Result<Vec<Criterion>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read criteria from {}", self.path.display()))?;

        let (frontmatter, _body) = split_frontmatter(&content);
        let frontmatter = frontmatter
            .with_context(|| format!("No frontmatter in {}", self.path.display()))?;

        let parsed: CriteriaFileFrontmatter = serde_yaml::from_str(&frontmatter)
            .with_context(|| format!("Failed to parse criteria in {}", self.path.display()))?;

        parse_raw_criteria(&parsed.criteria)
    }
}

/// Criteria fetched as JSON from a remote configuration service.
///
/// The payload is validated against an embedded JSON Schema before parsing
/// so a misshapen response is reported as a configuration error rather than
/// a partial criteria list.
pub struct HttpCriteriaSource {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpCriteriaSource {
    pub fn new(endpoint: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            endpoint: endpoint.to_string(),
            agent,
        }
    }
}

impl CriteriaSource for HttpCriteriaSource {
    fn fetch(&self) -> Result<Vec<Criterion>> {
        let payload: serde_json::Value = self
            .agent
            .get(&self.endpoint)
            .call()
            .with_context(|| format!("Failed to fetch criteria from {}", self.endpoint))?
            .into_json()
            .with_context(|| format!("Criteria response from {} is not JSON", self.endpoint))?;

        validate_criteria_payload(&payload)?;

        let raw: Vec<RawCriterion> = serde_json::from_value(payload)
            .context("Failed to parse criteria payload")?;

        parse_raw_criteria(&raw)
    }
}

/// In-memory criteria for tests and embedding callers.
pub struct StaticCriteriaSource {
    criteria: Vec<Criterion>,
}

impl StaticCriteriaSource {
    pub fn new(criteria: Vec<Criterion>) -> Self {
        Self { criteria }
    }
}

impl CriteriaSource for StaticCriteriaSource {
    fn fetch(&self) -> Result<Vec<Criterion>> {
        Ok(self.criteria.clone())
    }
}

/// Validate a JSON criteria payload against the embedded schema.
pub fn validate_criteria_payload(payload: &serde_json::Value) -> Result<()> {
    let schema: serde_json::Value =
        serde_json::from_str(CRITERIA_SCHEMA).context("Embedded criteria schema is not JSON")?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile criteria schema: {}", e))?;

    let errors: Vec<String> = validator
        .iter_errors(payload)
        .map(|e| {
            let path = e.instance_path.to_string();
            if path.is_empty() {
                e.to_string()
            } else {
                format!("at '{}': {}", path, e)
            }
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("Criteria payload failed validation: {}", errors.join("; "))
    }
}

fn parse_raw_criteria(raw: &[RawCriterion]) -> Result<Vec<Criterion>> {
    raw.iter()
        .map(|r| {
            r.parse()
                .map_err(|e| anyhow::anyhow!("Invalid criterion configuration: {}", e))
        })
        .collect()
}
