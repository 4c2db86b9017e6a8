//! Market complexity classification.
//!
//! Pure functions: a criteria snapshot plus an attribute set in, a scored
//! classification out. No I/O, no retained state; identical inputs produce
//! identical output including factor order.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::attributes::{AttributeSet, AttributeValue};
use crate::criteria::Criterion;

/// Market tier driving pricing approach and engineering review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    Simple,
    Complex,
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketType::Simple => write!(f, "simple"),
            MarketType::Complex => write!(f, "complex"),
        }
    }
}

impl FromStr for MarketType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(MarketType::Simple),
            "complex" => Ok(MarketType::Complex),
            other => Err(anyhow!("Unknown market type '{}'", other)),
        }
    }
}

/// One criterion that fired, in criteria order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityFactor {
    pub code: String,
    pub name: String,
    pub triggered_value: AttributeValue,
    pub weight: u32,
}

/// The classification result.
///
/// `complexity_score` is always the exact sum of `weight` over
/// `complexity_factors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketClassification {
    pub complexity_score: u32,
    pub market_type: MarketType,
    pub complexity_factors: Vec<ComplexityFactor>,
}

/// Score an attribute set against a criteria snapshot and classify it.
///
/// A criterion whose attribute is absent (or of a mismatched type) simply
/// does not trigger. The tier is `complex` when the score reaches
/// `complex_min_threshold`; the threshold comes from configuration and is
/// supplied fresh on every call.
pub fn classify(
    attributes: &AttributeSet,
    criteria: &[Criterion],
    complex_min_threshold: u32,
) -> MarketClassification {
    let mut complexity_factors = Vec::new();
    let mut complexity_score: u32 = 0;

    for criterion in criteria {
        if let Some(triggered_value) = criterion.condition.evaluate(attributes) {
            complexity_score += criterion.weight;
            complexity_factors.push(ComplexityFactor {
                code: criterion.code.clone(),
                name: criterion.name.clone(),
                triggered_value,
                weight: criterion.weight,
            });
        }
    }

    let market_type = if complexity_score >= complex_min_threshold {
        MarketType::Complex
    } else {
        MarketType::Simple
    };

    MarketClassification {
        complexity_score,
        market_type,
        complexity_factors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipment_criteria() -> Vec<Criterion> {
        vec![
            Criterion::new("heavy", "Heavy lift cargo", "cargo_weight_kg > 25000", 40).unwrap(),
            Criterion::new("permit", "Permit required", "requires_permit == true", 30).unwrap(),
        ]
    }

    fn attrs(pairs: &[(&str, AttributeValue)]) -> AttributeSet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_heavy_permitted_shipment_is_complex() {
        let attributes = attrs(&[
            ("cargo_weight_kg", AttributeValue::Number(30000.0)),
            ("requires_permit", AttributeValue::Bool(true)),
        ]);

        let result = classify(&attributes, &shipment_criteria(), 50);

        assert_eq!(result.complexity_score, 70);
        assert_eq!(result.market_type, MarketType::Complex);
        assert_eq!(result.complexity_factors.len(), 2);
        // Factors preserve criteria order
        assert_eq!(result.complexity_factors[0].code, "heavy");
        assert_eq!(result.complexity_factors[1].code, "permit");
        assert_eq!(
            result.complexity_factors[0].triggered_value,
            AttributeValue::Number(30000.0)
        );
    }

    #[test]
    fn test_light_unpermitted_shipment_is_simple() {
        let attributes = attrs(&[
            ("cargo_weight_kg", AttributeValue::Number(10000.0)),
            ("requires_permit", AttributeValue::Bool(false)),
        ]);

        let result = classify(&attributes, &shipment_criteria(), 50);

        assert_eq!(result.complexity_score, 0);
        assert_eq!(result.market_type, MarketType::Simple);
        assert!(result.complexity_factors.is_empty());
    }

    #[test]
    fn test_score_equal_to_threshold_is_complex() {
        let criteria =
            vec![Criterion::new("heavy", "Heavy", "cargo_weight_kg > 25000", 50).unwrap()];
        let attributes = attrs(&[("cargo_weight_kg", AttributeValue::Number(26000.0))]);

        let result = classify(&attributes, &criteria, 50);
        assert_eq!(result.complexity_score, 50);
        assert_eq!(result.market_type, MarketType::Complex);
    }

    #[test]
    fn test_score_one_below_threshold_is_simple() {
        let criteria =
            vec![Criterion::new("heavy", "Heavy", "cargo_weight_kg > 25000", 49).unwrap()];
        let attributes = attrs(&[("cargo_weight_kg", AttributeValue::Number(26000.0))]);

        let result = classify(&attributes, &criteria, 50);
        assert_eq!(result.complexity_score, 49);
        assert_eq!(result.market_type, MarketType::Simple);
    }

    #[test]
    fn test_absent_attribute_never_triggers_or_errors() {
        let criteria =
            vec![Criterion::new("cold", "Reefer cargo", "reefer_plugs > 0", 20).unwrap()];
        let attributes = attrs(&[("cargo_weight_kg", AttributeValue::Number(500.0))]);

        let result = classify(&attributes, &criteria, 10);
        assert_eq!(result.complexity_score, 0);
        assert!(result.complexity_factors.is_empty());
    }

    #[test]
    fn test_score_is_sum_of_triggered_weights() {
        let criteria = vec![
            Criterion::new("a", "A", "x > 1", 7).unwrap(),
            Criterion::new("b", "B", "y > 1", 11).unwrap(),
            Criterion::new("c", "C", "z > 1", 13).unwrap(),
        ];
        let attributes = attrs(&[
            ("x", AttributeValue::Number(2.0)),
            ("z", AttributeValue::Number(2.0)),
        ]);

        let result = classify(&attributes, &criteria, 100);
        assert_eq!(result.complexity_score, 7 + 13);
        let factor_sum: u32 = result.complexity_factors.iter().map(|f| f.weight).sum();
        assert_eq!(result.complexity_score, factor_sum);
    }

    #[test]
    fn test_idempotent_and_order_stable() {
        let attributes = attrs(&[
            ("cargo_weight_kg", AttributeValue::Number(30000.0)),
            ("requires_permit", AttributeValue::Bool(true)),
        ]);
        let criteria = shipment_criteria();

        let first = classify(&attributes, &criteria, 50);
        let second = classify(&attributes, &criteria, 50);
        assert_eq!(first, second);

        let first_json = serde_json::to_string(&first).unwrap();
        let second_json = serde_json::to_string(&second).unwrap();
        assert_eq!(first_json, second_json);
    }

    #[test]
    fn test_empty_criteria_classifies_simple_at_positive_threshold() {
        let attributes = attrs(&[("cargo_weight_kg", AttributeValue::Number(99999.0))]);
        let result = classify(&attributes, &[], 50);
        assert_eq!(result.complexity_score, 0);
        assert_eq!(result.market_type, MarketType::Simple);
    }

    #[test]
    fn test_zero_threshold_always_complex() {
        let result = classify(&AttributeSet::new(), &[], 0);
        assert_eq!(result.market_type, MarketType::Complex);
    }

    #[test]
    fn test_market_type_roundtrip() {
        assert_eq!("complex".parse::<MarketType>().unwrap(), MarketType::Complex);
        assert_eq!(MarketType::Simple.to_string(), "simple");
        assert!("premium".parse::<MarketType>().is_err());
    }
}
