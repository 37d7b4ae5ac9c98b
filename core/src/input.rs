use std::collections::BTreeMap;

use anyhow::{anyhow, Result};

use crate::model::metrics::{RestaurantMetrics, METRIC_KEYS};

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub words: Vec<String>,
    pub metadata: BTreeMap<String, String>,
}

/// Splits command words into plain words and `key:value` pairs.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut words = Vec::new();
    let mut metadata = BTreeMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                metadata.insert(key.to_lowercase(), value.to_string());
                continue;
            }
        }
        words.push(arg.clone());
    }

    ParsedInput { words, metadata }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Applies `key:value` pairs on top of `base`. Keys may be abbreviated.
pub fn apply_metrics(
    base: RestaurantMetrics,
    metadata: &BTreeMap<String, String>,
) -> Result<RestaurantMetrics> {
    let mut metrics = base;
    for (key, value) in metadata {
        let field = expand_key(key, &METRIC_KEYS)?;
        if !value.trim().parse::<f64>().is_ok_and(f64::is_finite) {
            return Err(anyhow!("Value for '{}' is not a number: '{}'", field, value));
        }
        metrics.set(&field, value);
    }
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_parse_simple() {
        let parsed = parse_args(&args(&["2025-02", "BRIQUE", "sales:8500", "Bottles:40"]));
        assert_eq!(parsed.words, vec!["2025-02", "BRIQUE"]);
        assert_eq!(parsed.metadata.get("sales"), Some(&"8500".to_string()));
        assert_eq!(parsed.metadata.get("bottles"), Some(&"40".to_string()));
    }

    #[test]
    fn test_expand_key() {
        assert_eq!(expand_key("sa", &METRIC_KEYS).unwrap(), "sales");
        assert_eq!(expand_key("g", &METRIC_KEYS).unwrap(), "glasses");
        assert_eq!(expand_key("wine", &METRIC_KEYS).unwrap(), "wine-stock");
        assert_eq!(expand_key("bottle-s", &METRIC_KEYS).unwrap(), "bottle-stock");

        // Ambiguous: bottles, bottle-stock
        assert!(expand_key("bottle", &METRIC_KEYS).is_err());
        // Ambiguous: sales, sparkling-stock
        assert!(expand_key("s", &METRIC_KEYS).is_err());
        // Unknown
        assert!(expand_key("tips", &METRIC_KEYS).is_err());
    }

    #[test]
    fn test_apply_metrics_keeps_untouched_fields() {
        let base = RestaurantMetrics {
            bottles_sold: 10,
            ..RestaurantMetrics::with_sales(100.0)
        };
        let parsed = parse_args(&args(&["sa:250.5", "cmv:0.3"]));
        let metrics = apply_metrics(base, &parsed.metadata).unwrap();
        assert_eq!(metrics.sales, 250.5);
        assert_eq!(metrics.cmv, 0.3);
        assert_eq!(metrics.bottles_sold, 10);
    }

    #[test]
    fn test_apply_metrics_rejects_text() {
        for bad in ["sales:lots", "sales:inf", "sales:NaN", "price:-infinity"] {
            let parsed = parse_args(&args(&[bad]));
            assert!(
                apply_metrics(RestaurantMetrics::default(), &parsed.metadata).is_err(),
                "{} should be rejected",
                bad
            );
        }
    }
}
