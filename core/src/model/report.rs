use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use crate::model::metrics::{coerce_amount, RestaurantMetrics};
use crate::model::unit::Unit;
use crate::time::YearMonth;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReport {
    pub month: YearMonth,
    // BTreeMap keeps units in registry order.
    pub restaurants: BTreeMap<Unit, RestaurantMetrics>,
    /// Entries whose key is not a registered unit, kept verbatim so a
    /// rewrite does not drop them.
    pub unknown_units: BTreeMap<String, Value>,
    pub notes: Option<String>,
}

impl MonthlyReport {
    pub fn new(month: YearMonth) -> Self {
        Self {
            month,
            restaurants: BTreeMap::new(),
            unknown_units: BTreeMap::new(),
            notes: None,
        }
    }

    /// The report substituted when nothing usable is stored.
    pub fn seed(year: i32) -> Self {
        let mut report = Self::new(YearMonth::first_of(year));
        for (unit, sales) in [
            (Unit::Brique, 8500.0),
            (Unit::Quintana, 12400.0),
            (Unit::Verissimo, 9800.0),
            (Unit::Vistta, 15600.0),
        ] {
            report.restaurants.insert(unit, RestaurantMetrics::with_sales(sales));
        }
        report
    }

    pub fn with_unit(mut self, unit: Unit, metrics: RestaurantMetrics) -> Self {
        self.restaurants.insert(unit, metrics);
        self
    }

    /// Sum of sales over every entry of the unit mapping, unknown keys included.
    pub fn total_sales(&self) -> f64 {
        let known: f64 = self.restaurants.values().map(|m| m.sales).sum();
        let unknown: f64 = self
            .unknown_units
            .values()
            .map(|v| v.get("sales").map(coerce_amount).unwrap_or(0.0))
            .sum();
        known + unknown
    }
}

#[derive(Deserialize)]
struct StoredReport {
    month: YearMonth,
    #[serde(default)]
    restaurants: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum StoredEntry<'a> {
    Known(&'a RestaurantMetrics),
    Unknown(&'a Value),
}

#[derive(Serialize)]
struct StoredReportRef<'a> {
    month: YearMonth,
    restaurants: BTreeMap<&'a str, StoredEntry<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

impl<'de> Deserialize<'de> for MonthlyReport {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stored = StoredReport::deserialize(deserializer)?;
        let mut report = MonthlyReport::new(stored.month);
        report.notes = stored.notes;

        for (name, raw) in stored.restaurants.unwrap_or_default() {
            let Ok(unit) = name.parse::<Unit>() else {
                warn!(unit = %name, month = %report.month, "keeping metrics for unknown unit as-is");
                report.unknown_units.insert(name, raw);
                continue;
            };

            let metrics = if raw.is_object() {
                RestaurantMetrics::deserialize(raw).unwrap_or_default()
            } else {
                warn!(unit = %name, month = %report.month, "unit entry is not an object, reading it as zero");
                RestaurantMetrics::default()
            };

            // "VERISSIMO" and "VERÍSSIMO" land on the same unit.
            if let Some(existing) = report.restaurants.get_mut(&unit) {
                warn!(unit = %name, month = %report.month, "unit appears twice, adding the entries together");
                existing.absorb(&metrics);
            } else {
                report.restaurants.insert(unit, metrics);
            }
        }
        Ok(report)
    }
}

impl Serialize for MonthlyReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut restaurants: BTreeMap<&str, StoredEntry> = self
            .unknown_units
            .iter()
            .map(|(name, raw)| (name.as_str(), StoredEntry::Unknown(raw)))
            .collect();
        for (unit, metrics) in &self.restaurants {
            restaurants.insert(unit.name(), StoredEntry::Known(metrics));
        }
        StoredReportRef {
            month: self.month,
            restaurants,
            notes: self.notes.as_deref(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_report() {
        let json = r#"{
            "month": "2025-02",
            "restaurants": {
                "QUINTANA": { "sales": 12400, "bottlesSold": 80 },
                "BRIQUE": { "sales": 8500 }
            },
            "notes": "carnaval"
        }"#;
        let report: MonthlyReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.month.to_string(), "2025-02");
        assert_eq!(report.notes.as_deref(), Some("carnaval"));
        let units: Vec<Unit> = report.restaurants.keys().copied().collect();
        assert_eq!(units, vec![Unit::Brique, Unit::Quintana]);
        assert_eq!(report.restaurants[&Unit::Quintana].bottles_sold, 80);
    }

    #[test]
    fn test_unknown_units_are_kept_verbatim() {
        let json = r#"{"month": "2025-01", "restaurants": {"PIZZARIA": {"sales": 1, "tips": 3}, "NAPOLI": {"sales": 2}}}"#;
        let report: MonthlyReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.restaurants.len(), 1);
        assert_eq!(report.unknown_units.len(), 1);
        assert_eq!(report.total_sales(), 3.0);

        let written = serde_json::to_value(&report).unwrap();
        assert_eq!(written["restaurants"]["PIZZARIA"]["tips"], 3);
        assert_eq!(written["restaurants"]["NAPOLI"]["sales"], 2.0);
    }

    #[test]
    fn test_accent_aliases_are_added_together() {
        let json = r#"{"month": "2025-01", "restaurants": {
            "VERISSIMO": {"sales": 100, "bottlesSold": 2},
            "VERÍSSIMO": {"sales": 200, "bottlesSold": 3},
            "BRIQUE": {"sales": 5}
        }}"#;
        let report: MonthlyReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.restaurants.len(), 2);
        assert_eq!(report.restaurants[&Unit::Verissimo].sales, 300.0);
        assert_eq!(report.restaurants[&Unit::Verissimo].bottles_sold, 5);
        assert_eq!(report.total_sales(), 305.0);
    }

    #[test]
    fn test_non_object_unit_entry_reads_as_zero() {
        let json = r#"{"month": "2025-01", "restaurants": {"BRIQUE": null, "HAMPEL": 7, "NAPOLI": {"sales": 2}}}"#;
        let report: MonthlyReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.restaurants[&Unit::Brique], RestaurantMetrics::default());
        assert_eq!(report.restaurants[&Unit::Hampel], RestaurantMetrics::default());
        assert_eq!(report.total_sales(), 2.0);
    }

    #[test]
    fn test_notes_omitted_when_absent() {
        let written = serde_json::to_value(MonthlyReport::seed(2025)).unwrap();
        assert!(written.get("notes").is_none());
        assert_eq!(written["month"], "2025-01");
        assert_eq!(written["restaurants"]["VERÍSSIMO"]["sales"], 9800.0);
    }

    #[test]
    fn test_bad_month_is_rejected() {
        let json = r#"{"month": "janeiro", "restaurants": {}}"#;
        assert!(serde_json::from_str::<MonthlyReport>(json).is_err());
    }

    #[test]
    fn test_seed_report() {
        let seed = MonthlyReport::seed(2026);
        assert_eq!(seed.month.to_string(), "2026-01");
        assert_eq!(seed.restaurants.len(), 4);
        assert_eq!(seed.total_sales(), 46300.0);
        assert!(seed.notes.is_none());
    }
}
