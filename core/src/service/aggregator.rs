//! Turns stored reports into chart series. Everything here is a pure
//! function of its arguments.

use crate::error::StoreResult;
use crate::model::collection::ReportCollection;
use crate::model::report::MonthlyReport;
use crate::service::dto::{AnnualPoint, ReportSummary, SeriesPoint, UnitPoint};
use crate::time::YearMonth;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Sales per unit for the current report.
    #[default]
    Monthly,
    /// Group sales per month of a year.
    Annual,
}

impl DisplayMode {
    pub fn toggle(self) -> Self {
        match self {
            DisplayMode::Monthly => DisplayMode::Annual,
            DisplayMode::Annual => DisplayMode::Monthly,
        }
    }
}

/// The series selected by a `DisplayMode`.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveSeries {
    Annual(Vec<AnnualPoint>),
    Unit(Vec<UnitPoint>),
}

impl ActiveSeries {
    pub fn total(&self) -> f64 {
        match self {
            ActiveSeries::Annual(points) => compute_total(points),
            ActiveSeries::Unit(points) => compute_total(points),
        }
    }

    /// `(label, value)` pairs in display order.
    pub fn bars(&self) -> Vec<(String, f64)> {
        fn collect<P: SeriesPoint>(points: &[P]) -> Vec<(String, f64)> {
            points
                .iter()
                .map(|p| (p.label().to_string(), p.value()))
                .collect()
        }
        match self {
            ActiveSeries::Annual(points) => collect(points),
            ActiveSeries::Unit(points) => collect(points),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ActiveSeries::Annual(points) => points.len(),
            ActiveSeries::Unit(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Twelve points, January to December of `year`; months without a report are zero.
pub fn compute_annual_series(collection: &ReportCollection, year: i32) -> Vec<AnnualPoint> {
    YearMonth::months_of(year)
        .map(|month| AnnualPoint {
            name: month.short_label().to_string(),
            sales: collection
                .find(month)
                .map(|report| finite_or_zero(report.total_sales()))
                .unwrap_or(0.0),
        })
        .collect()
}

/// Units of `report` with strictly positive sales, in registry order.
pub fn compute_unit_series(report: &MonthlyReport) -> Vec<UnitPoint> {
    report
        .restaurants
        .iter()
        .map(|(unit, metrics)| UnitPoint {
            unit: *unit,
            sales: finite_or_zero(metrics.sales),
            color: unit.color().to_string(),
        })
        .filter(|point| point.sales > 0.0)
        .collect()
}

pub fn compute_total<P: SeriesPoint>(series: &[P]) -> f64 {
    series.iter().map(|p| finite_or_zero(p.value())).sum()
}

/// Picks the series for `mode`. Monthly mode reads the collection's current
/// report, so it fails on an empty collection.
pub fn active_series(
    collection: &ReportCollection,
    mode: DisplayMode,
    year: i32,
) -> StoreResult<ActiveSeries> {
    match mode {
        DisplayMode::Annual => Ok(ActiveSeries::Annual(compute_annual_series(collection, year))),
        DisplayMode::Monthly => {
            let report = collection.current_report()?;
            Ok(ActiveSeries::Unit(compute_unit_series(report)))
        }
    }
}

pub fn summarize(report: &MonthlyReport) -> ReportSummary {
    report
        .restaurants
        .values()
        .fold(ReportSummary::default(), |mut acc, m| {
            acc.sales += finite_or_zero(m.sales);
            acc.bottles_sold += m.bottles_sold;
            acc.glasses_sold += m.glasses_sold;
            acc.bottle_stock += m.bottle_stock;
            if m.sales > 0.0 {
                acc.units_reporting += 1;
            }
            acc
        })
}

fn finite_or_zero(n: f64) -> f64 {
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::metrics::RestaurantMetrics;
    use crate::model::unit::Unit;

    fn month(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    fn report(m: &str, sales: &[(Unit, f64)]) -> MonthlyReport {
        sales.iter().fold(MonthlyReport::new(month(m)), |r, (unit, s)| {
            r.with_unit(*unit, RestaurantMetrics::with_sales(*s))
        })
    }

    fn collection(reports: Vec<MonthlyReport>) -> ReportCollection {
        ReportCollection::from_reports(reports).unwrap()
    }

    #[test]
    fn test_annual_series_always_has_twelve_months() {
        let empty = ReportCollection::default();
        let series = compute_annual_series(&empty, 2025);
        assert_eq!(series.len(), 12);
        assert!(series.iter().all(|p| p.sales == 0.0));

        let reports = collection(vec![
            report("2025-05", &[(Unit::Hampel, 10.0)]),
            report("2024-05", &[(Unit::Hampel, 99.0)]),
        ]);
        let series = compute_annual_series(&reports, 2025);
        let labels: Vec<&str> = series.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            labels,
            vec!["JAN", "FEV", "MAR", "ABR", "MAI", "JUN", "JUL", "AGO", "SET", "OUT", "NOV", "DEZ"]
        );
        assert_eq!(series[4].sales, 10.0);
        assert_eq!(compute_total(&series), 10.0);
    }

    #[test]
    fn test_annual_series_coerces_bad_sales() {
        let blob = r#"{"month": "2025-03", "restaurants": {
            "BRIQUE": {"sales": 10}, "QUINTANA": {"sales": 20}, "VISTTA": {"sales": "bad"}
        }}"#;
        let march: MonthlyReport = serde_json::from_str(blob).unwrap();
        let series = compute_annual_series(&collection(vec![march]), 2025);
        assert_eq!(series[2].sales, 30.0);
        assert_eq!(series[1].sales, 0.0);
        assert_eq!(series[3].sales, 0.0);
    }

    #[test]
    fn test_unit_series_keeps_only_positive_sales() {
        let r = report(
            "2025-01",
            &[(Unit::Hampel, 0.0), (Unit::Napoli, -5.0), (Unit::Quintana, 100.0)],
        );
        let series = compute_unit_series(&r);
        assert_eq!(
            series,
            vec![UnitPoint {
                unit: Unit::Quintana,
                sales: 100.0,
                color: "#bef264".to_string(),
            }]
        );
    }

    #[test]
    fn test_unit_series_in_registry_order() {
        let r = report(
            "2025-01",
            &[(Unit::Napoli, 1.0), (Unit::Brique, 2.0), (Unit::Verissimo, 3.0)],
        );
        let units: Vec<Unit> = compute_unit_series(&r).iter().map(|p| p.unit).collect();
        assert_eq!(units, vec![Unit::Brique, Unit::Verissimo, Unit::Napoli]);
    }

    #[test]
    fn test_total_is_stable() {
        let r = report("2025-01", &[(Unit::Brique, 0.1), (Unit::Quintana, 0.2)]);
        let series = compute_unit_series(&r);
        let first = compute_total(&series);
        assert_eq!(first, 0.1 + 0.2);
        assert_eq!(compute_total(&series), first);

        let odd = vec![
            AnnualPoint { name: "JAN".to_string(), sales: f64::NAN },
            AnnualPoint { name: "FEV".to_string(), sales: 7.0 },
        ];
        assert_eq!(compute_total(&odd), 7.0);
    }

    #[test]
    fn test_mode_switch_end_to_end() {
        let reports = collection(vec![report(
            "2025-01",
            &[(Unit::Brique, 8500.0), (Unit::Quintana, 12400.0)],
        )]);

        let monthly = active_series(&reports, DisplayMode::Monthly, 2025).unwrap();
        assert_eq!(
            monthly.bars(),
            vec![("BRIQUE".to_string(), 8500.0), ("QUINTANA".to_string(), 12400.0)]
        );
        assert_eq!(monthly.total(), 20900.0);

        let annual = active_series(&reports, DisplayMode::Annual, 2025).unwrap();
        let bars = annual.bars();
        assert_eq!(bars.len(), 12);
        assert_eq!(bars[0].1, 20900.0);
        assert!(bars[1..].iter().all(|(_, v)| *v == 0.0));
        assert_eq!(annual.total(), 20900.0);
    }

    #[test]
    fn test_monthly_mode_on_empty_collection_fails() {
        let empty = ReportCollection::default();
        assert!(active_series(&empty, DisplayMode::Monthly, 2025).is_err());
        assert_eq!(
            active_series(&empty, DisplayMode::Annual, 2025).unwrap().len(),
            12
        );
    }

    #[test]
    fn test_summarize() {
        let mut r = report("2025-01", &[(Unit::Brique, 100.0), (Unit::Hampel, 0.0)]);
        r.restaurants.get_mut(&Unit::Brique).unwrap().bottles_sold = 12;
        r.restaurants.get_mut(&Unit::Hampel).unwrap().glasses_sold = 30;
        r.restaurants.get_mut(&Unit::Hampel).unwrap().bottle_stock = 50;

        let summary = summarize(&r);
        assert_eq!(summary.sales, 100.0);
        assert_eq!(summary.bottles_sold, 12);
        assert_eq!(summary.glasses_sold, 30);
        assert_eq!(summary.bottle_stock, 50);
        assert_eq!(summary.units_reporting, 1);
    }

    #[test]
    fn test_toggle_mode() {
        assert_eq!(DisplayMode::default(), DisplayMode::Monthly);
        assert_eq!(DisplayMode::Monthly.toggle(), DisplayMode::Annual);
        assert_eq!(DisplayMode::Annual.toggle(), DisplayMode::Monthly);
    }
}
