use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::model::report::MonthlyReport;
use crate::time::YearMonth;

/// Reports in insertion order, at most one per month.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct ReportCollection {
    reports: Vec<MonthlyReport>,
}

impl ReportCollection {
    /// Builds a collection, rejecting a second report for the same month.
    pub fn from_reports(reports: Vec<MonthlyReport>) -> Result<Self, YearMonth> {
        let mut collection = Self::default();
        for report in reports {
            if collection.find(report.month).is_some() {
                return Err(report.month);
            }
            collection.reports.push(report);
        }
        Ok(collection)
    }

    pub fn seed(year: i32) -> Self {
        Self {
            reports: vec![MonthlyReport::seed(year)],
        }
    }

    pub fn reports(&self) -> &[MonthlyReport] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn find(&self, month: YearMonth) -> Option<&MonthlyReport> {
        self.reports.iter().find(|r| r.month == month)
    }

    /// The last appended report.
    pub fn current_report(&self) -> StoreResult<&MonthlyReport> {
        self.reports.last().ok_or(StoreError::EmptyCollection)
    }

    /// Replaces the report for the same month in place, or appends it.
    pub fn upsert(&mut self, report: MonthlyReport) {
        if let Some(pos) = self.reports.iter().position(|r| r.month == report.month) {
            self.reports[pos] = report;
        } else {
            self.reports.push(report);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    #[test]
    fn test_current_report_is_last() {
        let collection = ReportCollection::from_reports(vec![
            MonthlyReport::new(month("2025-03")),
            MonthlyReport::new(month("2025-01")),
            MonthlyReport::new(month("2025-02")),
        ])
        .unwrap();
        assert_eq!(collection.current_report().unwrap().month, month("2025-02"));
    }

    #[test]
    fn test_current_report_on_empty_collection() {
        let collection = ReportCollection::default();
        assert!(matches!(
            collection.current_report(),
            Err(StoreError::EmptyCollection)
        ));
    }

    #[test]
    fn test_duplicate_months_rejected() {
        let result = ReportCollection::from_reports(vec![
            MonthlyReport::new(month("2025-01")),
            MonthlyReport::new(month("2025-01")),
        ]);
        assert_eq!(result.unwrap_err(), month("2025-01"));
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut collection = ReportCollection::from_reports(vec![
            MonthlyReport::new(month("2025-01")),
            MonthlyReport::new(month("2025-02")),
        ])
        .unwrap();

        let mut edited = MonthlyReport::new(month("2025-01"));
        edited.notes = Some("revised".to_string());
        collection.upsert(edited);
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.reports()[0].notes.as_deref(), Some("revised"));

        collection.upsert(MonthlyReport::new(month("2025-03")));
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.current_report().unwrap().month, month("2025-03"));
    }
}
