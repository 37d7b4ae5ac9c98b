use crate::error::StoreResult;
use crate::model::report::MonthlyReport;
use crate::repository::{BlobStore, ReportStore};
use crate::service::aggregator::{active_series, summarize, ActiveSeries, DisplayMode};
use crate::service::dto::ReportSummary;

/// Everything the dashboard screen shows for one mode.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub mode: DisplayMode,
    pub year: i32,
    pub title: String,
    pub series: ActiveSeries,
    pub total: f64,
    pub current: MonthlyReport,
    pub summary: ReportSummary,
}

pub struct DashboardUseCase<'a, S: BlobStore> {
    store: &'a ReportStore<S>,
}

impl<'a, S: BlobStore> DashboardUseCase<'a, S> {
    pub fn new(store: &'a ReportStore<S>) -> Self {
        Self { store }
    }

    pub fn view(&self, mode: DisplayMode, year: i32) -> StoreResult<DashboardView> {
        let collection = self.store.collection();
        let current = collection.current_report()?;
        let series = active_series(collection, mode, year)?;
        let total = series.total();

        let title = match mode {
            DisplayMode::Annual => format!("Ano {}", year),
            DisplayMode::Monthly => format!("{} {}", current.month.long_label(), current.month.year()),
        };

        Ok(DashboardView {
            mode,
            year,
            title,
            series,
            total,
            current: current.clone(),
            summary: summarize(current),
        })
    }
}
