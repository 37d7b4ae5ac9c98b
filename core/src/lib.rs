pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use config::{StoreConfig, STORAGE_KEY};
pub use error::{StoreError, StoreResult};
pub use model::collection::ReportCollection;
pub use model::metrics::{RestaurantMetrics, METRIC_KEYS};
pub use model::report::MonthlyReport;
pub use model::unit::{Unit, UNITS};
pub use repository::{BlobStore, FileBlobStore, LoadOrigin, MemoryBlobStore, ReportStore};
pub use input::{apply_metrics, expand_key, parse_args, ParsedInput};
pub use service::aggregator::{
    active_series, compute_annual_series, compute_total, compute_unit_series, summarize,
    ActiveSeries, DisplayMode,
};
pub use service::dto::{AnnualPoint, ReportSummary, SeriesPoint, UnitPoint};
pub use time::{current_year, parse_year, YearMonth};
pub use usecase::dashboard::{DashboardUseCase, DashboardView};
