use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::model::collection::ReportCollection;
use crate::model::metrics::RestaurantMetrics;
use crate::model::report::MonthlyReport;
use crate::model::unit::Unit;
use crate::repository::traits::BlobStore;
use crate::time::YearMonth;

pub const SCHEMA_VERSION: u32 = 1;

/// Where the store's reports came from at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Parsed from storage.
    Persisted,
    /// Nothing was stored; seeded.
    Missing,
    /// Stored data was malformed; seeded after backing it up.
    Recovered,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredBlob {
    Versioned {
        version: u32,
        reports: Vec<MonthlyReport>,
    },
    // Bare array written before the envelope existed.
    Legacy(Vec<MonthlyReport>),
}

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    reports: &'a ReportCollection,
}

/// Parses a stored blob into a collection.
pub fn decode_collection(key: &str, blob: &str) -> StoreResult<ReportCollection> {
    let malformed = |reason: String| StoreError::MalformedStorage {
        key: key.to_string(),
        reason,
    };

    let reports = match serde_json::from_str::<StoredBlob>(blob) {
        Ok(StoredBlob::Versioned { version, reports }) => {
            if version > SCHEMA_VERSION {
                return Err(malformed(format!(
                    "unsupported schema version {} (newest known is {})",
                    version, SCHEMA_VERSION
                )));
            }
            reports
        }
        Ok(StoredBlob::Legacy(reports)) => reports,
        Err(e) => return Err(malformed(e.to_string())),
    };

    ReportCollection::from_reports(reports)
        .map_err(|month| malformed(format!("more than one report for {}", month)))
}

pub fn encode_collection(collection: &ReportCollection) -> StoreResult<String> {
    let envelope = Envelope {
        version: SCHEMA_VERSION,
        reports: collection,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Serializes `collection` and replaces whatever is stored under `key`.
pub fn persist<S: BlobStore>(blobs: &S, key: &str, collection: &ReportCollection) -> StoreResult<()> {
    let blob = encode_collection(collection)?;
    blobs
        .write(key, &blob)
        .map_err(|source| StoreError::StorageWrite {
            key: key.to_string(),
            source,
        })?;
    debug!(key, reports = collection.len(), "persisted reports");
    Ok(())
}

/// Owns the report collection and the storage it is mirrored to.
pub struct ReportStore<S: BlobStore> {
    blobs: S,
    key: String,
    collection: ReportCollection,
    origin: LoadOrigin,
}

impl<S: BlobStore> ReportStore<S> {
    /// Loads the collection stored under `key`. Missing, empty or malformed
    /// data is replaced by the seed report for January of `year`; a failure
    /// to read the storage itself is returned.
    pub fn load(blobs: S, key: &str, year: i32) -> StoreResult<Self> {
        let blob = blobs.read(key).map_err(|source| StoreError::StorageRead {
            key: key.to_string(),
            source,
        })?;

        let (collection, origin) = match blob {
            None => {
                info!(key, year, "no stored reports, starting from the seed report");
                (ReportCollection::seed(year), LoadOrigin::Missing)
            }
            Some(blob) => match decode_collection(key, &blob) {
                Ok(collection) if collection.is_empty() => {
                    info!(key, year, "stored collection is empty, starting from the seed report");
                    (ReportCollection::seed(year), LoadOrigin::Missing)
                }
                Ok(collection) => (collection, LoadOrigin::Persisted),
                Err(e) => {
                    let backup_key = format!("{}.corrupt", key);
                    match blobs.write(&backup_key, &blob) {
                        Ok(()) => warn!(error = %e, backup = %backup_key, "stored reports are malformed, kept a copy and substituted the seed report"),
                        Err(backup_err) => warn!(error = %e, backup_error = %backup_err, "stored reports are malformed and could not be backed up, substituted the seed report"),
                    }
                    (ReportCollection::seed(year), LoadOrigin::Recovered)
                }
            },
        };

        Ok(Self {
            blobs,
            key: key.to_string(),
            collection,
            origin,
        })
    }

    pub fn collection(&self) -> &ReportCollection {
        &self.collection
    }

    pub fn origin(&self) -> LoadOrigin {
        self.origin
    }

    pub fn blobs(&self) -> &S {
        &self.blobs
    }

    pub fn current_report(&self) -> StoreResult<&MonthlyReport> {
        self.collection.current_report()
    }

    pub fn persist(&self) -> StoreResult<()> {
        persist(&self.blobs, &self.key, &self.collection)
    }

    /// Replaces the report for the same month (or appends it) and persists.
    /// On a failed write the in-memory collection is left as it was.
    pub fn upsert_report(&mut self, report: MonthlyReport) -> StoreResult<()> {
        let previous = self.collection.clone();
        self.collection.upsert(report);
        if let Err(e) = self.persist() {
            self.collection = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Sets one unit's metrics for `month`, creating the month's report if needed.
    pub fn record_metrics(
        &mut self,
        month: YearMonth,
        unit: Unit,
        metrics: RestaurantMetrics,
    ) -> StoreResult<()> {
        let report = self.report_or_new(month).with_unit(unit, metrics);
        self.upsert_report(report)
    }

    pub fn set_notes(&mut self, month: YearMonth, notes: Option<String>) -> StoreResult<()> {
        let mut report = self.report_or_new(month);
        report.notes = notes;
        self.upsert_report(report)
    }

    fn report_or_new(&self, month: YearMonth) -> MonthlyReport {
        self.collection
            .find(month)
            .cloned()
            .unwrap_or_else(|| MonthlyReport::new(month))
    }
}
