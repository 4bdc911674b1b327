// Sales Processor - holds the current dataset and answers queries over it
//
// State machine:
//   Empty --load--> Loaded --load--> Loaded
//
// A load parses the whole file first and only then swaps the dataset under
// the write lock. Readers clone the Arc and compute outside the lock, so a
// query sees either the old or the new dataset, never a mix.

use crate::aggregation::{self, SalesStatistics};
use crate::error::Result;
use crate::loader::load_sales_csv;
use crate::record::SaleRecord;
use crate::report::SalesReport;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessorState {
    Empty,
    Loaded,
}

#[derive(Debug, Clone)]
enum Dataset {
    Empty,
    Loaded {
        records: Arc<[SaleRecord]>,
        source: Option<PathBuf>,
        loaded_at: DateTime<Utc>,
    },
}

pub struct SalesProcessor {
    dataset: RwLock<Dataset>,
}

impl SalesProcessor {
    pub fn new() -> Self {
        SalesProcessor {
            dataset: RwLock::new(Dataset::Empty),
        }
    }

    /// Processor already in the `Loaded` state with the given records
    pub fn with_records(records: Vec<SaleRecord>) -> Self {
        SalesProcessor {
            dataset: RwLock::new(Dataset::Loaded {
                records: Arc::from(records),
                source: None,
                loaded_at: Utc::now(),
            }),
        }
    }

    // ========================================================================
    // LOAD / RELOAD
    // ========================================================================

    /// Replace the current dataset with the contents of `path`
    ///
    /// Returns the number of records loaded. On any error the previous
    /// dataset (empty or loaded) is left exactly as it was.
    pub fn load(&self, path: &Path) -> Result<usize> {
        let records = match load_sales_csv(path) {
            Ok(records) => records,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "load failed, keeping previous dataset");
                return Err(e);
            }
        };

        let count = records.len();
        let next = Dataset::Loaded {
            records: Arc::from(records),
            source: Some(path.to_path_buf()),
            loaded_at: Utc::now(),
        };

        *self.write() = next;
        info!(path = %path.display(), count, "sales data loaded");

        Ok(count)
    }

    // ========================================================================
    // STATE
    // ========================================================================

    pub fn state(&self) -> ProcessorState {
        match *self.read() {
            Dataset::Empty => ProcessorState::Empty,
            Dataset::Loaded { .. } => ProcessorState::Loaded,
        }
    }

    /// Snapshot of the current records (cheap Arc clone)
    pub fn records(&self) -> Arc<[SaleRecord]> {
        match &*self.read() {
            Dataset::Empty => Arc::from(Vec::<SaleRecord>::new()),
            Dataset::Loaded { records, .. } => Arc::clone(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// File the current dataset came from, if it was loaded from disk
    pub fn source(&self) -> Option<PathBuf> {
        match &*self.read() {
            Dataset::Loaded { source, .. } => source.clone(),
            Dataset::Empty => None,
        }
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        match &*self.read() {
            Dataset::Loaded { loaded_at, .. } => Some(*loaded_at),
            Dataset::Empty => None,
        }
    }

    // ========================================================================
    // QUERIES (recomputed on every call)
    // ========================================================================

    pub fn total_revenue(&self) -> f64 {
        aggregation::total_revenue(&self.records())
    }

    pub fn revenue_by_category(&self) -> BTreeMap<String, f64> {
        aggregation::revenue_by_category(&self.records())
    }

    pub fn top_performing_sale(&self) -> Option<SaleRecord> {
        aggregation::top_performing_sale(&self.records()).cloned()
    }

    pub fn most_popular_product(&self) -> String {
        aggregation::most_popular_product(&self.records())
    }

    pub fn sales_statistics(&self) -> SalesStatistics {
        aggregation::sales_statistics(&self.records())
    }

    /// All five views computed against a single snapshot
    pub fn summary(&self) -> SalesReport {
        SalesReport::from_records(&self.records())
    }

    // Dataset is only ever replaced whole, so a poisoned guard is still valid
    fn read(&self) -> RwLockReadGuard<'_, Dataset> {
        self.dataset.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Dataset> {
        self.dataset.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for SalesProcessor {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
