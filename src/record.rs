// Sale Record - one immutable sales transaction
// Value semantics only: no identity beyond structural equality

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// SaleRecord - a single transaction row after validation
///
/// Fields are public for reading; there are no mutators. A record is built
/// once by the loader (or by `SaleRecord::new`) and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub date: NaiveDate,
    pub product: String,
    pub category: String,
    /// Not bounds-checked; negative amounts (refunds) are kept as-is
    pub amount: f64,
    pub region: String,
}

impl SaleRecord {
    pub fn new(
        date: NaiveDate,
        product: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        region: impl Into<String>,
    ) -> Self {
        SaleRecord {
            date,
            product: product.into(),
            category: category.into(),
            amount,
            region: region.into(),
        }
    }
}
