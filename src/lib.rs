// Sales Analytics - Core Library
// Exposes all modules for use in the console runner, API server, and tests

pub mod aggregation;
pub mod config;
pub mod error;
pub mod loader;
pub mod processor;
pub mod record;
pub mod report;

// Only compile the HTTP layer when the server feature is enabled
#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use aggregation::{
    most_popular_product, revenue_by_category, sales_statistics, top_performing_sale,
    total_revenue, SalesStatistics, UNKNOWN_PRODUCT,
};
pub use error::{AnalyticsError, Result};
pub use loader::{load_sales_csv, read_sales, REQUIRED_COLUMNS};
pub use processor::{ProcessorState, SalesProcessor};
pub use record::SaleRecord;
pub use report::{format_currency, render_report, SalesReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
