// Aggregation - pure summary views over a batch of sales
//
// Every function here is total: an empty slice yields a defined fallback
// value, never an error or a panic.

use crate::record::SaleRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Returned by `most_popular_product` when there are no records
pub const UNKNOWN_PRODUCT: &str = "Unknown";

// ============================================================================
// RESULT TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SalesStatistics {
    pub mean: f64,
    pub median: f64,
}

// ============================================================================
// AGGREGATIONS
// ============================================================================

/// Sum of `amount` over all records (0.0 when empty)
pub fn total_revenue(records: &[SaleRecord]) -> f64 {
    records.iter().map(|r| r.amount).fold(0.0, |acc, x| acc + x)
}

/// Revenue per category, keyed by the exact category string
///
/// Single pass accumulation; amounts within a category are summed in input
/// order. The map is ordered by category name.
pub fn revenue_by_category(records: &[SaleRecord]) -> BTreeMap<String, f64> {
    let mut by_category: BTreeMap<String, f64> = BTreeMap::new();

    for record in records {
        *by_category.entry(record.category.clone()).or_insert(0.0) += record.amount;
    }

    by_category
}

/// Record with the highest amount; the earliest one wins a tie
pub fn top_performing_sale(records: &[SaleRecord]) -> Option<&SaleRecord> {
    let mut iter = records.iter();
    let first = iter.next()?;

    // Strict `>` keeps the first of equal maxima
    Some(iter.fold(first, |best, r| if r.amount > best.amount { r } else { best }))
}

/// Most frequent product name
///
/// Ties go to the product that first appeared earliest in the input.
/// Returns `UNKNOWN_PRODUCT` for an empty slice.
pub fn most_popular_product(records: &[SaleRecord]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for record in records {
        let count = counts.entry(record.product.as_str()).or_insert(0);
        if *count == 0 {
            first_seen.push(record.product.as_str());
        }
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for product in first_seen {
        let count = counts[&product];
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((product, count)),
        }
    }

    best.map(|(product, _)| product.to_string())
        .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string())
}

/// Mean and median of all amounts (both 0.0 when empty)
pub fn sales_statistics(records: &[SaleRecord]) -> SalesStatistics {
    if records.is_empty() {
        return SalesStatistics::default();
    }

    let mut amounts: Vec<f64> = records.iter().map(|r| r.amount).collect();
    let mean = amounts.iter().sum::<f64>() / amounts.len() as f64;

    amounts.sort_by(|a, b| a.total_cmp(b));
    let mid = amounts.len() / 2;
    let median = if amounts.len() % 2 == 0 {
        (amounts[mid - 1] + amounts[mid]) / 2.0
    } else {
        amounts[mid]
    };

    SalesStatistics { mean, median }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_test_record(product: &str, category: &str, amount: f64, region: &str) -> SaleRecord {
        SaleRecord::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            product,
            category,
            amount,
            region,
        )
    }

    fn sample_records() -> Vec<SaleRecord> {
        vec![
            create_test_record("Laptop", "Electronics", 1000.0, "North"),
            create_test_record("Mouse", "Electronics", 50.0, "North"),
            create_test_record("Chair", "Furniture", 200.0, "South"),
            create_test_record("Desk", "Furniture", 500.0, "West"),
            create_test_record("Laptop", "Electronics", 1000.0, "East"),
        ]
    }

    #[test]
    fn test_total_revenue() {
        assert_eq!(total_revenue(&sample_records()), 2750.0);
    }

    #[test]
    fn test_total_revenue_order_independent() {
        let mut records = sample_records();
        records.reverse();
        assert_eq!(total_revenue(&records), 2750.0);
    }

    #[test]
    fn test_revenue_by_category() {
        let revenue = revenue_by_category(&sample_records());

        assert_eq!(revenue.len(), 2);
        assert_eq!(revenue["Electronics"], 2050.0);
        assert_eq!(revenue["Furniture"], 700.0);
    }

    #[test]
    fn test_revenue_by_category_sums_to_total() {
        let records = sample_records();
        let partitioned: f64 = revenue_by_category(&records).values().sum();
        assert!((partitioned - total_revenue(&records)).abs() < 1e-9);
    }

    #[test]
    fn test_revenue_by_category_exact_match_keys() {
        let records = vec![
            create_test_record("Pen", "office", 1.0, "West"),
            create_test_record("Pad", "Office", 2.0, "West"),
        ];
        let revenue = revenue_by_category(&records);

        assert_eq!(revenue.len(), 2);
        assert_eq!(revenue["office"], 1.0);
        assert_eq!(revenue["Office"], 2.0);
    }

    #[test]
    fn test_top_performing_sale_first_of_ties() {
        let records = vec![
            create_test_record("A", "X", 1000.0, "North"),
            create_test_record("B", "X", 50.0, "North"),
            create_test_record("C", "X", 200.0, "North"),
            create_test_record("D", "X", 500.0, "North"),
            create_test_record("E", "X", 1000.0, "North"),
        ];

        let top = top_performing_sale(&records).unwrap();
        assert_eq!(top.product, "A");
        assert_eq!(top.amount, 1000.0);
    }

    #[test]
    fn test_top_performing_sale_all_negative() {
        let records = vec![
            create_test_record("Refund1", "X", -30.0, "North"),
            create_test_record("Refund2", "X", -10.0, "North"),
        ];
        assert_eq!(top_performing_sale(&records).unwrap().product, "Refund2");
    }

    #[test]
    fn test_most_popular_product() {
        assert_eq!(most_popular_product(&sample_records()), "Laptop");
    }

    #[test]
    fn test_most_popular_product_tie_goes_to_first_seen() {
        let records = vec![
            create_test_record("Mouse", "X", 1.0, "North"),
            create_test_record("Chair", "X", 1.0, "North"),
            create_test_record("Chair", "X", 1.0, "North"),
            create_test_record("Mouse", "X", 1.0, "North"),
        ];
        assert_eq!(most_popular_product(&records), "Mouse");
    }

    #[test]
    fn test_sales_statistics_odd_count() {
        let stats = sales_statistics(&sample_records());
        assert_eq!(stats.mean, 550.0);
        assert_eq!(stats.median, 500.0);
    }

    #[test]
    fn test_sales_statistics_even_count() {
        let records = vec![
            create_test_record("A", "X", 10.0, "North"),
            create_test_record("B", "X", 40.0, "North"),
            create_test_record("C", "X", 20.0, "North"),
            create_test_record("D", "X", 30.0, "North"),
        ];
        let stats = sales_statistics(&records);
        assert_eq!(stats.mean, 25.0);
        assert_eq!(stats.median, 25.0);
    }

    #[test]
    fn test_empty_fallbacks() {
        let empty: Vec<SaleRecord> = vec![];

        assert_eq!(total_revenue(&empty), 0.0);
        assert!(revenue_by_category(&empty).is_empty());
        assert!(top_performing_sale(&empty).is_none());
        assert_eq!(most_popular_product(&empty), UNKNOWN_PRODUCT);
        assert_eq!(
            sales_statistics(&empty),
            SalesStatistics { mean: 0.0, median: 0.0 }
        );
    }
}
