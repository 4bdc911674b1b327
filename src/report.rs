// Sales Report - the five summary views bundled together, plus the
// plain-text rendering used by the console runner

use crate::aggregation::{self, SalesStatistics};
use crate::record::SaleRecord;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesReport {
    pub record_count: usize,
    pub total_revenue: f64,
    pub revenue_by_category: BTreeMap<String, f64>,
    pub top_sale: Option<SaleRecord>,
    pub most_popular_product: String,
    pub statistics: SalesStatistics,
}

impl SalesReport {
    pub fn from_records(records: &[SaleRecord]) -> Self {
        SalesReport {
            record_count: records.len(),
            total_revenue: aggregation::total_revenue(records),
            revenue_by_category: aggregation::revenue_by_category(records),
            top_sale: aggregation::top_performing_sale(records).cloned(),
            most_popular_product: aggregation::most_popular_product(records),
            statistics: aggregation::sales_statistics(records),
        }
    }
}

// ============================================================================
// TEXT RENDERING
// ============================================================================

const RULE: &str = "============================================";

/// Render the console report
pub fn render_report(report: &SalesReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", RULE));
    out.push_str("   SALES ANALYTICS CONSOLE RUNNER           \n");
    out.push_str(&format!("{}\n", RULE));
    out.push_str(&format!(
        "\n--- ANALYSIS RESULTS ({} records) ---\n",
        report.record_count
    ));

    out.push_str(&format!(
        "\n1. Total Revenue: {}\n",
        format_currency(report.total_revenue)
    ));

    out.push_str("\n2. Revenue by Category:\n");
    for (category, revenue) in &report.revenue_by_category {
        out.push_str(&format!("   - {:<15}: {}\n", category, format_currency(*revenue)));
    }

    match &report.top_sale {
        Some(sale) => out.push_str(&format!(
            "\n3. Top Single Sale: {} ({})\n",
            sale.product,
            format_currency(sale.amount)
        )),
        None => out.push_str("\n3. Top Single Sale: N/A\n"),
    }

    out.push_str(&format!(
        "\n4. Most Popular Product: {}\n",
        report.most_popular_product
    ));

    out.push_str("\n5. Statistics:\n");
    out.push_str(&format!(
        "   - Mean Sale:   {}\n",
        format_currency(report.statistics.mean)
    ));
    out.push_str(&format!(
        "   - Median Sale: {}\n",
        format_currency(report.statistics.median)
    ));

    out
}

/// `$1,234.56` style, with a leading minus for negatives
pub fn format_currency(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::new();
    for (count, ch) in whole.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let whole: String = grouped.chars().rev().collect();

    let sign = if amount < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, whole, cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_records() -> Vec<SaleRecord> {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        vec![
            SaleRecord::new(date, "Laptop", "Electronics", 1000.0, "North"),
            SaleRecord::new(date, "Mouse", "Electronics", 50.0, "North"),
            SaleRecord::new(date, "Chair", "Furniture", 200.0, "South"),
        ]
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(50.0), "$50.00");
        assert_eq!(format_currency(1250.0), "$1,250.00");
        assert_eq!(format_currency(416.666), "$416.67");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(-99.9), "-$99.90");
    }

    #[test]
    fn test_report_from_records() {
        let report = SalesReport::from_records(&sample_records());

        assert_eq!(report.record_count, 3);
        assert_eq!(report.total_revenue, 1250.0);
        assert_eq!(report.revenue_by_category["Electronics"], 1050.0);
        assert_eq!(report.top_sale.as_ref().unwrap().product, "Laptop");
        assert_eq!(report.most_popular_product, "Laptop");
        assert_eq!(report.statistics.median, 200.0);
    }

    #[test]
    fn test_render_report_sections() {
        let text = render_report(&SalesReport::from_records(&sample_records()));

        assert!(text.contains("1. Total Revenue: $1,250.00"));
        assert!(text.contains("   - Electronics    : $1,050.00"));
        assert!(text.contains("   - Furniture      : $200.00"));
        assert!(text.contains("3. Top Single Sale: Laptop ($1,000.00)"));
        assert!(text.contains("4. Most Popular Product: Laptop"));
        assert!(text.contains("   - Mean Sale:   $416.67"));
        assert!(text.contains("   - Median Sale: $200.00"));
    }

    #[test]
    fn test_render_report_line_layout() {
        let text = render_report(&SalesReport::from_records(&sample_records()));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], RULE);
        assert_eq!(lines[2], RULE);
        assert!(text.ends_with("   - Median Sale: $200.00\n"));
        assert_eq!(
            lines.iter().filter(|l| l.starts_with("   - ")).count(),
            4,
            "two categories plus mean and median"
        );
    }

    #[test]
    fn test_render_empty_report() {
        let text = render_report(&SalesReport::from_records(&[]));

        assert!(text.contains("1. Total Revenue: $0.00"));
        assert!(text.contains("3. Top Single Sale: N/A"));
        assert!(text.contains("4. Most Popular Product: Unknown"));
    }
}
