//! Export Layer
//! Serializes the filtered table to CSV and the KPI mapping to a plain-text
//! summary, one `label: value` line per metric in the fixed KPI order.

use num_format::{Locale, ToFormattedString};
use polars::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

use crate::analysis::KpiSummary;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize table: {0}")]
    Csv(#[from] PolarsError),
}

/// Round to a whole number with thousands separators; the format shared by
/// the KPI cards and the text report.
pub fn format_metric(value: f64) -> String {
    (value.round() as i64).to_formatted_string(&Locale::en)
}

pub fn kpi_summary_text(kpis: &KpiSummary) -> String {
    kpis.entries()
        .iter()
        .map(|(label, value)| format!("{label}: {}", format_metric(*value)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the filtered table, all canonical columns included.
pub fn write_filtered_csv(df: &DataFrame, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut out = df.clone();
    CsvWriter::new(file).include_header(true).finish(&mut out)?;
    log::info!("wrote {} filtered rows to {}", out.height(), path.display());
    Ok(())
}

pub fn write_kpi_summary(kpis: &KpiSummary, path: &Path) -> Result<(), ExportError> {
    let mut file = File::create(path)?;
    file.write_all(kpi_summary_text(kpis).as_bytes())?;
    file.write_all(b"\n")?;
    log::info!("wrote KPI summary to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_formatting_rounds_and_separates() {
        assert_eq!(format_metric(1234567.4), "1,234,567");
        assert_eq!(format_metric(999.6), "1,000");
        assert_eq!(format_metric(0.0), "0");
        assert_eq!(format_metric(-1500.0), "-1,500");
    }

    #[test]
    fn summary_lines_follow_kpi_order() {
        let kpis = KpiSummary {
            total_retail_sales: 1000.0,
            total_retail_transfers: 2000.0,
            total_warehouse_sales: 3000.0,
            avg_monthly_retail_sales: 250.0,
        };
        let text = kpi_summary_text(&kpis);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Total Retail Sales: 1,000",
                "Total Retail Transfers: 2,000",
                "Total Warehouse Sales: 3,000",
                "Avg Monthly Retail Sales: 250",
            ]
        );
    }
}
