//! Aggregator
//! Computes the KPI mapping and the pre-aggregated tables behind every
//! chart. An empty input table is a valid case and produces empty or zero
//! outputs rather than an error.

use polars::prelude::*;
use std::collections::BTreeMap;

use crate::data::{cell_label, schema};

/// The four fixed summary metrics, always displayed in the same order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KpiSummary {
    pub total_retail_sales: f64,
    pub total_retail_transfers: f64,
    pub total_warehouse_sales: f64,
    pub avg_monthly_retail_sales: f64,
}

impl KpiSummary {
    /// Fixed display order used by the KPI panel and the text report.
    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("Total Retail Sales", self.total_retail_sales),
            ("Total Retail Transfers", self.total_retail_transfers),
            ("Total Warehouse Sales", self.total_warehouse_sales),
            ("Avg Monthly Retail Sales", self.avg_monthly_retail_sales),
        ]
    }
}

/// One point of the monthly retail trend, keyed by "YYYY-MM".
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodTotal {
    pub period: String,
    pub retail_sales: f64,
}

/// One bar of a top-N ranking chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionTotal {
    pub label: String,
    pub total: f64,
}

/// Sales channel for the retail-vs-warehouse comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Retail,
    Warehouse,
}

impl Channel {
    pub fn label(self) -> &'static str {
        match self {
            Channel::Retail => "RETAIL_SALES",
            Channel::Warehouse => "WAREHOUSE_SALES",
        }
    }
}

/// One long-form row of the channel comparison table.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelPoint {
    pub period: String,
    pub channel: Channel,
    pub sales: f64,
}

/// Measure column as plain decimals; nulls count as zero and an absent
/// column contributes nothing.
fn measure_values(df: &DataFrame, name: &str) -> Vec<f64> {
    let Ok(column) = df.column(name) else {
        return Vec::new();
    };
    let Ok(casted) = column.cast(&DataType::Float64) else {
        return Vec::new();
    };
    let Ok(values) = casted.f64() else {
        return Vec::new();
    };
    values.into_iter().map(|v| v.unwrap_or(0.0)).collect()
}

/// Sum of a measure column over all rows; 0 when the table is empty or the
/// column is absent.
pub fn column_total(df: &DataFrame, name: &str) -> f64 {
    measure_values(df, name).iter().sum()
}

/// Per-group sums of a measure, keyed by the string form of the grouping
/// column. Null grouping keys are skipped. The BTreeMap keeps "YYYY-MM"
/// keys in calendar order.
pub fn grouped_totals(df: &DataFrame, key: &str, measure: &str) -> BTreeMap<String, f64> {
    let Ok(keys) = df.column(key) else {
        return BTreeMap::new();
    };
    let keys = keys.as_materialized_series();
    let values = measure_values(df, measure);

    let mut totals = BTreeMap::new();
    for i in 0..df.height() {
        let Some(label) = keys.get(i).ok().as_ref().and_then(cell_label) else {
            continue;
        };
        let value = values.get(i).copied().unwrap_or(0.0);
        *totals.entry(label).or_insert(0.0) += value;
    }
    totals
}

/// The KPI mapping. "Avg Monthly Retail Sales" is the mean of per-period
/// sums, never the per-row mean; it is 0.0 when MONTH_YEAR is absent or the
/// table is empty.
pub fn compute_kpis(df: &DataFrame) -> KpiSummary {
    let monthly = grouped_totals(df, schema::MONTH_YEAR, schema::RETAIL_SALES);
    let avg_monthly_retail_sales = if monthly.is_empty() {
        0.0
    } else {
        monthly.values().sum::<f64>() / monthly.len() as f64
    };

    KpiSummary {
        total_retail_sales: column_total(df, schema::RETAIL_SALES),
        total_retail_transfers: column_total(df, schema::RETAIL_TRANSFERS),
        total_warehouse_sales: column_total(df, schema::WAREHOUSE_SALES),
        avg_monthly_retail_sales,
    }
}

/// Per-period retail sums, ascending by period.
pub fn monthly_trend(df: &DataFrame) -> Vec<PeriodTotal> {
    grouped_totals(df, schema::MONTH_YEAR, schema::RETAIL_SALES)
        .into_iter()
        .map(|(period, retail_sales)| PeriodTotal {
            period,
            retail_sales,
        })
        .collect()
}

/// The `n` largest per-group retail sums for a dimension, descending.
/// Ties break on the label so the ranking is stable, and every group whose
/// sum exceeds the n-th largest is always included.
pub fn top_by_dimension(df: &DataFrame, dimension: &str, n: usize) -> Vec<DimensionTotal> {
    let mut ranked: Vec<DimensionTotal> = grouped_totals(df, dimension, schema::RETAIL_SALES)
        .into_iter()
        .map(|(label, total)| DimensionTotal { label, total })
        .collect();
    ranked.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.label.cmp(&b.label))
    });
    ranked.truncate(n);
    ranked
}

/// Retail and warehouse per-period sums in long form for dual-series
/// plotting, ascending by period with the retail point first.
pub fn channel_comparison(df: &DataFrame) -> Vec<ChannelPoint> {
    let retail = grouped_totals(df, schema::MONTH_YEAR, schema::RETAIL_SALES);
    let warehouse = grouped_totals(df, schema::MONTH_YEAR, schema::WAREHOUSE_SALES);

    let mut periods: Vec<&String> = retail.keys().chain(warehouse.keys()).collect();
    periods.sort();
    periods.dedup();

    let mut out = Vec::with_capacity(periods.len() * 2);
    for period in periods {
        out.push(ChannelPoint {
            period: period.clone(),
            channel: Channel::Retail,
            sales: retail.get(period).copied().unwrap_or(0.0),
        });
        out.push(ChannelPoint {
            period: period.clone(),
            channel: Channel::Warehouse,
            sales: warehouse.get(period).copied().unwrap_or(0.0),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::clean;

    #[test]
    fn totals_zero_fill_missing_values() {
        let raw = DataFrame::new(vec![Column::new(
            "RETAIL_SALES".into(),
            vec![Some("10"), Some("20"), None],
        )])
        .unwrap();
        let df = clean(&raw).unwrap();
        assert_eq!(column_total(&df, "RETAIL_SALES"), 30.0);
    }

    #[test]
    fn empty_table_yields_zero_kpis() {
        let df = DataFrame::empty();
        let kpis = compute_kpis(&df);
        assert_eq!(kpis.total_retail_sales, 0.0);
        assert_eq!(kpis.avg_monthly_retail_sales, 0.0);
        assert!(monthly_trend(&df).is_empty());
        assert!(channel_comparison(&df).is_empty());
    }

    #[test]
    fn avg_monthly_is_mean_of_period_sums() {
        // Three rows over two periods: per-row mean would be 400/3.
        let df = DataFrame::new(vec![
            Column::new(
                "MONTH_YEAR".into(),
                vec!["2023-01", "2023-02", "2023-02"],
            ),
            Column::new("RETAIL_SALES".into(), vec![100.0, 150.0, 150.0]),
        ])
        .unwrap();
        let kpis = compute_kpis(&df);
        assert_eq!(kpis.avg_monthly_retail_sales, 200.0);
    }

    #[test]
    fn kpi_entries_keep_fixed_order() {
        let labels: Vec<&str> = KpiSummary::default()
            .entries()
            .iter()
            .map(|(label, _)| *label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "Total Retail Sales",
                "Total Retail Transfers",
                "Total Warehouse Sales",
                "Avg Monthly Retail Sales",
            ]
        );
    }

    #[test]
    fn trend_is_ascending_by_period() {
        let df = DataFrame::new(vec![
            Column::new("MONTH_YEAR".into(), vec!["2023-02", "2022-12", "2023-01"]),
            Column::new("RETAIL_SALES".into(), vec![2.0, 1.0, 3.0]),
        ])
        .unwrap();
        let trend = monthly_trend(&df);
        let periods: Vec<&str> = trend.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(periods, vec!["2022-12", "2023-01", "2023-02"]);
    }

    #[test]
    fn top_n_keeps_the_largest_sums() {
        let suppliers: Vec<String> = (0..11).map(|i| format!("S{i:02}")).collect();
        let sales: Vec<f64> = (0..11).map(|i| f64::from(i) * 10.0).collect();
        let df = DataFrame::new(vec![
            Column::new("SUPPLIER".into(), suppliers),
            Column::new("RETAIL_SALES".into(), sales),
        ])
        .unwrap();
        let top = top_by_dimension(&df, "SUPPLIER", 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].label, "S10");
        assert_eq!(top[0].total, 100.0);
        // The smallest sum (S00, 0.0) is the one left out.
        assert!(top.iter().all(|r| r.label != "S00"));
        assert!(top.windows(2).all(|w| w[0].total >= w[1].total));
    }

    #[test]
    fn channel_comparison_is_long_form() {
        let df = DataFrame::new(vec![
            Column::new("MONTH_YEAR".into(), vec!["2023-01", "2023-01"]),
            Column::new("RETAIL_SALES".into(), vec![5.0, 5.0]),
            Column::new("WAREHOUSE_SALES".into(), vec![7.0, 3.0]),
        ])
        .unwrap();
        let rows = channel_comparison(&df);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].channel.label(), "RETAIL_SALES");
        assert_eq!(rows[0].sales, 10.0);
        assert_eq!(rows[1].channel.label(), "WAREHOUSE_SALES");
        assert_eq!(rows[1].sales, 10.0);
    }
}
