//! Analysis module - filtering and aggregation over the prepared table

mod aggregate;
mod filter;

pub use aggregate::{
    channel_comparison, column_total, compute_kpis, grouped_totals, monthly_trend,
    top_by_dimension, Channel, ChannelPoint, DimensionTotal, KpiSummary, PeriodTotal,
};
pub use filter::{apply_filters, label_options, year_options, FilterSelection};
