//! End-to-end pipeline tests: messy raw table in, standardized and keyed
//! table out, filters and aggregates on top.

use polars::prelude::*;

use salesdash::analysis::{
    apply_filters, channel_comparison, compute_kpis, monthly_trend, top_by_dimension,
    FilterSelection,
};
use salesdash::data::schema;
use salesdash::data::prepare;

/// A small raw table the way it arrives from disk: lowercase and padded
/// headers, string-typed measures with one unparseable value.
fn raw_table() -> DataFrame {
    DataFrame::new(vec![
        Column::new("year".into(), vec!["2023", "2023", "2023"]),
        Column::new(" Month ".into(), vec!["1", "1", "2"]),
        Column::new("Supplier".into(), vec!["ACME", "BOLT", "ACME"]),
        Column::new("Item Code".into(), vec!["100", "200", "300"]),
        Column::new(
            "Item Description".into(),
            vec!["RED WINE", "LAGER", "WHISKY"],
        ),
        Column::new("Item Type".into(), vec!["WINE", "BEER", "LIQUOR"]),
        Column::new("Retail Sales".into(), vec!["10.5", "abc", "20.0"]),
        Column::new("Retail Transfers".into(), vec!["1", "2", "3"]),
        Column::new("Warehouse Sales".into(), vec!["5", "5", "5"]),
    ])
    .unwrap()
}

#[test]
fn prepare_standardizes_and_keys_periods() {
    let prepared = prepare(&raw_table()).unwrap();

    assert_eq!(prepared.table.height(), 3);
    assert_eq!(prepared.dropped_rows, 0);
    assert!(prepared.table.column(schema::MONTH_YEAR).is_ok());
    assert!(prepared.table.column(schema::SUPPLIER).is_ok());

    let keys = prepared.table.column(schema::MONTH_YEAR).unwrap();
    let keys = keys.str().unwrap();
    assert_eq!(keys.get(0), Some("2023-01"));
    assert_eq!(keys.get(2), Some("2023-02"));
}

#[test]
fn full_selection_matches_unrestricted() {
    let prepared = prepare(&raw_table()).unwrap();

    let all = FilterSelection {
        years: [2023].into(),
        suppliers: ["ACME".to_string(), "BOLT".to_string()].into(),
        item_types: ["WINE".to_string(), "BEER".to_string(), "LIQUOR".to_string()].into(),
    };
    let everything = apply_filters(&prepared.table, &all).unwrap();
    let unrestricted = apply_filters(&prepared.table, &FilterSelection::default()).unwrap();

    assert_eq!(everything.height(), unrestricted.height());
    assert_eq!(
        compute_kpis(&everything).total_retail_sales,
        compute_kpis(&unrestricted).total_retail_sales
    );
}

#[test]
fn aggregates_zero_fill_and_order_periods() {
    let prepared = prepare(&raw_table()).unwrap();
    let df = &prepared.table;

    // "abc" cleans to 0, so the retail total is 10.5 + 0 + 20.0.
    let kpis = compute_kpis(df);
    assert_eq!(kpis.total_retail_sales, 30.5);
    assert_eq!(kpis.avg_monthly_retail_sales, 15.25);

    let trend = monthly_trend(df);
    let periods: Vec<&str> = trend.iter().map(|p| p.period.as_str()).collect();
    assert_eq!(periods, vec!["2023-01", "2023-02"]);

    let labels: Vec<&str> = kpis.entries().iter().map(|(label, _)| *label).collect();
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
fn filters_compose_across_dimensions() {
    let prepared = prepare(&raw_table()).unwrap();

    let selection = FilterSelection {
        years: [2023].into(),
        suppliers: ["ACME".to_string()].into(),
        item_types: Default::default(),
    };
    let filtered = apply_filters(&prepared.table, &selection).unwrap();
    assert_eq!(filtered.height(), 2);

    let ranked = top_by_dimension(&filtered, schema::ITEM_DESCRIPTION, 10);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].label, "WHISKY");
    assert_eq!(ranked[0].total, 20.0);

    let channels = channel_comparison(&filtered);
    // Two periods, retail + warehouse each.
    assert_eq!(channels.len(), 4);
    assert_eq!(channels[0].period, "2023-01");
}

#[test]
fn unresolvable_periods_are_dropped_before_aggregation() {
    let raw = DataFrame::new(vec![
        Column::new("YEAR".into(), vec![Some(2023i64), Some(2023), None]),
        Column::new("MONTH".into(), vec![Some(2i64), Some(13), Some(3)]),
        Column::new("RETAIL_SALES".into(), vec![100.0, 999.0, 999.0]),
    ])
    .unwrap();

    let prepared = prepare(&raw).unwrap();
    assert_eq!(prepared.table.height(), 1);
    assert_eq!(prepared.dropped_rows, 2);

    let kpis = compute_kpis(&prepared.table);
    assert_eq!(kpis.total_retail_sales, 100.0);

    let trend = monthly_trend(&prepared.table);
    assert_eq!(trend.len(), 1);
    assert_eq!(trend[0].period, "2023-02");
}
