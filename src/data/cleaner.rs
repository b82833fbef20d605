//! Type Coercion & Cleaning, plus the Period Key Builder.
//!
//! Parse failures are local and silent: a cell that cannot be read as a
//! number becomes missing, and missing measures are zero-filled in a
//! separate step so "was missing" and "was genuinely zero" stay
//! distinguishable. The period key builder is the only stage that removes
//! rows; the count of dropped rows is reported for auditability.

use polars::prelude::*;

use crate::data::schema;

/// A table with period keys attached, together with how many rows had to be
/// dropped because YEAR or MONTH did not resolve.
#[derive(Debug, Clone)]
pub struct PeriodTable {
    pub table: DataFrame,
    pub dropped_rows: usize,
}

/// Read a cell as a decimal number. Strings tolerate surrounding whitespace
/// and thousands separators; anything else unparseable is missing.
pub fn parse_decimal(value: &AnyValue) -> Option<f64> {
    match value {
        AnyValue::Float64(v) => Some(*v),
        AnyValue::Float32(v) => Some(f64::from(*v)),
        AnyValue::Int64(v) => Some(*v as f64),
        AnyValue::Int32(v) => Some(f64::from(*v)),
        AnyValue::Int16(v) => Some(f64::from(*v)),
        AnyValue::Int8(v) => Some(f64::from(*v)),
        AnyValue::UInt64(v) => Some(*v as f64),
        AnyValue::UInt32(v) => Some(f64::from(*v)),
        AnyValue::UInt16(v) => Some(f64::from(*v)),
        AnyValue::UInt8(v) => Some(f64::from(*v)),
        AnyValue::String(s) => parse_decimal_text(s),
        AnyValue::StringOwned(s) => parse_decimal_text(s.as_str()),
        _ => None,
    }
}

fn parse_decimal_text(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.replace(',', "").parse().ok()
}

/// Read a cell as an integer. Whole-valued floats (e.g. "2023.0") are
/// accepted; fractional values are missing.
pub fn parse_integer(value: &AnyValue) -> Option<i64> {
    match value {
        AnyValue::Int64(v) => Some(*v),
        AnyValue::Int32(v) => Some(i64::from(*v)),
        AnyValue::Int16(v) => Some(i64::from(*v)),
        AnyValue::Int8(v) => Some(i64::from(*v)),
        AnyValue::UInt64(v) => i64::try_from(*v).ok(),
        AnyValue::UInt32(v) => Some(i64::from(*v)),
        AnyValue::UInt16(v) => Some(i64::from(*v)),
        AnyValue::UInt8(v) => Some(i64::from(*v)),
        AnyValue::Float64(v) if v.fract() == 0.0 => Some(*v as i64),
        AnyValue::Float32(v) if f64::from(*v).fract() == 0.0 => Some(*v as i64),
        AnyValue::String(s) => parse_integer_text(s),
        AnyValue::StringOwned(s) => parse_integer_text(s.as_str()),
        _ => None,
    }
}

fn parse_integer_text(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    let f: f64 = s.parse().ok()?;
    (f.fract() == 0.0).then_some(f as i64)
}

/// String form of a cell, `None` for nulls. This is the value used for
/// grouping keys and filter-set membership.
pub fn cell_label(value: &AnyValue) -> Option<String> {
    if value.is_null() {
        return None;
    }
    Some(value.to_string().trim_matches('"').to_string())
}

/// Coerce a column to decimals, keeping failures as explicit missing values.
pub fn coerce_decimal(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let series = df.column(name)?.as_materialized_series();
    Ok((0..series.len())
        .map(|i| series.get(i).ok().as_ref().and_then(parse_decimal))
        .collect())
}

/// Coerce a column to integers, keeping failures as explicit missing values.
pub fn coerce_integer(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<i64>>> {
    let series = df.column(name)?.as_materialized_series();
    Ok((0..series.len())
        .map(|i| series.get(i).ok().as_ref().and_then(parse_integer))
        .collect())
}

/// The zero-fill policy for the three measures, applied as its own visible
/// step after coercion.
pub fn zero_fill(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().map(|v| v.unwrap_or(0.0)).collect()
}

/// Produce a table where the three measures are non-null decimals (missing
/// or unparseable values become 0) and YEAR/MONTH are nullable integers.
/// Categorical columns stay opaque strings; absent columns are tolerated.
pub fn clean(df: &DataFrame) -> PolarsResult<DataFrame> {
    let mut out = df.clone();

    for name in schema::MEASURE_COLUMNS {
        if out.column(name).is_err() {
            continue;
        }
        let parsed = coerce_decimal(&out, name)?;
        out.with_column(Column::new(name.into(), zero_fill(&parsed)))?;
    }

    for name in [schema::YEAR, schema::MONTH] {
        if out.column(name).is_err() {
            continue;
        }
        let parsed = coerce_integer(&out, name)?;
        out.with_column(Column::new(name.into(), parsed))?;
    }

    Ok(out)
}

/// Attach `MONTH_YEAR` ("YYYY-MM") to every row whose YEAR and MONTH
/// resolve, and drop the rows where they do not. Months outside 1-12 and
/// non-positive years count as unresolvable. When the YEAR or MONTH column
/// is absent altogether the table passes through untouched.
pub fn build_period_keys(df: &DataFrame) -> PolarsResult<PeriodTable> {
    if df.column(schema::YEAR).is_err() || df.column(schema::MONTH).is_err() {
        return Ok(PeriodTable {
            table: df.clone(),
            dropped_rows: 0,
        });
    }

    let years = coerce_integer(df, schema::YEAR)?;
    let months = coerce_integer(df, schema::MONTH)?;
    let mask: Vec<bool> = years
        .iter()
        .zip(&months)
        .map(|(y, m)| matches!((y, m), (Some(y), Some(m)) if *y > 0 && (1..=12).contains(m)))
        .collect();

    let mut kept = df.filter(&BooleanChunked::from_slice("resolvable".into(), &mask))?;

    let mut labels = Vec::with_capacity(kept.height());
    for (i, keep) in mask.iter().enumerate() {
        if !keep {
            continue;
        }
        if let (Some(y), Some(m)) = (years[i], months[i]) {
            labels.push(format!("{y:04}-{m:02}"));
        }
    }
    kept.with_column(Column::new(schema::MONTH_YEAR.into(), labels))?;

    Ok(PeriodTable {
        dropped_rows: df.height() - kept.height(),
        table: kept,
    })
}

/// The full preparation pipeline: normalize → clean → period keys.
/// Everything downstream (filters, KPIs, charts, exports) consumes the
/// post-drop table, so all outputs share the same row population.
pub fn prepare(raw: &DataFrame) -> PolarsResult<PeriodTable> {
    let standardized = schema::standardize_columns(raw)?;
    let cleaned = clean(&standardized)?;
    build_period_keys(&cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: Vec<Column>) -> DataFrame {
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn decimal_coercion_keeps_missing_explicit() {
        let df = table(vec![Column::new(
            "RETAIL_SALES".into(),
            vec![Some("10"), Some("abc"), None, Some("-5"), Some("1,200.5")],
        )]);
        let parsed = coerce_decimal(&df, "RETAIL_SALES").unwrap();
        assert_eq!(parsed, vec![Some(10.0), None, None, Some(-5.0), Some(1200.5)]);
        // Zero-fill is a separate step; negatives pass through untouched.
        assert_eq!(zero_fill(&parsed), vec![10.0, 0.0, 0.0, -5.0, 1200.5]);
    }

    #[test]
    fn clean_zero_fills_measures_only() {
        let df = table(vec![
            Column::new("RETAIL_SALES".into(), vec![Some("10"), Some("oops")]),
            Column::new("YEAR".into(), vec![Some("2023"), Some("bad")]),
            Column::new("SUPPLIER".into(), vec!["A", "B"]),
        ]);
        let out = clean(&df).unwrap();
        let sales = out.column("RETAIL_SALES").unwrap().f64().unwrap();
        assert_eq!(sales.get(0), Some(10.0));
        assert_eq!(sales.get(1), Some(0.0));
        // YEAR stays nullable rather than zero-filled.
        let years = out.column("YEAR").unwrap().i64().unwrap();
        assert_eq!(years.get(0), Some(2023));
        assert_eq!(years.get(1), None);
    }

    #[test]
    fn period_key_format() {
        let df = table(vec![
            Column::new("YEAR".into(), vec![2023i64]),
            Column::new("MONTH".into(), vec![1i64]),
        ]);
        let out = build_period_keys(&df).unwrap();
        assert_eq!(out.dropped_rows, 0);
        let key = out
            .table
            .column("MONTH_YEAR")
            .unwrap()
            .str()
            .unwrap()
            .get(0);
        assert_eq!(key, Some("2023-01"));
    }

    #[test]
    fn unresolvable_rows_are_dropped() {
        let df = table(vec![
            Column::new("YEAR".into(), vec![Some(2023i64), Some(2023), None, Some(-4)]),
            Column::new("MONTH".into(), vec![Some(1i64), Some(13), Some(5), Some(2)]),
        ]);
        let out = build_period_keys(&df).unwrap();
        assert_eq!(out.table.height(), 1);
        assert_eq!(out.dropped_rows, 3);
    }

    #[test]
    fn missing_year_column_passes_through() {
        let df = table(vec![Column::new("MONTH".into(), vec![1i64, 2])]);
        let out = build_period_keys(&df).unwrap();
        assert_eq!(out.table.height(), 2);
        assert_eq!(out.dropped_rows, 0);
        assert!(out.table.column("MONTH_YEAR").is_err());
    }
}
