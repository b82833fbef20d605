//! Filter Engine
//! Applies the operator's inclusion sets over the prepared table and
//! discovers the selectable options for each dimension.

use polars::prelude::*;
use std::collections::BTreeSet;

use crate::data::{cell_label, schema};

/// The three inclusion sets chosen by the operator. An empty set for a
/// dimension means "no restriction on that dimension", never "exclude
/// everything"; dimensions compose by logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub years: BTreeSet<i64>,
    pub suppliers: BTreeSet<String>,
    pub item_types: BTreeSet<String>,
}

impl FilterSelection {
    pub fn is_unrestricted(&self) -> bool {
        self.years.is_empty() && self.suppliers.is_empty() && self.item_types.is_empty()
    }
}

/// Return the subset of rows matching every non-empty dimension set.
/// Supplier and item-type membership compares the string form of the stored
/// value (so numeric-looking labels still match); years compare as
/// integers. Row order and all columns are preserved, and a dimension whose
/// column is absent imposes no constraint.
pub fn apply_filters(df: &DataFrame, selection: &FilterSelection) -> PolarsResult<DataFrame> {
    if df.is_empty() || selection.is_unrestricted() {
        return Ok(df.clone());
    }

    let mut mask = vec![true; df.height()];

    if !selection.years.is_empty() {
        if let Ok(column) = df.column(schema::YEAR) {
            let casted = column.cast(&DataType::Int64)?;
            let years = casted.i64()?;
            for (i, keep) in mask.iter_mut().enumerate() {
                *keep &= years.get(i).is_some_and(|y| selection.years.contains(&y));
            }
        }
    }

    restrict_labels(df, schema::SUPPLIER, &selection.suppliers, &mut mask)?;
    restrict_labels(df, schema::ITEM_TYPE, &selection.item_types, &mut mask)?;

    df.filter(&BooleanChunked::from_slice("selection".into(), &mask))
}

fn restrict_labels(
    df: &DataFrame,
    name: &str,
    allowed: &BTreeSet<String>,
    mask: &mut [bool],
) -> PolarsResult<()> {
    if allowed.is_empty() {
        return Ok(());
    }
    let Ok(column) = df.column(name) else {
        return Ok(());
    };
    let series = column.as_materialized_series();
    for (i, keep) in mask.iter_mut().enumerate() {
        if !*keep {
            continue;
        }
        *keep = series
            .get(i)
            .ok()
            .as_ref()
            .and_then(cell_label)
            .is_some_and(|label| allowed.contains(&label));
    }
    Ok(())
}

/// Distinct years present in the table, ascending. Empty when the column is
/// absent.
pub fn year_options(df: &DataFrame) -> Vec<i64> {
    let Ok(column) = df.column(schema::YEAR) else {
        return Vec::new();
    };
    let Ok(casted) = column.cast(&DataType::Int64) else {
        return Vec::new();
    };
    let Ok(years) = casted.i64() else {
        return Vec::new();
    };
    let mut out: Vec<i64> = years.into_iter().flatten().collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Distinct labels of a categorical column, sorted. Empty when the column
/// is absent.
pub fn label_options(df: &DataFrame, name: &str) -> Vec<String> {
    let Ok(column) = df.column(name) else {
        return Vec::new();
    };
    let Ok(unique) = column.unique() else {
        return Vec::new();
    };
    let series = unique.as_materialized_series();
    let mut out: Vec<String> = (0..series.len())
        .filter_map(|i| series.get(i).ok().as_ref().and_then(cell_label))
        .collect();
    out.sort();
    out
}
