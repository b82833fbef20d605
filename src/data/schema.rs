//! Schema Normalizer
//! Maps arbitrary column spellings to the canonical underscore schema.
//! Row values are never touched here.

use polars::prelude::*;

pub const YEAR: &str = "YEAR";
pub const MONTH: &str = "MONTH";
pub const SUPPLIER: &str = "SUPPLIER";
pub const ITEM_CODE: &str = "ITEM_CODE";
pub const ITEM_DESCRIPTION: &str = "ITEM_DESCRIPTION";
pub const ITEM_TYPE: &str = "ITEM_TYPE";
pub const RETAIL_SALES: &str = "RETAIL_SALES";
pub const RETAIL_TRANSFERS: &str = "RETAIL_TRANSFERS";
pub const WAREHOUSE_SALES: &str = "WAREHOUSE_SALES";
pub const MONTH_YEAR: &str = "MONTH_YEAR";

/// The three sales/transfer measures; never null after cleaning.
pub const MEASURE_COLUMNS: [&str; 3] = [RETAIL_SALES, RETAIL_TRANSFERS, WAREHOUSE_SALES];

/// Opaque string labels used for grouping and filtering.
pub const CATEGORY_COLUMNS: [&str; 4] = [SUPPLIER, ITEM_CODE, ITEM_DESCRIPTION, ITEM_TYPE];

/// Legacy space-separated labels from the raw dataset.
pub const RENAME_TABLE: [(&str, &str); 6] = [
    ("ITEM CODE", ITEM_CODE),
    ("ITEM DESCRIPTION", ITEM_DESCRIPTION),
    ("ITEM TYPE", ITEM_TYPE),
    ("RETAIL SALES", RETAIL_SALES),
    ("RETAIL TRANSFERS", RETAIL_TRANSFERS),
    ("WAREHOUSE SALES", WAREHOUSE_SALES),
];

/// Trim and uppercase every column label, then rename the known legacy
/// labels to their canonical form. Unrecognized columns pass through
/// unchanged. When a legacy column and its canonical twin are both present
/// the canonical one is authoritative and the legacy one is dropped.
/// Idempotent.
pub fn standardize_columns(df: &DataFrame) -> PolarsResult<DataFrame> {
    let mut out = df.clone();

    let names: Vec<String> = out
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    for name in names {
        let folded = name.trim().to_uppercase();
        if folded == name {
            continue;
        }
        if out.column(&folded).is_ok() {
            // Case-folded duplicate of an existing column.
            out = out.drop(&name)?;
        } else {
            out.rename(&name, folded.into())?;
        }
    }

    for (legacy, canonical) in RENAME_TABLE {
        if out.column(legacy).is_err() {
            continue;
        }
        if out.column(canonical).is_ok() {
            out = out.drop(legacy)?;
        } else {
            out.rename(legacy, canonical.into())?;
        }
    }

    Ok(out)
}
