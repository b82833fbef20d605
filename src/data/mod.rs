//! Data module - CSV loading, schema normalization, cleaning, and caching

mod cache;
mod cleaner;
mod loader;
pub mod schema;

pub use cache::{source_key, PrepareCache};
pub use cleaner::{
    build_period_keys, cell_label, clean, coerce_decimal, coerce_integer, parse_decimal,
    parse_integer, prepare, zero_fill, PeriodTable,
};
pub use loader::{DataLoader, LoaderError};
