//! Charts module - interactive dashboard charts

mod plotter;

pub use plotter::{ChartPlotter, ITEM_BAR_COLOR, SUPPLIER_BAR_COLOR};
