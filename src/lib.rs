//! Sales Performance Dashboard
//!
//! Loads a warehouse/retail sales CSV, filters it by year, supplier, and
//! item type, and renders KPIs, charts, a data preview, and two export
//! artifacts. The pipeline modules (`data`, `analysis`, `export`) are
//! UI-free; `gui` wires them into an eframe application.

pub mod analysis;
pub mod charts;
pub mod config;
pub mod data;
pub mod export;
pub mod gui;
