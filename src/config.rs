//! Application configuration.
//! Optional `salesdash.json` next to the executable; every field has a
//! default so the file can be absent or partial.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH: &str = "salesdash.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default data source; the cleaned export of the public dataset.
    pub primary_data_path: PathBuf,
    /// Read when the primary file is absent.
    pub fallback_data_path: PathBuf,
    /// How many suppliers/items the ranking charts keep.
    pub top_n: usize,
    /// Row cap for the filtered-data preview.
    pub preview_rows: usize,
    /// How many suppliers start selected in the supplier filter.
    pub default_supplier_count: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            primary_data_path: PathBuf::from("data/cleaned_warehouse_and_retail_sales.csv"),
            fallback_data_path: PathBuf::from("data/Warehouse_and_Retail_Sales.csv"),
            top_n: 10,
            preview_rows: 1000,
            default_supplier_count: 10,
        }
    }
}

impl AppConfig {
    /// Load `salesdash.json` if present; a missing or malformed file falls
    /// back to the defaults with a warning rather than failing startup.
    pub fn load() -> Self {
        match Self::read(Path::new(CONFIG_PATH)) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(err) => {
                log::warn!("ignoring {CONFIG_PATH}: {err:#}");
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(config))
    }
}
