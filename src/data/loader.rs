//! CSV Data Loader Module
//! Handles CSV acquisition using Polars: either the configured default file
//! (with a fallback path) or an operator-supplied upload.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("No data loaded")]
    NoData,
    #[error("Data file not found: {0} (fallback {1} is also missing)")]
    MissingDataFile(PathBuf, PathBuf),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Load a CSV file using Polars' lazy reader.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        self.file_path = Some(file_path.to_path_buf());

        // Lazy scan for memory efficiency, then collect
        let df = LazyCsvReader::new(file_path.to_string_lossy().to_string())
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        log::info!(
            "loaded {} rows, {} columns from {}",
            df.height(),
            df.width(),
            file_path.display()
        );
        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Load the default dataset, falling back to the secondary path when the
    /// primary file is absent.
    pub fn load_with_fallback(
        &mut self,
        primary: &Path,
        fallback: &Path,
    ) -> Result<&DataFrame, LoaderError> {
        if primary.exists() {
            return self.load_csv(primary);
        }
        log::warn!(
            "primary data file {} missing, trying {}",
            primary.display(),
            fallback.display()
        );
        if fallback.exists() {
            return self.load_csv(fallback);
        }
        Err(LoaderError::MissingDataFile(
            primary.to_path_buf(),
            fallback.to_path_buf(),
        ))
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }
}
