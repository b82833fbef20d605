//! Sales Dashboard Main Application
//! Main window with the control panel and the dashboard view.

use polars::prelude::*;

use crate::analysis::{
    self, apply_filters, channel_comparison, compute_kpis, monthly_trend, top_by_dimension,
};
use crate::config::AppConfig;
use crate::data::schema;
use crate::data::{cell_label, prepare, source_key, DataLoader, PeriodTable, PrepareCache};
use crate::export;
use crate::gui::control_panel::{ControlPanel, ControlPanelAction, DataSourceMode};
use crate::gui::dashboard::{DashboardOutputs, DashboardView};

/// Main application state
pub struct DashboardApp {
    config: AppConfig,
    loader: DataLoader,
    cache: PrepareCache,
    control_panel: ControlPanel,
    dashboard: DashboardView,
    prepared: Option<PeriodTable>,
    filtered: Option<DataFrame>,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            config,
            loader: DataLoader::new(),
            cache: PrepareCache::new(),
            control_panel: ControlPanel::new(),
            dashboard: DashboardView::new(),
            prepared: None,
            filtered: None,
        };
        app.reload_data();
        app
    }

    /// Load the raw table for the current data source and rebuild everything.
    fn reload_data(&mut self) {
        let result = match self.control_panel.settings.source_mode {
            DataSourceMode::Default => {
                let primary = self.config.primary_data_path.clone();
                let fallback = self.config.fallback_data_path.clone();
                self.loader.load_with_fallback(&primary, &fallback)
            }
            DataSourceMode::Upload => {
                let Some(path) = self.control_panel.settings.upload_path.clone() else {
                    self.prepared = None;
                    self.filtered = None;
                    self.dashboard.clear();
                    self.control_panel.set_status(
                        "Upload a CSV to proceed, or switch back to the bundled dataset.",
                    );
                    return;
                };
                self.loader.load_csv(&path)
            }
        };

        if let Err(err) = result {
            log::warn!("failed to load data: {err}");
            self.prepared = None;
            self.filtered = None;
            self.dashboard.clear();
            self.control_panel.set_status(&format!("Error: {err}"));
            return;
        }

        self.prepare_current();
    }

    /// Standardize, clean, and key the loaded table, then refresh the
    /// filter options and the dashboard.
    fn prepare_current(&mut self) {
        let Some(raw) = self.loader.get_dataframe().cloned() else {
            return;
        };

        let prepared = match self.loader.get_file_path().map(|path| source_key(path)) {
            Some(key) => self.cache.get_or_prepare(key, || prepare(&raw)),
            None => prepare(&raw),
        };
        let prepared = match prepared {
            Ok(table) => table,
            Err(err) => {
                log::warn!("failed to prepare data: {err}");
                self.control_panel.set_status(&format!("Error: {err}"));
                return;
            }
        };

        log::info!(
            "prepared {} rows ({} dropped without a resolvable year/month)",
            prepared.table.height(),
            prepared.dropped_rows
        );

        let years = analysis::year_options(&prepared.table);
        let suppliers = analysis::label_options(&prepared.table, schema::SUPPLIER);
        let item_types = analysis::label_options(&prepared.table, schema::ITEM_TYPE);
        self.control_panel.update_options(
            years,
            suppliers,
            item_types,
            self.config.default_supplier_count,
        );
        self.control_panel.dropped_rows = prepared.dropped_rows;
        self.control_panel
            .set_status(&format!("Loaded {} rows", prepared.table.height()));

        self.prepared = Some(prepared);
        self.recompute();
    }

    /// Re-apply the current filter selection and rebuild the dashboard.
    fn recompute(&mut self) {
        let Some(prepared) = &self.prepared else {
            return;
        };

        let selection = self.control_panel.selection();
        let filtered = match apply_filters(&prepared.table, &selection) {
            Ok(df) => df,
            Err(err) => {
                log::warn!("failed to apply filters: {err}");
                self.control_panel.set_status(&format!("Error: {err}"));
                return;
            }
        };

        self.dashboard.outputs = Some(self.build_outputs(&filtered));
        self.filtered = Some(filtered);
    }

    fn build_outputs(&self, filtered: &DataFrame) -> DashboardOutputs {
        let preview = filtered.head(Some(self.config.preview_rows));
        let preview_header: Vec<String> = preview
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        let preview_rows = preview_cells(&preview);

        DashboardOutputs {
            kpis: compute_kpis(filtered),
            trend: monthly_trend(filtered),
            top_suppliers: top_by_dimension(filtered, schema::SUPPLIER, self.config.top_n),
            top_items: top_by_dimension(filtered, schema::ITEM_DESCRIPTION, self.config.top_n),
            channels: channel_comparison(filtered),
            preview_header,
            preview_rows,
            filtered_rows: filtered.height(),
        }
    }

    fn handle_browse_csv(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .pick_file();
        if let Some(path) = picked {
            self.control_panel.settings.upload_path = Some(path);
            self.cache.invalidate();
            self.reload_data();
        }
    }

    fn handle_download_csv(&mut self) {
        let Some(filtered) = self.filtered.clone() else {
            self.control_panel.set_status("No data to export");
            return;
        };

        let picked = rfd::FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .set_file_name("filtered_sales.csv")
            .save_file();
        if let Some(path) = picked {
            match export::write_filtered_csv(&filtered, &path) {
                Ok(()) => self
                    .control_panel
                    .set_status(&format!("Saved {}", path.display())),
                Err(err) => self.control_panel.set_status(&format!("Error: {err}")),
            }
        }
    }

    fn handle_download_kpis(&mut self) {
        let Some(kpis) = self.dashboard.outputs.as_ref().map(|o| o.kpis.clone()) else {
            self.control_panel.set_status("No data to export");
            return;
        };

        let picked = rfd::FileDialog::new()
            .add_filter("Text files", &["txt"])
            .set_file_name("kpi_summary.txt")
            .save_file();
        if let Some(path) = picked {
            match export::write_kpi_summary(&kpis, &path) {
                Ok(()) => self
                    .control_panel
                    .set_status(&format!("Saved {}", path.display())),
                Err(err) => self.control_panel.set_status(&format!("Error: {err}")),
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut action = ControlPanelAction::None;

        egui::SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    action = self.control_panel.show(ui);
                });
            });

        match action {
            ControlPanelAction::SourceModeChanged => self.reload_data(),
            ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
            ControlPanelAction::FiltersChanged => self.recompute(),
            ControlPanelAction::DownloadCsv => self.handle_download_csv(),
            ControlPanelAction::DownloadKpis => self.handle_download_kpis(),
            ControlPanelAction::None => {}
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.dashboard.show(ui);
        });
    }
}

/// Preview rows as display strings, nulls rendered empty.
fn preview_cells(df: &DataFrame) -> Vec<Vec<String>> {
    let columns = df.get_columns();
    (0..df.height())
        .map(|row| {
            columns
                .iter()
                .map(|column| {
                    column
                        .as_materialized_series()
                        .get(row)
                        .ok()
                        .and_then(|value| cell_label(&value))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect()
}
