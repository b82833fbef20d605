//! Control Panel Widget
//! Left side panel with the data-source toggle, the three dimension
//! filters, download buttons, and the status line.

use egui::{Color32, RichText, ScrollArea};
use std::path::PathBuf;

use crate::analysis::FilterSelection;

/// Where the raw table comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataSourceMode {
    /// The configured local file (with fallback path)
    #[default]
    Default,
    /// A CSV picked by the operator
    Upload,
}

/// User settings for the current session
#[derive(Default, Clone)]
pub struct UserSettings {
    pub source_mode: DataSourceMode,
    pub upload_path: Option<PathBuf>,
}

/// Left side control panel with source selection and dimension filters.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub year_options: Vec<i64>,
    pub year_selected: Vec<bool>,
    pub supplier_options: Vec<String>,
    pub supplier_selected: Vec<bool>,
    pub item_type_options: Vec<String>,
    pub item_type_selected: Vec<bool>,
    pub status: String,
    pub dropped_rows: usize,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            year_options: Vec::new(),
            year_selected: Vec::new(),
            supplier_options: Vec::new(),
            supplier_selected: Vec::new(),
            item_type_options: Vec::new(),
            item_type_selected: Vec::new(),
            status: "Ready".to_string(),
            dropped_rows: 0,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the filter options after a new dataset is prepared.
    /// Defaults: all years, the first `default_supplier_count` suppliers,
    /// all item types.
    pub fn update_options(
        &mut self,
        years: Vec<i64>,
        suppliers: Vec<String>,
        item_types: Vec<String>,
        default_supplier_count: usize,
    ) {
        self.year_selected = vec![true; years.len()];
        self.supplier_selected = (0..suppliers.len())
            .map(|i| i < default_supplier_count)
            .collect();
        self.item_type_selected = vec![true; item_types.len()];
        self.year_options = years;
        self.supplier_options = suppliers;
        self.item_type_options = item_types;
    }

    /// The current inclusion sets. A fully-unchecked dimension yields an
    /// empty set, which the filter engine treats as unrestricted.
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            years: checked(&self.year_options, &self.year_selected)
                .copied()
                .collect(),
            suppliers: checked(&self.supplier_options, &self.supplier_selected)
                .cloned()
                .collect(),
            item_types: checked(&self.item_type_options, &self.item_type_selected)
                .cloned()
                .collect(),
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Sales Performance")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(RichText::new("Dashboard").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            if ui
                .radio_value(
                    &mut self.settings.source_mode,
                    DataSourceMode::Default,
                    "Bundled CSV",
                )
                .changed()
            {
                action = ControlPanelAction::SourceModeChanged;
            }
            if ui
                .radio_value(
                    &mut self.settings.source_mode,
                    DataSourceMode::Upload,
                    "Upload my own",
                )
                .changed()
            {
                action = ControlPanelAction::SourceModeChanged;
            }
        });

        if self.settings.source_mode == DataSourceMode::Upload {
            ui.add_space(5.0);
            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .rounding(5.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let path_text = self
                            .settings
                            .upload_path
                            .as_ref()
                            .and_then(|p| p.file_name())
                            .map(|n| n.to_string_lossy().to_string())
                            .unwrap_or_else(|| "No file selected".to_string());

                        ui.label(RichText::new(&path_text).size(12.0).color(
                            if self.settings.upload_path.is_some() {
                                Color32::WHITE
                            } else {
                                Color32::GRAY
                            },
                        ));

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("📂 Browse").clicked() {
                                action = ControlPanelAction::BrowseCsv;
                            }
                        });
                    });
                });
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filters Section =====
        ui.label(RichText::new("🔎 Filters").size(14.0).strong());
        ui.add_space(5.0);

        ui.label("Year:");
        if multiselect(ui, "years", &self.year_options, &mut self.year_selected) {
            action = ControlPanelAction::FiltersChanged;
        }

        ui.add_space(8.0);
        ui.label("Supplier:");
        if multiselect(
            ui,
            "suppliers",
            &self.supplier_options,
            &mut self.supplier_selected,
        ) {
            action = ControlPanelAction::FiltersChanged;
        }

        ui.add_space(8.0);
        ui.label("Item Type:");
        if multiselect(
            ui,
            "item_types",
            &self.item_type_options,
            &mut self.item_type_selected,
        ) {
            action = ControlPanelAction::FiltersChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Downloads Section =====
        ui.label(RichText::new("⬇ Downloads").size(14.0).strong());
        ui.add_space(5.0);

        ui.vertical_centered(|ui| {
            let csv_button = egui::Button::new(RichText::new("Download Filtered CSV").size(13.0))
                .min_size(egui::vec2(200.0, 28.0));
            if ui.add(csv_button).clicked() {
                action = ControlPanelAction::DownloadCsv;
            }
            ui.add_space(5.0);
            let kpi_button = egui::Button::new(RichText::new("Download KPI Summary").size(13.0))
                .min_size(egui::vec2(200.0, 28.0));
            if ui.add(kpi_button).clicked() {
                action = ControlPanelAction::DownloadKpis;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        if self.dropped_rows > 0 {
            ui.label(
                RichText::new(format!(
                    "{} rows dropped (no resolvable year/month)",
                    self.dropped_rows
                ))
                .size(10.0)
                .color(Color32::GRAY),
            );
        }

        action
    }

    /// Set the status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

fn checked<'a, T>(options: &'a [T], selected: &'a [bool]) -> impl Iterator<Item = &'a T> {
    options
        .iter()
        .zip(selected.iter())
        .filter(|(_, &on)| on)
        .map(|(option, _)| option)
}

/// Checkbox list with select-all / clear-all helpers. Returns true when any
/// selection changed.
fn multiselect(
    ui: &mut egui::Ui,
    id: &str,
    options: &[impl ToString],
    selected: &mut [bool],
) -> bool {
    let mut changed = false;

    egui::Frame::none()
        .fill(ui.visuals().widgets.noninteractive.bg_fill)
        .rounding(5.0)
        .inner_margin(5.0)
        .show(ui, |ui| {
            ScrollArea::vertical()
                .id_salt(id.to_string())
                .max_height(120.0)
                .show(ui, |ui| {
                    for (i, option) in options.iter().enumerate() {
                        if i < selected.len()
                            && ui.checkbox(&mut selected[i], option.to_string()).changed()
                        {
                            changed = true;
                        }
                    }
                });
        });

    ui.horizontal(|ui| {
        if ui.small_button("Select All").clicked() {
            selected.iter_mut().for_each(|v| *v = true);
            changed = true;
        }
        if ui.small_button("Clear All").clicked() {
            selected.iter_mut().for_each(|v| *v = false);
            changed = true;
        }
    });

    changed
}

/// Actions triggered by the control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SourceModeChanged,
    BrowseCsv,
    FiltersChanged,
    DownloadCsv,
    DownloadKpis,
}
