//! Dashboard View
//! Central panel with the KPI cards, the four charts, and a virtualized
//! preview of the filtered table.

use egui::{Color32, RichText, ScrollArea};

use crate::analysis::{ChannelPoint, DimensionTotal, KpiSummary, PeriodTotal};
use crate::charts::{ChartPlotter, ITEM_BAR_COLOR, SUPPLIER_BAR_COLOR};
use crate::export::format_metric;

const CARD_SPACING: f32 = 15.0;
const CHART_HEIGHT: f32 = 280.0;
const PREVIEW_ROW_HEIGHT: f32 = 18.0;
const PREVIEW_MAX_HEIGHT: f32 = 320.0;

/// Everything the dashboard needs to render one filtered view of the data.
pub struct DashboardOutputs {
    pub kpis: KpiSummary,
    pub trend: Vec<PeriodTotal>,
    pub top_suppliers: Vec<DimensionTotal>,
    pub top_items: Vec<DimensionTotal>,
    pub channels: Vec<ChannelPoint>,
    pub preview_header: Vec<String>,
    pub preview_rows: Vec<Vec<String>>,
    pub filtered_rows: usize,
}

/// Central dashboard panel
#[derive(Default)]
pub struct DashboardView {
    pub outputs: Option<DashboardOutputs>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.outputs = None;
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(outputs) = &self.outputs else {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new("No data loaded")
                        .size(18.0)
                        .color(Color32::GRAY),
                );
            });
            return;
        };

        ScrollArea::vertical().id_salt("dashboard").show(ui, |ui| {
            ui.add_space(10.0);

            // KPI cards
            ui.columns(4, |cols| {
                for (col, (label, value)) in cols.iter_mut().zip(outputs.kpis.entries()) {
                    kpi_card(col, label, value);
                }
            });

            ui.add_space(CARD_SPACING);

            chart_card(ui, "📈 Monthly Retail Sales Trend", |ui| {
                ChartPlotter::draw_trend_chart(ui, &outputs.trend, CHART_HEIGHT);
            });

            ui.add_space(CARD_SPACING);

            chart_card(ui, "🏆 Top 10 Suppliers by Retail Sales", |ui| {
                ChartPlotter::draw_top_bar_chart(
                    ui,
                    "top_suppliers",
                    &outputs.top_suppliers,
                    SUPPLIER_BAR_COLOR,
                    CHART_HEIGHT,
                );
            });

            ui.add_space(CARD_SPACING);

            chart_card(ui, "📦 Top 10 Items by Retail Sales", |ui| {
                ChartPlotter::draw_top_bar_chart(
                    ui,
                    "top_items",
                    &outputs.top_items,
                    ITEM_BAR_COLOR,
                    CHART_HEIGHT,
                );
            });

            ui.add_space(CARD_SPACING);

            chart_card(ui, "📊 Retail vs Warehouse Sales Over Time", |ui| {
                ChartPlotter::draw_channel_chart(ui, &outputs.channels, CHART_HEIGHT);
            });

            ui.add_space(CARD_SPACING);

            chart_card(
                ui,
                &format!("📋 Filtered Data ({} rows)", outputs.filtered_rows),
                |ui| {
                    preview_table(ui, &outputs.preview_header, &outputs.preview_rows);
                },
            );

            ui.add_space(10.0);
        });
    }
}

fn kpi_card(ui: &mut egui::Ui, label: &str, value: f64) {
    egui::Frame::none()
        .fill(ui.visuals().extreme_bg_color)
        .rounding(8.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(label).size(11.0).color(Color32::GRAY));
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format_metric(value))
                        .size(20.0)
                        .strong()
                        .color(Color32::from_rgb(100, 149, 237)),
                );
            });
        });
}

fn chart_card(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(ui.visuals().extreme_bg_color)
        .rounding(8.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.label(RichText::new(title).size(15.0).strong());
            ui.add_space(8.0);
            add_contents(ui);
        });
}

fn preview_table(ui: &mut egui::Ui, header: &[String], rows: &[Vec<String>]) {
    ScrollArea::both()
        .id_salt("data_preview")
        .max_height(PREVIEW_MAX_HEIGHT)
        .show_rows(ui, PREVIEW_ROW_HEIGHT, rows.len() + 1, |ui, range| {
            for idx in range {
                if idx == 0 {
                    draw_preview_row(ui, header, true);
                } else if let Some(cells) = rows.get(idx - 1) {
                    draw_preview_row(ui, cells, false);
                }
            }
        });
}

fn draw_preview_row(ui: &mut egui::Ui, cells: &[String], header: bool) {
    ui.horizontal(|ui| {
        for cell in cells {
            let text = if header {
                RichText::new(cell).size(12.0).strong()
            } else {
                RichText::new(cell).size(12.0)
            };
            ui.add_sized(
                [120.0, PREVIEW_ROW_HEIGHT],
                egui::Label::new(text).truncate(),
            );
        }
    });
}
