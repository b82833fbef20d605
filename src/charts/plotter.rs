//! Chart Plotter Module
//! Creates the four dashboard visualizations using egui_plot.

use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::analysis::{Channel, ChannelPoint, DimensionTotal, PeriodTotal};

/// Colors for the two sales channels and the ranking charts
pub const RETAIL_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const WAREHOUSE_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red
pub const SUPPLIER_BAR_COLOR: Color32 = Color32::from_rgb(46, 204, 113); // Green
pub const ITEM_BAR_COLOR: Color32 = Color32::from_rgb(243, 156, 18); // Orange

/// Creates dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Monthly retail sales trend line, one point per period.
    pub fn draw_trend_chart(ui: &mut egui::Ui, trend: &[PeriodTotal], height: f32) {
        let labels: Vec<String> = trend.iter().map(|p| p.period.clone()).collect();
        let points: Vec<[f64; 2]> = trend
            .iter()
            .enumerate()
            .map(|(i, p)| [i as f64, p.retail_sales])
            .collect();

        Plot::new("monthly_trend")
            .height(height)
            .allow_scroll(false)
            .x_axis_label("Month-Year")
            .y_axis_label("Retail Sales")
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .color(RETAIL_COLOR)
                        .width(1.5)
                        .name("Retail Sales"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .radius(3.0)
                        .color(RETAIL_COLOR),
                );
            });
    }

    /// Horizontal top-N ranking bars, largest sum at the top.
    pub fn draw_top_bar_chart(
        ui: &mut egui::Ui,
        id: &str,
        ranked: &[DimensionTotal],
        color: Color32,
        height: f32,
    ) {
        let n = ranked.len();
        // Row 0 holds the largest sum; flip so it renders at the top.
        let labels: Vec<String> = ranked.iter().rev().map(|r| r.label.clone()).collect();
        let bars: Vec<Bar> = ranked
            .iter()
            .enumerate()
            .map(|(i, r)| Bar::new((n - 1 - i) as f64, r.total).width(0.6).fill(color))
            .collect();

        Plot::new(id.to_string())
            .height(height)
            .allow_scroll(false)
            .x_axis_label("Retail Sales")
            .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal());
            });
    }

    /// Retail vs warehouse sales over time as a dual-series line chart.
    pub fn draw_channel_chart(ui: &mut egui::Ui, channels: &[ChannelPoint], height: f32) {
        let mut labels: Vec<String> = Vec::new();
        let mut retail: Vec<[f64; 2]> = Vec::new();
        let mut warehouse: Vec<[f64; 2]> = Vec::new();

        for point in channels {
            let idx = match labels.iter().position(|l| l == &point.period) {
                Some(idx) => idx,
                None => {
                    labels.push(point.period.clone());
                    labels.len() - 1
                }
            };
            let xy = [idx as f64, point.sales];
            match point.channel {
                Channel::Retail => retail.push(xy),
                Channel::Warehouse => warehouse.push(xy),
            }
        }

        Plot::new("channel_comparison")
            .height(height)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_label("Month-Year")
            .y_axis_label("Sales")
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(retail.clone()))
                        .color(RETAIL_COLOR)
                        .width(1.5)
                        .name(Channel::Retail.label()),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(retail))
                        .radius(3.0)
                        .color(RETAIL_COLOR)
                        .name(Channel::Retail.label()),
                );
                plot_ui.line(
                    Line::new(PlotPoints::from(warehouse.clone()))
                        .color(WAREHOUSE_COLOR)
                        .width(1.5)
                        .name(Channel::Warehouse.label()),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(warehouse))
                        .radius(3.0)
                        .color(WAREHOUSE_COLOR)
                        .name(Channel::Warehouse.label()),
                );
            });
    }
}

/// Axis formatter mapping integral positions back to category labels.
fn category_label(labels: &[String], value: f64) -> String {
    if value < -0.5 {
        return String::new();
    }
    let idx = value.round() as usize;
    if idx < labels.len() && (value - idx as f64).abs() < 0.25 {
        labels[idx].clone()
    } else {
        String::new()
    }
}
