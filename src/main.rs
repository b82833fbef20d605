//! Sales Performance Dashboard - CSV KPIs & Interactive Charts
//!
//! Loads a retail/warehouse sales CSV, normalizes its schema, and renders
//! KPIs, trend charts, and top-N rankings with interactive filters.

use eframe::egui;

use salesdash::config::AppConfig;
use salesdash::gui::DashboardApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = AppConfig::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1200.0, 700.0])
            .with_title("Sales Performance Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Sales Performance Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
}
