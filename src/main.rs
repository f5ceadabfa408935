mod app;
mod color;
mod data;
mod state;
mod ui;

use anyhow::Context;
use app::HrLensApp;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Load failures halt the dashboard before any window opens.
    let table = data::loader::cached_table()
        .context("loading HR dataset")?
        .clone();
    log::info!(
        "Loaded {} employee records from {}",
        table.len(),
        data::loader::DEFAULT_DATASET_PATH
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "HR Lens – Attrition Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(HrLensApp::new(table)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {e}"))
}
