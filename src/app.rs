use eframe::egui;

use crate::data::model::EmployeeTable;
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HrLensApp {
    pub state: AppState,
}

impl HrLensApp {
    /// Start with the eagerly loaded dataset already in place.
    pub fn new(table: EmployeeTable) -> Self {
        let mut state = AppState::default();
        state.set_table(table);
        Self { state }
    }
}

impl eframe::App for HrLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(230.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts and narrative ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::central_panel(ui, &self.state);
        });
    }
}
