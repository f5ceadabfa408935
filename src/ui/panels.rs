use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: Department and Salary Level multi-selects.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading("Filters");
    ui.separator();

    let (departments, salary_levels) = match &state.table {
        Some(table) => (table.departments.clone(), table.salary_levels.clone()),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Department multi-select ----
            let header = format!(
                "Department  ({}/{})",
                state.filters.departments.len(),
                departments.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("department_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_departments();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_departments();
                        }
                    });

                    for dept in &departments {
                        let mut checked = state.filters.departments.contains(dept);
                        // Tint the label with the department's chart colour.
                        let mut text = RichText::new(dept);
                        if let Some(colors) = &state.dept_colors {
                            text = text.color(colors.color_for(dept));
                        }
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_department(dept);
                        }
                    }
                });

            ui.separator();

            // ---- Salary level multi-select ----
            let header = format!(
                "Salary Level  ({}/{})",
                state.filters.salary_levels.len(),
                salary_levels.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("salary_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_salary_levels();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_salary_levels();
                        }
                    });

                    for &level in &salary_levels {
                        let mut checked = state.filters.salary_levels.contains(&level);
                        if ui.checkbox(&mut checked, level.to_string()).changed() {
                            state.toggle_salary_level(level);
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} employees loaded, {} visible",
                table.len(),
                state.visible_indices.len()
            ));
        }

        ui.separator();

        if ui
            .selectable_label(state.show_raw_data, "Show Raw Data")
            .clicked()
        {
            state.show_raw_data = !state.show_raw_data;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open HR dataset")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} employee records across {} departments",
                    table.len(),
                    table.departments.len()
                );
                state.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
