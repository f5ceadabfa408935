use eframe::egui::{
    self, Align2, Color32, CornerRadius, FontId, Rect, ScrollArea, Sense, Ui,
};
use egui_plot::{Bar, BarChart, Legend, Plot, Points};

use crate::color::{self, CategoryColors};
use crate::data::model::{columns, EmployeeTable};
use crate::data::stats::{self, AttritionCounts, CorrelationMatrix, ScatterSplit};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 300.0;

// ---------------------------------------------------------------------------
// Central panel – chart grid plus narrative
// ---------------------------------------------------------------------------

/// Render the central dashboard: optional raw table, four chart panels and
/// the key-insights text, recomputed from the filtered view every frame.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Load a dataset to begin  (File → Open…)");
        });
        return;
    };
    let indices = &state.visible_indices;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("HR Analytics & Employee Attrition Analysis");
            ui.label(
                "Analyze HR data to understand factors influencing employee attrition. \
                 Explore distributions, correlations, and interactive visualizations.",
            );
            ui.add_space(8.0);

            if state.show_raw_data {
                raw_data_table(ui, table, indices);
                ui.add_space(8.0);
                ui.separator();
            }

            let counts = stats::attrition_counts(table, indices);
            let rates = stats::department_attrition_rates(table, indices);
            let matrix = stats::correlation_matrix(table, indices);
            let split = stats::satisfaction_vs_evaluation(table, indices);

            ui.columns(2, |cols: &mut [Ui]| {
                attrition_distribution(&mut cols[0], &counts);
                department_attrition_chart(&mut cols[1], &rates, state.dept_colors.as_ref());
            });
            ui.add_space(8.0);
            ui.columns(2, |cols: &mut [Ui]| {
                correlation_heatmap(&mut cols[0], &matrix);
                satisfaction_scatter(&mut cols[1], &split);
            });

            ui.add_space(8.0);
            ui.separator();
            key_insights(ui);
        });
}

// ---------------------------------------------------------------------------
// Attrition distribution (count chart)
// ---------------------------------------------------------------------------

fn attrition_distribution(ui: &mut Ui, counts: &AttritionCounts) {
    ui.strong("Attrition Distribution");

    let stayed = Bar::new(0.0, counts.stayed as f64).width(0.6).fill(color::STAYED);
    let left = Bar::new(1.0, counts.left as f64).width(0.6).fill(color::LEFT);

    Plot::new("attrition_distribution")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label("Employees")
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(vec![stayed]).name("Stayed").color(color::STAYED));
            plot_ui.bar_chart(BarChart::new(vec![left]).name("Left").color(color::LEFT));
        });
}

// ---------------------------------------------------------------------------
// Department-wise attrition rate (grouped-mean bars)
// ---------------------------------------------------------------------------

fn department_attrition_chart(
    ui: &mut Ui,
    rates: &[(String, f64)],
    colors: Option<&CategoryColors>,
) {
    ui.strong("Department-wise Attrition Rate");

    Plot::new("department_attrition")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label("Attrition Rate")
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for (i, (dept, rate)) in rates.iter().enumerate() {
                let fill = colors
                    .map(|c| c.color_for(dept))
                    .unwrap_or(Color32::LIGHT_BLUE);
                let bar = Bar::new(i as f64, *rate).width(0.6).fill(fill).name(dept);
                // One chart per department so the legend doubles as the x axis.
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(dept).color(fill));
            }
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap (annotated matrix)
// ---------------------------------------------------------------------------

fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    ui.strong("Correlation Heatmap");

    if matrix.is_empty() {
        ui.label("No numeric columns to correlate.");
        return;
    }

    let n = matrix.columns.len();
    let label_w: f32 = 110.0;
    let header_h: f32 = 18.0;
    let cell = ((ui.available_width() - label_w) / n as f32).clamp(26.0, 64.0);

    let size = egui::vec2(label_w + cell * n as f32, header_h + cell * n as f32);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;
    let text_color = ui.visuals().text_color();

    // Column headers.
    for (j, name) in matrix.columns.iter().enumerate() {
        painter.text(
            egui::pos2(
                origin.x + label_w + (j as f32 + 0.5) * cell,
                origin.y + header_h * 0.5,
            ),
            Align2::CENTER_CENTER,
            truncate(name, 9),
            FontId::proportional(9.0),
            text_color,
        );
    }

    for (i, name) in matrix.columns.iter().enumerate() {
        // Row label.
        painter.text(
            egui::pos2(
                origin.x + label_w - 6.0,
                origin.y + header_h + (i as f32 + 0.5) * cell,
            ),
            Align2::RIGHT_CENTER,
            truncate(name, 14),
            FontId::proportional(9.0),
            text_color,
        );

        for j in 0..n {
            let r = matrix.values[i][j];
            let rect = Rect::from_min_size(
                egui::pos2(
                    origin.x + label_w + j as f32 * cell,
                    origin.y + header_h + i as f32 * cell,
                ),
                egui::vec2(cell, cell),
            )
            .shrink(1.0);

            painter.rect_filled(rect, CornerRadius::ZERO, color::diverging(r));

            let annotation = if r.is_finite() {
                format!("{r:.2}")
            } else {
                "–".to_string()
            };
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                annotation,
                FontId::proportional(9.0),
                color::annotation_color(r),
            );
        }
    }
}

fn truncate(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        name.to_string()
    } else {
        let head: String = name.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

// ---------------------------------------------------------------------------
// Satisfaction vs evaluation scatter
// ---------------------------------------------------------------------------

fn satisfaction_scatter(ui: &mut Ui, split: &ScatterSplit) {
    ui.strong("Satisfaction vs Evaluation (Colored by Attrition)");

    Plot::new("satisfaction_vs_evaluation")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(columns::SATISFACTION_LEVEL)
        .y_axis_label(columns::LAST_EVALUATION)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(split.stayed.clone())
                    .name("Stayed")
                    .color(color::STAYED)
                    .radius(2.5),
            );
            plot_ui.points(
                Points::new(split.left.clone())
                    .name("Left")
                    .color(color::LEFT)
                    .radius(2.5),
            );
        });
}

// ---------------------------------------------------------------------------
// Raw data table
// ---------------------------------------------------------------------------

fn raw_data_table(ui: &mut Ui, table: &EmployeeTable, indices: &[usize]) {
    use egui_extras::{Column, TableBuilder};

    ui.strong(format!("Raw Data ({} rows)", indices.len()));

    let extras = &table.metric_columns;
    let n_columns = 5 + extras.len();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(240.0)
        .columns(Column::auto().at_least(80.0), n_columns)
        .header(20.0, |mut header| {
            for name in [
                columns::DEPARTMENT,
                columns::SALARY_LEVEL,
                columns::ATTRITION,
                columns::SATISFACTION_LEVEL,
                columns::LAST_EVALUATION,
            ] {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
            for name in extras {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, indices.len(), |mut row| {
                let rec = &table.records[indices[row.index()]];
                row.col(|ui| {
                    ui.label(&rec.department);
                });
                row.col(|ui| {
                    ui.label(rec.salary_level.to_string());
                });
                row.col(|ui| {
                    ui.label(if rec.attrition { "1" } else { "0" });
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", rec.satisfaction_level));
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", rec.last_evaluation));
                });
                for name in extras {
                    row.col(|ui| {
                        match rec.metrics.get(name) {
                            Some(v) if v.is_finite() => ui.label(format!("{v}")),
                            _ => ui.label("–"),
                        };
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Key insights (static narrative)
// ---------------------------------------------------------------------------

fn key_insights(ui: &mut Ui) {
    ui.strong("Key Insights");
    ui.label("• Sales and Support departments have higher attrition rates.");
    ui.label("• Employees with low satisfaction and high evaluation scores tend to leave more.");
    ui.label("• Lower salary levels correlate with higher attrition.");
    ui.label("• Longer tenure sometimes increases attrition risk.");
}
