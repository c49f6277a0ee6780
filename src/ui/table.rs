use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};
use shodo_karte::data::model::Field;
use shodo_karte::state::AppState;

// ---------------------------------------------------------------------------
// Filtered student table (central panel)
// ---------------------------------------------------------------------------

const ROW_HEIGHT: f32 = 20.0;

/// Render the rows passing the current filters.
pub fn filtered_table(ui: &mut Ui, state: &AppState) {
    if state.visible_indices.is_empty() {
        ui.label("条件に合う生徒はいません。");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(260.0)
        .columns(Column::auto().at_least(60.0), Field::ALL.len())
        .header(ROW_HEIGHT, |mut header| {
            for field in Field::ALL {
                header.col(|ui| {
                    ui.label(RichText::new(field.header()).strong());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.visible_indices.len(), |mut row| {
                let Some(record) = state
                    .visible_indices
                    .get(row.index())
                    .and_then(|&i| state.records.get(i))
                else {
                    return;
                };
                for field in Field::ALL {
                    row.col(|ui| {
                        ui.label(record.display(field));
                    });
                }
            });
        });
}
