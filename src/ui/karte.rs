use eframe::egui::{self, Grid, RichText, Ui};
use shodo_karte::data::model::Field;
use shodo_karte::state::AppState;

// ---------------------------------------------------------------------------
// Personal karte
// ---------------------------------------------------------------------------

/// Name selector plus the selected student's record.
pub fn karte_view(ui: &mut Ui, state: &mut AppState) {
    if state.names.is_empty() {
        ui.label("名前が登録された生徒はいません。");
        return;
    }

    let current = state.selected_name.clone().unwrap_or_default();
    let mut chosen = None;
    egui::ComboBox::from_id_salt("karte_name")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for name in &state.names {
                if ui.selectable_label(current == *name, name).clicked() {
                    chosen = Some(name.clone());
                }
            }
        });
    if let Some(name) = chosen {
        state.select_name(&name);
    }

    let Some(record) = state.selected_record() else {
        ui.label("該当する生徒が見つかりません。");
        return;
    };

    ui.add_space(4.0);
    ui.label(RichText::new(format!("{}さんの情報", record.display(Field::Name))).heading());
    Grid::new("karte_grid")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            for field in [
                Field::ReasonStarted,
                Field::Goal,
                Field::Concerns,
                Field::CoachingNotes,
                Field::Tool,
            ] {
                ui.label(field.header());
                ui.label(RichText::new(record.get(field).unwrap_or("－")).strong());
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// New student form
// ---------------------------------------------------------------------------

/// Seven text inputs in two columns and a submit button.
pub fn entry_form(ui: &mut Ui, state: &mut AppState) {
    let left = [
        (Field::Name, "名前"),
        (Field::AgeBracket, "年代"),
        (Field::ReasonStarted, "始めた理由"),
        (Field::Goal, "目標"),
    ];
    let right = [
        (Field::Concerns, "悩み（カンマ区切り）"),
        (Field::CoachingNotes, "指導メモ"),
        (Field::Tool, "道具"),
    ];

    ui.columns(2, |cols| {
        for (col, inputs) in cols.iter_mut().zip([&left[..], &right[..]]) {
            for (field, label) in inputs {
                col.label(*label);
                col.text_edit_singleline(state.draft.field_mut(*field));
            }
        }
    });

    ui.add_space(4.0);
    if ui
        .add_enabled(state.store.is_some(), egui::Button::new("追加する"))
        .clicked()
    {
        state.submit_draft();
    }
}
