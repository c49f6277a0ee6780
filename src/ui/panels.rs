use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use shodo_karte::data::model::Field;
use shodo_karte::state::{AppState, Status};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("フィルター");
    ui.separator();

    if state.store.is_none() {
        ui.label("データが読み込まれていません。");
        return;
    }

    // Clone what we need so we can mutate state inside the loop.
    let groups = [
        (Field::ReasonStarted, "始めた理由で絞る", state.reason_options.clone()),
        (Field::Concerns, "悩みで絞る", state.concern_options.clone()),
        (Field::Tool, "道具で絞る", state.tool_options.clone()),
    ];

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (field, title, options) in &groups {
                filter_group(ui, state, *field, title, options);
            }

            ui.separator();
            if ui
                .add_enabled(!state.filters.is_empty(), egui::Button::new("すべて解除"))
                .clicked()
            {
                state.filters.clear();
                state.refilter();
            }
        });
}

/// One collapsible multiselect. Nothing ticked means no filtering.
fn filter_group(ui: &mut Ui, state: &mut AppState, field: Field, title: &str, options: &[String]) {
    let n_selected = state
        .filters
        .selection_mut(field)
        .map_or(0, |selected| selected.len());
    let header_text = format!("{title}  ({n_selected}/{})", options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(field.header())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            if ui.small_button("クリア").clicked() {
                state.clear_filter(field);
            }

            for value in options {
                let mut checked = state
                    .filters
                    .selection_mut(field)
                    .is_some_and(|selected| selected.contains(value));
                if ui.checkbox(&mut checked, value.as_str()).changed() {
                    state.toggle_filter_value(field, value);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("ファイル", |ui: &mut Ui| {
            if ui.button("開く…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.store.is_some(), egui::Button::new("再読み込み"))
                .clicked()
            {
                // Failures land in the status line.
                let _ = state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(store) = &state.store {
            ui.label(store.path().display().to_string());
            ui.separator();
            ui.label(format!(
                "{} 件中 {} 件を表示",
                state.records.len(),
                state.visible_indices.len()
            ));
        }

        ui.separator();

        match &state.status {
            Some(Status::Info(msg)) => {
                ui.label(RichText::new(msg).color(Color32::from_rgb(0x2e, 0x8b, 0x57)));
            }
            Some(Status::Error(msg)) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("生徒データを開く")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        if state.open(&path).is_ok() {
            log::info!(
                "Opened {} with {} students",
                path.display(),
                state.records.len()
            );
        }
    }
}
