use eframe::egui::{self, ScrollArea, Ui};
use shodo_karte::config::AppConfig;
use shodo_karte::state::AppState;

use crate::ui::{charts, karte, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ShodoKarteApp {
    pub state: AppState,
}

impl ShodoKarteApp {
    /// Open the configured table and apply any filters given on the command line.
    pub fn new(config: &AppConfig) -> Self {
        let mut state = AppState {
            filters: config.filters(),
            selected_name: config.name.clone(),
            ..Default::default()
        };
        if state.open(&config.data).is_err() {
            log::warn!("Starting without a table; open one from the menu");
        }
        Self { state }
    }
}

impl eframe::App for ShodoKarteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table, charts, karte, form ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    dashboard(ui, &mut self.state);
                });
        });
    }
}

fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.heading("書道カウンセリングツール");
    ui.separator();

    if state.store.is_none() {
        ui.label("ファイル → 開く… から生徒データ（CSV）を開いてください。");
        return;
    }

    ui.strong("フィルター結果");
    table::filtered_table(ui, state);
    ui.separator();

    ui.strong("書道を始めた理由（人数）");
    charts::frequency_chart(ui, "reason_chart", &state.reason_counts);
    ui.separator();

    ui.strong("よくある悩み（キーワード別）");
    charts::frequency_chart(ui, "concern_chart", &state.concern_counts);
    ui.separator();

    ui.strong("個人カルテを見る");
    karte::karte_view(ui, state);
    ui.separator();

    ui.strong("新しい生徒のデータを追加");
    karte::entry_form(ui, state);
}
