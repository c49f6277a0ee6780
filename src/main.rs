mod app;
mod color;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use app::ShodoKarteApp;
use shodo_karte::config::AppConfig;
use shodo_karte::data::dashboard::summarize;
use shodo_karte::data::store::TableStore;

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::parse();
    log::debug!("Starting with {config:?}");

    if config.summary {
        return print_summary(&config);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "書道カウンセリングツール",
        options,
        Box::new(move |cc| {
            ui::fonts::install_cjk_fallback(&cc.egui_ctx);
            Ok(Box::new(ShodoKarteApp::new(&config)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

/// Headless mode: one dashboard pass printed as JSON.
fn print_summary(config: &AppConfig) -> Result<()> {
    let mut store = TableStore::new(&config.data);
    let records = store
        .load()
        .with_context(|| format!("loading {}", config.data.display()))?;
    let view = summarize(&records, &config.filters(), config.name.as_deref());
    let json = serde_json::to_string_pretty(&view).context("serializing dashboard")?;
    println!("{json}");
    Ok(())
}
