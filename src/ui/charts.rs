use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};
use shodo_karte::data::aggregate::{ranked, Counts};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Frequency bar charts (central panel)
// ---------------------------------------------------------------------------

/// Render a count-descending bar chart, one legend entry per category.
pub fn frequency_chart(ui: &mut Ui, id: &str, counts: &Counts) {
    if counts.is_empty() {
        ui.label("データがありません。");
        return;
    }

    let colors = ColorMap::new(counts.keys().map(String::as_str));

    Plot::new(id)
        .legend(Legend::default())
        .height(240.0)
        .y_axis_label("人数")
        .show_x(false)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (i, (label, count)) in ranked(counts).into_iter().enumerate() {
                // An empty token still gets a visible legend entry.
                let name = if label.is_empty() { "（空）" } else { label };
                let bar = Bar::new(i as f64, count as f64).width(0.7).name(name);
                let chart = BarChart::new(vec![bar])
                    .name(name)
                    .color(colors.color_for(label));
                plot_ui.bar_chart(chart);
            }
        });
}
