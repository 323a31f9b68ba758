use eframe::egui;

use crate::pipeline::Analysis;
use crate::state::theme::{self, ChartTheme, TableTheme};
use crate::ui::{chart_panel, stats_table};

pub const APP_TITLE: &str = "Particle Size Analysis";
const TABLE_TITLE: &str = "Summary Statistics";

/// Shows a finished analysis: the chart in the main window, the table in a second one.
pub struct ParticleSizeApp {
    analysis: Analysis,
    chart_theme: ChartTheme,
    table_theme: TableTheme,
    /// Cleared when the user closes the table window.
    show_table: bool,
}

impl ParticleSizeApp {
    pub fn new(cc: &eframe::CreationContext<'_>, analysis: Analysis) -> Self {
        let ctx = &cc.egui_ctx;
        let mut style = (*ctx.style()).clone();

        style.text_styles.insert(egui::TextStyle::Body, egui::FontId::proportional(14.0));
        style.text_styles.insert(egui::TextStyle::Heading, egui::FontId::proportional(20.0));
        style.spacing.window_margin = egui::Margin::same(12);

        ctx.set_style(style);
        ctx.set_visuals(theme::visuals());

        Self {
            analysis,
            chart_theme: ChartTheme::default(),
            table_theme: TableTheme::default(),
            show_table: true,
        }
    }
}

impl eframe::App for ParticleSizeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(
                egui::Frame::default()
                    .fill(self.chart_theme.background)
                    .inner_margin(egui::Margin::same(12)),
            )
            .show(ctx, |ui| {
                chart_panel::show_chart(ui, &self.analysis.chart, &self.chart_theme);
            });

        if !self.show_table {
            return;
        }

        let summary = &self.analysis.summary;
        let table_theme = &self.table_theme;
        let show_table = &mut self.show_table;

        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("summary_statistics"),
            egui::ViewportBuilder::default()
                .with_title(TABLE_TITLE)
                .with_inner_size([1200.0, 500.0]),
            |ctx, _class| {
                egui::CentralPanel::default()
                    .frame(
                        egui::Frame::default()
                            .fill(egui::Color32::WHITE)
                            .inner_margin(egui::Margin::same(24)),
                    )
                    .show(ctx, |ui| {
                        stats_table::show_stats_table(ui, summary, table_theme);
                    });

                if ctx.input(|i| i.viewport().close_requested()) {
                    tracing::debug!("table window closed");
                    *show_table = false;
                }
            },
        );
    }
}
