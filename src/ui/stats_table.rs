use egui::{Color32, RichText, Stroke, StrokeKind};
use egui_extras::{Column, TableBuilder};

use crate::processing::statistics::{SummaryRow, SUMMARY_HEADERS};
use crate::state::theme::TableTheme;

const ROW_HEIGHT: f32 = 26.0;
const CELL_PADDING: f32 = 8.0;

/// Fill the cell background, draw its border, then the centered text.
fn styled_cell(ui: &mut egui::Ui, text: &str, fill: Color32, bold: bool, theme: &TableTheme) {
    let rect = ui.max_rect();
    ui.painter().rect_filled(rect, 0.0, fill);
    ui.painter()
        .rect_stroke(rect, 0.0, Stroke::new(1.0, theme.border), StrokeKind::Inside);

    let mut label = RichText::new(text).color(theme.text).size(13.0);
    if bold {
        label = label.strong();
    }
    ui.label(label);
}

/// Render the per-column summary as a bordered table.
pub fn show_stats_table(ui: &mut egui::Ui, rows: &[SummaryRow], theme: &TableTheme) {
    if rows.is_empty() {
        ui.label("No columns to summarize.");
        return;
    }

    let label_width = rows
        .iter()
        .map(|r| r.label.chars().count() as f32 * 8.0)
        .fold(120.0_f32, f32::max);

    egui::ScrollArea::both().show(ui, |ui| {
        ui.spacing_mut().item_spacing = egui::vec2(0.0, 0.0);

        TableBuilder::new(ui)
            .striped(false)
            .resizable(false)
            .cell_layout(egui::Layout::centered_and_justified(egui::Direction::LeftToRight))
            .column(Column::exact(label_width + 2.0 * CELL_PADDING))
            .columns(Column::auto().at_least(96.0), SUMMARY_HEADERS.len())
            .header(ROW_HEIGHT, |mut header| {
                header.col(|ui| styled_cell(ui, "", theme.header_fill, true, theme));
                for title in SUMMARY_HEADERS {
                    header.col(|ui| styled_cell(ui, title, theme.header_fill, true, theme));
                }
            })
            .body(|mut body| {
                for row in rows {
                    body.row(ROW_HEIGHT, |mut table_row| {
                        table_row.col(|ui| {
                            styled_cell(ui, &row.label, theme.row_label_fill, true, theme)
                        });
                        for cell in row.cells() {
                            table_row.col(|ui| {
                                styled_cell(ui, &cell, theme.cell_fill, false, theme)
                            });
                        }
                    });
                }
            });
    });
}
