use egui::epaint::TextShape;
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, StrokeKind, Vec2};

use crate::state::chart::{nice_ticks, ChartFigure, X_LABEL, Y_LABEL};
use crate::state::theme::ChartTheme;

const MARGIN_LEFT: f32 = 72.0;
const MARGIN_RIGHT: f32 = 24.0;
const MARGIN_TOP: f32 = 52.0;
const MARGIN_BOTTOM: f32 = 60.0;

/// Maps data coordinates (x in [0, 1], y in [0, y_max]) into the plot rectangle.
struct PlotFrame {
    rect: Rect,
    y_max: f64,
}

impl PlotFrame {
    fn to_screen(&self, x: f64, y: f64) -> Pos2 {
        Pos2::new(
            self.rect.left() + x as f32 * self.rect.width(),
            self.rect.bottom() - (y / self.y_max) as f32 * self.rect.height(),
        )
    }
}

/// Paint the whole chart figure into the remaining space of `ui`.
pub fn show_chart(ui: &mut egui::Ui, chart: &ChartFigure, theme: &ChartTheme) {
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    let total_rect = response.rect;
    painter.rect_filled(total_rect, 0.0, theme.background);

    let plot_rect = Rect::from_min_max(
        Pos2::new(total_rect.left() + MARGIN_LEFT, total_rect.top() + MARGIN_TOP),
        Pos2::new(total_rect.right() - MARGIN_RIGHT, total_rect.bottom() - MARGIN_BOTTOM),
    );
    if plot_rect.width() <= 0.0 || plot_rect.height() <= 0.0 {
        return;
    }

    let frame = PlotFrame {
        rect: plot_rect,
        y_max: chart.y_max(),
    };
    let y_ticks = nice_ticks(frame.y_max);

    // Bars, curves and grid never leave the axes box.
    let plot_painter = painter.with_clip_rect(plot_rect);

    draw_grid(&plot_painter, &frame, &chart.x_ticks, &y_ticks, theme);
    draw_series(&plot_painter, &frame, chart, theme);
    draw_axes(&painter, &frame, total_rect, chart, &y_ticks, theme);
    draw_legend(&painter, chart, plot_rect, theme);
}

fn draw_grid(
    painter: &egui::Painter,
    frame: &PlotFrame,
    x_ticks: &[f64],
    y_ticks: &[f64],
    theme: &ChartTheme,
) {
    let stroke = Stroke::new(0.8, theme.grid);

    for &x in x_ticks {
        let top = frame.to_screen(x, frame.y_max);
        let bottom = frame.to_screen(x, 0.0);
        painter.extend(Shape::dashed_line(&[top, bottom], stroke, 6.0, 4.0));
    }
    for &y in y_ticks {
        let left = frame.to_screen(0.0, y);
        let right = frame.to_screen(1.0, y);
        painter.extend(Shape::dashed_line(&[left, right], stroke, 6.0, 4.0));
    }
}

fn draw_series(
    painter: &egui::Painter,
    frame: &PlotFrame,
    chart: &ChartFigure,
    theme: &ChartTheme,
) {
    let edge = Stroke::new(1.0, theme.bar_edge);

    for series in &chart.series {
        let color = series.color32();
        let fill = color.gamma_multiply(theme.bar_alpha);

        for (left, right, density) in series.histogram.bins() {
            if density <= 0.0 {
                continue;
            }
            let bar =
                Rect::from_two_pos(frame.to_screen(left, density), frame.to_screen(right, 0.0));
            painter.rect_filled(bar, 0.0, fill);
            painter.rect_stroke(bar, 0.0, edge, StrokeKind::Inside);
        }

        if let Some(kde) = &series.kde {
            let points: Vec<Pos2> = kde
                .x
                .iter()
                .zip(&kde.y)
                .map(|(&x, &y)| frame.to_screen(x, y))
                .collect();
            painter.add(Shape::line(points, Stroke::new(theme.kde_width, color)));
        }
    }
}

fn draw_axes(
    painter: &egui::Painter,
    frame: &PlotFrame,
    total_rect: Rect,
    chart: &ChartFigure,
    y_ticks: &[f64],
    theme: &ChartTheme,
) {
    let plot_rect = frame.rect;
    let tick_font = FontId::proportional(11.0);
    let axis_stroke = Stroke::new(1.0, theme.axis);

    painter.rect_stroke(plot_rect, 0.0, axis_stroke, StrokeKind::Outside);

    for &x in &chart.x_ticks {
        let pos = frame.to_screen(x, 0.0);
        painter.line_segment([pos, pos + Vec2::new(0.0, 4.0)], axis_stroke);
        painter.text(
            pos + Vec2::new(0.0, 6.0),
            Align2::CENTER_TOP,
            format!("{x:.1}"),
            tick_font.clone(),
            theme.axis,
        );
    }

    let y_decimals: usize = if y_ticks.iter().all(|t| t.fract() == 0.0) { 0 } else { 2 };
    for &y in y_ticks {
        let pos = frame.to_screen(0.0, y);
        painter.line_segment([pos, pos - Vec2::new(4.0, 0.0)], axis_stroke);
        painter.text(
            pos - Vec2::new(6.0, 0.0),
            Align2::RIGHT_CENTER,
            format!("{y:.y_decimals$}"),
            tick_font.clone(),
            theme.axis,
        );
    }

    painter.text(
        Pos2::new(plot_rect.center().x, total_rect.top() + 14.0),
        Align2::CENTER_TOP,
        &chart.title,
        FontId::proportional(18.0),
        theme.text,
    );

    painter.text(
        Pos2::new(plot_rect.center().x, total_rect.bottom() - 10.0),
        Align2::CENTER_BOTTOM,
        X_LABEL,
        FontId::proportional(14.0),
        theme.text,
    );

    // Rotated so it reads bottom-to-top along the y axis.
    let galley =
        painter.layout_no_wrap(Y_LABEL.to_string(), FontId::proportional(14.0), theme.text);
    let pos = Pos2::new(
        total_rect.left() + 10.0,
        plot_rect.center().y + galley.size().x / 2.0,
    );
    painter.add(TextShape::new(pos, galley, theme.text).with_angle(-std::f32::consts::FRAC_PI_2));
}

fn draw_legend(painter: &egui::Painter, chart: &ChartFigure, plot_rect: Rect, theme: &ChartTheme) {
    if chart.series.is_empty() {
        return;
    }

    // (label, color, is_curve)
    let entries: Vec<(String, Color32, bool)> = chart
        .series
        .iter()
        .flat_map(|s| {
            let hist = (s.histogram_label(), s.color32(), false);
            let kde = s.kde.as_ref().map(|_| (s.kde_label(), s.color32(), true));
            std::iter::once(hist).chain(kde)
        })
        .collect();

    let font = FontId::proportional(12.0);
    let row_height = 18.0;
    let swatch_width = 22.0;
    let max_width = entries
        .iter()
        .map(|(label, _, _)| {
            painter
                .layout_no_wrap(label.clone(), font.clone(), theme.text)
                .rect
                .width()
        })
        .fold(0.0_f32, f32::max);

    let legend_size = Vec2::new(
        swatch_width + 6.0 + max_width + 16.0,
        entries.len() as f32 * row_height + 12.0,
    );
    let legend_rect = Rect::from_min_size(
        Pos2::new(plot_rect.right() - legend_size.x - 8.0, plot_rect.top() + 8.0),
        legend_size,
    );
    painter.rect_filled(legend_rect, 4.0, theme.background.gamma_multiply(0.85));
    painter.rect_stroke(
        legend_rect,
        4.0,
        Stroke::new(0.5, theme.axis.gamma_multiply(0.4)),
        StrokeKind::Outside,
    );

    let mut y = legend_rect.top() + 6.0 + row_height / 2.0;
    let x = legend_rect.left() + 8.0;
    for (label, color, is_curve) in &entries {
        if *is_curve {
            painter.line_segment(
                [Pos2::new(x, y), Pos2::new(x + swatch_width, y)],
                Stroke::new(theme.kde_width, *color),
            );
        } else {
            let swatch = Rect::from_min_size(Pos2::new(x, y - 6.0), Vec2::new(swatch_width, 12.0));
            painter.rect_filled(swatch, 0.0, color.gamma_multiply(theme.bar_alpha));
            painter.rect_stroke(swatch, 0.0, Stroke::new(1.0, theme.bar_edge), StrokeKind::Inside);
        }

        painter.text(
            Pos2::new(x + swatch_width + 6.0, y),
            Align2::LEFT_CENTER,
            label,
            font.clone(),
            theme.text,
        );
        y += row_height;
    }
}
