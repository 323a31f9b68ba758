use egui::{Color32, Visuals};

/// Colors for the chart figure.
#[derive(Debug, Clone, Copy)]
pub struct ChartTheme {
    pub background: Color32,
    pub text: Color32,
    pub axis: Color32,
    pub grid: Color32,
    pub bar_edge: Color32,
    /// Opacity applied to histogram fills.
    pub bar_alpha: f32,
    pub kde_width: f32,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: Color32::WHITE,
            text: Color32::from_rgb(0x4B, 0x4B, 0x4B),
            axis: Color32::from_gray(40),
            grid: Color32::from_rgba_unmultiplied(176, 176, 176, 179),
            bar_edge: Color32::BLACK,
            bar_alpha: 0.5,
            kde_width: 2.5,
        }
    }
}

/// Colors for the statistics table figure.
#[derive(Debug, Clone, Copy)]
pub struct TableTheme {
    pub header_fill: Color32,
    pub row_label_fill: Color32,
    pub cell_fill: Color32,
    pub text: Color32,
    pub border: Color32,
}

impl Default for TableTheme {
    fn default() -> Self {
        Self {
            header_fill: Color32::from_rgba_unmultiplied(0x1f, 0x77, 0xb4, 0x80),
            row_label_fill: Color32::from_rgba_unmultiplied(0x6d, 0x6d, 0x6d, 0x80),
            cell_fill: Color32::from_rgb(0xf9, 0xf9, 0xf9),
            text: Color32::from_rgb(0x33, 0x33, 0x33),
            border: Color32::from_rgb(0xdd, 0xdd, 0xdd),
        }
    }
}

pub fn visuals() -> Visuals {
    let mut vis = Visuals::light();
    vis.panel_fill = Color32::WHITE;
    vis.window_corner_radius = egui::CornerRadius::same(8);
    vis
}
