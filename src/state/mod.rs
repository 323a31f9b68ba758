pub mod chart;
pub mod colormap;
pub mod theme;
