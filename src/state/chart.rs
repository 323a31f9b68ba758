use crate::config::AnalysisConfig;
use crate::data::dataset::Dataset;
use crate::error::AnalysisError;
use crate::processing::histogram::Histogram;
use crate::processing::kde::{linspace, GaussianKde};
use crate::processing::normalize::{normalize_dataset, NormalizedColumn};
use crate::state::colormap::color_for_index;

pub const X_LABEL: &str = "Normalized Size";
pub const Y_LABEL: &str = "Density";

/// A sampled density curve.
#[derive(Debug, Clone, PartialEq)]
pub struct KdeCurve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl KdeCurve {
    pub fn max(&self) -> f64 {
        self.y.iter().copied().fold(0.0, f64::max)
    }
}

/// Everything drawn for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub color: [u8; 3],
    pub histogram: Histogram,
    /// Absent when the column has a single value.
    pub kde: Option<KdeCurve>,
}

impl ChartSeries {
    pub fn histogram_label(&self) -> String {
        format!("{} (Normalized Histogram)", self.name)
    }

    pub fn kde_label(&self) -> String {
        format!("{} (KDE)", self.name)
    }

    pub fn color32(&self) -> egui::Color32 {
        egui::Color32::from_rgb(self.color[0], self.color[1], self.color[2])
    }
}

/// The overlaid histogram/KDE chart, ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFigure {
    pub title: String,
    pub series: Vec<ChartSeries>,
    /// Fixed x ticks over [0, 1].
    pub x_ticks: Vec<f64>,
}

impl ChartFigure {
    /// Upper bound of the density axis.
    pub fn y_max(&self) -> f64 {
        let max = self
            .series
            .iter()
            .map(|s| {
                let kde = s.kde.as_ref().map_or(0.0, KdeCurve::max);
                s.histogram.max_density().max(kde)
            })
            .fold(0.0, f64::max);
        if max > 0.0 {
            max * 1.05
        } else {
            1.0
        }
    }
}

/// Evenly spaced "nice" tick positions from 0 up to `max`.
pub fn nice_ticks(max: f64) -> Vec<f64> {
    if !(max > 0.0 && max.is_finite()) {
        return vec![0.0];
    }

    let raw_step = max / 6.0;
    let order = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / order;
    let step = if normalized <= 1.0 {
        order
    } else if normalized <= 2.0 {
        2.0 * order
    } else if normalized <= 5.0 {
        5.0 * order
    } else {
        10.0 * order
    };

    let count = (max / step).floor() as usize;
    (0..=count).map(|i| i as f64 * step).collect()
}

fn build_series(
    column: &NormalizedColumn,
    column_count: usize,
    config: &AnalysisConfig,
) -> Result<Option<ChartSeries>, AnalysisError> {
    let Some(histogram) = Histogram::density(&column.values, config.bin_count) else {
        return Ok(None);
    };

    let kde = if column.values.len() > 1 {
        let kde = GaussianKde::new(&column.values).ok_or_else(|| AnalysisError::DegenerateSample {
            column: column.name.clone(),
        })?;
        tracing::debug!(column = %column.name, bandwidth = kde.bandwidth(), "density estimated");
        let (x, y) = kde.curve(0.0, 1.0, config.kde_points);
        Some(KdeCurve { x, y })
    } else {
        None
    };

    tracing::debug!(
        column = %column.name,
        values = column.values.len(),
        divisor = column.divisor,
        "chart series built"
    );

    Ok(Some(ChartSeries {
        name: column.name.clone(),
        color: color_for_index(column.position, column_count),
        histogram,
        kde,
    }))
}

/// Filter, normalize and bin every column of the dataset.
pub fn build_chart(
    dataset: &Dataset,
    config: &AnalysisConfig,
) -> Result<ChartFigure, AnalysisError> {
    let column_count = dataset.columns().len();
    let mut series = Vec::new();
    for column in normalize_dataset(dataset, config) {
        if let Some(s) = build_series(&column, column_count, config)? {
            series.push(s);
        }
    }

    Ok(ChartFigure {
        title: format!(
            "Normalized Histograms and KDE for Filtered Samples ({}-{} nm)",
            config.range_min, config.range_max
        ),
        series,
        x_ticks: linspace(0.0, 1.0, 11),
    })
}
