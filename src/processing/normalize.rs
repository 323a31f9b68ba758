use crate::config::AnalysisConfig;
use crate::data::dataset::{Column, Dataset};

/// A column's in-range values rescaled into [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedColumn {
    /// Index of the source column within the dataset.
    pub position: usize,
    pub name: String,
    /// What every kept value was divided by; never zero.
    pub divisor: f64,
    pub values: Vec<f64>,
}

/// Filter a column to the configured range and divide by the filtered maximum.
///
/// Returns `None` when nothing survives the filter; such a column is left off
/// the chart but is still summarized.
pub fn normalize_column(
    position: usize,
    column: &Column,
    config: &AnalysisConfig,
) -> Option<NormalizedColumn> {
    let kept: Vec<f64> = column.present().filter(|v| config.contains(*v)).collect();
    if kept.is_empty() {
        return None;
    }

    let max = kept.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let divisor = if max == 0.0 { 1.0 } else { max };

    Some(NormalizedColumn {
        position,
        name: column.name.clone(),
        divisor,
        values: kept.into_iter().map(|v| v / divisor).collect(),
    })
}

/// Normalize every column that has data in range, keeping dataset order.
pub fn normalize_dataset(dataset: &Dataset, config: &AnalysisConfig) -> Vec<NormalizedColumn> {
    dataset
        .columns()
        .iter()
        .enumerate()
        .filter_map(|(position, column)| {
            let normalized = normalize_column(position, column, config);
            if normalized.is_none() {
                tracing::warn!(
                    column = %column.name,
                    min = config.range_min,
                    max = config.range_max,
                    "no values in range, column left off the chart"
                );
            }
            normalized
        })
        .collect()
}
