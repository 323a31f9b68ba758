use std::collections::HashMap;
use std::fmt;

use crate::config::{AnalysisConfig, ModePolicy};
use crate::data::dataset::{Column, Dataset};
use crate::error::AnalysisError;

/// Raw statistics for a data series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; `None` for a single value.
    pub std_dev: Option<f64>,
}

impl SeriesStats {
    /// Compute statistics from values, filtering out NaN.
    pub fn compute(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut vals: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        if vals.is_empty() {
            return None;
        }

        let count = vals.len();
        let min = vals.iter().copied().fold(f64::INFINITY, f64::min);
        let max = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = vals.iter().sum::<f64>() / count as f64;

        vals.sort_by(|a, b| a.total_cmp(b));
        let median = if count % 2 == 0 {
            (vals[count / 2 - 1] + vals[count / 2]) / 2.0
        } else {
            vals[count / 2]
        };

        let std_dev = (count > 1).then(|| {
            let squares: f64 = vals.iter().map(|v| (v - mean).powi(2)).sum();
            (squares / (count - 1) as f64).sqrt()
        });

        Some(SeriesStats {
            count,
            min,
            max,
            mean,
            median,
            std_dev,
        })
    }
}

/// The single most frequent value, or `None` when the top frequency is shared.
pub fn unique_mode(values: &[f64]) -> Option<f64> {
    let mut counts: HashMap<u64, (f64, usize)> = HashMap::new();
    for &v in values {
        // +0.0 and -0.0 are the same measurement.
        let v = if v == 0.0 { 0.0 } else { v };
        counts.entry(v.to_bits()).or_insert((v, 0)).1 += 1;
    }

    let top = counts.values().map(|&(_, c)| c).max()?;
    let mut leaders = counts.values().filter(|&&(_, c)| c == top);
    let (value, _) = *leaders.next()?;
    match leaders.next() {
        Some(_) => None,
        None => Some(value),
    }
}

/// A statistic cell that may have no value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stat {
    Value(f64),
    NotAvailable,
}

impl From<Option<f64>> for Stat {
    fn from(v: Option<f64>) -> Self {
        v.map(|v| Stat::Value(round2(v))).unwrap_or(Stat::NotAvailable)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Value(v) => write!(f, "{v:.2}"),
            Stat::NotAvailable => f.write_str("N/A"),
        }
    }
}

/// One row of the summary table, computed on a column's original values.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub label: String,
    pub mean: Stat,
    pub median: Stat,
    pub mode: Stat,
    pub min: Stat,
    pub max: Stat,
    pub count: usize,
    pub std_dev: Stat,
}

pub const SUMMARY_HEADERS: [&str; 7] = [
    "Mean",
    "Median",
    "Mode",
    "Minimum",
    "Maximum",
    "N (Count)",
    "Std Dev",
];

impl SummaryRow {
    pub fn cells(&self) -> [String; 7] {
        [
            self.mean.to_string(),
            self.median.to_string(),
            self.mode.to_string(),
            self.min.to_string(),
            self.max.to_string(),
            self.count.to_string(),
            self.std_dev.to_string(),
        ]
    }
}

/// Round to two decimals, ties to even.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}

/// Summarize one column's raw values.
pub fn summarize_column(column: &Column, policy: ModePolicy) -> Result<SummaryRow, AnalysisError> {
    let values: Vec<f64> = column.present().collect();
    let stats = SeriesStats::compute(values.iter().copied());

    let mode = if values.is_empty() {
        Stat::NotAvailable
    } else {
        match (unique_mode(&values), policy) {
            (Some(m), _) => Stat::Value(round2(m)),
            (None, ModePolicy::NotAvailable) => {
                tracing::warn!(column = %column.name, "no unique mode");
                Stat::NotAvailable
            }
            (None, ModePolicy::Abort) => {
                return Err(AnalysisError::NoUniqueMode {
                    column: column.name.clone(),
                });
            }
        }
    };

    Ok(SummaryRow {
        label: column.name.clone(),
        mean: stats.as_ref().map(|s| s.mean).into(),
        median: stats.as_ref().map(|s| s.median).into(),
        mode,
        min: stats.as_ref().map(|s| s.min).into(),
        max: stats.as_ref().map(|s| s.max).into(),
        count: stats.as_ref().map_or(0, |s| s.count),
        std_dev: stats.as_ref().and_then(|s| s.std_dev).into(),
    })
}

/// Summarize every column of the dataset, in order.
///
/// Under [`ModePolicy::Abort`] the first column without a unique mode fails the
/// whole summary.
pub fn summarize(
    dataset: &Dataset,
    config: &AnalysisConfig,
) -> Result<Vec<SummaryRow>, AnalysisError> {
    dataset
        .columns()
        .iter()
        .map(|column| summarize_column(column, config.mode_policy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(values: &[f64]) -> Column {
        Column::new("Sample", values.iter().map(|&v| Some(v)).collect())
    }

    #[test]
    fn raw_values_outside_plot_range_are_included() {
        let row = summarize_column(&col(&[10.0, 10.0, 400.0, 1000.0]), ModePolicy::Abort).unwrap();
        assert_eq!(row.mean, Stat::Value(355.0));
        assert_eq!(row.median, Stat::Value(205.0));
        assert_eq!(row.mode, Stat::Value(10.0));
        assert_eq!(row.min, Stat::Value(10.0));
        assert_eq!(row.max, Stat::Value(1000.0));
        assert_eq!(row.count, 4);
        // sqrt((345^2 * 2 + 45^2 + 645^2) / 3)
        assert_eq!(row.std_dev, Stat::Value(467.65));
    }

    #[test]
    fn missing_values_do_not_count() {
        let column = Column::new("A", vec![Some(1.0), None, Some(1.0), Some(4.0), None]);
        let row = summarize_column(&column, ModePolicy::Abort).unwrap();
        assert_eq!(row.count, 3);
        assert_eq!(row.mean, Stat::Value(2.0));
    }

    #[test]
    fn values_are_rounded_to_two_places() {
        let row = summarize_column(&col(&[1.0, 1.0, 2.0]), ModePolicy::Abort).unwrap();
        assert_eq!(row.mean, Stat::Value(1.33));
        assert_eq!(row.mean.to_string(), "1.33");
        assert_eq!(row.std_dev, Stat::Value(0.58));
        assert_eq!(row.max.to_string(), "2.00");
    }

    #[test]
    fn all_distinct_values_abort_by_default() {
        let err = summarize_column(&col(&[1.0, 2.0, 3.0]), ModePolicy::Abort).unwrap_err();
        assert!(matches!(err, AnalysisError::NoUniqueMode { column } if column == "Sample"));
    }

    #[test]
    fn tied_mode_can_be_reported_as_unavailable() {
        let row = summarize_column(&col(&[1.0, 1.0, 2.0, 2.0]), ModePolicy::NotAvailable).unwrap();
        assert_eq!(row.mode, Stat::NotAvailable);
        assert_eq!(row.mode.to_string(), "N/A");
        assert_eq!(row.median, Stat::Value(1.5));
    }

    #[test]
    fn halfway_values_round_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(-0.125), -0.12);
        assert_eq!(Stat::from(Some(0.125)).to_string(), "0.12");
    }

    #[test]
    fn single_value_has_mode_but_no_spread() {
        let row = summarize_column(&col(&[7.256]), ModePolicy::Abort).unwrap();
        assert_eq!(row.mode, Stat::Value(7.26));
        assert_eq!(row.std_dev, Stat::NotAvailable);
    }

    #[test]
    fn unique_mode_picks_strict_leader() {
        assert_eq!(unique_mode(&[3.0, 1.0, 3.0, 2.0]), Some(3.0));
        assert_eq!(unique_mode(&[0.0, -0.0, 5.0]), Some(0.0));
        assert_eq!(unique_mode(&[1.0, 2.0]), None);
        assert_eq!(unique_mode(&[]), None);
    }

    #[test]
    fn one_bad_column_fails_the_whole_summary() {
        let ds = Dataset::new(
            "mem.csv",
            vec![
                Column::new("ok", vec![Some(1.0), Some(1.0)]),
                Column::new("flat", vec![Some(1.0), Some(2.0)]),
            ],
            2,
        );
        assert!(summarize(&ds, &AnalysisConfig::default()).is_err());

        let lenient = AnalysisConfig {
            mode_policy: ModePolicy::NotAvailable,
            ..Default::default()
        };
        let rows = summarize(&ds, &lenient).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].mode, Stat::Value(1.0));
        assert_eq!(rows[1].mode, Stat::NotAvailable);
    }

    #[test]
    fn series_stats_ignores_nan() {
        let stats = SeriesStats::compute([f64::NAN, 2.0, 4.0]).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean, 3.0);
        assert!(SeriesStats::compute([f64::NAN]).is_none());
    }
}
