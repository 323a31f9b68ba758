use std::path::Path;

use crate::config::AnalysisConfig;
use crate::data::dataset::Dataset;
use crate::data::loader;
use crate::error::AnalysisError;
use crate::processing::statistics::{self, SummaryRow};
use crate::state::chart::{self, ChartFigure};

/// Everything the display needs: the chart and the summary table.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub chart: ChartFigure,
    pub summary: Vec<SummaryRow>,
}

/// Run the chart and summary stages over an already loaded dataset.
///
/// Both stages must succeed; there is no partial result.
pub fn analyze(dataset: &Dataset, config: &AnalysisConfig) -> Result<Analysis, AnalysisError> {
    if dataset.is_empty() {
        tracing::warn!(source = %dataset.source().display(), "no column contains any values");
    }

    let chart = chart::build_chart(dataset, config)?;
    tracing::info!(
        plotted = chart.series.len(),
        columns = dataset.columns().len(),
        "chart prepared"
    );

    let summary = statistics::summarize(dataset, config)?;
    tracing::info!(rows = summary.len(), "summary statistics computed");

    Ok(Analysis { chart, summary })
}

/// Load the file at `path` and analyze it.
pub fn run(path: &Path, config: &AnalysisConfig) -> Result<Analysis, AnalysisError> {
    let dataset = loader::load_file(path)?;
    analyze(&dataset, config)
}

/// Clean up a path typed or pasted at the prompt.
///
/// Terminals often wrap dragged-in paths in quotes.
pub fn clean_input_path(input: &str) -> &str {
    let trimmed = input.trim();
    for quote in ['"', '\''] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModePolicy;
    use crate::data::dataset::Column;
    use crate::processing::statistics::Stat;

    fn particle_dataset() -> Dataset {
        Dataset::new(
            "sizes.xlsx",
            vec![
                Column::new("Sample A", vec![Some(10.0), Some(10.0), Some(400.0), Some(1000.0)]),
                Column::new("Unused", vec![None, None, None, None]),
                Column::new("Oversized", vec![Some(700.0), Some(700.0), Some(900.0), None]),
            ],
            4,
        )
    }

    #[test]
    fn excluded_columns_still_get_a_summary_row() {
        let analysis = analyze(&particle_dataset(), &AnalysisConfig::default()).unwrap();

        let plotted: Vec<&str> = analysis.chart.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(plotted, ["Sample A"]);

        let labels: Vec<&str> = analysis.summary.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["Sample A", "Oversized"]);

        let oversized = &analysis.summary[1];
        assert_eq!(oversized.count, 3);
        assert_eq!(oversized.mean, Stat::Value(766.67));
        assert_eq!(oversized.mode, Stat::Value(700.0));
    }

    #[test]
    fn summary_ignores_the_plot_filter() {
        let analysis = analyze(&particle_dataset(), &AnalysisConfig::default()).unwrap();
        let sample = &analysis.summary[0];
        assert_eq!(sample.mean, Stat::Value(355.0));
        assert_eq!(sample.max, Stat::Value(1000.0));
        assert_eq!(sample.count, 4);
    }

    #[test]
    fn no_unique_mode_aborts_the_run() {
        let ds = Dataset::new(
            "sizes.xlsx",
            vec![
                Column::new("A", vec![Some(5.0), Some(5.0), Some(9.0)]),
                Column::new("Distinct", vec![Some(1.0), Some(2.0), Some(3.0)]),
            ],
            3,
        );
        let err = analyze(&ds, &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::NoUniqueMode { .. }));

        let lenient = AnalysisConfig {
            mode_policy: ModePolicy::NotAvailable,
            ..Default::default()
        };
        let analysis = analyze(&ds, &lenient).unwrap();
        assert_eq!(analysis.summary[1].mode, Stat::NotAvailable);
        assert_eq!(analysis.chart.series.len(), 2);
    }

    #[test]
    fn missing_file_stops_before_analysis() {
        let path = Path::new("/no/such/particles.xlsx");
        let err = run(path, &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::FileNotFound(_)));
    }

    #[test]
    fn prompt_input_is_unquoted() {
        assert_eq!(clean_input_path("  /data/sizes.xlsx\n"), "/data/sizes.xlsx");
        assert_eq!(clean_input_path("\"C:\\My Data\\sizes.xlsx\""), "C:\\My Data\\sizes.xlsx");
        assert_eq!(clean_input_path("'/tmp/a b.csv'"), "/tmp/a b.csv");
        assert_eq!(clean_input_path("\"unbalanced"), "\"unbalanced");
    }
}
