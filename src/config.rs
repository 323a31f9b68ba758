use std::str::FromStr;

use dotenvy::dotenv;

use crate::error::AnalysisError;

pub const DEFAULT_BIN_COUNT: usize = 20;
pub const DEFAULT_RANGE_MIN: f64 = 0.0;
pub const DEFAULT_RANGE_MAX: f64 = 515.0;
pub const DEFAULT_KDE_POINTS: usize = 1000;

/// What to do with a column whose most frequent value is shared by another value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModePolicy {
    /// Stop the whole run.
    #[default]
    Abort,
    /// Show "N/A" for that column and keep going.
    NotAvailable,
}

impl FromStr for ModePolicy {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "abort" => Ok(ModePolicy::Abort),
            "not-available" | "not_available" | "na" | "n/a" => Ok(ModePolicy::NotAvailable),
            other => Err(AnalysisError::Config(format!(
                "unknown mode policy '{other}' (expected 'abort' or 'not-available')"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Histogram bins per column.
    pub bin_count: usize,
    /// Inclusive lower bound of the plotted size range.
    pub range_min: f64,
    /// Inclusive upper bound of the plotted size range.
    pub range_max: f64,
    /// Number of points the density curve is evaluated at over [0, 1].
    pub kde_points: usize,
    pub mode_policy: ModePolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            bin_count: DEFAULT_BIN_COUNT,
            range_min: DEFAULT_RANGE_MIN,
            range_max: DEFAULT_RANGE_MAX,
            kde_points: DEFAULT_KDE_POINTS,
            mode_policy: ModePolicy::default(),
        }
    }
}

impl AnalysisConfig {
    /// Apply overrides from a key lookup (normally the process environment).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, AnalysisError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PSA_BIN_COUNT") {
            self.bin_count = parse_value("PSA_BIN_COUNT", &v)?;
        }
        if let Some(v) = lookup("PSA_RANGE_MIN") {
            self.range_min = parse_value("PSA_RANGE_MIN", &v)?;
        }
        if let Some(v) = lookup("PSA_RANGE_MAX") {
            self.range_max = parse_value("PSA_RANGE_MAX", &v)?;
        }
        if let Some(v) = lookup("PSA_KDE_POINTS") {
            self.kde_points = parse_value("PSA_KDE_POINTS", &v)?;
        }
        if let Some(v) = lookup("PSA_MODE_POLICY") {
            self.mode_policy = v.parse()?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.bin_count == 0 {
            return Err(AnalysisError::Config("bin count must be at least 1".into()));
        }
        if self.kde_points < 2 {
            return Err(AnalysisError::Config("KDE needs at least 2 evaluation points".into()));
        }
        if !self.range_min.is_finite() || !self.range_max.is_finite() {
            return Err(AnalysisError::Config("range bounds must be finite".into()));
        }
        // Normalized values only stay inside [0, 1] for non-negative data.
        if self.range_min < 0.0 {
            return Err(AnalysisError::Config("range minimum must not be negative".into()));
        }
        if self.range_min > self.range_max {
            return Err(AnalysisError::Config(format!(
                "range minimum {} exceeds range maximum {}",
                self.range_min, self.range_max
            )));
        }
        Ok(())
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.range_min && value <= self.range_max
    }
}

/// Load configuration from `.env` and the process environment.
pub fn load_config() -> Result<AnalysisConfig, AnalysisError> {
    dotenv().ok();

    let config = AnalysisConfig::default().with_overrides(|key| std::env::var(key).ok())?;
    config.validate()?;

    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, AnalysisError> {
    raw.trim()
        .parse()
        .map_err(|_| AnalysisError::Config(format!("{key} has an invalid value '{raw}'")))
}
