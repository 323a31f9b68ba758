use std::path::{Path, PathBuf};

/// One named measurement series. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self { name: name.into(), values }
    }

    /// Non-missing values in row order.
    pub fn present(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(|v| *v)
    }

    pub fn is_all_missing(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }
}

/// The table loaded from the input file. Built once and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    source: PathBuf,
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Build a dataset, dropping every column that has no values at all.
    pub fn new(source: impl Into<PathBuf>, columns: Vec<Column>, row_count: usize) -> Self {
        let (columns, dropped): (Vec<Column>, Vec<Column>) =
            columns.into_iter().partition(|c| !c.is_all_missing());

        for col in &dropped {
            tracing::debug!(column = %col.name, "dropping column with no values");
        }

        Self {
            source: source.into(),
            columns,
            row_count,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
