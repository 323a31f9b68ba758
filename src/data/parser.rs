use std::collections::HashSet;

use crate::data::dataset::Column;

/// A raw cell as read from a sheet or CSV record, before numeric conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
    /// Booleans, dates, error cells: present in the file but never a measurement.
    Other,
}

impl Cell {
    pub fn from_text(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    /// Numeric value of the cell; `Err(())` when it holds text that is not a number.
    fn to_value(&self) -> Result<Option<f64>, ()> {
        match self {
            Cell::Empty | Cell::Other => Ok(None),
            Cell::Number(v) => Ok(Some(*v).filter(|v| v.is_finite())),
            Cell::Text(s) => match s.parse::<f64>() {
                Ok(v) => Ok(Some(v).filter(|v| v.is_finite())),
                Err(_) => Err(()),
            },
        }
    }

    fn header_text(&self) -> Option<String> {
        match self {
            Cell::Empty | Cell::Other => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => Some(format!("{}", *v as i64)),
            Cell::Number(v) => Some(v.to_string()),
        }
    }
}

/// Turn the header row into unique column names.
///
/// Blank cells become `Unnamed: <index>`; repeats get `.1`, `.2`, ... appended.
pub fn column_names(header: &[Cell], width: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(width);

    for idx in 0..width {
        let base = header
            .get(idx)
            .and_then(Cell::header_text)
            .unwrap_or_else(|| format!("Unnamed: {idx}"));

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }

    names
}

/// Convert row-major cells (header first) into named numeric columns.
///
/// Returns the columns and the number of data rows. `None` when there is no header row.
pub fn rows_to_columns(rows: Vec<Vec<Cell>>) -> Option<(Vec<Column>, usize)> {
    let mut rows = rows.into_iter().skip_while(|r| r.iter().all(|c| *c == Cell::Empty));
    let header = rows.next()?;
    let data_rows: Vec<Vec<Cell>> = rows.collect();

    let width = data_rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);
    let names = column_names(&header, width);
    let row_count = data_rows.len();

    let mut columns: Vec<Column> = names
        .into_iter()
        .map(|name| Column::new(name, Vec::with_capacity(row_count)))
        .collect();
    let mut rejected = vec![0usize; width];

    for row in &data_rows {
        for (col_idx, column) in columns.iter_mut().enumerate() {
            let value = match row.get(col_idx) {
                Some(cell) => cell.to_value().unwrap_or_else(|_| {
                    rejected[col_idx] += 1;
                    None
                }),
                None => None,
            };
            column.values.push(value);
        }
    }

    for (column, count) in columns.iter().zip(&rejected) {
        if *count > 0 {
            tracing::warn!(
                column = %column.name,
                count,
                "ignoring non-numeric cells"
            );
        }
    }

    Some((columns, row_count))
}
