use std::io::Read;
use std::path::Path;

use crate::data::dataset::Dataset;
use crate::data::parser::{self, Cell};
use crate::error::AnalysisError;

/// Load a spreadsheet or CSV file into a [`Dataset`].
///
/// The path is checked before anything is opened, so a missing file never gets
/// as far as format detection.
pub fn load_file(path: &Path) -> Result<Dataset, AnalysisError> {
    if !path.exists() {
        return Err(AnalysisError::FileNotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let rows = match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path)?,
        "csv" => read_csv(std::fs::File::open(path)?)?,
        _ => return Err(AnalysisError::UnsupportedFormat(ext)),
    };

    let (columns, row_count) = parser::rows_to_columns(rows).ok_or(AnalysisError::EmptyFile)?;
    let dataset = Dataset::new(path, columns, row_count);

    tracing::info!(
        path = %path.display(),
        columns = dataset.columns().len(),
        rows = dataset.row_count(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Read the first worksheet of a workbook into raw cells.
fn read_workbook(path: &Path) -> Result<Vec<Vec<Cell>>, AnalysisError> {
    use calamine::{open_workbook_auto, Data, Reader};

    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .ok_or(AnalysisError::NoSheets)?
        .clone();
    tracing::debug!(sheet = %sheet_name, "reading worksheet");

    let range = workbook.worksheet_range(&sheet_name)?;

    let rows = range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => Cell::Empty,
                    Data::Float(f) => Cell::Number(*f),
                    Data::Int(i) => Cell::Number(*i as f64),
                    Data::String(s) => Cell::from_text(s),
                    Data::Bool(_)
                    | Data::DateTime(_)
                    | Data::DateTimeIso(_)
                    | Data::DurationIso(_)
                    | Data::Error(_) => Cell::Other,
                })
                .collect()
        })
        .collect();

    Ok(rows)
}

/// Read comma-separated records into raw cells.
///
/// Bytes that are not valid UTF-8 are treated as Latin-1.
pub fn read_csv<R: Read>(mut source: R) -> Result<Vec<Vec<Cell>>, AnalysisError> {
    let mut content = Vec::new();
    source.read_to_end(&mut content)?;

    let text = match String::from_utf8(content) {
        Ok(text) => text,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Cell::from_text).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_is_reported_before_parsing() {
        let path = Path::new("/definitely/not/here/sizes.xlsx");
        match load_file(path) {
            Err(AnalysisError::FileNotFound(p)) => assert_eq!(p, path),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn unknown_extension_is_rejected() {
        // The crate manifest always exists relative to the test working directory.
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        assert!(matches!(
            load_file(&path),
            Err(AnalysisError::UnsupportedFormat(ext)) if ext == "toml"
        ));
    }

    #[test]
    fn first_worksheet_is_read_into_columns() {
        use rust_xlsxwriter::Workbook;

        let path = std::env::temp_dir().join(format!("psa-loader-{}.xlsx", std::process::id()));

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Sample A").unwrap();
        sheet.write_string(0, 1, "Blank").unwrap();
        sheet.write_string(0, 2, "Sample A").unwrap();
        for (row, size) in [10.0, 10.0, 400.0, 1000.0].into_iter().enumerate() {
            sheet.write_number(row as u32 + 1, 0, size).unwrap();
        }
        sheet.write_boolean(1, 2, true).unwrap();
        sheet.write_number(2, 2, 5.0).unwrap();
        sheet.write_number(1, 3, 1.0).unwrap();
        sheet.write_number(2, 3, 2.0).unwrap();
        let other = workbook.add_worksheet();
        other.write_string(0, 0, "Ignored").unwrap();
        other.write_number(1, 0, 99.0).unwrap();
        workbook.save(&path).unwrap();

        let loaded = load_file(&path);
        std::fs::remove_file(&path).ok();
        let dataset = loaded.unwrap();

        let names: Vec<&str> = dataset.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Sample A", "Sample A.1", "Unnamed: 3"]);
        assert_eq!(dataset.row_count(), 4);
        assert_eq!(
            dataset.columns()[0].values,
            [Some(10.0), Some(10.0), Some(400.0), Some(1000.0)]
        );
        assert_eq!(dataset.columns()[1].values, [None, Some(5.0), None, None]);
        assert_eq!(dataset.columns()[2].values, [Some(1.0), Some(2.0), None, None]);
    }

    #[test]
    fn csv_records_become_cells() {
        let input = "Sample A,Sample B,Empty\n10,5,\n 400 ,,\n1000,abc,\n";
        let rows = read_csv(input.as_bytes()).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1][0], Cell::Text("10".into()));
        assert_eq!(rows[2][1], Cell::Empty);

        let (columns, row_count) = parser::rows_to_columns(rows).unwrap();
        let dataset = Dataset::new("mem.csv", columns, row_count);
        let names: Vec<&str> = dataset.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Sample A", "Sample B"]);
        assert_eq!(dataset.columns()[0].values, [Some(10.0), Some(400.0), Some(1000.0)]);
        assert_eq!(dataset.columns()[1].values, [Some(5.0), None, None]);
    }

    #[test]
    fn latin1_bytes_are_decoded() {
        let input: &[u8] = b"Gr\xf6\xdfe\n1\n";
        let rows = read_csv(input).unwrap();
        assert_eq!(rows[0][0], Cell::Text("Gr\u{f6}\u{df}e".into()));
    }
}
