use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("File does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unsupported file format: .{0}")]
    UnsupportedFormat(String),

    #[error("Cannot open workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Cannot read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Cannot read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("No sheets found in workbook")]
    NoSheets,

    #[error("No data found in file")]
    EmptyFile,

    #[error("Column '{column}' has no unique mode")]
    NoUniqueMode { column: String },

    #[error("Cannot estimate density for column '{column}': all values are identical")]
    DegenerateSample { column: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AnalysisError {
    /// The single line shown to the user when the run stops.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::FileNotFound(_) => {
                "Error: File does not exist. Please check the path and try again.".to_string()
            }
            AnalysisError::NoUniqueMode { .. } => {
                "Error calculating mode: One or more columns have no unique mode.".to_string()
            }
            other => format!("An error occurred while processing the file: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_message_is_fixed() {
        let err = AnalysisError::FileNotFound(PathBuf::from("/nope.xlsx"));
        assert_eq!(
            err.user_message(),
            "Error: File does not exist. Please check the path and try again."
        );
    }

    #[test]
    fn mode_message_does_not_name_the_column() {
        let err = AnalysisError::NoUniqueMode { column: "Sample A".into() };
        assert_eq!(
            err.user_message(),
            "Error calculating mode: One or more columns have no unique mode."
        );
    }

    #[test]
    fn other_errors_carry_their_description() {
        let err = AnalysisError::UnsupportedFormat("txt".into());
        assert_eq!(
            err.user_message(),
            "An error occurred while processing the file: Unsupported file format: .txt"
        );
    }
}
