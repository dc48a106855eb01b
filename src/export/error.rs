// ==========================================
// Cruce de Material SAP - export error types
// ==========================================

use thiserror::Error;

/// Export error type
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("export write failed: {0}")]
    WriteError(String),

    #[error("Excel export failed: {0}")]
    ExcelError(String),

    #[error("CSV export failed: {0}")]
    CsvError(String),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::WriteError(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::ExcelError(err.to_string())
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::CsvError(err.to_string())
    }
}

/// Result type alias
pub type ExportResult<T> = Result<T, ExportError>;
