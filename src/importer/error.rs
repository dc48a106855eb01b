// ==========================================
// Cruce de Material SAP - importer error types
// ==========================================
// thiserror derive; two tiers: fatal configuration errors
// (missing mapped columns) vs data-quality issues, which
// never surface here - those are coerced at ingestion
// ==========================================

use thiserror::Error;

/// Importer error type
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== file errors =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (expected .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("file read failed: {0}")]
    FileReadError(String),

    #[error("Excel parse failed: {0}")]
    ExcelParseError(String),

    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    #[error("workbook has no sheets: {0}")]
    EmptyWorkbook(String),

    #[error("sheet not found: {name} (workbook sheets: {available:?})")]
    SheetNotFound {
        name: String,
        available: Vec<String>,
    },

    // ===== mapping errors (fatal configuration tier) =====
    #[error("required column missing in {table} table: field '{field}' matched none of {candidates:?}")]
    MissingColumn {
        table: &'static str,
        field: &'static str,
        candidates: Vec<String>,
    },

    // ===== generic =====
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result type alias
pub type ImportResult<T> = Result<T, ImportError>;
