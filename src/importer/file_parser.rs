// ==========================================
// Cruce de Material SAP - file parsers
// ==========================================
// Reads planning workbooks into raw tables before any
// mapping happens. Supports Excel (.xlsx/.xls) with
// sheet-addressable reads, and CSV (.csv).
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

// ==========================================
// RawTable - parsed sheet before column mapping
// ==========================================
// Header order is preserved so mapping can resolve
// candidates against the sheet as the user sees it.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    fn from_header_and_rows<'a, I, C>(header_cells: Vec<String>, data_rows: I) -> Self
    where
        I: Iterator<Item = C>,
        C: Iterator<Item = &'a str>,
    {
        let headers = header_cells;
        let mut rows = Vec::new();

        for data_row in data_rows {
            let mut row_map = HashMap::new();
            for (col_idx, value) in data_row.enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // skip fully blank rows
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }
            rows.push(row_map);
        }

        Self { headers, rows }
    }
}

// ==========================================
// CSV parser
// ==========================================
pub struct CsvParser;

impl CsvParser {
    pub fn parse<P: AsRef<Path>>(file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // tolerate ragged rows
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            records.push(result?);
        }

        Ok(RawTable::from_header_and_rows(
            headers,
            records.iter().map(|record| record.iter()),
        ))
    }
}

// ==========================================
// Excel parser
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// Sheet names in workbook order.
    pub fn list_sheets<P: AsRef<Path>>(file_path: P) -> ImportResult<Vec<String>> {
        let path = Self::check_path(file_path.as_ref())?;
        let workbook = open_workbook_auto(path)?;
        let names = workbook.sheet_names().to_vec();
        if names.is_empty() {
            return Err(ImportError::EmptyWorkbook(path.display().to_string()));
        }
        Ok(names)
    }

    /// Parse one named sheet into a raw table. The first row is the
    /// header row; fully blank data rows are skipped.
    pub fn parse_sheet<P: AsRef<Path>>(file_path: P, sheet_name: &str) -> ImportResult<RawTable> {
        let path = Self::check_path(file_path.as_ref())?;

        let mut workbook = open_workbook_auto(path)?;
        let available = workbook.sheet_names().to_vec();
        if !available.iter().any(|s| s == sheet_name) {
            return Err(ImportError::SheetNotFound {
                name: sheet_name.to_string(),
                available,
            });
        }

        let range = workbook.worksheet_range(sheet_name)?;

        let mut rows = range.rows();
        let header_row = match rows.next() {
            Some(row) => row,
            None => return Ok(RawTable::default()), // empty sheet: zero rows is valid
        };

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let cell_strings: Vec<Vec<String>> = rows
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();

        Ok(RawTable::from_header_and_rows(
            headers,
            cell_strings
                .iter()
                .map(|row| row.iter().map(String::as_str)),
        ))
    }

    /// Resolve which sheet to read.
    ///
    /// Priority: explicit request (exact, then case-insensitive) >
    /// profile default names (case-insensitive) > positional fallback.
    /// An explicit name that matches nothing is an error; defaults fall
    /// through silently, matching how analysts pick sheets by position
    /// when the expected names are absent.
    pub fn resolve_sheet(
        sheet_names: &[String],
        requested: Option<&str>,
        default_names: &[String],
        fallback_index: usize,
    ) -> ImportResult<String> {
        if let Some(name) = requested {
            if let Some(found) = sheet_names.iter().find(|s| s.as_str() == name) {
                return Ok(found.clone());
            }
            if let Some(found) = sheet_names
                .iter()
                .find(|s| s.eq_ignore_ascii_case(name))
            {
                return Ok(found.clone());
            }
            return Err(ImportError::SheetNotFound {
                name: name.to_string(),
                available: sheet_names.to_vec(),
            });
        }

        for default in default_names {
            if let Some(found) = sheet_names
                .iter()
                .find(|s| s.eq_ignore_ascii_case(default))
            {
                return Ok(found.clone());
            }
        }

        let index = fallback_index.min(sheet_names.len().saturating_sub(1));
        sheet_names
            .get(index)
            .cloned()
            .ok_or_else(|| ImportError::EmptyWorkbook("<no sheets>".to_string()))
    }

    fn check_path(path: &Path) -> ImportResult<&Path> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }
        Ok(path)
    }
}
