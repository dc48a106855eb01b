// ==========================================
// Cruce de Material SAP - field mapper
// ==========================================
// Resolves source headers to canonical fields via the
// mapping profile (exact match first, then
// case-insensitive), then builds typed records.
// ==========================================
// A required field with no matching column is a fatal
// configuration error; a blank value inside a matched
// column is a data-quality issue and is coerced.
// ==========================================

use crate::config::{RequestColumns, StockColumns};
use crate::domain::{RequestLine, StockEntry};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawTable;
use std::collections::HashMap;
use tracing::debug;

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner::new(),
        }
    }

    /// Map the requests table to RequestLine records.
    pub fn map_requests(
        &self,
        table: &RawTable,
        columns: &RequestColumns,
    ) -> ImportResult<Vec<RequestLine>> {
        let col_material =
            self.require_column(table, "requests", "material_code", &columns.material_code)?;
        let col_qty =
            self.require_column(table, "requests", "requested_qty", &columns.requested_qty)?;
        let col_item = resolve_column(&table.headers, &columns.item);
        let col_description = resolve_column(&table.headers, &columns.material_description);
        let col_site = resolve_column(&table.headers, &columns.site_code);
        let col_plan = resolve_column(&table.headers, &columns.plan_name);

        let mut lines = Vec::with_capacity(table.rows.len());
        for (idx, row) in table.rows.iter().enumerate() {
            let row_number = idx + 1;
            lines.push(RequestLine {
                item_id: self.optional_text(row, col_item.as_deref()),
                material_code: self.key_text(row, &col_material),
                material_description: self.optional_text(row, col_description.as_deref()),
                site_code: self.optional_text(row, col_site.as_deref()),
                plan_name: self.optional_text(row, col_plan.as_deref()),
                requested_qty: self.quantity(row, &col_qty, "requested_qty", row_number),
                row_number,
            });
        }
        Ok(lines)
    }

    /// Map the stock table to StockEntry records.
    pub fn map_stock(
        &self,
        table: &RawTable,
        columns: &StockColumns,
    ) -> ImportResult<Vec<StockEntry>> {
        let col_material =
            self.require_column(table, "stock", "material_code", &columns.material_code)?;
        let col_qty =
            self.require_column(table, "stock", "available_qty", &columns.available_qty)?;
        let col_item = resolve_column(&table.headers, &columns.item);
        let col_description = resolve_column(&table.headers, &columns.stock_description);

        let mut entries = Vec::with_capacity(table.rows.len());
        for (idx, row) in table.rows.iter().enumerate() {
            let row_number = idx + 1;
            entries.push(StockEntry {
                item_id: self.optional_text(row, col_item.as_deref()),
                material_code: self.key_text(row, &col_material),
                stock_description: self.optional_text(row, col_description.as_deref()),
                available_qty: self.quantity(row, &col_qty, "available_qty", row_number),
                row_number,
            });
        }
        Ok(entries)
    }

    fn require_column(
        &self,
        table: &RawTable,
        table_name: &'static str,
        field: &'static str,
        candidates: &[String],
    ) -> ImportResult<String> {
        match resolve_column(&table.headers, candidates) {
            Some(header) => {
                debug!(table = table_name, field, header = %header, "column resolved");
                Ok(header)
            }
            None => Err(ImportError::MissingColumn {
                table: table_name,
                field,
                candidates: candidates.to_vec(),
            }),
        }
    }

    fn key_text(&self, row: &HashMap<String, String>, header: &str) -> String {
        row.get(header)
            .map(|v| self.cleaner.clean_text(v))
            .unwrap_or_default()
    }

    fn optional_text(
        &self,
        row: &HashMap<String, String>,
        header: Option<&str>,
    ) -> Option<String> {
        header.and_then(|h| self.cleaner.normalize_null(row.get(h).cloned()))
    }

    fn quantity(
        &self,
        row: &HashMap<String, String>,
        header: &str,
        field: &str,
        row_number: usize,
    ) -> f64 {
        let raw = row.get(header).map(String::as_str).unwrap_or("");
        self.cleaner.coerce_non_negative_qty(raw, field, row_number)
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the first candidate present among the headers: one exact pass
/// over all candidates, then a case-insensitive pass.
fn resolve_column(headers: &[String], candidates: &[String]) -> Option<String> {
    for candidate in candidates {
        if let Some(found) = headers.iter().find(|h| h.as_str() == candidate.as_str()) {
            return Some(found.clone());
        }
    }
    for candidate in candidates {
        if let Some(found) = headers
            .iter()
            .find(|h| h.eq_ignore_ascii_case(candidate))
        {
            return Some(found.clone());
        }
    }
    None
}
