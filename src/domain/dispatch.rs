// ==========================================
// Cruce de Material SAP - dispatch domain model
// ==========================================
// RequestLine / StockEntry are read-only inputs for one
// reconciliation run; OutputLine rows are engine output.
// Join key is material_code, never the row item id.
// ==========================================

use crate::domain::types::Dispatchable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// RequestLine - one row of the materials-to-dispatch sheet
// ==========================================
// Source: hoja "Material por Descargar" (post column mapping)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestLine {
    // ===== identity =====
    pub item_id: Option<String>, // sheet item id, may repeat across rows
    pub material_code: String,   // join key against stock

    // ===== passthrough =====
    pub material_description: Option<String>,
    pub site_code: Option<String>, // CODIGO OBRA SGT
    pub plan_name: Option<String>, // originating planilla

    // ===== quantity =====
    pub requested_qty: f64, // coerced non-negative (blank/non-numeric -> 0)

    // ===== meta =====
    pub row_number: usize, // source file row (1-based data row)
}

// ==========================================
// StockEntry - one row of the SAP existence sheet
// ==========================================
// Source: hoja "Existencia" (post column mapping)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockEntry {
    pub item_id: Option<String>, // informational only, not the join key
    pub material_code: String,
    pub stock_description: Option<String>, // Texto breve de material
    pub available_qty: f64,                // coerced non-negative

    pub row_number: usize,
}

// ==========================================
// OutputLine - one emitted result row
// ==========================================
// Zero or more per RequestLine: one when satisfiable in a
// single line, two when stock ran out mid-request (split),
// exactly one fully-unmet line when no stock at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputLine {
    // ===== passthrough from the request =====
    pub item_id: Option<String>,
    pub material_code: String,
    pub material_description: Option<String>,
    pub site_code: Option<String>,
    pub plan_name: Option<String>,
    pub requested_qty: f64, // original request, unchanged on split lines

    // ===== reconciliation result =====
    pub stock_description: Option<String>, // matched entry, None if unmatched
    pub allocated_qty: f64,
    pub unmet_qty: f64, // shortfall ("Diferencia"), 0 when fully satisfied
    pub dispatchable: Dispatchable,
}

// ==========================================
// ReconcileSummary - aggregate metrics over the output
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconcileSummary {
    pub total_rows: usize,          // emitted output rows
    pub total_unmet_qty: f64,       // sum of unmet_qty across all rows
    pub dispatchable_rows: usize,   // rows flagged Si
    pub non_dispatchable_rows: usize, // rows flagged No
}

// ==========================================
// RunReport - metadata for one file-level run
// ==========================================
// One report per reconciled workbook/CSV pair; serializable
// for display by callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String, // UUID
    pub source_file: String,
    pub requests_sheet: Option<String>, // None for CSV input
    pub stock_sheet: Option<String>,
    pub request_rows: usize,
    pub stock_rows: usize,
    pub output_rows: usize,
    pub summary: ReconcileSummary,
    pub output_file: Option<String>, // written export, if any
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: i64,
}
