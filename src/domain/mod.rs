// ==========================================
// Cruce de Material SAP - domain layer
// ==========================================
// Entities and types; written by the importer, read by the
// engine, never mutated during a reconciliation run
// ==========================================

pub mod dispatch;
pub mod types;

pub use dispatch::{OutputLine, ReconcileSummary, RequestLine, RunReport, StockEntry};
pub use types::Dispatchable;
