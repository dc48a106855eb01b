// ==========================================
// Cruce de Material SAP - core library
// ==========================================
// Reconciles requested material quantities against SAP
// on-hand stock, consuming a shared pool in request order
// and splitting lines when stock runs out mid-request.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and types
pub mod domain;

// Engine layer - reconciliation rules
pub mod engine;

// Importer layer - external data in
pub mod importer;

// Export layer - results out
pub mod export;

// Configuration layer - column mapping profiles
pub mod config;

// Service layer - file-level orchestration
pub mod service;

// Logging
pub mod logging;

// ==========================================
// Core type re-exports
// ==========================================

// Domain
pub use domain::{
    Dispatchable, OutputLine, ReconcileSummary, RequestLine, RunReport, StockEntry,
};

// Engines
pub use engine::{ReconcileEngine, ReconcileOutcome, StockPool, SummaryEngine};

// Importer
pub use importer::{CsvParser, DataCleaner, ExcelParser, FieldMapper, ImportError, RawTable};

// Export
pub use export::{CsvWriter, ExcelWriter, ExportError, OUTPUT_COLUMNS, OUTPUT_SHEET_NAME};

// Configuration
pub use config::MappingProfile;

// Service
pub use service::{ReconcileJob, ReconcileService, ReconcileServiceImpl, RunOutcome};

// ==========================================
// Constants
// ==========================================

// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Application name
pub const APP_NAME: &str = "Cruce de Material SAP";
