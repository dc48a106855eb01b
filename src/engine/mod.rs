// ==========================================
// Cruce de Material SAP - engine layer
// ==========================================
// Business rules only: no I/O, no persistence. One
// reconcile call owns its stock pool from creation to
// discard; deterministic, strictly-ordered processing.
// ==========================================

pub mod reconcile;
pub mod stock_pool;
pub mod summary;

pub use reconcile::{ReconcileEngine, ReconcileOutcome};
pub use stock_pool::StockPool;
pub use summary::SummaryEngine;
