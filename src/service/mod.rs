// ==========================================
// Cruce de Material SAP - service layer
// ==========================================
// File-level orchestration over importer, engine and
// export; the only layer that touches the filesystem
// ==========================================

pub mod reconcile_service;

pub use reconcile_service::{ReconcileJob, ReconcileService, ReconcileServiceImpl, RunOutcome};
