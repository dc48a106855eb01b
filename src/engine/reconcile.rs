// ==========================================
// Cruce de Material SAP - reconciliation engine
// ==========================================
// Consumes a shared stock pool across the request sequence
// in strict input order, splitting lines when stock runs
// out mid-request and labeling dispatchability.
// ==========================================
// Input order is load-bearing: two requests for the same
// material are served first-come-first-served, never by a
// priority or size heuristic.
// ==========================================

use crate::domain::{Dispatchable, OutputLine, ReconcileSummary, RequestLine, StockEntry};
use crate::engine::stock_pool::StockPool;
use crate::engine::summary::SummaryEngine;
use tracing::{debug, instrument};

// ==========================================
// ReconcileEngine
// ==========================================
pub struct ReconcileEngine {
    summary_engine: SummaryEngine,
}

/// Result of one reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub lines: Vec<OutputLine>,
    pub summary: ReconcileSummary,
}

impl ReconcileEngine {
    pub fn new() -> Self {
        Self {
            summary_engine: SummaryEngine::new(),
        }
    }

    /// Reconcile the request sequence against the stock sheet.
    ///
    /// Builds a fresh StockPool (quantities summed per material_code),
    /// then walks `requests` in input order. Per request with quantity Q
    /// and pool balance R:
    /// - Q = 0       -> one line, allocated 0, No; pool unchanged
    /// - R >= Q      -> one line, allocated Q, Si; pool -= Q
    /// - 0 < R < Q   -> split: one line allocated R / Si, one line
    ///                  allocated 0, unmet Q-R / No; pool drained to 0
    /// - R = 0       -> one line, allocated 0, unmet Q, No
    ///   (an unmatched material_code behaves like R = 0, with the
    ///   stock description left empty)
    ///
    /// The unmet remainder of a split is terminal; it is never re-queued
    /// against other materials.
    #[instrument(skip(self, requests, stock), fields(
        request_rows = requests.len(),
        stock_rows = stock.len()
    ))]
    pub fn reconcile(
        &self,
        requests: &[RequestLine],
        stock: &[StockEntry],
    ) -> ReconcileOutcome {
        let mut pool = StockPool::from_entries(stock);
        let mut lines: Vec<OutputLine> = Vec::with_capacity(requests.len());

        for request in requests {
            self.reconcile_one(request, &mut pool, &mut lines);
        }

        let summary = self.summary_engine.summarize(&lines);
        debug!(
            output_rows = summary.total_rows,
            dispatchable = summary.dispatchable_rows,
            total_unmet = summary.total_unmet_qty,
            "reconciliation finished"
        );

        ReconcileOutcome { lines, summary }
    }

    fn reconcile_one(
        &self,
        request: &RequestLine,
        pool: &mut StockPool,
        lines: &mut Vec<OutputLine>,
    ) {
        let requested = request.requested_qty;
        let remaining = pool.remaining_qty(&request.material_code);
        let stock_description = pool
            .description(&request.material_code)
            .map(|d| d.to_string());

        if requested <= 0.0 {
            // Zero-quantity request: the record is preserved, nothing moves.
            lines.push(self.output_line(request, &stock_description, 0.0, 0.0));
            return;
        }

        if remaining >= requested {
            pool.consume(&request.material_code, requested);
            lines.push(self.output_line(request, &stock_description, requested, 0.0));
        } else if remaining > 0.0 {
            // Split: dispatchable portion first, then the terminal shortfall.
            pool.consume(&request.material_code, remaining);
            lines.push(self.output_line(request, &stock_description, remaining, 0.0));
            lines.push(self.output_line(
                request,
                &stock_description,
                0.0,
                requested - remaining,
            ));
        } else {
            // Depleted or unmatched: fully unmet, record kept visible.
            lines.push(self.output_line(request, &stock_description, 0.0, requested));
        }
    }

    fn output_line(
        &self,
        request: &RequestLine,
        stock_description: &Option<String>,
        allocated_qty: f64,
        unmet_qty: f64,
    ) -> OutputLine {
        OutputLine {
            item_id: request.item_id.clone(),
            material_code: request.material_code.clone(),
            material_description: request.material_description.clone(),
            site_code: request.site_code.clone(),
            plan_name: request.plan_name.clone(),
            requested_qty: request.requested_qty,
            stock_description: stock_description.clone(),
            allocated_qty,
            unmet_qty,
            dispatchable: Dispatchable::from_allocated(allocated_qty),
        }
    }
}

impl Default for ReconcileEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(code: &str, qty: f64) -> RequestLine {
        RequestLine {
            item_id: Some("1".to_string()),
            material_code: code.to_string(),
            material_description: None,
            site_code: None,
            plan_name: None,
            requested_qty: qty,
            row_number: 1,
        }
    }

    fn stock(code: &str, qty: f64) -> StockEntry {
        StockEntry {
            item_id: None,
            material_code: code.to_string(),
            stock_description: Some(format!("desc {}", code)),
            available_qty: qty,
            row_number: 1,
        }
    }

    #[test]
    fn test_fully_satisfied_single_line() {
        let engine = ReconcileEngine::new();
        let outcome = engine.reconcile(&[req("A", 4.0)], &[stock("A", 10.0)]);

        assert_eq!(outcome.lines.len(), 1);
        let line = &outcome.lines[0];
        assert_eq!(line.allocated_qty, 4.0);
        assert_eq!(line.unmet_qty, 0.0);
        assert_eq!(line.dispatchable, Dispatchable::Si);
        assert_eq!(line.stock_description.as_deref(), Some("desc A"));
    }

    #[test]
    fn test_split_when_stock_runs_out_mid_request() {
        let engine = ReconcileEngine::new();
        let outcome = engine.reconcile(&[req("A", 4.0), req("A", 8.0)], &[stock("A", 10.0)]);

        // Second request needs 8 but only 6 remain: split into 6/Si + 2/No.
        assert_eq!(outcome.lines.len(), 3);
        assert_eq!(outcome.lines[1].allocated_qty, 6.0);
        assert_eq!(outcome.lines[1].unmet_qty, 0.0);
        assert_eq!(outcome.lines[1].dispatchable, Dispatchable::Si);
        assert_eq!(outcome.lines[2].allocated_qty, 0.0);
        assert_eq!(outcome.lines[2].unmet_qty, 2.0);
        assert_eq!(outcome.lines[2].dispatchable, Dispatchable::No);
        // Split lines carry the original request quantity unchanged.
        assert_eq!(outcome.lines[2].requested_qty, 8.0);
    }

    #[test]
    fn test_unmatched_code_is_fully_unmet_with_empty_description() {
        let engine = ReconcileEngine::new();
        let outcome = engine.reconcile(&[req("B", 5.0)], &[]);

        assert_eq!(outcome.lines.len(), 1);
        let line = &outcome.lines[0];
        assert_eq!(line.allocated_qty, 0.0);
        assert_eq!(line.unmet_qty, 5.0);
        assert_eq!(line.dispatchable, Dispatchable::No);
        assert!(line.stock_description.is_none());
    }

    #[test]
    fn test_zero_request_against_zero_stock() {
        let engine = ReconcileEngine::new();
        let outcome = engine.reconcile(&[req("C", 0.0)], &[stock("C", 0.0)]);

        assert_eq!(outcome.lines.len(), 1);
        let line = &outcome.lines[0];
        assert_eq!(line.allocated_qty, 0.0);
        assert_eq!(line.unmet_qty, 0.0);
        assert_eq!(line.dispatchable, Dispatchable::No);
    }

    #[test]
    fn test_empty_requests_yield_empty_output() {
        let engine = ReconcileEngine::new();
        let outcome = engine.reconcile(&[], &[stock("A", 10.0)]);

        assert!(outcome.lines.is_empty());
        assert_eq!(outcome.summary, ReconcileSummary::default());
    }
}
