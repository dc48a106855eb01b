// ==========================================
// Cruce de Material SAP - summary engine
// ==========================================
// Pure aggregation over the output line sequence; no state,
// empty input yields zero-valued metrics
// ==========================================

use crate::domain::{OutputLine, ReconcileSummary};

pub struct SummaryEngine;

impl SummaryEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// Aggregate metrics over the full output sequence: row count, total
    /// unmet quantity and dispatchable/non-dispatchable row counts.
    pub fn summarize(&self, lines: &[OutputLine]) -> ReconcileSummary {
        let mut summary = ReconcileSummary {
            total_rows: lines.len(),
            ..ReconcileSummary::default()
        };

        for line in lines {
            summary.total_unmet_qty += line.unmet_qty;
            if line.dispatchable.is_dispatchable() {
                summary.dispatchable_rows += 1;
            } else {
                summary.non_dispatchable_rows += 1;
            }
        }

        summary
    }
}

impl Default for SummaryEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dispatchable;

    fn line(allocated: f64, unmet: f64) -> OutputLine {
        OutputLine {
            item_id: None,
            material_code: "A".to_string(),
            material_description: None,
            site_code: None,
            plan_name: None,
            requested_qty: allocated + unmet,
            stock_description: None,
            allocated_qty: allocated,
            unmet_qty: unmet,
            dispatchable: Dispatchable::from_allocated(allocated),
        }
    }

    #[test]
    fn test_empty_input_yields_zero_metrics() {
        let summary = SummaryEngine::new().summarize(&[]);
        assert_eq!(summary, ReconcileSummary::default());
    }

    #[test]
    fn test_counts_and_unmet_sum() {
        let lines = vec![line(4.0, 0.0), line(0.0, 2.0), line(6.0, 0.0), line(0.0, 3.5)];
        let summary = SummaryEngine::new().summarize(&lines);

        assert_eq!(summary.total_rows, 4);
        assert_eq!(summary.total_unmet_qty, 5.5);
        assert_eq!(summary.dispatchable_rows, 2);
        assert_eq!(summary.non_dispatchable_rows, 2);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let lines = vec![line(1.0, 0.0), line(0.0, 9.0)];
        let engine = SummaryEngine::new();
        assert_eq!(engine.summarize(&lines), engine.summarize(&lines));
    }
}
