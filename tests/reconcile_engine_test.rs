// ==========================================
// ReconcileEngine - behavior tests
// ==========================================
// Covers the allocation rules: ordered consumption of the
// shared pool, line splitting at the stock boundary, and
// the conservation/completeness properties
// ==========================================


use cruce_sap::domain::Dispatchable;
use cruce_sap::engine::{ReconcileEngine, StockPool, SummaryEngine};
use test_helpers::{request, stock};

// ==========================================
// Scenario coverage
// ==========================================

#[test]
fn test_split_at_depletion_boundary() {
    // stock {A: 10}, requests [{A,4}, {A,8}]
    let engine = ReconcileEngine::new();
    let outcome = engine.reconcile(
        &[request("A", 4.0), request("A", 8.0)],
        &[stock("A", 10.0)],
    );

    assert_eq!(outcome.lines.len(), 3);

    // first request fully satisfied
    assert_eq!(outcome.lines[0].allocated_qty, 4.0);
    assert_eq!(outcome.lines[0].unmet_qty, 0.0);
    assert_eq!(outcome.lines[0].dispatchable, Dispatchable::Si);

    // second request split: 6 dispatchable, 2 unmet
    assert_eq!(outcome.lines[1].allocated_qty, 6.0);
    assert_eq!(outcome.lines[1].dispatchable, Dispatchable::Si);
    assert_eq!(outcome.lines[2].allocated_qty, 0.0);
    assert_eq!(outcome.lines[2].unmet_qty, 2.0);
    assert_eq!(outcome.lines[2].dispatchable, Dispatchable::No);
}

#[test]
fn test_unmatched_material_is_fully_unmet() {
    // empty stock, request [{B,5}]
    let engine = ReconcileEngine::new();
    let outcome = engine.reconcile(&[request("B", 5.0)], &[]);

    assert_eq!(outcome.lines.len(), 1);
    assert_eq!(outcome.lines[0].allocated_qty, 0.0);
    assert_eq!(outcome.lines[0].unmet_qty, 5.0);
    assert_eq!(outcome.lines[0].dispatchable, Dispatchable::No);
    assert!(outcome.lines[0].stock_description.is_none());
}

#[test]
fn test_zero_request_with_zero_stock_entry() {
    // stock {C: 0}, request [{C,0}]
    let engine = ReconcileEngine::new();
    let outcome = engine.reconcile(&[request("C", 0.0)], &[stock("C", 0.0)]);

    assert_eq!(outcome.lines.len(), 1);
    assert_eq!(outcome.lines[0].allocated_qty, 0.0);
    assert_eq!(outcome.lines[0].unmet_qty, 0.0);
    assert_eq!(outcome.lines[0].dispatchable, Dispatchable::No);
}

#[test]
fn test_empty_requests_yield_zero_metrics() {
    let engine = ReconcileEngine::new();
    let outcome = engine.reconcile(&[], &[stock("A", 10.0), stock("B", 3.0)]);

    assert!(outcome.lines.is_empty());
    assert_eq!(outcome.summary.total_rows, 0);
    assert_eq!(outcome.summary.total_unmet_qty, 0.0);
    assert_eq!(outcome.summary.dispatchable_rows, 0);
}

#[test]
fn test_two_requests_second_splits() {
    // requests [{D,3},{D,3}], stock {D: 5}
    let engine = ReconcileEngine::new();
    let outcome = engine.reconcile(
        &[request("D", 3.0), request("D", 3.0)],
        &[stock("D", 5.0)],
    );

    assert_eq!(outcome.lines.len(), 3);
    assert_eq!(outcome.lines[0].allocated_qty, 3.0);
    assert_eq!(outcome.lines[0].dispatchable, Dispatchable::Si);
    assert_eq!(outcome.lines[1].allocated_qty, 2.0);
    assert_eq!(outcome.lines[1].dispatchable, Dispatchable::Si);
    assert_eq!(outcome.lines[2].allocated_qty, 0.0);
    assert_eq!(outcome.lines[2].unmet_qty, 1.0);
    assert_eq!(outcome.lines[2].dispatchable, Dispatchable::No);
}

// ==========================================
// Properties
// ==========================================

#[test]
fn test_conservation_per_material() {
    let requests = vec![
        request("A", 4.0),
        request("B", 2.0),
        request("A", 8.0),
        request("C", 1.0),
        request("A", 3.0),
    ];
    let stock_rows = vec![stock("A", 10.0), stock("B", 1.0)];
    let pool_before = StockPool::from_entries(&stock_rows);

    let outcome = ReconcileEngine::new().reconcile(&requests, &stock_rows);

    for code in ["A", "B", "C"] {
        let allocated: f64 = outcome
            .lines
            .iter()
            .filter(|l| l.material_code == code)
            .map(|l| l.allocated_qty)
            .sum();
        assert!(allocated <= pool_before.initial_qty(code));
    }

    // A was over-requested: everything available got allocated
    let allocated_a: f64 = outcome
        .lines
        .iter()
        .filter(|l| l.material_code == "A")
        .map(|l| l.allocated_qty)
        .sum();
    assert_eq!(allocated_a, 10.0);
}

#[test]
fn test_no_over_allocation_and_non_negative() {
    let requests = vec![request("A", 7.0), request("A", 7.0), request("A", 7.0)];
    let stock_rows = vec![stock("A", 9.0)];

    let outcome = ReconcileEngine::new().reconcile(&requests, &stock_rows);

    let mut total_allocated = 0.0;
    for line in &outcome.lines {
        assert!(line.allocated_qty >= 0.0);
        assert!(line.unmet_qty >= 0.0);
        total_allocated += line.allocated_qty;
    }
    assert!(total_allocated <= 9.0);
}

#[test]
fn test_completeness_allocated_plus_unmet_equals_requested() {
    let requests = vec![request("A", 4.0), request("A", 8.0), request("B", 5.0)];
    let stock_rows = vec![stock("A", 10.0)];

    let outcome = ReconcileEngine::new().reconcile(&requests, &stock_rows);

    // request 2 spawned two lines; their allocated + unmet must rebuild it
    let split: Vec<_> = outcome
        .lines
        .iter()
        .filter(|l| l.material_code == "A" && l.requested_qty == 8.0)
        .collect();
    assert_eq!(split.len(), 2);
    let rebuilt: f64 = split.iter().map(|l| l.allocated_qty + l.unmet_qty).sum();
    assert_eq!(rebuilt, 8.0);

    // unsplit requests rebuild from a single line
    let b: Vec<_> = outcome
        .lines
        .iter()
        .filter(|l| l.material_code == "B")
        .collect();
    assert_eq!(b.len(), 1);
    assert_eq!(b[0].allocated_qty + b[0].unmet_qty, 5.0);
}

#[test]
fn test_priority_by_position() {
    // stock covers only one of two equal requests: first in wins
    let stock_rows = vec![stock("A", 5.0)];
    let engine = ReconcileEngine::new();

    let first_wins = engine.reconcile(
        &[request("A", 5.0), request("A", 5.0)],
        &stock_rows,
    );
    assert_eq!(first_wins.lines[0].allocated_qty, 5.0);
    assert_eq!(first_wins.lines[1].allocated_qty, 0.0);
    assert_eq!(first_wins.lines[1].unmet_qty, 5.0);

    // reorder with distinct quantities to see the swap take effect
    let forward = engine.reconcile(
        &[request("A", 2.0), request("A", 5.0)],
        &stock_rows,
    );
    let reversed = engine.reconcile(
        &[request("A", 5.0), request("A", 2.0)],
        &stock_rows,
    );
    assert_eq!(forward.lines[0].allocated_qty, 2.0);
    assert_eq!(reversed.lines[0].allocated_qty, 5.0);
    assert_eq!(reversed.lines[1].allocated_qty, 0.0);
}

#[test]
fn test_duplicate_stock_rows_feed_one_pool_entry() {
    let outcome = ReconcileEngine::new().reconcile(
        &[request("A", 12.0)],
        &[stock("A", 5.0), stock("A", 7.0)],
    );

    assert_eq!(outcome.lines.len(), 1);
    assert_eq!(outcome.lines[0].allocated_qty, 12.0);
    assert_eq!(outcome.lines[0].dispatchable, Dispatchable::Si);
}

#[test]
fn test_metrics_summarizer_is_idempotent() {
    let outcome = ReconcileEngine::new().reconcile(
        &[request("A", 4.0), request("A", 8.0), request("B", 1.0)],
        &[stock("A", 10.0)],
    );

    let summarizer = SummaryEngine::new();
    let first = summarizer.summarize(&outcome.lines);
    let second = summarizer.summarize(&outcome.lines);
    assert_eq!(first, second);
    assert_eq!(first, outcome.summary);
}

#[test]
fn test_summary_counts_match_labels() {
    let outcome = ReconcileEngine::new().reconcile(
        &[request("A", 4.0), request("A", 8.0), request("B", 5.0)],
        &[stock("A", 10.0)],
    );

    // lines: A 4/Si, A 6/Si, A 0-unmet2/No, B 0-unmet5/No
    assert_eq!(outcome.summary.total_rows, 4);
    assert_eq!(outcome.summary.dispatchable_rows, 2);
    assert_eq!(outcome.summary.non_dispatchable_rows, 2);
    assert_eq!(outcome.summary.total_unmet_qty, 7.0);
}
