#[macro_use]
extern crate assert_float_eq;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use packing_plan_rs::error::PackError;
use packing_plan_rs::models::{CombinedSummary, RawRow, ReconcileOutcome};
use packing_plan_rs::planner::{
    allocate, iteration_bound, plan_category, reconcile, PlanConfig, DEFAULT_TOLERANCE,
};
use packing_plan_rs::report::{parse_report, read_csv, ParsedReport};

const PACKET_WEIGHTS: [f64; 7] = [0.1, 0.2, 0.25, 0.5, 1.0, 2.0, 5.0];

fn report_from_csv(csv: &str) -> ParsedReport {
    parse_report(&read_csv(csv.as_bytes()).unwrap())
}

/// Two variations selling 60% / 40% of the weight.
fn product_x() -> ParsedReport {
    report_from_csv(
        "Row Labels,Sum of Units Ordered,Pouch Size,ASIN\n\
         Product X,,,\n\
         0.5,120,500g,B0PX0500\n\
         1,40,1kg,B0PX1000\n",
    )
}

/// A random category with 1..=6 variations, each with 0..500 units sold.
fn random_rows(rng: &mut StdRng) -> Vec<RawRow> {
    let mut rows = vec![RawRow::new(1, "Random Item", None)];
    let count = rng.gen_range(1..=6);
    for i in 0..count {
        let weight = PACKET_WEIGHTS[rng.gen_range(0..PACKET_WEIGHTS.len())];
        let units = rng.gen_range(0..500u32);
        rows.push(RawRow::new(
            i + 2,
            &weight.to_string(),
            Some(&units.to_string()),
        ));
    }
    rows
}

#[test]
fn scenario_exact_allocation_needs_no_reconciliation() {
    let report = product_x();
    let category = report.category("Product X").unwrap();
    assert_eq!(category.variations[0].contribution, Some(60.0));
    assert_eq!(category.variations[1].contribution, Some(40.0));

    let run = plan_category(category, 100.0, &PlanConfig::default()).unwrap();

    assert_eq!(run.results[0].packets, 120);
    assert_eq!(run.results[1].packets, 40);
    assert_float_absolute_eq!(run.results[0].packed_weight, 60.0, 1e-9);
    assert_float_absolute_eq!(run.results[1].packed_weight, 40.0, 1e-9);
    assert_float_absolute_eq!(run.packed_weight(), 100.0, 1e-9);
    assert_eq!(run.outcome, ReconcileOutcome::Converged);
    assert_eq!(run.iterations, 0);
}

#[test]
fn scenario_small_shortfall_is_accepted() {
    let report = product_x();
    let run = plan_category(
        report.category("Product X").unwrap(),
        97.0,
        &PlanConfig::default(),
    )
    .unwrap();

    assert_eq!(run.results[0].packets, 116);
    assert_eq!(run.results[1].packets, 38);
    assert_float_absolute_eq!(run.packed_weight(), 96.0, 1e-9);
    assert_float_absolute_eq!(run.loose_weight(), 1.0, 1e-9);
    assert_eq!(run.outcome, ReconcileOutcome::Converged);
    assert_eq!(run.iterations, 0);
}

#[test]
fn scenario_orphan_variation_is_skipped() {
    let report = report_from_csv(
        "Row Labels,Sum of Units Ordered\n\
         0.5,10\n\
         Product X,\n\
         1,4\n",
    );

    assert_eq!(report.skipped.len(), 1);
    assert!(matches!(
        report.skipped[0],
        PackError::MalformedRow { line: 1, .. }
    ));
    assert_eq!(report.categories.len(), 1);
    assert_eq!(report.categories[0].variations.len(), 1);
    assert_eq!(report.categories[0].variations[0].contribution, Some(100.0));
}

#[test]
fn scenario_zero_sales_packs_nothing() {
    let report = report_from_csv(
        "Row Labels,Sum of Units Ordered\n\
         Product Y,\n\
         0.5,0\n\
         1,0\n",
    );
    let category = report.category("Product Y").unwrap();
    assert_eq!(category.total_weight_sold, 0.0);
    assert!(category.variations.iter().all(|v| v.contribution.is_none()));

    let run = plan_category(category, 80.0, &PlanConfig::default()).unwrap();

    assert!(run.results.iter().all(|r| r.packets == 0));
    assert_eq!(run.packed_weight(), 0.0);
    assert_eq!(run.loose_weight(), 80.0);
    assert_eq!(run.outcome, ReconcileOutcome::Degenerate);
}

#[test]
fn contributions_sum_to_one_hundred() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..500 {
        let report = parse_report(&random_rows(&mut rng));
        let category = &report.categories[0];
        if category.is_degenerate() {
            continue;
        }
        assert_float_absolute_eq!(category.contribution_total(), 100.0, 0.1);
    }
}

#[test]
fn packets_stay_even_and_non_negative() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..500 {
        let report = parse_report(&random_rows(&mut rng));
        let target = rng.gen_range(1.0..2000.0);

        let run = plan_category(&report.categories[0], target, &PlanConfig::default()).unwrap();
        for r in &run.results {
            assert_eq!(r.packets % 2, 0, "odd packet count {} for target {}", r.packets, target);
            assert_float_absolute_eq!(r.packed_weight, r.packets as f64 * r.weight, 1e-9);
        }
    }
}

#[test]
fn converged_runs_are_within_tolerance() {
    let mut rng = StdRng::seed_from_u64(23);
    let mut converged = 0;

    for _ in 0..500 {
        let report = parse_report(&random_rows(&mut rng));
        let target = rng.gen_range(1.0..2000.0);
        let run = plan_category(&report.categories[0], target, &PlanConfig::default()).unwrap();

        if run.outcome == ReconcileOutcome::Converged {
            converged += 1;
            let packed = run.packed_weight();
            assert!(packed <= target + 1e-9, "packed {} over target {}", packed, target);
            assert!(
                (target - packed) / target <= DEFAULT_TOLERANCE + 1e-12,
                "packed {} too far under target {}",
                packed,
                target
            );
        }
    }

    assert!(converged > 0);
}

#[test]
fn reconciliation_always_terminates_within_bound() {
    let mut rng = StdRng::seed_from_u64(42);
    let config = PlanConfig::default();

    for _ in 0..300 {
        let report = parse_report(&random_rows(&mut rng));
        let category = &report.categories[0];
        if category.is_degenerate() {
            continue;
        }
        // Small targets against heavy packets are the oscillating cases
        let target = rng.gen_range(0.5..20.0);

        let mut allocation = allocate(category, target, config.step).unwrap();
        let bound = iteration_bound(&allocation.results, target, &config);
        let rec = reconcile(&mut allocation.results, target, &config);

        assert!(rec.iterations <= bound);
        assert!(allocation.results.iter().all(|r| r.packets % 2 == 0));
    }
}

#[test]
fn summary_totals_are_exact_sums() {
    let mut rng = StdRng::seed_from_u64(5);
    let config = PlanConfig::default();

    let runs: Vec<_> = (0..20)
        .map(|_| {
            let report = parse_report(&random_rows(&mut rng));
            let target = rng.gen_range(1.0..500.0);
            plan_category(&report.categories[0], target, &config).unwrap()
        })
        .collect();

    let mut expected_packed = 0.0;
    let mut expected_loose = 0.0;
    for run in &runs {
        expected_packed += run.packed_weight();
        expected_loose += run.loose_weight();
    }

    let summary = CombinedSummary::from_runs(runs);
    assert_eq!(summary.total_packed, expected_packed);
    assert_eq!(summary.total_loose, expected_loose);
}
