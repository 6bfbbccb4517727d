use tracing::info;

use crate::error::{PackError, Result};
use crate::models::{Category, PackingRun, ReconcileOutcome};
use crate::planner::allocation::allocate;
use crate::planner::reconcile::{reconcile, PlanConfig};
use crate::report::ParsedReport;

/// A requested packing: which category and how many kg.
#[derive(Debug, Clone, PartialEq)]
pub struct PackRequest {
    pub item: String,
    pub target_weight: f64,
}

impl PackRequest {
    pub fn new(item: impl Into<String>, target_weight: f64) -> Self {
        Self {
            item: item.into(),
            target_weight,
        }
    }
}

/// Allocate and reconcile one category.
///
/// A category that sold nothing gets zero packets everywhere and skips
/// reconciliation.
pub fn plan_category(category: &Category, target: f64, config: &PlanConfig) -> Result<PackingRun> {
    config.validate()?;
    let mut allocation = allocate(category, target, config.step)?;

    let (outcome, iterations) = if category.is_degenerate() {
        (ReconcileOutcome::Degenerate, 0)
    } else {
        let rec = reconcile(&mut allocation.results, target, config);
        (rec.outcome, rec.iterations)
    };

    let run = PackingRun {
        item: category.name.clone(),
        target_weight: target,
        results: allocation.results,
        rejected: allocation.rejected,
        outcome,
        iterations,
    };

    info!(
        item = %run.item,
        target,
        packed = run.packed_weight(),
        loose = run.loose_weight(),
        outcome = outcome.label(),
        "planned packing run"
    );

    Ok(run)
}

/// Plan every request against the same report.
///
/// Requests are independent: a failed one is returned as an error in its
/// slot and does not affect the others. Category names are resolved with
/// [`ParsedReport::find_category`].
pub fn plan_session(
    report: &ParsedReport,
    requests: &[PackRequest],
    config: &PlanConfig,
) -> Vec<(String, Result<PackingRun>)> {
    requests
        .iter()
        .map(|req| {
            let run = report
                .find_category(&req.item)
                .ok_or_else(|| PackError::CategoryNotFound(req.item.clone()))
                .and_then(|category| plan_category(category, req.target_weight, config));
            (req.item.clone(), run)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawRow;
    use crate::report::parse_report;

    fn report() -> ParsedReport {
        parse_report(&[
            RawRow::new(1, "Makhana", None),
            RawRow::new(2, "0.5", Some("120")),
            RawRow::new(3, "1", Some("40")),
            RawRow::new(4, "Chana", None),
            RawRow::new(5, "0.5", Some("0")),
        ])
    }

    #[test]
    fn test_plan_category() {
        let report = report();
        let run = plan_category(
            report.category("Makhana").unwrap(),
            100.0,
            &PlanConfig::default(),
        )
        .unwrap();

        assert_eq!(run.outcome, ReconcileOutcome::Converged);
        assert_eq!(run.packed_weight(), 100.0);
        assert_eq!(run.loose_weight(), 0.0);
    }

    #[test]
    fn test_degenerate_category_is_not_reconciled() {
        let report = report();
        let run = plan_category(report.category("Chana").unwrap(), 50.0, &PlanConfig::default())
            .unwrap();

        assert_eq!(run.outcome, ReconcileOutcome::Degenerate);
        assert_eq!(run.total_packets(), 0);
        assert_eq!(run.loose_weight(), 50.0);
    }

    #[test]
    fn test_step_drives_rounding() {
        let report = report();
        let config = PlanConfig {
            step: 4,
            ..Default::default()
        };
        let run = plan_category(report.category("Makhana").unwrap(), 97.0, &config).unwrap();

        assert!(run.results.iter().all(|r| r.packets % 4 == 0));
        assert!(run.packed_weight() <= 97.0);
    }

    #[test]
    fn test_invalid_config_fails_the_run() {
        let report = report();
        let config = PlanConfig {
            tolerance: f64::NAN,
            ..Default::default()
        };
        let err = plan_category(report.category("Makhana").unwrap(), 100.0, &config).unwrap_err();
        assert!(matches!(err, PackError::InvalidInput(_)));
    }

    #[test]
    fn test_session_isolates_failures() {
        let report = report();
        let requests = vec![
            PackRequest::new("Makhana", 100.0),
            PackRequest::new("Unknown Snack", 10.0),
            PackRequest::new("chana", -5.0),
            PackRequest::new("Makhana", 97.0),
        ];

        let runs = plan_session(&report, &requests, &PlanConfig::default());
        assert_eq!(runs.len(), 4);
        assert!(runs[0].1.is_ok());
        assert!(matches!(runs[1].1, Err(PackError::CategoryNotFound(_))));
        assert!(matches!(runs[2].1, Err(PackError::InvalidTarget(_))));
        assert_eq!(runs[3].1.as_ref().unwrap().packed_weight(), 96.0);
    }
}
