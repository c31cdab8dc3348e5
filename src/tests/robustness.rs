use approx::assert_relative_eq;

use crate::tests::util::polygon;
use crate::{repair_report, RepairMode, RepairOptions};

#[test]
fn clean_square_has_unit_separation() {
    let report = repair_report(&polygon::unit_square(), &RepairOptions::default(), RepairMode::OddEven).expect("Repair failed");
    // Every constrained square edge faces an opposite corner at distance 1.
    assert_relative_eq!(report.robustness, 1.0);
}

#[test]
fn near_degenerate_input_scores_lower() {
    let clean = repair_report(&polygon::unit_square(), &RepairOptions::default(), RepairMode::OddEven).expect("Repair failed");
    // A triangle vertex hovering 1e-6 above the square's bottom edge.
    let shaky_input = polygon::multipolygon(&[
        &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
        &[(0.5, 1e-6), (0.7, 0.3), (0.3, 0.3)],
    ]);
    let shaky = repair_report(&shaky_input, &RepairOptions::default(), RepairMode::PointSet).expect("Repair failed");
    assert!(shaky.robustness < 1e-11, "squared separation should reflect the 1e-6 gap");
    assert!(shaky.robustness < clean.robustness);
}

#[test]
fn faceless_input_reports_infinity() {
    let report = repair_report(
        &polygon::polygon(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]),
        &RepairOptions::default(),
        RepairMode::OddEven,
    )
    .expect("Repair failed");
    assert!(report.robustness.is_infinite());
}
