//! End-to-end walkthrough of the reference build: the shipped defaults,
//! planned and then replayed against the synthetic kernel.

use approx::assert_abs_diff_eq;

use build_engine::{build, BuildError};
use holster_planner::plan;
use holster_types::{ExtrudeOp, HolsterParams, Point3, Stage};
use kernel_api::{MockKernel, RecordedOp};
use test_harness::*;

#[test]
fn reference_plan_reproduces_the_documented_geometry() {
    let plan = plan(&reference_params());

    // Outer envelope: (0,0) to (8.6, 2.1), raised 4.7.
    let curves = sketch_curves(&plan, Stage::Base);
    let (p0, p1) = rect_corners(&curves[0]);
    assert_eq!(p0, Point3::new(0.0, 0.0, 0.0));
    assert_abs_diff_eq!(p1.x, 8.6, epsilon = 1e-12);
    assert_abs_diff_eq!(p1.y, 2.1, epsilon = 1e-12);
    assert_abs_diff_eq!(extrude_distance(&plan, Stage::Base), 4.7, epsilon = 1e-12);
    assert_eq!(extrude_op(&plan, Stage::Base), ExtrudeOp::NewBody);

    // Pocket: inset by the side thickness, cut down the remote's length.
    let curves = sketch_curves(&plan, Stage::Pocket);
    let (p0, p1) = rect_corners(&curves[0]);
    assert_abs_diff_eq!(p0.x, scaled(3.0), epsilon = 1e-12);
    assert_abs_diff_eq!(p0.y, scaled(3.0), epsilon = 1e-12);
    assert_abs_diff_eq!(p0.z, 4.7, epsilon = 1e-12);
    assert_abs_diff_eq!(p1.x, scaled(83.0), epsilon = 1e-12);
    assert_abs_diff_eq!(p1.y, scaled(18.0), epsilon = 1e-12);
    assert_abs_diff_eq!(extrude_distance(&plan, Stage::Pocket), -4.4, epsilon = 1e-12);

    // Front wall lowered by remote_length - front_height.
    assert_abs_diff_eq!(
        extrude_distance(&plan, Stage::FrontWall),
        -2.2,
        epsilon = 1e-12
    );

    // Slot: centered, half-width 0.5, rising to the front wall top.
    let curves = sketch_curves(&plan, Stage::Slot);
    let (p0, p1) = rect_corners(&curves[0]);
    assert_abs_diff_eq!((p0.x + p1.x) / 2.0, 4.3, epsilon = 1e-12);
    assert_abs_diff_eq!((p1.x - p0.x) / 2.0, 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(p1.z, 2.5, epsilon = 1e-12);
    assert_abs_diff_eq!(
        extrude_distance(&plan, Stage::Slot),
        scaled(18.0),
        epsilon = 1e-12
    );

    // Both corner fillets present with scaled radii.
    let (_, back_radius) = fillet_step(&plan, Stage::BackCorners).unwrap();
    let (_, slot_radius) = fillet_step(&plan, Stage::SlotCorners).unwrap();
    assert_abs_diff_eq!(back_radius, 0.4, epsilon = 1e-12);
    assert_abs_diff_eq!(slot_radius, 0.3, epsilon = 1e-12);

    // Hole pairs at the quarter heights of the back wall.
    let pilots = sketch_curves(&plan, Stage::PilotHoles);
    assert_eq!(pilots.len(), 2);
    let (center, radius) = circle(&pilots[0]);
    assert_abs_diff_eq!(center.x, 4.3, epsilon = 1e-12);
    assert_abs_diff_eq!(center.y, 1.8, epsilon = 1e-12);
    assert_abs_diff_eq!(center.z, 1.175, epsilon = 1e-12);
    assert_abs_diff_eq!(radius, 0.2, epsilon = 1e-12);
    let (upper, bore_radius) = circle(&sketch_curves(&plan, Stage::Counterbores)[1]);
    assert_abs_diff_eq!(upper.z, 3.525, epsilon = 1e-12);
    assert_abs_diff_eq!(bore_radius, 0.4, epsilon = 1e-12);

    // Final soften pass at 0.05.
    let (soften_selector, soften_radius) = fillet_step(&plan, Stage::Soften).unwrap();
    assert!(soften_selector.filters.is_empty());
    assert_abs_diff_eq!(soften_radius, 0.05, epsilon = 1e-12);
}

#[test]
fn reference_build_completes_against_the_synthetic_kernel() {
    let mut kernel = MockKernel::new();
    let report = build(&reference_params(), &mut kernel).expect("reference build");

    assert_eq!(report.stage_reached, Stage::Soften);
    assert_eq!(report.name, "TV Remote Holster");
    assert_eq!(kernel.body_name(&report.body), Some("TV Remote Holster"));

    // The corner selectors each re-discover their two symmetric edges.
    let edges_by_stage: Vec<(Stage, usize)> = report
        .steps
        .iter()
        .filter_map(|t| t.edges_selected.map(|n| (t.stage, n)))
        .collect();
    assert_eq!(edges_by_stage[0], (Stage::BackCorners, 2));
    assert_eq!(edges_by_stage[1], (Stage::SlotCorners, 2));
    assert_eq!(edges_by_stage[2].0, Stage::Soften);

    // Two hole passes of two circles each reach the kernel.
    let circles: Vec<f64> = kernel
        .recorded_ops()
        .iter()
        .filter_map(|op| match op {
            RecordedOp::AddCircle { radius } => Some(*radius),
            _ => None,
        })
        .collect();
    assert_eq!(circles.len(), 4);
    assert_abs_diff_eq!(circles[0], 0.2, epsilon = 1e-12);
    assert_abs_diff_eq!(circles[3], 0.4, epsilon = 1e-12);
}

#[test]
fn radius_boundaries_suppress_exactly_their_own_stage() {
    let mut kernel = MockKernel::new();
    let params = HolsterParams {
        back_corner_round: 0.0,
        ..reference_params()
    };
    let report = build(&params, &mut kernel).unwrap();
    let stages: Vec<Stage> = report
        .steps
        .iter()
        .filter(|t| t.edges_selected.is_some())
        .map(|t| t.stage)
        .collect();
    assert_eq!(stages, vec![Stage::SlotCorners, Stage::Soften]);

    let mut kernel = MockKernel::new();
    let params = HolsterParams {
        front_slot_round: 0.0,
        ..reference_params()
    };
    let report = build(&params, &mut kernel).unwrap();
    let stages: Vec<Stage> = report
        .steps
        .iter()
        .filter(|t| t.edges_selected.is_some())
        .map(|t| t.stage)
        .collect();
    assert_eq!(stages, vec![Stage::BackCorners, Stage::Soften]);
}

#[test]
fn invalid_parameters_fail_before_any_kernel_work() {
    let mut kernel = MockKernel::new();
    let params = HolsterParams {
        front_slot_width: 86.0, // exactly the front face width
        ..reference_params()
    };
    let result = build(&params, &mut kernel);
    assert!(matches!(result, Err(BuildError::InvalidParameter(_))));
    assert!(kernel.recorded_ops().is_empty());
}

#[test]
fn plan_survives_a_json_round_trip() {
    let original = plan(&reference_params());
    let json = serde_json::to_string(&original).unwrap();
    let restored: holster_types::BuildPlan = serde_json::from_str(&json).unwrap();
    assert_eq!(original, restored);
}

#[test]
fn renamed_holster_propagates_to_the_body() {
    let mut kernel = MockKernel::new();
    let params = HolsterParams {
        name: "Garage Remote".to_string(),
        ..reference_params()
    };
    let report = build(&params, &mut kernel).unwrap();
    assert_eq!(kernel.body_name(&report.body), Some("Garage Remote"));
}
