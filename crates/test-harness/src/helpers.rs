use holster_types::{
    BuildPlan, EdgeSelector, ExtrudeOp, HolsterParams, Point3, SketchCurve, Stage, StepKind,
};

/// The reference parameter set: the tool's shipped defaults, which double
/// as the documented end-to-end scenario.
pub fn reference_params() -> HolsterParams {
    HolsterParams::default()
}

/// Raw model units to kernel units, for writing expectations.
pub fn scaled(raw: f64) -> f64 {
    raw * holster_planner::SCALE
}

/// The curves of the sketch step for `stage`. Panics when the plan has no
/// such sketch; scenario tests treat that as a hard failure.
pub fn sketch_curves(plan: &BuildPlan, stage: Stage) -> Vec<SketchCurve> {
    plan.steps
        .iter()
        .find_map(|step| match (&step.kind, step.stage) {
            (StepKind::Sketch { curves, .. }, s) if s == stage => Some(curves.clone()),
            _ => None,
        })
        .unwrap_or_else(|| panic!("plan has no sketch for stage {stage}"))
}

/// Signed extrusion distance of the extrude step for `stage`.
pub fn extrude_distance(plan: &BuildPlan, stage: Stage) -> f64 {
    plan.steps
        .iter()
        .find_map(|step| match (&step.kind, step.stage) {
            (StepKind::Extrude { distance, .. }, s) if s == stage => Some(*distance),
            _ => None,
        })
        .unwrap_or_else(|| panic!("plan has no extrude for stage {stage}"))
}

/// Extrusion mode of the extrude step for `stage`.
pub fn extrude_op(plan: &BuildPlan, stage: Stage) -> ExtrudeOp {
    plan.steps
        .iter()
        .find_map(|step| match (&step.kind, step.stage) {
            (StepKind::Extrude { op, .. }, s) if s == stage => Some(*op),
            _ => None,
        })
        .unwrap_or_else(|| panic!("plan has no extrude for stage {stage}"))
}

/// Selector and radius of the fillet step for `stage`, if the plan emitted
/// one.
pub fn fillet_step(plan: &BuildPlan, stage: Stage) -> Option<(EdgeSelector, f64)> {
    plan.steps
        .iter()
        .find_map(|step| match (&step.kind, step.stage) {
            (StepKind::Fillet { selector, radius }, s) if s == stage => {
                Some((selector.clone(), *radius))
            }
            _ => None,
        })
}

/// Corners of a rectangle curve; panics on any other curve kind.
pub fn rect_corners(curve: &SketchCurve) -> (Point3, Point3) {
    match curve {
        SketchCurve::Rectangle { p0, p1 } => (*p0, *p1),
        other => panic!("expected a rectangle, got {other:?}"),
    }
}

/// Center and radius of a circle curve; panics on any other curve kind.
pub fn circle(curve: &SketchCurve) -> (Point3, f64) {
    match curve {
        SketchCurve::Circle { center, radius } => (*center, *radius),
        other => panic!("expected a circle, got {other:?}"),
    }
}
