//! The Geometry Planner: pure derivation of construction steps from
//! validated parameters.
//!
//! `plan()` is deterministic and side-effect free; it never touches a
//! kernel. Every length it emits is already multiplied by [`SCALE`] — this
//! module is the single place that conversion happens, so sketch
//! coordinates, extrusion distances, and selector targets cannot drift
//! apart.

use holster_types::{
    BuildPlan, ConstructionStep, EdgeFilter, EdgeSelector, ExtrudeOp, HolsterParams, Point3,
    SketchCurve, SketchPlane, Stage, StepKind,
};

/// Unit conversion applied to every raw parameter length.
pub const SCALE: f64 = 0.1;

/// Absolute tolerance for selector equality, scaled like everything else.
/// Absolute rather than relative: magnitudes at this working scale make a
/// relative test needlessly fragile.
pub const SELECT_TOLERANCE: f64 = 1e-5 * SCALE;

/// Pilot hole radius in raw units (holds a screw shaft or press-fit magnet).
pub const PILOT_HOLE_RADIUS: f64 = 2.0;

/// Counterbore radius in raw units (clears a screw head).
pub const COUNTERBORE_RADIUS: f64 = 4.0;

/// The counterbore recesses one third of the back wall.
const COUNTERBORE_DEPTH_DIVISOR: f64 = 3.0;

/// Derive the full ordered construction sequence for the given parameters.
///
/// The order is load-bearing: fillet steps re-discover edges on the solid
/// produced by the preceding cuts, so no step may move relative to its
/// predecessors. The two corner-fillet stages are emitted only for a
/// positive radius; the hole stages and the final soften pass are
/// unconditional.
pub fn plan(params: &HolsterParams) -> BuildPlan {
    let mut steps = Vec::new();
    let mut sketches = 0usize;

    // Shared derived dimensions, each computed exactly once.
    let shell_width = (params.remote_width + 2.0 * params.side_thickness) * SCALE;
    let shell_depth =
        (params.remote_thickness + params.side_thickness + params.back_thickness) * SCALE;
    let shell_height = (params.remote_length + params.bottom_thickness) * SCALE;
    let side = params.side_thickness * SCALE;
    let cavity_back = (params.side_thickness + params.remote_thickness) * SCALE;
    let front_top = (params.front_height + params.bottom_thickness) * SCALE;

    let mut sketch = |steps: &mut Vec<ConstructionStep>,
                      stage: Stage,
                      plane: SketchPlane,
                      curves: Vec<SketchCurve>|
     -> usize {
        steps.push(ConstructionStep {
            stage,
            kind: StepKind::Sketch { plane, curves },
        });
        let index = sketches;
        sketches += 1;
        index
    };

    // 1. Outer envelope, extruded to full height as the new body.
    let base = sketch(
        &mut steps,
        Stage::Base,
        SketchPlane::Base,
        vec![SketchCurve::Rectangle {
            p0: Point3::new(0.0, 0.0, 0.0),
            p1: Point3::new(shell_width, shell_depth, 0.0),
        }],
    );
    steps.push(ConstructionStep {
        stage: Stage::Base,
        kind: StepKind::Extrude {
            sketch: base,
            distance: shell_height,
            op: ExtrudeOp::NewBody,
        },
    });

    // 2. Pocket: the remote-sized cavity, cut downward from the top face.
    let pocket = sketch(
        &mut steps,
        Stage::Pocket,
        SketchPlane::Base,
        vec![SketchCurve::Rectangle {
            p0: Point3::new(side, side, shell_height),
            p1: Point3::new(side + params.remote_width * SCALE, cavity_back, shell_height),
        }],
    );
    steps.push(ConstructionStep {
        stage: Stage::Pocket,
        kind: StepKind::Extrude {
            sketch: pocket,
            distance: -(params.remote_length * SCALE),
            op: ExtrudeOp::Cut,
        },
    });

    // 3. Lower everything in front of the back wall to the front height.
    let front = sketch(
        &mut steps,
        Stage::FrontWall,
        SketchPlane::Base,
        vec![SketchCurve::Rectangle {
            p0: Point3::new(0.0, 0.0, shell_height),
            p1: Point3::new(shell_width, cavity_back, shell_height),
        }],
    );
    steps.push(ConstructionStep {
        stage: Stage::FrontWall,
        kind: StepKind::Extrude {
            sketch: front,
            distance: -((params.remote_length - params.front_height) * SCALE),
            op: ExtrudeOp::Cut,
        },
    });

    // 4. Access slot, centered in the front face, cut back through the
    //    front wall and the cavity.
    let slot_left =
        (2.0 * params.side_thickness + params.remote_width - params.front_slot_width) / 2.0 * SCALE;
    let slot = sketch(
        &mut steps,
        Stage::Slot,
        SketchPlane::Front,
        vec![SketchCurve::Rectangle {
            p0: Point3::new(slot_left, 0.0, 0.0),
            p1: Point3::new(slot_left + params.front_slot_width * SCALE, 0.0, front_top),
        }],
    );
    steps.push(ConstructionStep {
        stage: Stage::Slot,
        kind: StepKind::Extrude {
            sketch: slot,
            distance: cavity_back,
            op: ExtrudeOp::Cut,
        },
    });

    // 5. Back corners: the two short edges crowning the back wall. They
    //    only exist once the pocket and front cuts have run.
    if params.back_corner_round > 0.0 {
        steps.push(ConstructionStep {
            stage: Stage::BackCorners,
            kind: StepKind::Fillet {
                selector: EdgeSelector::new(
                    vec![
                        EdgeFilter::Length {
                            value: params.back_thickness * SCALE,
                        },
                        EdgeFilter::LevelAt { z: shell_height },
                    ],
                    SELECT_TOLERANCE,
                ),
                radius: params.back_corner_round * SCALE,
            },
        });
    }

    // 6. Slot corners: the short edges atop the front wall, at the front
    //    face. Only present after the slot cut.
    if params.front_slot_round > 0.0 {
        steps.push(ConstructionStep {
            stage: Stage::SlotCorners,
            kind: StepKind::Fillet {
                selector: EdgeSelector::new(
                    vec![
                        EdgeFilter::Length { value: side },
                        EdgeFilter::LevelAt { z: front_top },
                        EdgeFilter::MinY { value: 0.0 },
                    ],
                    SELECT_TOLERANCE,
                ),
                radius: params.front_slot_round * SCALE,
            },
        });
    }

    // 7. Mounting holes through the back wall: two pilot holes, then wider
    //    counterbores over the same centers. Always on.
    let holes_center = (params.side_thickness + params.remote_width / 2.0) * SCALE;
    let holes_spacing = (params.bottom_thickness + params.remote_length) / 4.0 * SCALE;
    let hole_centers = [
        Point3::new(holes_center, cavity_back, holes_spacing),
        Point3::new(holes_center, cavity_back, 3.0 * holes_spacing),
    ];

    let pilots = sketch(
        &mut steps,
        Stage::PilotHoles,
        SketchPlane::Front,
        hole_centers
            .iter()
            .map(|center| SketchCurve::Circle {
                center: *center,
                radius: PILOT_HOLE_RADIUS * SCALE,
            })
            .collect(),
    );
    steps.push(ConstructionStep {
        stage: Stage::PilotHoles,
        kind: StepKind::Extrude {
            sketch: pilots,
            distance: params.back_thickness * SCALE,
            op: ExtrudeOp::Cut,
        },
    });

    let counterbores = sketch(
        &mut steps,
        Stage::Counterbores,
        SketchPlane::Front,
        hole_centers
            .iter()
            .map(|center| SketchCurve::Circle {
                center: *center,
                radius: COUNTERBORE_RADIUS * SCALE,
            })
            .collect(),
    );
    steps.push(ConstructionStep {
        stage: Stage::Counterbores,
        kind: StepKind::Extrude {
            sketch: counterbores,
            distance: params.back_thickness / COUNTERBORE_DEPTH_DIVISOR * SCALE,
            op: ExtrudeOp::Cut,
        },
    });

    // 8. Soften every remaining edge.
    steps.push(ConstructionStep {
        stage: Stage::Soften,
        kind: StepKind::Fillet {
            selector: EdgeSelector::all_edges(),
            radius: params.soften_fillet * SCALE,
        },
    });

    BuildPlan {
        name: params.name.clone(),
        steps,
    }
}
