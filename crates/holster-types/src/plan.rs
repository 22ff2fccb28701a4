use serde::{Deserialize, Serialize};

use crate::geom::{close, EdgeSignature, Point3};

/// Sketch plane orientation. Curves carry explicit world coordinates; the
/// plane fixes which axis an extrusion of the sketch travels along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SketchPlane {
    /// Horizontal plane; extrusions travel along +z.
    Base,
    /// Vertical front plane; extrusions travel along +y.
    Front,
}

impl SketchPlane {
    /// Unit extrusion direction for profiles sketched on this plane.
    pub fn extrude_direction(&self) -> [f64; 3] {
        match self {
            SketchPlane::Base => [0.0, 0.0, 1.0],
            SketchPlane::Front => [0.0, 1.0, 0.0],
        }
    }
}

/// A closed curve in a sketch, ready to become an extrusion profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SketchCurve {
    /// Axis-aligned rectangle between two opposite corners.
    Rectangle { p0: Point3, p1: Point3 },
    Circle { center: Point3, radius: f64 },
}

/// Extrusion mode: create an independent solid, merge into the existing
/// solid, or remove material from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExtrudeOp {
    NewBody,
    Join,
    Cut,
}

/// One criterion of an edge-selection predicate. All comparisons are
/// absolute, using the selector's tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EdgeFilter {
    /// Edge length equals `value`.
    Length { value: f64 },
    /// Both z-extents of the edge's bounding box equal `z`: the edge lies
    /// level at that height.
    LevelAt { z: f64 },
    /// The bounding box's minimum y equals `value`.
    MinY { value: f64 },
}

/// A pure predicate over edge signatures. Selectors re-discover edges on
/// the evolving solid instead of holding handles from creation time, since
/// every mutating operation invalidates prior handles. An empty filter
/// list matches every edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSelector {
    pub filters: Vec<EdgeFilter>,
    /// Absolute equality tolerance, already scaled to kernel units.
    pub tolerance: f64,
}

impl EdgeSelector {
    /// Selector matching every edge of the body.
    pub fn all_edges() -> Self {
        Self {
            filters: Vec::new(),
            tolerance: 0.0,
        }
    }

    pub fn new(filters: Vec<EdgeFilter>, tolerance: f64) -> Self {
        Self { filters, tolerance }
    }

    /// Whether an edge with this signature satisfies every filter. Callers
    /// must apply this to ALL edges of the body and keep every match;
    /// symmetric solids legitimately yield several.
    pub fn matches(&self, sig: &EdgeSignature) -> bool {
        self.filters.iter().all(|filter| match filter {
            EdgeFilter::Length { value } => close(sig.length, *value, self.tolerance),
            EdgeFilter::LevelAt { z } => {
                close(sig.bounding_box.min.z, sig.bounding_box.max.z, self.tolerance)
                    && close(sig.bounding_box.max.z, *z, self.tolerance)
            }
            EdgeFilter::MinY { value } => close(sig.bounding_box.min.y, *value, self.tolerance),
        })
    }
}

/// Fixed build stages, in execution order. Also the sequencer's state
/// machine: a build that completes has committed every planned stage and
/// ends at `Soften`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Stage {
    /// Extrude the outer envelope to full height.
    Base,
    /// Carve the remote-sized cavity.
    Pocket,
    /// Lower the front wall.
    FrontWall,
    /// Open the access slot.
    Slot,
    /// Round the two top back corners (skipped at radius zero).
    BackCorners,
    /// Round the slot's top corners (skipped at radius zero).
    SlotCorners,
    /// Pilot holes for the mounting screws or magnets.
    PilotHoles,
    /// Counterbores over the pilot holes.
    Counterbores,
    /// Break every remaining edge with a small cosmetic fillet.
    Soften,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Stage::Base => "base extrusion",
            Stage::Pocket => "pocket cut",
            Stage::FrontWall => "front wall cut",
            Stage::Slot => "slot cut",
            Stage::BackCorners => "back corner fillet",
            Stage::SlotCorners => "slot corner fillet",
            Stage::PilotHoles => "pilot hole cut",
            Stage::Counterbores => "counterbore cut",
            Stage::Soften => "soften fillet",
        };
        f.write_str(label)
    }
}

/// The operation a construction step performs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StepKind {
    /// Open a sketch and add its curves; each curve becomes one profile.
    Sketch {
        plane: SketchPlane,
        curves: Vec<SketchCurve>,
    },
    /// Extrude every profile of a previously emitted sketch, identified by
    /// its ordinal among the plan's sketch steps. The distance is signed
    /// along the sketch plane's extrusion axis.
    Extrude {
        sketch: usize,
        distance: f64,
        op: ExtrudeOp,
    },
    /// Re-discover matching edges on the current body and round them all
    /// in one constant-radius rolling-ball fillet.
    Fillet { selector: EdgeSelector, radius: f64 },
}

/// One step of the fixed construction order. Steps may not be reordered:
/// each assumes the solid state left by its predecessors, and fillet
/// selectors only find their edges after the preceding cuts exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionStep {
    pub stage: Stage,
    pub kind: StepKind,
}

/// The planner's output: the body name plus the ordered step list,
/// consumed once by the sequencer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildPlan {
    pub name: String,
    pub steps: Vec<ConstructionStep>,
}

impl BuildPlan {
    /// Number of sketch steps, i.e. the exclusive upper bound for
    /// `StepKind::Extrude::sketch`.
    pub fn sketch_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.kind, StepKind::Sketch { .. }))
            .count()
    }

    /// Stages of the fillet steps present in the plan, in order.
    pub fn fillet_stages(&self) -> Vec<Stage> {
        self.steps
            .iter()
            .filter(|s| matches!(s.kind, StepKind::Fillet { .. }))
            .map(|s| s.stage)
            .collect()
    }
}
