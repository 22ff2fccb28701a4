use serde::{Deserialize, Serialize};

/// A point in model space. All coordinates are in kernel units, i.e. raw
/// parameter values already multiplied by the planner's scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(&self, other: &Point3) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Axis-aligned min/max corner pair. Used as a position fingerprint for
/// edge selection, not for collision or clearance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox {
    /// Bounding box of two points, normalizing the corner order.
    pub fn of_segment(a: Point3, b: Point3) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }
}

/// Geometric signature of an edge as reported by the kernel: everything the
/// edge-selection predicates are allowed to look at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSignature {
    pub length: f64,
    pub bounding_box: BoundingBox,
}

/// Absolute-tolerance equality, the comparison used by every selector.
pub fn close(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}
