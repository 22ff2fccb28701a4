//! MockKernel — deterministic test double implementing Kernel + KernelIntrospect.
//!
//! Models solids as unions of axis-aligned boxes. Rectangular cut
//! extrusions perform real box subtraction, so the sharp-edge set evolves
//! the way the build sequence expects; circular cuts are recorded but leave
//! the edge set untouched. Edges are re-derived from the axis-aligned cell
//! structure with fresh ids after every mutating operation, so ids held
//! across an operation genuinely go stale, as with a production kernel.
//!
//! Used by build-engine and the CLI's dry-run mode.

use std::collections::{HashMap, HashSet};

use holster_types::{BoundingBox, EdgeSignature, ExtrudeOp, Point3, SketchPlane};

use crate::traits::{Kernel, KernelIntrospect};
use crate::types::*;

/// Coordinates closer than this are merged when building the cell grid.
const GRID_EPS: f64 = 1e-9;

/// Quantization step for remembering rounded-away edges across
/// re-derivations of the edge set.
const KEY_EPS: f64 = 1e-6;

/// Canonical fingerprint of an edge's endpoints, surviving re-derivation.
type EdgeKey = ([i64; 3], [i64; 3]);

/// An axis-aligned box, corners normalized so `min <= max` per axis.
#[derive(Debug, Clone, Copy)]
struct Aabb {
    min: [f64; 3],
    max: [f64; 3],
}

impl Aabb {
    fn new(a: [f64; 3], b: [f64; 3]) -> Self {
        let mut min = [0.0; 3];
        let mut max = [0.0; 3];
        for i in 0..3 {
            min[i] = a[i].min(b[i]);
            max[i] = a[i].max(b[i]);
        }
        Self { min, max }
    }

    fn contains(&self, p: [f64; 3]) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }

    /// Volumetric overlap; boxes that merely touch do not intersect.
    fn intersects(&self, other: &Aabb) -> bool {
        (0..3).all(|i| self.min[i] < other.max[i] - GRID_EPS && other.min[i] < self.max[i] - GRID_EPS)
    }

    fn is_degenerate(&self) -> bool {
        (0..3).any(|i| self.max[i] - self.min[i] < GRID_EPS)
    }

    /// Split `self` minus `tool` into disjoint remainder boxes (up to six).
    fn subtract(&self, tool: &Aabb) -> Vec<Aabb> {
        if !self.intersects(tool) {
            return vec![*self];
        }

        // Overlap region, clamped to self.
        let mut lo = [0.0; 3];
        let mut hi = [0.0; 3];
        for i in 0..3 {
            lo[i] = self.min[i].max(tool.min[i]);
            hi[i] = self.max[i].min(tool.max[i]);
        }

        let mut out = Vec::new();

        // Slabs on either side along x.
        if self.min[0] < lo[0] {
            out.push(Aabb {
                min: self.min,
                max: [lo[0], self.max[1], self.max[2]],
            });
        }
        if hi[0] < self.max[0] {
            out.push(Aabb {
                min: [hi[0], self.min[1], self.min[2]],
                max: self.max,
            });
        }
        // Within the x overlap, slabs along y.
        if self.min[1] < lo[1] {
            out.push(Aabb {
                min: [lo[0], self.min[1], self.min[2]],
                max: [hi[0], lo[1], self.max[2]],
            });
        }
        if hi[1] < self.max[1] {
            out.push(Aabb {
                min: [lo[0], hi[1], self.min[2]],
                max: [hi[0], self.max[1], self.max[2]],
            });
        }
        // Within the x and y overlap, slabs along z.
        if self.min[2] < lo[2] {
            out.push(Aabb {
                min: [lo[0], lo[1], self.min[2]],
                max: [hi[0], hi[1], lo[2]],
            });
        }
        if hi[2] < self.max[2] {
            out.push(Aabb {
                min: [lo[0], lo[1], hi[2]],
                max: [hi[0], hi[1], self.max[2]],
            });
        }

        out.retain(|b| !b.is_degenerate());
        out
    }
}

/// A straight edge of a mock body.
#[derive(Debug, Clone)]
struct MockEdge {
    id: EdgeId,
    a: Point3,
    b: Point3,
}

impl MockEdge {
    fn key(&self) -> EdgeKey {
        edge_key(self.a, self.b)
    }

    fn signature(&self) -> EdgeSignature {
        EdgeSignature {
            length: self.a.distance_to(&self.b),
            bounding_box: BoundingBox::of_segment(self.a, self.b),
        }
    }
}

fn quantize(p: Point3) -> [i64; 3] {
    [
        (p.x / KEY_EPS).round() as i64,
        (p.y / KEY_EPS).round() as i64,
        (p.z / KEY_EPS).round() as i64,
    ]
}

fn edge_key(a: Point3, b: Point3) -> EdgeKey {
    let qa = quantize(a);
    let qb = quantize(b);
    if qa <= qb {
        (qa, qb)
    } else {
        (qb, qa)
    }
}

/// A synthetic solid: its box decomposition, the fingerprints of edges
/// already rounded away by fillets, and the current edge set.
#[derive(Debug, Clone)]
struct MockBody {
    boxes: Vec<Aabb>,
    rounded: HashSet<EdgeKey>,
    edges: Vec<MockEdge>,
    name: Option<String>,
}

/// A profile registered in a sketch, kept until an extrude consumes it.
#[derive(Debug, Clone)]
enum MockProfile {
    Rect {
        plane: SketchPlane,
        p0: Point3,
        p1: Point3,
    },
    Circle {
        plane: SketchPlane,
        center: Point3,
    },
}

/// Kernel calls in invocation order, for call-order assertions in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedOp {
    CreateSketch { plane: SketchPlane },
    AddRectangle,
    AddCircle { radius: f64 },
    Extrude { distance: f64, op: ExtrudeOp },
    Fillet { edges: usize, radius: f64 },
    SetBodyName { name: String },
}

/// Deterministic test double for the geometry kernel.
/// Implements both Kernel and KernelIntrospect.
pub struct MockKernel {
    next_id: u64,
    sketches: HashMap<u64, SketchPlane>,
    profiles: HashMap<u64, MockProfile>,
    bodies: HashMap<u64, MockBody>,
    active: Option<u64>,
    ops: Vec<RecordedOp>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            sketches: HashMap::new(),
            profiles: HashMap::new(),
            bodies: HashMap::new(),
            active: None,
            ops: Vec::new(),
        }
    }

    /// Every kernel call made so far, in order.
    pub fn recorded_ops(&self) -> &[RecordedOp] {
        &self.ops
    }

    /// The name set on a body, if any.
    pub fn body_name(&self, body: &BodyHandle) -> Option<&str> {
        self.bodies.get(&body.id()).and_then(|b| b.name.as_deref())
    }

    fn alloc(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Sweep a rectangle profile into a box along its plane's axis.
    fn sweep_rect(plane: SketchPlane, p0: Point3, p1: Point3, distance: f64) -> Aabb {
        match plane {
            SketchPlane::Base => {
                let z0 = p0.z;
                Aabb::new([p0.x, p0.y, z0], [p1.x, p1.y, z0 + distance])
            }
            SketchPlane::Front => {
                let y0 = p0.y;
                Aabb::new([p0.x, y0, p0.z], [p1.x, y0 + distance, p1.z])
            }
        }
    }

    /// Install a new body derived from `boxes`, deriving a fresh edge set,
    /// and make it the session's current body.
    fn install_body(
        &mut self,
        boxes: Vec<Aabb>,
        rounded: HashSet<EdgeKey>,
        name: Option<String>,
    ) -> BodyHandle {
        let segments = extract_edges(&boxes);
        let mut edges = Vec::with_capacity(segments.len());
        for (a, b) in segments {
            if rounded.contains(&edge_key(a, b)) {
                continue;
            }
            let id = EdgeId(self.alloc());
            edges.push(MockEdge { id, a, b });
        }

        let handle_id = self.alloc();
        self.bodies.insert(
            handle_id,
            MockBody {
                boxes,
                rounded,
                edges,
                name,
            },
        );
        self.active = Some(handle_id);
        BodyHandle(handle_id)
    }
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for MockKernel {
    fn create_sketch(&mut self, plane: SketchPlane) -> Result<SketchId, KernelError> {
        let id = self.alloc();
        self.sketches.insert(id, plane);
        self.ops.push(RecordedOp::CreateSketch { plane });
        Ok(SketchId(id))
    }

    fn add_rectangle(
        &mut self,
        sketch: SketchId,
        p0: Point3,
        p1: Point3,
    ) -> Result<ProfileId, KernelError> {
        let plane = *self
            .sketches
            .get(&sketch.0)
            .ok_or(KernelError::SketchNotFound { id: sketch })?;
        let id = self.alloc();
        self.profiles.insert(id, MockProfile::Rect { plane, p0, p1 });
        self.ops.push(RecordedOp::AddRectangle);
        Ok(ProfileId(id))
    }

    fn add_circle(
        &mut self,
        sketch: SketchId,
        center: Point3,
        radius: f64,
    ) -> Result<ProfileId, KernelError> {
        let plane = *self
            .sketches
            .get(&sketch.0)
            .ok_or(KernelError::SketchNotFound { id: sketch })?;
        let id = self.alloc();
        self.profiles.insert(id, MockProfile::Circle { plane, center });
        self.ops.push(RecordedOp::AddCircle { radius });
        Ok(ProfileId(id))
    }

    fn extrude(
        &mut self,
        profiles: &[ProfileId],
        distance: f64,
        op: ExtrudeOp,
    ) -> Result<BodyHandle, KernelError> {
        if profiles.is_empty() {
            return Err(KernelError::ExtrudeFailed {
                reason: "no profiles to extrude".to_string(),
            });
        }

        let mut resolved = Vec::with_capacity(profiles.len());
        for id in profiles {
            let profile = self
                .profiles
                .get(&id.0)
                .ok_or(KernelError::ProfileNotFound { id: *id })?;
            resolved.push(profile.clone());
        }

        tracing::debug!(count = profiles.len(), distance, ?op, "mock extrude");
        self.ops.push(RecordedOp::Extrude { distance, op });

        match op {
            ExtrudeOp::NewBody | ExtrudeOp::Join => {
                let mut tools = Vec::new();
                for profile in &resolved {
                    match profile {
                        MockProfile::Rect { plane, p0, p1 } => {
                            tools.push(Self::sweep_rect(*plane, *p0, *p1, distance));
                        }
                        MockProfile::Circle { .. } => {
                            return Err(KernelError::ExtrudeFailed {
                                reason: "circular profiles are only supported for cuts"
                                    .to_string(),
                            });
                        }
                    }
                }

                if op == ExtrudeOp::NewBody {
                    Ok(self.install_body(tools, HashSet::new(), None))
                } else {
                    let active = self.active.ok_or(KernelError::NoActiveBody {
                        operation: "join extrude",
                    })?;
                    let body = self.bodies.get(&active).ok_or(KernelError::BodyNotFound)?;
                    let mut boxes = body.boxes.clone();
                    let rounded = body.rounded.clone();
                    let name = body.name.clone();
                    boxes.extend(tools);
                    Ok(self.install_body(boxes, rounded, name))
                }
            }

            ExtrudeOp::Cut => {
                let active = self.active.ok_or(KernelError::NoActiveBody {
                    operation: "cut extrude",
                })?;
                let body = self.bodies.get(&active).ok_or(KernelError::BodyNotFound)?;
                let mut boxes = body.boxes.clone();
                let rounded = body.rounded.clone();
                let name = body.name.clone();

                for profile in &resolved {
                    match profile {
                        MockProfile::Rect { plane, p0, p1 } => {
                            let tool = Self::sweep_rect(*plane, *p0, *p1, distance);
                            boxes = boxes.iter().flat_map(|b| b.subtract(&tool)).collect();
                        }
                        // Cylindrical cuts do not alter the axis-aligned
                        // sharp-edge set this double models; the call is
                        // recorded and the body re-issued.
                        MockProfile::Circle { plane, center } => {
                            tracing::debug!(?plane, ?center, "cylindrical cut left the edge set unchanged");
                        }
                    }
                }

                Ok(self.install_body(boxes, rounded, name))
            }
        }
    }

    fn fillet(
        &mut self,
        body: &BodyHandle,
        edges: &[EdgeId],
        radius: f64,
        _options: FilletOptions,
    ) -> Result<BodyHandle, KernelError> {
        if radius <= 0.0 {
            return Err(KernelError::FilletFailed {
                reason: "radius must be positive".to_string(),
            });
        }
        let source = self
            .bodies
            .get(&body.id())
            .ok_or(KernelError::BodyNotFound)?;

        // Coarse feasibility: the rolling ball must fit inside the solid's
        // smallest overall extent. Local per-edge limits are a real
        // kernel's business; this keeps oversized radii a deterministic,
        // observable rejection.
        if let Some(limit) = half_min_extent(&source.boxes) {
            if radius > limit {
                return Err(KernelError::FilletFailed {
                    reason: format!("radius {radius} does not fit the solid (limit {limit})"),
                });
            }
        }

        let mut rounded = source.rounded.clone();
        for id in edges {
            let edge = source
                .edges
                .iter()
                .find(|e| e.id == *id)
                .ok_or_else(|| KernelError::FilletFailed {
                    reason: format!("edge {id:?} not found in solid"),
                })?;
            rounded.insert(edge.key());
        }

        tracing::debug!(edges = edges.len(), radius, "mock fillet");
        self.ops.push(RecordedOp::Fillet {
            edges: edges.len(),
            radius,
        });

        let boxes = source.boxes.clone();
        let name = source.name.clone();
        Ok(self.install_body(boxes, rounded, name))
    }

    fn set_body_name(&mut self, body: &BodyHandle, name: &str) -> Result<(), KernelError> {
        let entry = self
            .bodies
            .get_mut(&body.id())
            .ok_or(KernelError::BodyNotFound)?;
        entry.name = Some(name.to_string());
        self.ops.push(RecordedOp::SetBodyName {
            name: name.to_string(),
        });
        Ok(())
    }
}

impl KernelIntrospect for MockKernel {
    fn edges_of(&self, body: &BodyHandle) -> Vec<EdgeId> {
        self.bodies
            .get(&body.id())
            .map(|b| b.edges.iter().map(|e| e.id).collect())
            .unwrap_or_default()
    }

    fn edge_signature(&self, edge: EdgeId) -> Option<EdgeSignature> {
        for body in self.bodies.values() {
            if let Some(found) = body.edges.iter().find(|e| e.id == edge) {
                return Some(found.signature());
            }
        }
        None
    }
}

/// Half the smallest extent of the union's overall bounding box, or `None`
/// for an empty solid.
fn half_min_extent(boxes: &[Aabb]) -> Option<f64> {
    if boxes.is_empty() {
        return None;
    }
    let mut min = [f64::INFINITY; 3];
    let mut max = [f64::NEG_INFINITY; 3];
    for b in boxes {
        for i in 0..3 {
            min[i] = min[i].min(b.min[i]);
            max[i] = max[i].max(b.max[i]);
        }
    }
    let extent = (0..3).map(|i| max[i] - min[i]).fold(f64::INFINITY, f64::min);
    Some(extent / 2.0)
}

// ── Edge extraction ─────────────────────────────────────────────────────
//
// The sharp edges of a union of axis-aligned boxes lie on grid lines of the
// cell decomposition induced by all box faces. A grid-line span is an edge
// iff the four cells around it are solid in a convex (1), concave (3), or
// diagonal (2, opposite) pattern; spans with the same pattern merge into
// maximal segments.

fn extract_edges(boxes: &[Aabb]) -> Vec<(Point3, Point3)> {
    let mut segments = Vec::new();
    for axis in 0..3 {
        axis_edges(boxes, axis, &mut segments);
    }
    segments
}

fn coords_along(boxes: &[Aabb], axis: usize) -> Vec<f64> {
    let mut coords: Vec<f64> = boxes
        .iter()
        .flat_map(|b| [b.min[axis], b.max[axis]])
        .collect();
    coords.sort_by(f64::total_cmp);
    coords.dedup_by(|a, b| (*a - *b).abs() < GRID_EPS);
    coords
}

fn solid_at(boxes: &[Aabb], p: [f64; 3]) -> bool {
    boxes.iter().any(|b| b.contains(p))
}

/// Midpoint of the grid interval below/above index `i`, if it exists.
fn interval_mid(coords: &[f64], i: usize, above: bool) -> Option<f64> {
    if above {
        (i + 1 < coords.len()).then(|| (coords[i] + coords[i + 1]) / 2.0)
    } else {
        (i > 0).then(|| (coords[i - 1] + coords[i]) / 2.0)
    }
}

/// Solidity of the four cells around the grid line (`cu`, `cv`) at the
/// probe coordinate `wmid` along the edge axis. Out-of-grid cells are empty.
#[allow(clippy::too_many_arguments)]
fn quadrants(
    boxes: &[Aabb],
    axis: usize,
    u: usize,
    v: usize,
    mids_u: [Option<f64>; 2],
    mids_v: [Option<f64>; 2],
    wmid: f64,
) -> [bool; 4] {
    let mut pattern = [false; 4];
    for (qi, (mu, mv)) in [
        (mids_u[0], mids_v[0]),
        (mids_u[1], mids_v[0]),
        (mids_u[0], mids_v[1]),
        (mids_u[1], mids_v[1]),
    ]
    .into_iter()
    .enumerate()
    {
        if let (Some(mu), Some(mv)) = (mu, mv) {
            let mut p = [0.0; 3];
            p[axis] = wmid;
            p[u] = mu;
            p[v] = mv;
            pattern[qi] = solid_at(boxes, p);
        }
    }
    pattern
}

fn pattern_is_edge(pattern: [bool; 4]) -> bool {
    let count = pattern.iter().filter(|s| **s).count();
    // Indices 0 and 3 are diagonal to each other, as are 1 and 2.
    count == 1 || count == 3 || (count == 2 && pattern[0] == pattern[3])
}

fn axis_edges(boxes: &[Aabb], axis: usize, out: &mut Vec<(Point3, Point3)>) {
    let u = (axis + 1) % 3;
    let v = (axis + 2) % 3;
    let coords_w = coords_along(boxes, axis);
    let coords_u = coords_along(boxes, u);
    let coords_v = coords_along(boxes, v);
    if coords_w.len() < 2 {
        return;
    }

    for ui in 0..coords_u.len() {
        let mids_u = [
            interval_mid(&coords_u, ui, false),
            interval_mid(&coords_u, ui, true),
        ];
        for vi in 0..coords_v.len() {
            let mids_v = [
                interval_mid(&coords_v, vi, false),
                interval_mid(&coords_v, vi, true),
            ];

            // Walk the spans along the edge axis, merging runs with an
            // identical quadrant pattern into maximal segments.
            let mut run: Option<(usize, [bool; 4])> = None;
            for k in 0..coords_w.len() - 1 {
                let wmid = (coords_w[k] + coords_w[k + 1]) / 2.0;
                let pattern = quadrants(boxes, axis, u, v, mids_u, mids_v, wmid);
                let present = pattern_is_edge(pattern);

                match run {
                    Some((start, p)) if present && p == pattern => {
                        run = Some((start, p));
                    }
                    Some((start, _)) => {
                        out.push(segment(axis, u, v, coords_u[ui], coords_v[vi], coords_w[start], coords_w[k]));
                        run = present.then_some((k, pattern));
                    }
                    None => {
                        run = present.then_some((k, pattern));
                    }
                }
            }
            if let Some((start, _)) = run {
                out.push(segment(
                    axis,
                    u,
                    v,
                    coords_u[ui],
                    coords_v[vi],
                    coords_w[start],
                    coords_w[coords_w.len() - 1],
                ));
            }
        }
    }
}

fn segment(axis: usize, u: usize, v: usize, cu: f64, cv: f64, w0: f64, w1: f64) -> (Point3, Point3) {
    let mut a = [0.0; 3];
    let mut b = [0.0; 3];
    a[axis] = w0;
    b[axis] = w1;
    a[u] = cu;
    b[u] = cu;
    a[v] = cv;
    b[v] = cv;
    (
        Point3::new(a[0], a[1], a[2]),
        Point3::new(b[0], b[1], b[2]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn rect_sketch(kernel: &mut MockKernel, plane: SketchPlane, p0: Point3, p1: Point3) -> ProfileId {
        let sketch = kernel.create_sketch(plane).unwrap();
        kernel.add_rectangle(sketch, p0, p1).unwrap()
    }

    fn base_box(kernel: &mut MockKernel, w: f64, h: f64, d: f64) -> BodyHandle {
        let profile = rect_sketch(
            kernel,
            SketchPlane::Base,
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(w, h, 0.0),
        );
        kernel.extrude(&[profile], d, ExtrudeOp::NewBody).unwrap()
    }

    fn signatures(kernel: &MockKernel, body: &BodyHandle) -> Vec<EdgeSignature> {
        kernel
            .edges_of(body)
            .into_iter()
            .map(|e| kernel.edge_signature(e).unwrap())
            .collect()
    }

    #[test]
    fn extruded_rectangle_has_box_topology() {
        let mut kernel = MockKernel::new();
        let body = base_box(&mut kernel, 2.0, 3.0, 5.0);

        let sigs = signatures(&kernel, &body);
        assert_eq!(sigs.len(), 12, "a box has 12 edges");

        let mut by_length: Vec<f64> = sigs.iter().map(|s| s.length).collect();
        by_length.sort_by(f64::total_cmp);
        assert_abs_diff_eq!(by_length[0], 2.0);
        assert_abs_diff_eq!(by_length[11], 5.0);
        assert_eq!(by_length.iter().filter(|l| (**l - 5.0).abs() < 1e-9).count(), 4);
    }

    #[test]
    fn negative_distance_extrudes_downward() {
        let mut kernel = MockKernel::new();
        let profile = rect_sketch(
            &mut kernel,
            SketchPlane::Base,
            Point3::new(0.0, 0.0, 4.0),
            Point3::new(1.0, 1.0, 4.0),
        );
        let body = kernel.extrude(&[profile], -4.0, ExtrudeOp::NewBody).unwrap();

        let sigs = signatures(&kernel, &body);
        let min_z = sigs
            .iter()
            .map(|s| s.bounding_box.min.z)
            .fold(f64::INFINITY, f64::min);
        assert_abs_diff_eq!(min_z, 0.0);
    }

    #[test]
    fn cut_before_any_body_is_rejected() {
        let mut kernel = MockKernel::new();
        let profile = rect_sketch(
            &mut kernel,
            SketchPlane::Base,
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        );
        let result = kernel.extrude(&[profile], -1.0, ExtrudeOp::Cut);
        assert!(matches!(result, Err(KernelError::NoActiveBody { .. })));
    }

    #[test]
    fn pocket_cut_creates_rim_edges_and_fresh_ids() {
        let mut kernel = MockKernel::new();
        let body = base_box(&mut kernel, 4.0, 4.0, 4.0);
        let old_ids: HashSet<u64> = kernel.edges_of(&body).iter().map(|e| e.0).collect();

        // Open a pocket from the top face down, leaving 1.0 walls and floor.
        let pocket = rect_sketch(
            &mut kernel,
            SketchPlane::Base,
            Point3::new(1.0, 1.0, 4.0),
            Point3::new(3.0, 3.0, 4.0),
        );
        let cut = kernel.extrude(&[pocket], -3.0, ExtrudeOp::Cut).unwrap();

        let sigs = signatures(&kernel, &cut);
        // 12 outer box edges + 4 rim edges at the opening + 4 verticals
        // down the pocket walls + 4 floor edges.
        assert_eq!(sigs.len(), 24);

        let rim = sigs
            .iter()
            .filter(|s| {
                (s.bounding_box.min.z - 4.0).abs() < 1e-9
                    && (s.bounding_box.max.z - 4.0).abs() < 1e-9
                    && (s.length - 2.0).abs() < 1e-9
            })
            .count();
        assert_eq!(rim, 4, "pocket opening has a 4-edge rim");

        // The cut invalidated every previous edge id.
        let new_ids: HashSet<u64> = kernel.edges_of(&cut).iter().map(|e| e.0).collect();
        assert!(old_ids.is_disjoint(&new_ids));

        // The stale handle still answers with its pre-cut topology.
        assert_eq!(kernel.edges_of(&body).len(), 12);
    }

    #[test]
    fn cut_outside_the_body_changes_nothing() {
        let mut kernel = MockKernel::new();
        let body = base_box(&mut kernel, 2.0, 2.0, 2.0);

        let tool = rect_sketch(
            &mut kernel,
            SketchPlane::Base,
            Point3::new(5.0, 5.0, 2.0),
            Point3::new(6.0, 6.0, 2.0),
        );
        let cut = kernel.extrude(&[tool], -2.0, ExtrudeOp::Cut).unwrap();
        assert_eq!(kernel.edges_of(&cut).len(), 12);
        assert_ne!(body.id(), cut.id());
    }

    #[test]
    fn front_plane_extrusion_sweeps_along_y() {
        let mut kernel = MockKernel::new();
        let profile = rect_sketch(
            &mut kernel,
            SketchPlane::Front,
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 3.0),
        );
        let body = kernel.extrude(&[profile], 1.5, ExtrudeOp::NewBody).unwrap();

        let sigs = signatures(&kernel, &body);
        let max_y = sigs
            .iter()
            .map(|s| s.bounding_box.max.y)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_abs_diff_eq!(max_y, 1.5);
    }

    #[test]
    fn join_of_overlapping_boxes_yields_l_topology() {
        let mut kernel = MockKernel::new();
        let _ = base_box(&mut kernel, 2.0, 1.0, 1.0);

        let arm = rect_sketch(
            &mut kernel,
            SketchPlane::Base,
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
        );
        let joined = kernel.extrude(&[arm], 1.0, ExtrudeOp::Join).unwrap();

        // An L-shaped prism: 6-corner cross-section twice + 6 verticals.
        assert_eq!(kernel.edges_of(&joined).len(), 18);
    }

    #[test]
    fn concave_corner_is_detected_once() {
        let mut kernel = MockKernel::new();
        let _ = base_box(&mut kernel, 2.0, 1.0, 1.0);
        let arm = rect_sketch(
            &mut kernel,
            SketchPlane::Base,
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
        );
        let joined = kernel.extrude(&[arm], 1.0, ExtrudeOp::Join).unwrap();

        // Exactly one vertical edge sits at the inner corner (1, 1).
        let inner: Vec<EdgeSignature> = signatures(&kernel, &joined)
            .into_iter()
            .filter(|s| {
                (s.bounding_box.min.x - 1.0).abs() < 1e-9
                    && (s.bounding_box.max.x - 1.0).abs() < 1e-9
                    && (s.bounding_box.min.y - 1.0).abs() < 1e-9
                    && (s.bounding_box.max.y - 1.0).abs() < 1e-9
            })
            .collect();
        assert_eq!(inner.len(), 1);
        assert_abs_diff_eq!(inner[0].length, 1.0);
    }

    #[test]
    fn fillet_removes_edges_and_survives_reextraction() {
        let mut kernel = MockKernel::new();
        let body = base_box(&mut kernel, 2.0, 2.0, 2.0);

        let victim = kernel.edges_of(&body)[0];
        let rounded = kernel
            .fillet(&body, &[victim], 0.2, FilletOptions::default())
            .unwrap();
        assert_eq!(kernel.edges_of(&rounded).len(), 11);

        // A later no-op cut re-derives edges; the rounded one stays gone.
        let tool = rect_sketch(
            &mut kernel,
            SketchPlane::Base,
            Point3::new(9.0, 9.0, 2.0),
            Point3::new(10.0, 10.0, 2.0),
        );
        let after = kernel.extrude(&[tool], -1.0, ExtrudeOp::Cut).unwrap();
        assert_eq!(kernel.edges_of(&after).len(), 11);
    }

    #[test]
    fn fillet_rejects_nonpositive_radius() {
        let mut kernel = MockKernel::new();
        let body = base_box(&mut kernel, 1.0, 1.0, 1.0);
        let result = kernel.fillet(&body, &[], 0.0, FilletOptions::default());
        assert!(matches!(result, Err(KernelError::FilletFailed { .. })));
    }

    #[test]
    fn fillet_rejects_radius_that_cannot_fit_the_solid() {
        let mut kernel = MockKernel::new();
        let body = base_box(&mut kernel, 4.0, 1.0, 4.0);
        let edge = kernel.edges_of(&body)[0];
        // Larger than half the 1.0 extent; the ball cannot roll inside.
        let result = kernel.fillet(&body, &[edge], 0.6, FilletOptions::default());
        assert!(matches!(result, Err(KernelError::FilletFailed { .. })));
    }

    #[test]
    fn fillet_rejects_stale_edge_ids() {
        let mut kernel = MockKernel::new();
        let body = base_box(&mut kernel, 2.0, 2.0, 2.0);
        let stale = kernel.edges_of(&body)[0];

        let tool = rect_sketch(
            &mut kernel,
            SketchPlane::Base,
            Point3::new(0.5, 0.5, 2.0),
            Point3::new(1.5, 1.5, 2.0),
        );
        let cut = kernel.extrude(&[tool], -1.0, ExtrudeOp::Cut).unwrap();

        let result = kernel.fillet(&cut, &[stale], 0.1, FilletOptions::default());
        assert!(matches!(result, Err(KernelError::FilletFailed { .. })));
    }

    #[test]
    fn circular_cut_is_recorded_but_keeps_edges() {
        let mut kernel = MockKernel::new();
        let body = base_box(&mut kernel, 2.0, 2.0, 2.0);

        let sketch = kernel.create_sketch(SketchPlane::Front).unwrap();
        let hole = kernel
            .add_circle(sketch, Point3::new(1.0, 0.0, 1.0), 0.2)
            .unwrap();
        let cut = kernel.extrude(&[hole], 0.5, ExtrudeOp::Cut).unwrap();

        assert_eq!(kernel.edges_of(&cut).len(), kernel.edges_of(&body).len());
        assert!(kernel
            .recorded_ops()
            .contains(&RecordedOp::AddCircle { radius: 0.2 }));
    }

    #[test]
    fn body_name_is_stored() {
        let mut kernel = MockKernel::new();
        let body = base_box(&mut kernel, 1.0, 1.0, 1.0);
        kernel.set_body_name(&body, "Den Remote").unwrap();
        assert_eq!(kernel.body_name(&body), Some("Den Remote"));
    }

    #[test]
    fn identical_call_sequences_allocate_identical_ids() {
        let mut k1 = MockKernel::new();
        let mut k2 = MockKernel::new();
        let b1 = base_box(&mut k1, 1.0, 2.0, 3.0);
        let b2 = base_box(&mut k2, 1.0, 2.0, 3.0);
        assert_eq!(kids(&k1, &b1), kids(&k2, &b2));

        fn kids(k: &MockKernel, b: &BodyHandle) -> Vec<u64> {
            k.edges_of(b).iter().map(|e| e.0).collect()
        }
    }

    #[test]
    fn extrude_with_no_profiles_fails() {
        let mut kernel = MockKernel::new();
        let result = kernel.extrude(&[], 1.0, ExtrudeOp::NewBody);
        assert!(matches!(result, Err(KernelError::ExtrudeFailed { .. })));
    }
}
