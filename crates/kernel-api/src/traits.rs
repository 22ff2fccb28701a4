use holster_types::{EdgeSignature, ExtrudeOp, Point3, SketchPlane};

use crate::types::*;

/// Shape construction operations the generator issues, in the order the
/// sequencer replays them. Implemented by [`crate::MockKernel`] and by
/// whatever adapter wraps a production kernel.
pub trait Kernel {
    /// Open a sketch on the given plane orientation.
    fn create_sketch(&mut self, plane: SketchPlane) -> Result<SketchId, KernelError>;

    /// Add an axis-aligned rectangle between two opposite corners.
    fn add_rectangle(
        &mut self,
        sketch: SketchId,
        p0: Point3,
        p1: Point3,
    ) -> Result<ProfileId, KernelError>;

    /// Add a circle by center and radius.
    fn add_circle(
        &mut self,
        sketch: SketchId,
        center: Point3,
        radius: f64,
    ) -> Result<ProfileId, KernelError>;

    /// Extrude the profiles by a signed distance along their sketch plane's
    /// axis. `Cut` and `Join` apply to the session's current body and
    /// return its successor handle.
    fn extrude(
        &mut self,
        profiles: &[ProfileId],
        distance: f64,
        op: ExtrudeOp,
    ) -> Result<BodyHandle, KernelError>;

    /// Round the given edges with one constant-radius fillet.
    fn fillet(
        &mut self,
        body: &BodyHandle,
        edges: &[EdgeId],
        radius: f64,
        options: FilletOptions,
    ) -> Result<BodyHandle, KernelError>;

    /// Set the user-visible name of a body.
    fn set_body_name(&mut self, body: &BodyHandle, name: &str) -> Result<(), KernelError>;
}

/// Read-only topology queries. Everything edge selection is allowed to see
/// comes through here.
pub trait KernelIntrospect {
    /// All edges of a body. Empty for an unknown handle.
    fn edges_of(&self, body: &BodyHandle) -> Vec<EdgeId>;

    /// Length and bounding box of an edge.
    fn edge_signature(&self, edge: EdgeId) -> Option<EdgeSignature>;
}
