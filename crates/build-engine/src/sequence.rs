use holster_types::{BuildPlan, EdgeSelector, ExtrudeOp, SketchCurve, Stage, StepKind};
use kernel_api::{BodyHandle, EdgeId, FilletOptions, KernelIntrospect, ProfileId, SketchId};

use crate::kernel_ext::KernelBundle;
use crate::types::{BuildError, BuildReport, StepTrace};

/// Replay the planned steps against the kernel, strictly in order.
///
/// The sequencer holds exactly one body handle and replaces it with the
/// successor returned by every mutating operation, re-querying the edge set
/// before each fillet; nothing topological is cached across steps. The
/// first extrude names the body from the plan.
pub fn sequence(
    plan: &BuildPlan,
    kernel: &mut dyn KernelBundle,
) -> Result<BuildReport, BuildError> {
    let mut sketches: Vec<(SketchId, Vec<ProfileId>)> = Vec::new();
    let mut body: Option<BodyHandle> = None;
    let mut traces: Vec<StepTrace> = Vec::new();
    let mut stage_reached = Stage::Base;

    for step in &plan.steps {
        let stage = step.stage;
        match &step.kind {
            StepKind::Sketch { plane, curves } => {
                let sketch = kernel
                    .create_sketch(*plane)
                    .map_err(|source| BuildError::Kernel { stage, source })?;

                let mut profiles = Vec::with_capacity(curves.len());
                for curve in curves {
                    let profile = match curve {
                        SketchCurve::Rectangle { p0, p1 } => kernel.add_rectangle(sketch, *p0, *p1),
                        SketchCurve::Circle { center, radius } => {
                            kernel.add_circle(sketch, *center, *radius)
                        }
                    }
                    .map_err(|source| BuildError::Kernel { stage, source })?;
                    profiles.push(profile);
                }

                tracing::debug!(%stage, curves = curves.len(), "sketched");
                traces.push(StepTrace {
                    stage,
                    detail: format!("sketch with {} curve(s)", curves.len()),
                    edges_selected: None,
                });
                sketches.push((sketch, profiles));
            }

            StepKind::Extrude {
                sketch,
                distance,
                op,
            } => {
                let (_, profiles) =
                    sketches
                        .get(*sketch)
                        .ok_or_else(|| BuildError::UnknownSketch {
                            stage,
                            index: *sketch,
                            count: sketches.len(),
                        })?;

                let handle = kernel
                    .extrude(profiles, *distance, *op)
                    .map_err(|source| BuildError::Kernel { stage, source })?;

                // The first extrude creates the one body of the session;
                // name it before anything else happens to it.
                if *op == ExtrudeOp::NewBody && body.is_none() {
                    kernel
                        .set_body_name(&handle, &plan.name)
                        .map_err(|source| BuildError::Kernel { stage, source })?;
                }

                tracing::debug!(%stage, distance, ?op, "extruded");
                traces.push(StepTrace {
                    stage,
                    detail: format!("extrude {distance:+} ({op:?})"),
                    edges_selected: None,
                });
                body = Some(handle);
            }

            StepKind::Fillet { selector, radius } => {
                let current = body.as_ref().ok_or(BuildError::NoBody { stage })?;

                // Re-discover the target edges on the solid as it exists
                // NOW; ids from before the previous mutation are stale.
                let edges = select_edges(kernel.as_introspect(), current, selector);
                if edges.is_empty() {
                    return Err(BuildError::NoEdgesMatched { stage });
                }

                let handle = kernel
                    .fillet(current, &edges, *radius, FilletOptions::default())
                    .map_err(|source| BuildError::Kernel { stage, source })?;

                tracing::debug!(%stage, edges = edges.len(), radius, "filleted");
                traces.push(StepTrace {
                    stage,
                    detail: format!("fillet {} edge(s) at radius {radius}", edges.len()),
                    edges_selected: Some(edges.len()),
                });
                body = Some(handle);
            }
        }
        stage_reached = stage;
    }

    let body = body.ok_or(BuildError::NoBody {
        stage: stage_reached,
    })?;
    tracing::info!(name = %plan.name, steps = traces.len(), "build complete");

    Ok(BuildReport {
        body,
        name: plan.name.clone(),
        stage_reached,
        steps: traces,
    })
}

/// Evaluate a selector against every edge of the body, keeping ALL
/// matches. Symmetric solids legitimately produce several (both back
/// corners round in one fillet call).
fn select_edges(
    introspect: &dyn KernelIntrospect,
    body: &BodyHandle,
    selector: &EdgeSelector,
) -> Vec<EdgeId> {
    introspect
        .edges_of(body)
        .into_iter()
        .filter(|edge| {
            introspect
                .edge_signature(*edge)
                .is_some_and(|sig| selector.matches(&sig))
        })
        .collect()
}
