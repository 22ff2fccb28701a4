//! The Construction Sequencer: replays a planned step list against an
//! abstract kernel in fixed order.
//!
//! Each step assumes the solid state left by its predecessors — fillet
//! steps re-discover their edges on the evolving body with geometric
//! predicates, never with handles stored at creation time. The whole
//! pipeline is exposed as one synchronous call: validate, plan, sequence.

pub mod kernel_ext;
pub mod sequence;
pub mod types;

pub use kernel_ext::KernelBundle;
pub use sequence::sequence;
pub use types::{BuildError, BuildReport, StepTrace};

use holster_types::HolsterParams;

/// Build a holster from scratch: validate the parameters, derive the
/// construction plan, and replay it against the kernel. The returned
/// report's body handle is the finished solid.
pub fn build(
    params: &HolsterParams,
    kernel: &mut dyn KernelBundle,
) -> Result<BuildReport, BuildError> {
    params.validate()?;
    let plan = holster_planner::plan(params);
    sequence(&plan, kernel)
}
