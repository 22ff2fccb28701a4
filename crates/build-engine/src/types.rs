use holster_types::{ParameterError, Stage};
use kernel_api::{BodyHandle, KernelError};
use serde::Serialize;

/// Errors from sequencing a build. Every failure aborts the remaining
/// sequence; already-committed kernel steps are not rolled back, matching
/// the linear, non-transactional nature of the construction order.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    InvalidParameter(#[from] ParameterError),

    #[error("{stage}: kernel rejected the operation: {source}")]
    Kernel {
        stage: Stage,
        #[source]
        source: KernelError,
    },

    /// A fillet selector found nothing to round. Explicit rather than a
    /// silent no-op: an empty match means the solid is not in the state
    /// the plan assumed.
    #[error("{stage}: selector matched no edges")]
    NoEdgesMatched { stage: Stage },

    #[error("{stage}: extrude references sketch {index}, but only {count} sketches exist")]
    UnknownSketch {
        stage: Stage,
        index: usize,
        count: usize,
    },

    #[error("{stage}: fillet issued before any body exists")]
    NoBody { stage: Stage },
}

/// What one executed step did, for logs and front-end display.
#[derive(Debug, Clone, Serialize)]
pub struct StepTrace {
    pub stage: Stage,
    pub detail: String,
    /// How many edges a fillet step's selector matched; `None` for other
    /// step kinds.
    pub edges_selected: Option<usize>,
}

/// Outcome of a completed build. The handle references the finished solid
/// in the kernel session and is only valid for that session's lifetime.
#[derive(Debug)]
pub struct BuildReport {
    pub body: BodyHandle,
    pub name: String,
    /// The terminal stage; always `Stage::Soften` for a completed build.
    pub stage_reached: Stage,
    pub steps: Vec<StepTrace>,
}
