/// Identifier for an open sketch within the kernel session.
/// Valid only for the current session, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SketchId(pub u64);

/// Identifier for a closed profile created inside a sketch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfileId(pub u64);

/// Kernel-internal edge identifier. Stable only until the next mutating
/// operation on the owning body; callers must re-query rather than cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub u64);

/// Opaque handle to a solid. Every mutating operation returns a successor
/// handle; the one passed in is stale afterwards.
#[derive(Debug, Clone)]
pub struct BodyHandle(pub(crate) u64);

impl BodyHandle {
    pub(crate) fn id(&self) -> u64 {
        self.0
    }
}

/// Fillet behavior flags. Defaults to constant-radius rolling-ball
/// corners with curvature continuity off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilletOptions {
    pub rolling_ball_corner: bool,
    pub g2: bool,
}

impl Default for FilletOptions {
    fn default() -> Self {
        Self {
            rolling_ball_corner: true,
            g2: false,
        }
    }
}

/// Errors from kernel operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("sketch not found: {id:?}")]
    SketchNotFound { id: SketchId },

    #[error("profile not found: {id:?}")]
    ProfileNotFound { id: ProfileId },

    #[error("body not found")]
    BodyNotFound,

    #[error("{operation} requires an existing body")]
    NoActiveBody { operation: &'static str },

    #[error("extrude failed: {reason}")]
    ExtrudeFailed { reason: String },

    #[error("fillet failed: {reason}")]
    FilletFailed { reason: String },
}
