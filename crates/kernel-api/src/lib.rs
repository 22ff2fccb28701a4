//! Abstract solid-modeling kernel surface.
//!
//! The generator core never talks to a concrete CAD kernel; it issues
//! sketch/extrude/fillet operations through the [`Kernel`] trait and reads
//! topology back through [`KernelIntrospect`]. [`MockKernel`] is a
//! deterministic test double good enough to exercise edge re-discovery on
//! axis-aligned geometry.

pub mod mock_kernel;
pub mod traits;
pub mod types;

pub use mock_kernel::{MockKernel, RecordedOp};
pub use traits::{Kernel, KernelIntrospect};
pub use types::*;
