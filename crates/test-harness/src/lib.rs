//! Test harness for the holster generator.
//!
//! Shared fixtures and plan-probing helpers for integration tests: named
//! accessors for the steps of a build plan so scenario tests read as a
//! walkthrough of the build rather than pattern-matching boilerplate.

pub mod helpers;

pub use helpers::*;
