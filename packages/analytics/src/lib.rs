#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! The join-and-aggregate pipeline.
//!
//! Pure transformations from cleaned incident records plus the
//! coordinate lookup into the per-municipality aggregates and breakdown
//! tables the presentation layer renders. No I/O happens here; that is
//! what keeps the pipeline testable without network or UI dependencies.

pub mod breakdown;
pub mod filter;
pub mod pipeline;

pub use pipeline::aggregate_by_municipality;

/// Errors raised by the aggregate pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The coordinate lookup contained no entries. A configuration
    /// error, distinct from the valid "no incidents matched" state.
    #[error("coordinate lookup is empty; geographic aggregation is not configured")]
    EmptyLookup,
}
