//! Adapters around external data sources.
//!
//! Each adapter independently produces a map keyed by normalized
//! project-relative path. Failures here are degraded-data conditions, not
//! fatal: the pipeline converts an adapter error into an empty map and
//! proceeds with the remaining signals.

pub mod complexity;
pub mod coverage;
pub mod git;
