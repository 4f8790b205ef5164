//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the decay-rate pair (`Rates`)
//! - per-stage configuration (`SolverConfig`, `DomainConfig`, `SamplingConfig`, `PlotConfig`)
//! - the top-level `RunConfig`
//! - intermediate results shared between stages (`PlotDomain`, `SampleGrid`)

pub mod types;

pub use types::*;
