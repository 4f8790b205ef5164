//! `tail-reflect` library crate.
//!
//! The binary is a thin wrapper around this library so that:
//!
//! - the solver and sampling logic are testable without spawning processes
//! - the experiment can be driven from an explicit `RunConfig` (no global state)
//! - rendering/export stay separate from the numerics

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;
