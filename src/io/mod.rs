//! Input/output helpers.
//!
//! - figure export to PNG + SVG (`export`)
//! - JSON run summary (`summary`)

pub mod export;
pub mod summary;

pub use export::*;
pub use summary::*;
