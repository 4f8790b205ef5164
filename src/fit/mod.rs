//! Root solving and sampling.
//!
//! Responsibilities:
//!
//! - solve the balance equation for `theta = (p, q)` (`solver`)
//! - size the plotting domain from the tail decay (`grid`)
//! - build the adaptive three-segment sample grid (`grid`)

pub mod grid;
pub mod solver;

pub use grid::*;
pub use solver::*;
