//! Model evaluation: the balance equation the solver drives to zero and the
//! tail curves drawn in the figure.
//!
//! Models are implemented as small, pure functions so that solver and sampling
//! code can stay generic.

pub mod model;

pub use model::*;
