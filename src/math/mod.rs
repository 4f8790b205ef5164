//! Numerical primitives shared by the solver and the curve evaluation.

pub mod safe_exp;

pub use safe_exp::*;
