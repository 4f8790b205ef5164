//! Overflow-safe exponential.
//!
//! `f64::exp` overflows to `inf` a little above `709.78` and underflows to
//! subnormals/zero below about `-745`. Every exponential in this crate goes
//! through `safe_exp`, which saturates the argument to `±EXP_CLAMP` first so
//! results stay finite and positive for any finite input.

/// Symmetric clamp applied to exponent arguments.
pub const EXP_CLAMP: f64 = 700.0;

/// Compute `exp(clamp(x, -EXP_CLAMP, EXP_CLAMP))`.
///
/// Never fails; out-of-range inputs are silently saturated. `NaN` propagates.
#[inline]
pub fn safe_exp(x: f64) -> f64 {
    x.clamp(-EXP_CLAMP, EXP_CLAMP).exp()
}
