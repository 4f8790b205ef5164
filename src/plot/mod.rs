//! Figure construction and rendering.
//!
//! - Plotters drawing for PNG/SVG export (`figure`)
//! - ASCII fallback for non-interactive terminals (`ascii`)
//! - bundled font registration (`fonts`)

pub mod ascii;
pub mod figure;
pub mod fonts;

pub use ascii::*;
pub use figure::*;
pub use fonts::*;
