//! Bundled font for Plotters text.
//!
//! Plotters is built with the pure-Rust `ab_glyph` renderer, which only knows
//! the fonts registered at runtime. DejaVu Sans is embedded in the binary and
//! registered as the `sans-serif` family used by every chart.

use std::sync::OnceLock;

use plotters::style::{FontStyle, register_font};

use crate::error::AppError;

/// Family name all chart text is drawn with.
pub const FONT_FAMILY: &str = "sans-serif";

static DEJAVU_SANS: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

static REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();

/// Register the bundled font once per process. Safe to call repeatedly.
pub fn register_fonts() -> Result<(), AppError> {
    REGISTERED
        .get_or_init(|| {
            register_font(FONT_FAMILY, FontStyle::Normal, DEJAVU_SANS)
                .map_err(|_| "InvalidFont".to_string())
        })
        .clone()
        .map_err(|e| AppError::render(format!("Failed to load bundled font: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_is_idempotent() {
        register_fonts().unwrap();
        register_fonts().unwrap();
    }
}
