//! Write the rendered figure to disk.
//!
//! Two files are produced from the same `Figure`, both named after
//! `PlotConfig::base_name` inside `PlotConfig::out_dir`:
//! - `<base>.png`: raster, with the DPI recorded in the `pHYs` chunk
//! - `<base>.svg`: vector
//!
//! Existing files are overwritten. Any filesystem failure is fatal.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::PlotConfig;
use crate::error::AppError;
use crate::plot::{Figure, render_rgb, render_svg};

const METERS_PER_INCH: f64 = 0.0254;

/// Paths of the files written by [`export_figure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedFiles {
    pub png: PathBuf,
    pub svg: PathBuf,
}

impl ExportedFiles {
    pub fn paths(&self) -> [&Path; 2] {
        [self.png.as_path(), self.svg.as_path()]
    }
}

/// Create `dir` (and parents) if it does not exist yet.
pub fn ensure_output_dir(dir: &Path) -> Result<(), AppError> {
    fs::create_dir_all(dir).map_err(|e| {
        AppError::io(format!(
            "Failed to create output directory '{}': {e}",
            dir.display()
        ))
    })
}

/// Pixels per metre for a resolution given in dots per inch.
pub fn dpi_to_ppm(dpi: u32) -> u32 {
    (f64::from(dpi) / METERS_PER_INCH).round() as u32
}

/// Encode a packed RGB buffer as PNG, tagging it with `dpi`.
pub fn encode_png<W: Write>(
    writer: W,
    rgb: &[u8],
    (width, height): (u32, u32),
    dpi: u32,
) -> Result<(), png::EncodingError> {
    let ppm = dpi_to_ppm(dpi);
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(rgb)?;
    png_writer.finish()
}

/// Render and write the PNG.
pub fn write_png(path: &Path, figure: &Figure, config: &PlotConfig) -> Result<(), AppError> {
    let (rgb, size) = render_rgb(figure, config)?;

    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create PNG '{}': {e}", path.display())))?;
    encode_png(BufWriter::new(file), &rgb, size, config.dpi)
        .map_err(|e| AppError::io(format!("Failed to write PNG '{}': {e}", path.display())))?;

    log::info!(
        "wrote {}x{} PNG at {} dpi to {}",
        size.0,
        size.1,
        config.dpi,
        path.display()
    );
    Ok(())
}

/// Render and write the SVG.
pub fn write_svg(path: &Path, figure: &Figure, config: &PlotConfig) -> Result<(), AppError> {
    let svg = render_svg(figure, config)?;
    fs::write(path, svg)
        .map_err(|e| AppError::io(format!("Failed to write SVG '{}': {e}", path.display())))?;

    log::info!("wrote SVG to {}", path.display());
    Ok(())
}

/// Create the output directory and write both figure files.
pub fn export_figure(figure: &Figure, config: &PlotConfig) -> Result<ExportedFiles, AppError> {
    ensure_output_dir(&config.out_dir)?;

    let files = ExportedFiles {
        png: config.png_path(),
        svg: config.svg_path(),
    };
    write_png(&files.png, figure, config)?;
    write_svg(&files.svg, figure, config)?;

    Ok(files)
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector2;

    use super::*;
    use crate::domain::{PlotDomain, Rates};
    use crate::fit::{Solution, Status};
    use crate::models::evaluate_curves;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tail-reflect-{name}-{}", std::process::id()))
    }

    fn figure() -> Figure {
        let xs: Vec<f64> = (0..=80).map(|i| -4.0 + i as f64 * 0.1).collect();
        let samples = evaluate_curves(&Rates::default(), &xs);
        let domain = PlotDomain {
            x_pos: 4.0,
            x_neg: 4.0,
            x_min: -4.0,
            x_max: 4.0,
        };
        let solution = Solution {
            status: Status::Converged,
            theta: Vector2::new(-0.5, 2.0),
            cost: 0.0,
            iters: 3,
        };
        Figure::new(samples, &domain, &solution).unwrap()
    }

    #[test]
    fn ppm_for_common_resolutions() {
        assert_eq!(dpi_to_ppm(300), 11811);
        assert_eq!(dpi_to_ppm(72), 2835);
    }

    #[test]
    fn exports_both_files_with_dpi_metadata() {
        let dir = scratch_dir("export").join("nested");
        let _ = fs::remove_dir_all(&dir);
        let config = PlotConfig {
            width_in: 4.0,
            height_in: 2.0,
            dpi: 60,
            svg_dpi: 60,
            out_dir: dir.clone(),
            base_name: "fig".to_string(),
            ..PlotConfig::default()
        };

        let files = export_figure(&figure(), &config).unwrap();
        assert_eq!(files.png, dir.join("fig.png"));
        assert_eq!(files.svg, dir.join("fig.svg"));
        for path in files.paths() {
            assert!(fs::metadata(path).unwrap().len() > 0, "{} is empty", path.display());
        }

        let decoder = png::Decoder::new(File::open(&files.png).unwrap());
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), (240, 120));
        let dims = info.pixel_dims.expect("pHYs chunk");
        assert_eq!(dims.unit, png::Unit::Meter);
        assert_eq!(dims.xppu, dpi_to_ppm(60));
        assert_eq!(dims.yppu, dpi_to_ppm(60));

        // Second export overwrites in place.
        export_figure(&figure(), &config).unwrap();

        let _ = fs::remove_dir_all(scratch_dir("export"));
    }

    #[test]
    fn output_dir_failure_is_fatal() {
        let base = scratch_dir("blocked");
        let _ = fs::remove_dir_all(&base);
        fs::create_dir_all(&base).unwrap();
        let blocker = base.join("file");
        fs::write(&blocker, b"x").unwrap();

        let err = ensure_output_dir(&blocker.join("sub")).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_IO);

        let _ = fs::remove_dir_all(&base);
    }
}
