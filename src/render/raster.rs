use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};

use super::color::generate_palette;
use super::series::{axis_range, finite_range, segments};
use super::PlotBackend;
use crate::config::ReportConfig;
use crate::data::model::{PlotSpec, ResultFile};
use crate::error::RenderError;

/// Remediation shown when no usable font is installed.
pub const FONT_HINT: &str = "To enable plotting, install a TrueType font, e.g.:\n  \
     sudo apt update && sudo apt install -y fonts-dejavu-core";

/// Locations probed, in order, for a sans-serif TrueType font.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const FONT_FAMILY: &str = "sans-serif";
const Y_PADDING: f64 = 0.1;

static REGISTERED_FONT: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Register the first readable candidate with plotters, once per process.
fn ensure_font() -> Result<&'static Path, RenderError> {
    REGISTERED_FONT
        .get_or_init(|| {
            FONT_CANDIDATES.iter().map(Path::new).find_map(|path| {
                let bytes = fs::read(path).ok()?;
                // plotters keeps a reference for the lifetime of the process.
                let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
                register_font(FONT_FAMILY, FontStyle::Normal, bytes).ok()?;
                register_font(FONT_FAMILY, FontStyle::Bold, bytes).ok()?;
                log::debug!("Using font {}", path.display());
                Some(path.to_path_buf())
            })
        })
        .as_deref()
        .ok_or_else(|| RenderError::Environment {
            reason: "no TrueType font found for text rendering".to_string(),
            hint: FONT_HINT.to_string(),
        })
}

fn draw_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(e.to_string())
}

// ---------------------------------------------------------------------------
// RasterBackend – plotters bitmap drawing, PNG encoding via `image`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RasterBackend {
    width: u32,
    panel_height: u32,
}

impl RasterBackend {
    /// Probe for the text-rendering prerequisites and build the backend.
    pub fn discover(config: &ReportConfig) -> Result<Self, RenderError> {
        ensure_font()?;
        Ok(RasterBackend {
            width: config.panel_width,
            panel_height: config.panel_height,
        })
    }

    fn size_for(&self, n_panels: usize) -> (u32, u32) {
        (self.width, self.panel_height * n_panels.max(1) as u32)
    }

    fn draw(&self, buf: &mut [u8], size: (u32, u32), file: &ResultFile, spec: &PlotSpec) -> Result<(), RenderError> {
        let root = BitMapBackend::with_buffer(buf, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        let root = root.titled(&spec.title, (FONT_FAMILY, 22)).map_err(draw_err)?;

        let n = spec.fields.len().max(1);
        let panels = root.split_evenly((n, 1));
        let colors = generate_palette(n);
        let x_range = axis_range(finite_range(&spec.x), 0.0);

        for (i, (panel, field)) in panels.iter().zip(&spec.fields).enumerate() {
            let bottom = i + 1 == n;
            let y = file.series(field);
            let y_range = axis_range(finite_range(&y), Y_PADDING);

            let mut chart = ChartBuilder::on(panel)
                .margin(8)
                .x_label_area_size(if bottom { 40 } else { 24 })
                .y_label_area_size(64)
                .build_cartesian_2d(x_range.clone(), y_range)
                .map_err(draw_err)?;

            let mut mesh = chart.configure_mesh();
            mesh.y_desc(field.as_str())
                .x_labels(10)
                .y_labels(5)
                .light_line_style(BLACK.mix(0.08))
                .bold_line_style(BLACK.mix(0.2))
                .label_style((FONT_FAMILY, 12));
            if bottom {
                mesh.x_desc(spec.x_label.as_str());
            }
            mesh.draw().map_err(draw_err)?;

            let color = colors[i];
            for seg in segments(&spec.x, &y) {
                chart
                    .draw_series(LineSeries::new(seg, color.stroke_width(1)))
                    .map_err(draw_err)?;
            }
        }

        root.present().map_err(draw_err)
    }
}

impl PlotBackend for RasterBackend {
    fn name(&self) -> &str {
        "plotters-bitmap"
    }

    fn render(&self, file: &ResultFile, spec: &PlotSpec, out: &Path) -> Result<(), RenderError> {
        let (w, h) = self.size_for(spec.fields.len());
        let mut buf = vec![0u8; (w * h * 3) as usize];
        self.draw(&mut buf, (w, h), file, spec)?;

        let img = RgbImage::from_raw(w, h, buf)
            .ok_or_else(|| RenderError::Draw(format!("buffer does not match {w}x{h}")))?;
        img.save_with_format(out, ImageFormat::Png)
            .map_err(|source| RenderError::Encode {
                path: out.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> ResultFile {
        let rows = (0..50)
            .map(|i| {
                let t = i as f64 * 0.001;
                let mut row: crate::data::model::ResultRow =
                    [("time", t), ("omega_e", (t * 100.0).sin())].into_iter().collect();
                if i != 20 {
                    row.values.insert("torque".into(), t * 2.0);
                }
                row
            })
            .collect();
        ResultFile::new(
            "speed_step_test",
            vec!["time".into(), "omega_e".into(), "torque".into()],
            rows,
        )
    }

    #[test]
    fn test_size_scales_with_panels() {
        let backend = RasterBackend {
            width: 800,
            panel_height: 250,
        };
        assert_eq!(backend.size_for(0), (800, 250));
        assert_eq!(backend.size_for(3), (800, 750));
    }

    #[test]
    fn test_renders_png_when_font_available() {
        let config = ReportConfig::default();
        let Ok(backend) = RasterBackend::discover(&config) else {
            // No system font on this machine; the environment path is covered elsewhere.
            return;
        };

        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("speed_step_test.png");
        let file = sample();
        let spec = PlotSpec::new(&file, vec!["omega_e".into(), "torque".into()], "time", "time [s]");

        backend.render(&file, &spec, &out).unwrap();

        let img = image::open(&out).unwrap();
        assert_eq!(img.width(), 800);
        assert_eq!(img.height(), 500);
    }
}
