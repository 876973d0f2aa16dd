//! Report configuration
//!
//! All paths and rendering constants live here. The defaults reproduce the
//! layout the regression suite writes: `results/<name>.csv` in, and
//! `results/plots/<stem>.png` out.

use std::path::{Path, PathBuf};

/// CSV files produced by the regression suite, in processing order.
pub const EXPECTED_FILES: [&str; 3] = ["speed_step_test.csv", "torque_step_test.csv", "hfi_test.csv"];

/// Motor-control signals preferred for plotting when present.
pub const CANONICAL_FIELDS: [&str; 4] = ["id", "iq", "omega_e", "torque"];

#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Directory holding the test CSVs
    pub results_dir: PathBuf,

    /// Subdirectory of `results_dir` receiving the images
    pub plots_subdir: PathBuf,

    /// File names looked up inside `results_dir`
    pub expected_files: Vec<String>,

    /// Preferred fields, in panel order
    pub canonical_fields: Vec<String>,

    /// How many non-time columns to plot when no canonical field exists
    pub fallback_field_count: usize,

    /// Name of the x-axis column
    pub time_column: String,

    /// Label drawn under the bottom panel
    pub x_label: String,

    /// Figure width in pixels
    pub panel_width: u32,

    /// Height of one stacked panel in pixels
    pub panel_height: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results"),
            plots_subdir: PathBuf::from("plots"),
            expected_files: EXPECTED_FILES.iter().map(|s| s.to_string()).collect(),
            canonical_fields: CANONICAL_FIELDS.iter().map(|s| s.to_string()).collect(),
            fallback_field_count: 3,
            time_column: "time".to_string(),
            x_label: "time [s]".to_string(),
            panel_width: 800,
            panel_height: 250,
        }
    }
}

impl ReportConfig {
    /// Point the report at a different results directory.
    #[allow(dead_code)]
    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }

    /// Replace the list of expected CSV names.
    #[allow(dead_code)]
    pub fn with_expected_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected_files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Directory the images are written to.
    pub fn plots_dir(&self) -> PathBuf {
        self.results_dir.join(&self.plots_subdir)
    }

    /// Full path of one expected input file.
    pub fn input_path(&self, name: &str) -> PathBuf {
        self.results_dir.join(name)
    }

    /// Image path for an input file: `<plots_dir>/<stem>.png`.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.plots_dir().join(format!("{stem}.png"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = ReportConfig::default();
        assert_eq!(config.results_dir, PathBuf::from("results"));
        assert_eq!(config.plots_dir(), PathBuf::from("results").join("plots"));
        assert_eq!(
            config.expected_files,
            vec!["speed_step_test.csv", "torque_step_test.csv", "hfi_test.csv"]
        );
        assert_eq!(config.canonical_fields, vec!["id", "iq", "omega_e", "torque"]);
        assert_eq!(config.fallback_field_count, 3);
    }

    #[test]
    fn test_output_path_uses_stem() {
        let config = ReportConfig::default();
        let out = config.output_path(&config.input_path("hfi_test.csv"));
        assert_eq!(out, PathBuf::from("results/plots/hfi_test.png"));
    }
}
