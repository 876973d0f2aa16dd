use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use log::{error, info, warn};

use crate::config::ReportConfig;
use crate::data::loader::{discover, load_csv, Discovered};
use crate::data::model::PlotSpec;
use crate::data::select::select_fields;
use crate::error::RenderError;
use crate::render::Renderer;

// ---------------------------------------------------------------------------
// Run outcome
// ---------------------------------------------------------------------------

/// Overall result of a report run, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// All present files processed (some may have been skipped)
    Success,
    /// The results directory does not exist
    NoResultsDir,
    /// No plotting backend is usable
    PlottingUnavailable,
}

impl RunStatus {
    pub fn code(self) -> u8 {
        match self {
            RunStatus::Success => 0,
            RunStatus::NoResultsDir => 1,
            RunStatus::PlottingUnavailable => 2,
        }
    }
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// Why an expected file produced no image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Missing,
    Unreadable(String),
    Empty,
    NoFields,
    RenderFailed(String),
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, SkipReason)>,
}

// ---------------------------------------------------------------------------
// Report – process every expected file in turn
// ---------------------------------------------------------------------------

pub struct Report {
    config: ReportConfig,
    renderer: Renderer,
}

impl Report {
    pub fn new(config: ReportConfig, renderer: Renderer) -> Self {
        Report { config, renderer }
    }

    /// Process all expected files sequentially.
    pub fn run(&self) -> (RunStatus, RunSummary) {
        let mut summary = RunSummary::default();

        if !self.config.results_dir.is_dir() {
            info!(
                "No {}/ directory found. Run tests first.",
                self.config.results_dir.display()
            );
            return (RunStatus::NoResultsDir, summary);
        }

        let mut plots_dir_ready = false;

        for entry in discover(&self.config) {
            let path = match entry {
                Discovered::Found(path) => path,
                Discovered::Missing(path) => {
                    warn!("Skipping missing {}", path.display());
                    summary.skipped.push((path, SkipReason::Missing));
                    continue;
                }
            };

            match self.process(&path, &mut plots_dir_ready) {
                Ok(out) => summary.written.push(out),
                Err(FileError::Skip(reason)) => summary.skipped.push((path, reason)),
                Err(FileError::Fatal(err)) => {
                    error!("Plot generation failed: {err}");
                    if let Some(hint) = err.hint() {
                        error!("{hint}");
                    }
                    return (RunStatus::PlottingUnavailable, summary);
                }
            }
        }

        info!("Done");
        (RunStatus::Success, summary)
    }

    fn process(&self, path: &Path, plots_dir_ready: &mut bool) -> Result<PathBuf, FileError> {
        let config = &self.config;

        let file = load_csv(path, &config.time_column).map_err(|e| {
            warn!("Failed to read {}: {e}", path.display());
            FileError::Skip(SkipReason::Unreadable(e.to_string()))
        })?;

        if file.is_empty() {
            warn!("No records in {}", path.display());
            return Err(FileError::Skip(SkipReason::Empty));
        }

        let fields = select_fields(
            &file,
            &config.canonical_fields,
            config.fallback_field_count,
            &config.time_column,
        );
        if fields.is_empty() {
            warn!("No plottable fields in {}", path.display());
            return Err(FileError::Skip(SkipReason::NoFields));
        }

        if !*plots_dir_ready {
            let dir = config.plots_dir();
            fs::create_dir_all(&dir).map_err(|source| {
                FileError::from_render(RenderError::Io { path: dir.clone(), source })
            })?;
            *plots_dir_ready = true;
        }

        let out = config.output_path(path);
        let spec = PlotSpec::new(&file, fields, &config.time_column, &config.x_label);
        self.renderer
            .render(&file, &spec, &out)
            .map_err(FileError::from_render)?;

        info!("Wrote {}", out.display());
        Ok(out)
    }
}

enum FileError {
    Skip(SkipReason),
    Fatal(RenderError),
}

impl FileError {
    fn from_render(err: RenderError) -> Self {
        if err.is_fatal() {
            FileError::Fatal(err)
        } else {
            warn!("Plot generation failed: {err}");
            FileError::Skip(SkipReason::RenderFailed(err.to_string()))
        }
    }
}
