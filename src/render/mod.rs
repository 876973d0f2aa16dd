/// Rendering layer: a pluggable plotting backend behind [`Renderer`].
///
/// The renderer never probes for a plotting library itself. The caller
/// injects a backend (or the error explaining why none is available), and
/// [`Renderer::render`] surfaces that as [`RenderError::Environment`].

pub mod color;
pub mod raster;
pub mod series;

use std::path::Path;

use crate::data::model::{PlotSpec, ResultFile};
use crate::error::RenderError;

/// Something that can turn a [`PlotSpec`] into an image file.
pub trait PlotBackend {
    /// Short name for log lines.
    fn name(&self) -> &str;

    /// Draw one stacked-panel figure and write it to `out`.
    fn render(&self, file: &ResultFile, spec: &PlotSpec, out: &Path) -> Result<(), RenderError>;
}

enum Capability {
    Ready(Box<dyn PlotBackend>),
    Unavailable { reason: String, hint: String },
}

pub struct Renderer {
    capability: Capability,
}

impl Renderer {
    pub fn new(backend: impl PlotBackend + 'static) -> Self {
        Renderer {
            capability: Capability::Ready(Box::new(backend)),
        }
    }

    /// A renderer with no backend; every render fails with `Environment`.
    pub fn unavailable(reason: impl Into<String>, hint: impl Into<String>) -> Self {
        Renderer {
            capability: Capability::Unavailable {
                reason: reason.into(),
                hint: hint.into(),
            },
        }
    }

    /// Wrap the result of a backend probe. Non-environment probe errors are
    /// folded into an unavailable renderer as well.
    pub fn from_probe<B: PlotBackend + 'static>(probe: Result<B, RenderError>) -> Self {
        match probe {
            Ok(backend) => Renderer::new(backend),
            Err(RenderError::Environment { reason, hint }) => Renderer::unavailable(reason, hint),
            Err(other) => Renderer::unavailable(other.to_string(), raster::FONT_HINT),
        }
    }

    pub fn render(&self, file: &ResultFile, spec: &PlotSpec, out: &Path) -> Result<(), RenderError> {
        match &self.capability {
            Capability::Ready(backend) => {
                log::debug!(
                    "Rendering {} panel(s) for {} with {}",
                    spec.fields.len(),
                    spec.title,
                    backend.name()
                );
                backend.render(file, spec, out)
            }
            Capability::Unavailable { reason, hint } => Err(RenderError::Environment {
                reason: reason.clone(),
                hint: hint.clone(),
            }),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use std::path::PathBuf;

    /// Records each call and writes a placeholder file.
    #[derive(Default)]
    pub(crate) struct RecordingBackend {
        pub calls: RefCell<Vec<(PathBuf, PlotSpec)>>,
    }

    impl PlotBackend for RecordingBackend {
        fn name(&self) -> &str {
            "recording"
        }

        fn render(&self, _file: &ResultFile, spec: &PlotSpec, out: &Path) -> Result<(), RenderError> {
            fs::write(out, b"png").map_err(|source| RenderError::Io {
                path: out.to_path_buf(),
                source,
            })?;
            self.calls.borrow_mut().push((out.to_path_buf(), spec.clone()));
            Ok(())
        }
    }

    fn sample() -> (ResultFile, PlotSpec) {
        let file = ResultFile::new(
            "hfi_test",
            vec!["time".into(), "id".into()],
            vec![[("time", 0.0), ("id", 1.0)].into_iter().collect()],
        );
        let spec = PlotSpec::new(&file, vec!["id".into()], "time", "time [s]");
        (file, spec)
    }

    #[test]
    fn test_unavailable_renderer_returns_environment_error() {
        let (file, spec) = sample();
        let renderer = Renderer::unavailable("no font", "install fonts");

        let err = renderer.render(&file, &spec, Path::new("x.png")).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(err.hint(), Some("install fonts"));
    }

    #[test]
    fn test_ready_renderer_delegates() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("hfi_test.png");
        let (file, spec) = sample();

        let renderer = Renderer::new(RecordingBackend::default());
        renderer.render(&file, &spec, &out).unwrap();
        assert!(out.exists());
    }

    #[test]
    fn test_from_probe_keeps_environment_hint() {
        let probe: Result<RecordingBackend, RenderError> = Err(RenderError::Environment {
            reason: "missing".into(),
            hint: "do this".into(),
        });
        let renderer = Renderer::from_probe(probe);
        let (file, spec) = sample();
        let err = renderer.render(&file, &spec, Path::new("x.png")).unwrap_err();
        assert_eq!(err.hint(), Some("do this"));
    }
}
