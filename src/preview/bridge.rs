use tracing::info;

use crate::error::SurfaceError;
use crate::types::ViewerConfig;

/// A sandboxed surface that renders a document with a viewer configuration.
///
/// The surface performs its own initial load; only after that load has
/// completed may `load` be called with a configuration.
pub trait RenderingSurface {
    /// Start the surface's own initial load. Completion is reported to the
    /// dialog separately, as a `DialogEvent::SurfaceLoaded`.
    fn begin_load(&mut self) -> Result<(), SurfaceError>;

    /// Replace the current rendering with `document_url` shown under `config`.
    fn load(&mut self, document_url: &str, config: ViewerConfig);
}

/// Exclusive channel into one rendering surface.
pub struct PreviewBridge<S> {
    surface: S,
    pushes: usize,
}

impl<S: RenderingSurface> PreviewBridge<S> {
    pub fn new(surface: S) -> Self {
        PreviewBridge { surface, pushes: 0 }
    }

    pub fn begin_load(&mut self) -> Result<(), SurfaceError> {
        self.surface.begin_load()
    }

    /// Hand a freshly resolved configuration to the surface. Fire-and-forget.
    pub fn push(&mut self, document_url: &str, config: ViewerConfig) {
        self.pushes += 1;
        info!(document_url, push = self.pushes, "pushing viewer config to surface");
        self.surface.load(document_url, config);
    }

    /// Number of configurations pushed so far.
    pub fn pushes(&self) -> usize {
        self.pushes
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
