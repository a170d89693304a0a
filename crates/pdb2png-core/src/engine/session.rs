use super::error::EngineError;
use super::traits::SceneEngine;
use tracing::debug;

/// Sole owner of a scene engine.
///
/// The engine's scene is process-wide mutable state. A `Session` hands out the
/// engine only through [`Session::begin`], which resets that state first, so
/// every render starts from an empty scene and nothing leaks between renders.
pub struct Session<E: SceneEngine> {
    engine: E,
    renders: usize,
}

impl<E: SceneEngine> Session<E> {
    pub fn new(engine: E) -> Self {
        Self { engine, renders: 0 }
    }

    /// Resets the scene and returns exclusive access to the engine for one render.
    pub fn begin(&mut self) -> Result<&mut E, EngineError> {
        self.renders += 1;
        debug!("Resetting scene for render #{}", self.renders);
        self.engine.reinitialize()?;
        Ok(&mut self.engine)
    }

    /// Number of renders started on this session.
    pub fn renders(&self) -> usize {
        self.renders
    }
}
