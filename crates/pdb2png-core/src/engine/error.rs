use crate::core::style::StyleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to start rendering engine '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Rendering engine process failed: {0}")]
    Process(String),

    #[error("Malformed reply from rendering engine: {0}")]
    Protocol(String),

    #[error("Engine command '{command}' failed: {message}")]
    Command { command: String, message: String },

    #[error("Selection '{selection}' matched no atoms")]
    EmptySelection { selection: String },

    #[error("Style error: {0}")]
    Style(#[from] StyleError),
}
