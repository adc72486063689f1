//! Error types for the visualization host.

use algoviz_core::{EngineError, Visualizer};
use thiserror::Error;

/// Result type for host operations.
pub type Result<T> = std::result::Result<T, VisError>;

/// A frame could not be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The frame's shape belongs to a different visualizer
    #[error("cannot display {found} data on a {expected} renderer")]
    CannotDisplay { expected: Visualizer, found: Visualizer },
}

/// Errors that can occur while hosting a visualization.
#[derive(Debug, Error)]
pub enum VisError {
    /// Engine or driver error
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Render error
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Playback stopped by a producer fault
    #[error("Playback fault in {algorithm}: {message}")]
    Fault { algorithm: String, message: String },

    /// Bad command line
    #[error("Usage error: {0}")]
    Usage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_both_visualizers() {
        let err = RenderError::CannotDisplay {
            expected: Visualizer::BarChart,
            found: Visualizer::Grid2d,
        };
        assert_eq!(err.to_string(), "cannot display grid-2d data on a bar-chart renderer");

        let wrapped = VisError::from(EngineError::UnknownAlgorithm("x".into()));
        assert!(wrapped.to_string().starts_with("Engine error:"));
    }
}
