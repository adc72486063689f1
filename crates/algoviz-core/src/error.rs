//! Error types for the playback engine.

use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Fault raised while resuming a producer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProducerError {
    #[error("producer panicked: {0}")]
    Panicked(String),

    #[error("producer suspended without emitting a snapshot")]
    Stalled,
}

/// Engine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no algorithm loaded")]
    NoAlgorithm,

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("algorithm {algorithm} has no operation named {operation}")]
    UnknownOperation { algorithm: String, operation: String },

    #[error("algorithm {0} runs autonomously and accepts no commands")]
    NotInteractive(String),

    #[error("algorithm {algorithm} has no button {button}")]
    UnknownControl { algorithm: String, button: String },

    #[error("producer fault in {algorithm}: {source}")]
    ProducerFault {
        algorithm: String,
        #[source]
        source: ProducerError,
    },

    #[error("playback driver has stopped")]
    DriverStopped,
}

impl EngineError {
    /// Configuration errors leave the engine untouched.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            EngineError::ProducerFault { .. } | EngineError::DriverStopped
        )
    }
}
