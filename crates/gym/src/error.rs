use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("batch size mismatch: expected {expected}, got {actual}")]
    BatchSize { expected: usize, actual: usize },
    #[error("step_wait called without a pending action batch")]
    NoPendingActions,
    #[error("invalid action: {0}")]
    InvalidAction(String),
    #[error("operation not supported: {0}")]
    NotSupported(&'static str),
}
