/// Result alias for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised while setting up a storm.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A config value is out of range.
    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),
}
