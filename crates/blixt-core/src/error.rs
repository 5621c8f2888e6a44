/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised when building core values from user input.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A step index outside the defined sequence.
    #[error("invalid step {number}: expected 1-{count}")]
    InvalidStep {
        /// The 1-based step number that was requested.
        number: usize,
        /// How many steps exist.
        count: usize,
    },

    /// A point string that is not two comma-separated numbers.
    #[error("invalid point \"{0}\": expected X,Y")]
    InvalidPoint(String),
}
