/// Errors raised by the pure domain layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An input failed a domain-level validity check.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The caller's session role does not permit the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}
