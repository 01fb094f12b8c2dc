/// Domain-level error type shared by core modules.
///
/// The API crate maps these onto HTTP responses; see
/// `einsert-api/src/error.rs`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Input failed validation (mismatched lengths, non-finite values, ...).
    #[error("{0}")]
    Validation(String),

    /// An unexpected internal failure.
    #[error("{0}")]
    Internal(String),
}
