//! Error types for request assembly.

/// A required selection was missing when a request was built.
///
/// Sessions only build requests after validation passes, so these surface
/// contract violations by the caller rather than user mistakes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("no algorithm selected")]
    MissingAlgorithm,

    #[error("no algorithms selected")]
    MissingAlgorithms,

    #[error("no fitness function selected")]
    MissingFunction,

    #[error("no fitness functions selected")]
    MissingFunctions,
}

/// Result type for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
