use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// The request body cannot be turned into its canonical text form.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The outgoing request is malformed (unparseable URL, missing method).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
