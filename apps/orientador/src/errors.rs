use thiserror::Error;

/// Application-level error type.
///
/// LLM failures are deliberately absent: they are absorbed where the call is
/// made and never reach this type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Terminal I/O error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Question '{0}' was already answered")]
    DuplicateAnswer(String),

    #[error("Profile is closed; cannot record an answer for '{0}'")]
    ProfileClosed(String),
}
