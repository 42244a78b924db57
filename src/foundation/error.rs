/// Convenience result type used across memeforge.
pub type MemeResult<T> = Result<T, MemeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// None of these are fatal to a [`crate::MemeSession`]: each is reported once, at the call that
/// triggered it, and the session stays usable.
#[derive(thiserror::Error, Debug)]
pub enum MemeError {
    /// Image bytes could not be decoded (unsupported or corrupt file).
    #[error("decode error: {0}")]
    Decode(String),

    /// The current surface could not be encoded for export.
    #[error("export error: {0}")]
    Export(String),

    /// Invalid caller-provided data (style values, sizes).
    #[error("validation error: {0}")]
    Validation(String),

    /// The host cannot provide what rendering needs (surface too large, no caption font).
    #[error("environment error: {0}")]
    Environment(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MemeError {
    /// Build a [`MemeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`MemeError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`MemeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MemeError::Environment`] value.
    pub fn environment(msg: impl Into<String>) -> Self {
        Self::Environment(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
