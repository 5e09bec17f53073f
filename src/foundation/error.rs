/// Convenience result type used across scrollphase.
pub type ScrollPhaseResult<T> = Result<T, ScrollPhaseError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum ScrollPhaseError {
    /// Invalid user-provided geometry or content data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while building or sampling phase curves and sequences.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors from scroll regions, trigger positions or discrete triggers.
    #[error("trigger error: {0}")]
    Trigger(String),

    /// Invalid page configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollPhaseError {
    /// Build a [`ScrollPhaseError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollPhaseError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ScrollPhaseError::Trigger`] value.
    pub fn trigger(msg: impl Into<String>) -> Self {
        Self::Trigger(msg.into())
    }

    /// Build a [`ScrollPhaseError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ScrollPhaseError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
