/// Convenience result type used across the crate.
pub type GridResult<T> = Result<T, GridError>;

#[derive(thiserror::Error, Debug)]
/// Top-level error type for grid construction, mask generation and rendering.
pub enum GridError {
    #[error("validation error: {0}")]
    /// Invalid configuration or construction input.
    Validation(String),

    #[error("mask error: {0}")]
    /// Mask raster could not be generated or loaded.
    Mask(String),

    #[error("render error: {0}")]
    /// Draw-surface failure.
    Render(String),

    #[error("serialization error: {0}")]
    /// Config (de)serialization failure.
    Serde(String),

    #[error(transparent)]
    /// Wrapped lower-level error.
    Other(#[from] anyhow::Error),
}

impl GridError {
    /// Build a [`GridError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GridError::Mask`] value.
    pub fn mask(msg: impl Into<String>) -> Self {
        Self::Mask(msg.into())
    }

    /// Build a [`GridError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`GridError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
