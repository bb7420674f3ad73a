/// Convenience result type used across layerkit.
pub type LayerkitResult<T> = Result<T, LayerkitError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Plan compilation never produces one of these: resolution misses degrade to visual
/// defaults. Errors come from host-facing IO, parsing and pixel-backend allocation.
#[derive(thiserror::Error, Debug)]
pub enum LayerkitError {
    /// Invalid user-provided or project data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An asset reference could not be read or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Pixel backend failures (surface allocation, buffer size mismatches).
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayerkitError {
    /// Build a [`LayerkitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LayerkitError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`LayerkitError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`LayerkitError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for LayerkitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
