/// Convenience result type used across fotolito.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Top-level error taxonomy used by compositor APIs.
#[derive(thiserror::Error, Debug)]
pub enum CanvasError {
    /// The input bytes could not be decoded into an image.
    #[error("decode error: {0}")]
    Decode(String),

    /// Export was requested in a format the encoder does not support.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A parameter had no safe clamp (for example a zero-sized target).
    #[error("parameter out of range: {field} = {value}")]
    ParameterOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Offending value, rendered for display.
        value: String,
    },

    /// Invalid parameter or config files and color strings.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CanvasError {
    /// Build a [`CanvasError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`CanvasError::UnsupportedFormat`] value.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat(format.into())
    }

    /// Build a [`CanvasError::ParameterOutOfRange`] value.
    pub fn out_of_range(field: &'static str, value: impl std::fmt::Display) -> Self {
        Self::ParameterOutOfRange {
            field,
            value: value.to_string(),
        }
    }

    /// Build a [`CanvasError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
