//! Slider error types

use thiserror::Error;

/// Main slider error type
#[derive(Error, Debug)]
pub enum SliderError {
    // ===== Absorbed by the controller (logged, never surfaced) =====
    #[error("Render target missing: {0}")]
    ElementMissing(String),

    #[error("Media load failed for slide {index}: {reason}")]
    MediaLoad { index: usize, reason: String },

    #[error("Unknown effect: {0}")]
    UnknownEffect(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    // ===== Host errors (startup, configuration) =====
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SliderError {
    /// Is this error recoverable?
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SliderError::ElementMissing(_)
                | SliderError::MediaLoad { .. }
                | SliderError::UnknownEffect(_)
                | SliderError::UnknownCommand(_)
                | SliderError::InvalidParameter(_)
        )
    }

    /// Is this a fatal error?
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            SliderError::MediaLoad { index, .. } => format!("Image {} could not be loaded", index + 1),
            SliderError::UnknownEffect(name) => format!("No such effect: {}", name),
            SliderError::TomlDe(_) | SliderError::Config(_) => {
                "Settings file is invalid, defaults are used".to_string()
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SliderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(SliderError::ElementMissing("overlay".into()).is_recoverable());
        assert!(SliderError::MediaLoad { index: 0, reason: "404".into() }.is_recoverable());
        assert!(SliderError::Config("bad".into()).is_fatal());
    }

    #[test]
    fn test_user_message() {
        let err = SliderError::MediaLoad { index: 2, reason: "timeout".into() };
        assert_eq!(err.user_message(), "Image 3 could not be loaded");
        assert_eq!(
            SliderError::ElementMissing("indicators".into()).user_message(),
            "Render target missing: indicators"
        );
    }
}
