//! Error types for registry operations.
//!
//! This module defines [`RegistryError`], the error type used throughout the
//! crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A missing resource is never an error: lookups return `Option`
//! - Use `RegistryError` for contract violations and invalid input
//! - User-supplied validator factories report failures as `anyhow::Error`,
//!   wrapped in [`RegistryError::ValidatorFactory`]

use thiserror::Error;

/// Core error type for registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// `warn` was called without a message template.
    #[error("`warn(condition, format, ...args)` requires a warning message argument")]
    MissingWarningMessage,

    /// A kind name is not a valid identifier.
    #[error("Invalid resource kind: '{name}'")]
    InvalidKind { name: String },

    /// A `/.../` validator pattern did not compile.
    #[error("Invalid validator pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A validator factory rejected its configuration.
    #[error("Validator factory '{name}' failed: {source}")]
    ValidatorFactory {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// Failed to parse registry configuration.
    #[error("Failed to parse registry config: {message}")]
    ConfigParseError { message: String },

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_warning_message_mentions_format() {
        let err = RegistryError::MissingWarningMessage;
        assert!(err.to_string().contains("requires a warning message"));
    }

    #[test]
    fn invalid_kind_displays_name() {
        let err = RegistryError::InvalidKind {
            name: "9lives".into(),
        };
        assert!(err.to_string().contains("9lives"));
    }

    #[test]
    fn invalid_pattern_displays_pattern_and_message() {
        let err = RegistryError::InvalidPattern {
            pattern: "/(/".into(),
            message: "unclosed group".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/(/"));
        assert!(msg.contains("unclosed group"));
    }

    #[test]
    fn validator_factory_keeps_source() {
        let err = RegistryError::ValidatorFactory {
            name: "minLength".into(),
            source: anyhow::anyhow!("missing 'min'"),
        };
        assert!(err.to_string().contains("minLength"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn config_parse_error_displays_message() {
        let err = RegistryError::ConfigParseError {
            message: "invalid type".into(),
        };
        assert!(err.to_string().contains("invalid type"));
    }

    #[test]
    fn anyhow_error_converts() {
        let err: RegistryError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, RegistryError::Other(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(RegistryError::MissingWarningMessage)
        }
        assert!(returns_error().is_err());
    }
}
