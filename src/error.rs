//! Error types and handling for the `AgroCast` application

use thiserror::Error;

/// Main error type for the `AgroCast` application
///
/// Advisory computations never construct these; they always return a
/// best-effort result. Errors arise only at the boundaries: configuration,
/// network fetches, caching and I/O.
#[derive(Error, Debug)]
pub enum AgroCastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Cache operation errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl AgroCastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AgroCastError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            AgroCastError::Api { .. } => {
                "Unable to reach the weather service. Please check your internet connection."
                    .to_string()
            }
            AgroCastError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            AgroCastError::Cache { .. } => {
                "Cache operation failed. You may need to clear your cache.".to_string()
            }
            AgroCastError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            AgroCastError::General { message } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = AgroCastError::config("missing cache path");
        assert!(matches!(config_err, AgroCastError::Config { .. }));

        let api_err = AgroCastError::api("connection failed");
        assert!(matches!(api_err, AgroCastError::Api { .. }));

        let validation_err = AgroCastError::validation("unknown crop id");
        assert!(matches!(validation_err, AgroCastError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = AgroCastError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let api_err = AgroCastError::api("test");
        assert!(api_err.user_message().contains("Unable to reach"));

        let validation_err = AgroCastError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AgroCastError = io_err.into();
        assert!(matches!(app_err, AgroCastError::Io { .. }));
    }
}
