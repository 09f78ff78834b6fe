//! Error types for the Rain or Rainier service
//!
//! The interpretation engine is total and never returns these; they cover
//! configuration and upstream fetching.

use thiserror::Error;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum RainierError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Upstream payload could not be decoded
    #[error("Parse error: {message}")]
    Parse { message: String },
}

impl RainierError {
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

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for RainierError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RainierError::parse(err.to_string())
        } else {
            RainierError::api(err.to_string())
        }
    }
}

impl From<reqwest_middleware::Error> for RainierError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(err) => err.into(),
            reqwest_middleware::Error::Middleware(err) => RainierError::api(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = RainierError::config("bad port");
        assert!(matches!(config_err, RainierError::Config { .. }));

        let api_err = RainierError::api("connection failed");
        assert!(matches!(api_err, RainierError::Api { .. }));

        let parse_err = RainierError::parse("expected array");
        assert!(matches!(parse_err, RainierError::Parse { .. }));
    }

    #[test]
    fn test_display_carries_message() {
        let err = RainierError::api("https://example.test responded with 503");
        assert_eq!(
            err.to_string(),
            "API error: https://example.test responded with 503"
        );
    }
}
