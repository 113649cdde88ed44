//! Error types and result aliases for the logprint library.
//!
//! This module defines the core error type [`LogPrintError`] and the [`Result`] type alias.
//! Only configuration loading, the fallible codec entry points and logging bootstrap return
//! errors; the interception path itself never does.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogPrintError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Invalid level for {key}: {value}")]
    InvalidLevel { key: String, value: String },

    #[error("Root wrapper error: {0}")]
    RootError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LogPrintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = LogPrintError::ConfigError("subscriber already set".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: subscriber already set");
    }

    #[test]
    fn test_invalid_level_display() {
        let err = LogPrintError::InvalidLevel {
            key: "logger_dao_level".to_string(),
            value: "loud".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid level for logger_dao_level: loud");
    }

    #[test]
    fn test_root_error_display() {
        let err = LogPrintError::RootError("expected Order".to_string());
        assert_eq!(err.to_string(), "Root wrapper error: expected Order");
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: LogPrintError = json_err.into();

        match err {
            LogPrintError::SerializationError(_) => {}
            _ => panic!("Expected SerializationError"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LogPrintError = io_err.into();

        match err {
            LogPrintError::IoError(_) => {}
            _ => panic!("Expected IoError"),
        }
    }

    #[test]
    fn test_result_type() {
        let ok_result: Result<i32> = Ok(42);
        assert!(ok_result.is_ok());

        let err_result: Result<i32> = Err(LogPrintError::ConfigError("test".to_string()));
        assert!(err_result.is_err());
    }
}
