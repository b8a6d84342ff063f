//! Error types and result aliases for the Cadenza library.
//!
//! This module defines the core error type [`CadenzaError`] and the [`Result`] type alias
//! used throughout the library. All public APIs that can fail return `Result<T>` for
//! consistent error handling.
//!
//! Two variants anchor the error taxonomy of the event subsystem:
//!
//! - [`CadenzaError::ConfigError`] is fatal and surfaces exactly once, at initialization
//!   time (e.g. an unrecognized severity override in the environment).
//! - [`CadenzaError::ParseError`] is recoverable and local to the caller (e.g. a malformed
//!   serialized event record); callers should treat an unparseable historical record as
//!   best-effort-skippable.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CadenzaError {
    #[error("LLM gateway error: {0}")]
    GatewayError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Malformed event record: {0}")]
    ParseError(String),

    #[error("Tool error: {0}")]
    ToolError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, CadenzaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_display() {
        let err = CadenzaError::GatewayError("connection failed".to_string());
        assert_eq!(err.to_string(), "LLM gateway error: connection failed");
    }

    #[test]
    fn test_parse_error_display() {
        let err = CadenzaError::ParseError("expected value at line 1".to_string());
        assert_eq!(err.to_string(), "Malformed event record: expected value at line 1");
    }

    #[test]
    fn test_tool_error_display() {
        let err = CadenzaError::ToolError("invalid parameters".to_string());
        assert_eq!(err.to_string(), "Tool error: invalid parameters");
    }

    #[test]
    fn test_config_error_display() {
        let err = CadenzaError::ConfigError("unrecognized severity level".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: unrecognized severity level");
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: CadenzaError = json_err.into();

        match err {
            CadenzaError::SerializationError(_) => {}
            _ => panic!("Expected SerializationError"),
        }
    }

    #[test]
    fn test_error_debug() {
        let err = CadenzaError::ToolError("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("ToolError"));
    }

    #[test]
    fn test_result_type() {
        let ok_result: Result<i32> = Ok(42);
        assert!(ok_result.is_ok());

        let err_result: Result<i32> = Err(CadenzaError::ToolError("test".to_string()));
        assert!(err_result.is_err());
    }
}
