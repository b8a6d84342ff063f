//! Severity levels for events
//!
//! Severity serves two purposes: it classifies an event, and it drives the
//! threshold filter in the logging pipeline. The five levels form a total
//! order (`DEBUG < INFO < WARNING < ERROR < CRITICAL`) so that "at or above
//! threshold" is a plain comparison.

use crate::error::CadenzaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordinal severity level of an event.
///
/// Serialized as its numeric ordinal so that records written by one process
/// compare and sort identically when read back by another.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
    Critical = 4,
}

impl Severity {
    /// All levels in ascending order.
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    /// Canonical upper-case name of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> u8 {
        severity as u8
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(ordinal: u8) -> std::result::Result<Self, String> {
        match ordinal {
            0 => Ok(Severity::Debug),
            1 => Ok(Severity::Info),
            2 => Ok(Severity::Warning),
            3 => Ok(Severity::Error),
            4 => Ok(Severity::Critical),
            other => Err(format!("severity ordinal out of range: {}", other)),
        }
    }
}

impl FromStr for Severity {
    type Err = CadenzaError;

    /// Parse a level name, case-insensitively.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARNING" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            "CRITICAL" => Ok(Severity::Critical),
            other => Err(CadenzaError::ConfigError(format!(
                "unrecognized severity level: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Critical);
    }

    #[test]
    fn test_severity_ordinals() {
        assert_eq!(u8::from(Severity::Debug), 0);
        assert_eq!(u8::from(Severity::Info), 1);
        assert_eq!(u8::from(Severity::Warning), 2);
        assert_eq!(u8::from(Severity::Error), 3);
        assert_eq!(u8::from(Severity::Critical), 4);
    }

    #[test]
    fn test_severity_from_ordinal() {
        for level in Severity::ALL {
            assert_eq!(Severity::try_from(u8::from(level)).unwrap(), level);
        }
        assert!(Severity::try_from(5).is_err());
    }

    #[test]
    fn test_severity_serialization() {
        assert_eq!(serde_json::to_string(&Severity::Info).unwrap(), "1");
        assert_eq!(serde_json::from_str::<Severity>("4").unwrap(), Severity::Critical);
        assert!(serde_json::from_str::<Severity>("9").is_err());
    }

    #[test]
    fn test_severity_parse_case_insensitive() {
        assert_eq!("debug".parse::<Severity>().unwrap(), Severity::Debug);
        assert_eq!("Warning".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("CRITICAL".parse::<Severity>().unwrap(), Severity::Critical);
    }

    #[test]
    fn test_severity_parse_unrecognized() {
        let err = "VERBOSE".parse::<Severity>().unwrap_err();
        match err {
            CadenzaError::ConfigError(msg) => assert!(msg.contains("VERBOSE")),
            _ => panic!("Expected ConfigError"),
        }
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Info.to_string(), "INFO");
        assert_eq!(Severity::Error.to_string(), "ERROR");
    }
}
