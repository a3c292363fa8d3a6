//! Error types for the what-if schema model
//!
//! Provides error handling for:
//! - Decode operations (bytes → `WhatIfResult`)
//! - Enum symbols the model does not know
//! - Snapshot and delta access (schema-free JSON → queryable value)
//! - Loading decode options

use crate::query::QueryPathError;

/// Enum string that matches no known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind} value: '{value}'")]
pub struct UnrecognizedEnumError {
    /// Name of the enum being decoded (`ChangeType`, `PropertyChangeType`)
    pub kind: &'static str,
    /// Raw string as received
    pub value: String,
}

impl UnrecognizedEnumError {
    /// Create error for enum `kind`
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Errors turning bytes into a typed result (and back)
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Input is not well-formed JSON or a required field has the wrong shape
    #[error("invalid what-if document: {0}")]
    Json(#[from] serde_json::Error),

    /// Enum string rejected under strict decoding
    #[error(transparent)]
    UnrecognizedEnum(#[from] UnrecognizedEnumError),

    /// Serializing a value back to JSON failed
    #[error("encoding failed: {0}")]
    Encode(String),
}

impl DecodeError {
    /// Returns the rejected enum symbol, if that is what failed
    #[must_use]
    pub fn unrecognized_enum(&self) -> Option<&UnrecognizedEnumError> {
        match self {
            Self::UnrecognizedEnum(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors accessing schema-free content of a change
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Field was not present in the document
    #[error("'{field}' is absent")]
    Absent {
        /// Name of the missing field
        field: &'static str,
    },

    /// Field was present but could not be interpreted
    #[error("'{field}' is malformed: {message}")]
    Malformed {
        /// Name of the offending field
        field: &'static str,
        /// What was wrong with it
        message: String,
    },

    /// Lookup path did not resolve
    #[error("path not found: {0}")]
    PathNotFound(String),

    /// Lookup path could not be parsed
    #[error("invalid path: {0}")]
    InvalidPath(#[from] QueryPathError),

    /// Property change tree deeper than allowed
    #[error("property change tree exceeds depth limit of {limit}")]
    TooDeep {
        /// Configured maximum depth
        limit: usize,
    },

    /// Value does not match the requested type
    #[error("typed conversion failed: {0}")]
    Typed(String),
}

impl ParseError {
    /// Create malformed error for field
    pub fn malformed(field: &'static str, message: impl Into<String>) -> Self {
        Self::Malformed {
            field,
            message: message.into(),
        }
    }
}

/// Errors loading [`DecodeOptions`](crate::DecodeOptions)
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    /// TOML document could not be read into options
    #[error("invalid options: {0}")]
    Toml(#[from] toml::de::Error),

    /// Options parsed but are not usable
    #[error("invalid options: {0}")]
    Invalid(String),
}

/// Combined schema model error
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Document could not be decoded or encoded
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Schema-free content could not be accessed
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Decoder options could not be loaded
    #[error("options error: {0}")]
    Options(#[from] OptionsError),
}

/// Result type alias for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_enum_display() {
        let err = UnrecognizedEnumError::new("ChangeType", "Weird");
        assert_eq!(err.to_string(), "unrecognized ChangeType value: 'Weird'");
    }

    #[test]
    fn decode_error_exposes_enum() {
        let err: DecodeError = UnrecognizedEnumError::new("ChangeType", "Weird").into();
        assert_eq!(err.unrecognized_enum().map(|e| e.value.as_str()), Some("Weird"));
        assert_eq!(err.to_string(), "unrecognized ChangeType value: 'Weird'");
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::Absent { field: "before" };
        assert_eq!(err.to_string(), "'before' is absent");

        let err = ParseError::malformed("after", "expected object");
        assert_eq!(err.to_string(), "'after' is malformed: expected object");
    }

    #[test]
    fn error_conversions() {
        let parse_err = ParseError::PathNotFound("a.b".to_string());
        let schema_err: SchemaError = parse_err.into();
        assert!(matches!(schema_err, SchemaError::Parse(_)));

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let schema_err: SchemaError = DecodeError::from(json_err).into();
        assert!(matches!(schema_err, SchemaError::Decode(DecodeError::Json(_))));
    }
}
