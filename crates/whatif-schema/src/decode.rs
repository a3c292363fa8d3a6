//! Decoding and encoding what-if documents
//!
//! Decoding is a single pure transformation from bytes to [`WhatIfResult`].
//! [`DecodeOptions`] controls how strictly enum symbols are checked and how
//! deep property change trees may nest.

use serde::{Deserialize, Serialize};

use crate::change_type::{ChangeType, PropertyChangeType};
use crate::error::{DecodeError, OptionsError, SchemaError, UnrecognizedEnumError};
use crate::model::{ResourceChange, WhatIfResult};
use crate::property::PropertyChange;

/// Default limit on property change tree depth
///
/// Each tree level costs two JSON nesting levels, so this stays well inside
/// `serde_json`'s recursion limit.
pub const DEFAULT_MAX_PROPERTY_DEPTH: usize = 32;

/// Decoder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Reject enum strings the model does not know instead of preserving them
    pub strict_enums: bool,
    /// Maximum property change tree depth accepted from a delta
    pub max_property_depth: usize,
}

impl DecodeOptions {
    /// Create default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With strict enum checking
    #[inline]
    #[must_use]
    pub fn with_strict_enums(mut self, strict: bool) -> Self {
        self.strict_enums = strict;
        self
    }

    /// With property tree depth limit
    #[inline]
    #[must_use]
    pub fn with_max_property_depth(mut self, depth: usize) -> Self {
        self.max_property_depth = depth;
        self
    }

    /// Load options from a TOML document
    ///
    /// Missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns error if the document is not valid TOML for these options
    pub fn from_toml_str(s: &str) -> Result<Self, OptionsError> {
        let options: Self = toml::from_str(s)?;
        if options.max_property_depth == 0 {
            return Err(OptionsError::Invalid(
                "max_property_depth must be at least 1".to_string(),
            ));
        }
        Ok(options)
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict_enums: false,
            max_property_depth: DEFAULT_MAX_PROPERTY_DEPTH,
        }
    }
}

/// What-if document decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    /// Create decoder with options
    #[inline]
    #[must_use]
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    #[inline]
    #[must_use]
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode a what-if document from JSON bytes
    ///
    /// # Errors
    /// Returns error if the bytes are not well-formed JSON, a required field
    /// is missing or has the wrong shape, or (strict only) a change type is
    /// not recognized.
    pub fn decode(&self, bytes: &[u8]) -> Result<WhatIfResult, DecodeError> {
        let result: WhatIfResult = serde_json::from_slice(bytes)?;
        self.check_change_types(&result)?;

        tracing::debug!(
            status = result.status(),
            correlation_id = result.properties().correlation_id(),
            changes = result.changes().len(),
            "decoded what-if result"
        );
        Ok(result)
    }

    /// Decode a what-if document from a JSON string
    ///
    /// # Errors
    /// Same as [`Decoder::decode`]
    #[inline]
    pub fn decode_str(&self, s: &str) -> Result<WhatIfResult, DecodeError> {
        self.decode(s.as_bytes())
    }

    /// Parse a change's delta into property change trees
    ///
    /// # Errors
    /// Returns error if the delta is malformed, too deep, or (strict only)
    /// carries an unrecognized property change type.
    pub fn property_changes(&self, change: &ResourceChange) -> Result<Vec<PropertyChange>, SchemaError> {
        let trees = change.property_changes_with_limit(self.options.max_property_depth)?;

        for tree in &trees {
            if let Some(unknown) = tree.first_unrecognized() {
                let err = UnrecognizedEnumError::new(PropertyChangeType::KIND, unknown.as_str());
                if self.options.strict_enums {
                    return Err(DecodeError::from(err).into());
                }
                tracing::warn!(resource_id = change.resource_id(), "{err}; preserving");
            }
        }
        Ok(trees)
    }

    fn check_change_types(&self, result: &WhatIfResult) -> Result<(), DecodeError> {
        for change in result.changes() {
            let change_type = change.change_type();
            if change_type.is_recognized() {
                continue;
            }
            let err = UnrecognizedEnumError::new(ChangeType::KIND, change_type.as_str());
            if self.options.strict_enums {
                return Err(err.into());
            }
            tracing::warn!(resource_id = change.resource_id(), "{err}; preserving");
        }
        Ok(())
    }
}

/// Decode a what-if document with default options
///
/// # Examples
/// ```
/// let doc = br#"{"status":"Succeeded","properties":{"correlationId":"abc-123"}}"#;
/// let result = whatif_schema::decode(doc).unwrap();
/// assert_eq!(result.properties().correlation_id(), "abc-123");
/// assert!(result.changes().is_empty());
/// ```
///
/// # Errors
/// Returns error if the bytes are not a well-formed what-if document
#[inline]
pub fn decode(bytes: &[u8]) -> Result<WhatIfResult, DecodeError> {
    Decoder::default().decode(bytes)
}

/// Decode a what-if document from a string with default options
///
/// # Errors
/// Returns error if the string is not a well-formed what-if document
#[inline]
pub fn decode_str(s: &str) -> Result<WhatIfResult, DecodeError> {
    Decoder::default().decode_str(s)
}

/// Encode a what-if document as compact JSON
///
/// # Errors
/// Returns error if serialization fails
pub fn encode(result: &WhatIfResult) -> Result<Vec<u8>, DecodeError> {
    serde_json::to_vec(result).map_err(|e| DecodeError::Encode(e.to_string()))
}

/// Encode a what-if document as indented JSON
///
/// # Errors
/// Returns error if serialization fails
pub fn encode_pretty(result: &WhatIfResult) -> Result<String, DecodeError> {
    serde_json::to_string_pretty(result).map_err(|e| DecodeError::Encode(e.to_string()))
}
