//! Change classifications
//!
//! [`ChangeType`] classifies the effect of a deployment on a whole resource,
//! [`PropertyChangeType`] the effect on a single property inside it.
//!
//! Both decode leniently: a string the model does not know is kept verbatim
//! in the `Unrecognized` variant and encodes back unchanged. Use
//! `parse_strict` (or [`DecodeOptions::strict_enums`](crate::DecodeOptions))
//! to reject such strings instead.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::UnrecognizedEnumError;

/// Effect a deployment will have on a resource
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ChangeType {
    /// Resource does not exist and will be created
    Create,
    /// Resource exists and will be deleted (complete mode only)
    Delete,
    /// Resource will be redeployed; properties may or may not change
    Deploy,
    /// Resource exists but is not in the template and will be left alone
    Ignore,
    /// Resource exists and its properties will change
    Modify,
    /// Resource exists and will be redeployed unchanged
    NoChange,
    /// Service could not evaluate the resource
    Unsupported,
    /// String not known to this model, kept as received
    Unrecognized(String),
}

impl ChangeType {
    /// Name used in errors
    pub const KIND: &'static str = "ChangeType";

    /// Every variant the model knows, in wire order
    pub const KNOWN: [ChangeType; 7] = [
        Self::Create,
        Self::Delete,
        Self::Deploy,
        Self::Ignore,
        Self::Modify,
        Self::NoChange,
        Self::Unsupported,
    ];

    /// Wire string for this change type
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Create => "Create",
            Self::Delete => "Delete",
            Self::Deploy => "Deploy",
            Self::Ignore => "Ignore",
            Self::Modify => "Modify",
            Self::NoChange => "NoChange",
            Self::Unsupported => "Unsupported",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Parse, rejecting strings that match no known variant
    ///
    /// # Errors
    /// Returns [`UnrecognizedEnumError`] for unknown strings
    pub fn parse_strict(s: &str) -> Result<Self, UnrecognizedEnumError> {
        match Self::from(s) {
            Self::Unrecognized(raw) => Err(UnrecognizedEnumError::new(Self::KIND, raw)),
            known => Ok(known),
        }
    }

    /// Check if the string matched a known variant
    #[inline]
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Check if applying the deployment alters the resource
    ///
    /// `NoChange`, `Ignore` and `Unsupported` do not; unrecognized values are
    /// assumed to.
    #[inline]
    #[must_use]
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::NoChange | Self::Ignore | Self::Unsupported)
    }
}

impl From<&str> for ChangeType {
    fn from(s: &str) -> Self {
        match s {
            "Create" => Self::Create,
            "Delete" => Self::Delete,
            "Deploy" => Self::Deploy,
            "Ignore" => Self::Ignore,
            "Modify" => Self::Modify,
            "NoChange" => Self::NoChange,
            "Unsupported" => Self::Unsupported,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for ChangeType {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Unrecognized(_) => Self::Unrecognized(s),
            known => known,
        }
    }
}

impl FromStr for ChangeType {
    type Err = UnrecognizedEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_strict(s)
    }
}

impl Display for ChangeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ChangeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Effect a deployment will have on a single property
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "String")]
pub enum PropertyChangeType {
    /// Property will be added
    Create,
    /// Property will be removed
    Delete,
    /// Array property; see children for element changes
    Array,
    /// Property value will change
    Modify,
    /// Property differs but the service will not act on it
    NoEffect,
    /// String not known to this model, kept as received
    Unrecognized(String),
}

impl PropertyChangeType {
    /// Name used in errors
    pub const KIND: &'static str = "PropertyChangeType";

    /// Every variant the model knows, in wire order
    pub const KNOWN: [PropertyChangeType; 5] = [
        Self::Create,
        Self::Delete,
        Self::Array,
        Self::Modify,
        Self::NoEffect,
    ];

    /// Wire string for this property change type
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Create => "Create",
            Self::Delete => "Delete",
            Self::Array => "Array",
            Self::Modify => "Modify",
            Self::NoEffect => "NoEffect",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Parse, rejecting strings that match no known variant
    ///
    /// # Errors
    /// Returns [`UnrecognizedEnumError`] for unknown strings
    pub fn parse_strict(s: &str) -> Result<Self, UnrecognizedEnumError> {
        match Self::from(s) {
            Self::Unrecognized(raw) => Err(UnrecognizedEnumError::new(Self::KIND, raw)),
            known => Ok(known),
        }
    }

    /// Check if the string matched a known variant
    #[inline]
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<&str> for PropertyChangeType {
    fn from(s: &str) -> Self {
        match s {
            "Create" => Self::Create,
            "Delete" => Self::Delete,
            "Array" => Self::Array,
            "Modify" => Self::Modify,
            "NoEffect" => Self::NoEffect,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for PropertyChangeType {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Unrecognized(_) => Self::Unrecognized(s),
            known => known,
        }
    }
}

impl FromStr for PropertyChangeType {
    type Err = UnrecognizedEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_strict(s)
    }
}

impl Display for PropertyChangeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PropertyChangeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
