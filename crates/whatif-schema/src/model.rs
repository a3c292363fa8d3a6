//! What-if response documents
//!
//! Mirrors the body returned by the ARM `deployments/whatIf` operations.
//! Wire names are camelCase and must match verbatim. Fields the model does
//! not know are skipped on decode; optional fields that are absent stay
//! absent and are omitted again on encode.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::change_type::ChangeType;
use crate::decode;
use crate::error::{DecodeError, ParseError};
use crate::property::PropertyChange;
use crate::snapshot::Snapshot;
use crate::summary::ChangeSummary;

/// Status string of a completed what-if operation
pub const STATUS_SUCCEEDED: &str = "Succeeded";

/// Status string of a failed what-if operation
pub const STATUS_FAILED: &str = "Failed";

/// Top-level what-if response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfResult {
    status: String,

    #[serde(default)]
    properties: WhatIfProperties,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<ErrorInfo>,
}

impl WhatIfResult {
    /// Create result with status and properties
    #[inline]
    #[must_use]
    pub fn new(status: impl Into<String>, properties: WhatIfProperties) -> Self {
        Self {
            status: status.into(),
            properties,
            error: None,
        }
    }

    /// With error details
    #[inline]
    #[must_use]
    pub fn with_error(mut self, error: ErrorInfo) -> Self {
        self.error = Some(error);
        self
    }

    /// Decode from JSON bytes with default options
    ///
    /// # Errors
    /// Returns error if the bytes are not a well-formed what-if document
    #[inline]
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        decode::decode(bytes)
    }

    /// Status code reported by the service
    #[inline]
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Check if the operation succeeded
    #[inline]
    #[must_use]
    pub fn is_succeeded(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_SUCCEEDED)
    }

    /// Check if the operation failed
    #[inline]
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_FAILED)
    }

    /// Change set
    #[inline]
    #[must_use]
    pub fn properties(&self) -> &WhatIfProperties {
        &self.properties
    }

    /// Error details, present only on failure
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    /// Shortcut for `properties().changes()`
    #[inline]
    #[must_use]
    pub fn changes(&self) -> &[ResourceChange] {
        &self.properties.changes
    }

    /// Count of changes per change type
    #[must_use]
    pub fn summary(&self) -> ChangeSummary {
        self.changes().iter().collect()
    }
}

impl FromStr for WhatIfResult {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode::decode_str(s)
    }
}

/// Change set of a what-if operation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfProperties {
    #[serde(default)]
    correlation_id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    changes: Vec<ResourceChange>,
}

impl WhatIfProperties {
    /// Create properties for correlation ID
    #[inline]
    #[must_use]
    pub fn new(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            changes: Vec::new(),
        }
    }

    /// With change appended
    #[inline]
    #[must_use]
    pub fn with_change(mut self, change: ResourceChange) -> Self {
        self.changes.push(change);
        self
    }

    /// With all changes appended
    #[inline]
    #[must_use]
    pub fn with_changes(mut self, changes: impl IntoIterator<Item = ResourceChange>) -> Self {
        self.changes.extend(changes);
        self
    }

    /// Tracing token tying the request to server-side logs
    #[inline]
    #[must_use]
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    /// Predicted resource changes, in document order
    #[inline]
    #[must_use]
    pub fn changes(&self) -> &[ResourceChange] {
        &self.changes
    }
}

/// Predicted change to one resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceChange {
    resource_id: String,

    change_type: ChangeType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    before: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    after: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    delta: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    unsupported_reason: Option<String>,
}

impl ResourceChange {
    /// Create change for resource
    #[inline]
    #[must_use]
    pub fn new(resource_id: impl Into<String>, change_type: ChangeType) -> Self {
        Self {
            resource_id: resource_id.into(),
            change_type,
            before: None,
            after: None,
            delta: None,
            unsupported_reason: None,
        }
    }

    /// With state before the deployment
    ///
    /// JSON null means no state and leaves the field absent.
    #[inline]
    #[must_use]
    pub fn with_before(mut self, before: Value) -> Self {
        self.before = present(before);
        self
    }

    /// With state after the deployment
    ///
    /// JSON null means no state and leaves the field absent.
    #[inline]
    #[must_use]
    pub fn with_after(mut self, after: Value) -> Self {
        self.after = present(after);
        self
    }

    /// With raw property-level delta
    #[inline]
    #[must_use]
    pub fn with_delta(mut self, delta: Value) -> Self {
        self.delta = present(delta);
        self
    }

    /// With delta built from property change trees
    ///
    /// # Errors
    /// Returns error if the changes cannot be represented as JSON
    pub fn with_property_changes(mut self, changes: &[PropertyChange]) -> Result<Self, DecodeError> {
        let delta = serde_json::to_value(changes).map_err(|e| DecodeError::Encode(e.to_string()))?;
        self.delta = Some(delta);
        Ok(self)
    }

    /// With reason the service could not evaluate the resource
    #[inline]
    #[must_use]
    pub fn with_unsupported_reason(mut self, reason: impl Into<String>) -> Self {
        self.unsupported_reason = Some(reason.into());
        self
    }

    /// Resource the change applies to
    #[inline]
    #[must_use]
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    /// Classification of the change
    #[inline]
    #[must_use]
    pub fn change_type(&self) -> &ChangeType {
        &self.change_type
    }

    /// Raw state before the deployment; absent for creations
    #[inline]
    #[must_use]
    pub fn before(&self) -> Option<&Value> {
        self.before.as_ref()
    }

    /// Raw state after the deployment; absent for deletions
    #[inline]
    #[must_use]
    pub fn after(&self) -> Option<&Value> {
        self.after.as_ref()
    }

    /// Raw property-level delta
    #[inline]
    #[must_use]
    pub fn delta(&self) -> Option<&Value> {
        self.delta.as_ref()
    }

    /// Why the change could not be evaluated (only for `Unsupported`)
    #[inline]
    #[must_use]
    pub fn unsupported_reason(&self) -> Option<&str> {
        self.unsupported_reason.as_deref()
    }

    /// Queryable state before the deployment
    ///
    /// # Errors
    /// Returns error if the state is absent or not a JSON object
    pub fn before_snapshot(&self) -> Result<Snapshot, ParseError> {
        Snapshot::from_field("before", self.before.as_ref())
    }

    /// Queryable state after the deployment
    ///
    /// # Errors
    /// Returns error if the state is absent or not a JSON object
    pub fn after_snapshot(&self) -> Result<Snapshot, ParseError> {
        Snapshot::from_field("after", self.after.as_ref())
    }

    /// Property change trees parsed from the delta
    ///
    /// An absent delta yields no changes.
    ///
    /// # Errors
    /// Returns error if the delta is not a list of property changes or a tree
    /// is deeper than [`DEFAULT_MAX_PROPERTY_DEPTH`](crate::DEFAULT_MAX_PROPERTY_DEPTH)
    pub fn property_changes(&self) -> Result<Vec<PropertyChange>, ParseError> {
        self.property_changes_with_limit(crate::DEFAULT_MAX_PROPERTY_DEPTH)
    }

    /// Property change trees parsed from the delta, with a depth limit
    ///
    /// # Errors
    /// Returns error if the delta is malformed or a tree exceeds `max_depth`
    pub fn property_changes_with_limit(
        &self,
        max_depth: usize,
    ) -> Result<Vec<PropertyChange>, ParseError> {
        let Some(delta) = self.delta.as_ref() else {
            return Ok(Vec::new());
        };

        let changes = Vec::<PropertyChange>::deserialize(delta)
            .map_err(|e| ParseError::malformed("delta", e.to_string()))?;

        if changes.iter().any(|root| root.depth() > max_depth) {
            return Err(ParseError::TooDeep { limit: max_depth });
        }
        Ok(changes)
    }
}

/// Structured error of a failed what-if operation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    #[serde(default)]
    code: String,

    #[serde(default)]
    message: String,

    #[serde(default)]
    target: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    details: Vec<ErrorInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    additional_info: Option<Value>,
}

impl ErrorInfo {
    /// Create error with code and message
    #[inline]
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// With target
    #[inline]
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// With nested detail appended
    #[inline]
    #[must_use]
    pub fn with_detail(mut self, detail: ErrorInfo) -> Self {
        self.details.push(detail);
        self
    }

    /// With raw additional info
    #[inline]
    #[must_use]
    pub fn with_additional_info(mut self, info: Value) -> Self {
        self.additional_info = Some(info);
        self
    }

    /// Error code
    #[inline]
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable message
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Target of the error
    #[inline]
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Nested errors
    #[inline]
    #[must_use]
    pub fn details(&self) -> &[ErrorInfo] {
        &self.details
    }

    /// Supplementary metadata, parsed on demand
    ///
    /// # Errors
    /// Returns error if the stored value is not a list of info entries
    pub fn additional_info(&self) -> Result<Vec<ErrorAdditionalInfo>, ParseError> {
        match self.additional_info.as_ref() {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(raw) => Vec::<ErrorAdditionalInfo>::deserialize(raw)
                .map_err(|e| ParseError::malformed("additionalInfo", e.to_string())),
        }
    }
}

/// Supplementary error metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorAdditionalInfo {
    /// Metadata payload; shape depends on `info_type`
    #[serde(default)]
    pub info: Value,

    /// Kind of metadata
    #[serde(rename = "type", default)]
    pub info_type: String,
}

/// Opaque blob as stored: JSON null decodes as absent, so it is kept absent
#[inline]
pub(crate) fn present(value: Value) -> Option<Value> {
    Some(value).filter(|v| !v.is_null())
}
