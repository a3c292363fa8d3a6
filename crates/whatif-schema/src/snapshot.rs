//! Queryable resource snapshots
//!
//! The `before` and `after` states of a resource change carry arbitrary,
//! resource-kind specific JSON. [`Snapshot`] wraps such a value and offers
//! path lookups without a fixed schema.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ParseError;
use crate::query::QueryPath;

/// Schema-free JSON state of a resource
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    value: Value,
}

impl Snapshot {
    /// Wrap a JSON value
    #[inline]
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Interpret a stored field as a snapshot
    ///
    /// A string holding encoded JSON is decoded first.
    ///
    /// # Errors
    /// [`ParseError::Absent`] when the field is missing or null,
    /// [`ParseError::Malformed`] when it is not a JSON object.
    pub fn from_field(field: &'static str, stored: Option<&Value>) -> Result<Self, ParseError> {
        let value = match stored {
            None | Some(Value::Null) => return Err(ParseError::Absent { field }),
            Some(Value::String(encoded)) => serde_json::from_str::<Value>(encoded)
                .map_err(|e| ParseError::malformed(field, e.to_string()))?,
            Some(other) => other.clone(),
        };

        match value {
            Value::Object(_) => Ok(Self::new(value)),
            Value::Null => Err(ParseError::Absent { field }),
            other => Err(ParseError::malformed(
                field,
                format!("expected object, found {}", kind_of(&other)),
            )),
        }
    }

    /// Get JSON value reference
    #[inline]
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Take the underlying JSON value
    #[inline]
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Look up a value by parsed path
    #[inline]
    #[must_use]
    pub fn lookup(&self, path: &QueryPath) -> Option<&Value> {
        let found = path.resolve(&self.value);
        tracing::trace!(%path, found = found.is_some(), "snapshot lookup");
        found
    }

    /// Look up a value by dotted path
    ///
    /// # Examples
    /// ```
    /// # use whatif_schema::Snapshot;
    /// # use serde_json::json;
    /// let snapshot = Snapshot::new(json!({"properties": {"sku": {"name": "Standard_LRS"}}}));
    /// assert_eq!(
    ///     snapshot.get("properties.sku.name").unwrap(),
    ///     Some(&json!("Standard_LRS"))
    /// );
    /// ```
    ///
    /// # Errors
    /// Returns error if the path cannot be parsed
    pub fn get(&self, path: &str) -> Result<Option<&Value>, ParseError> {
        let path: QueryPath = path.parse()?;
        Ok(self.lookup(&path))
    }

    /// Look up a value that must exist
    ///
    /// # Errors
    /// Returns error if the path cannot be parsed or does not resolve
    pub fn require(&self, path: &str) -> Result<&Value, ParseError> {
        self.get(path)?
            .ok_or_else(|| ParseError::PathNotFound(path.to_string()))
    }

    /// Look up a string value
    ///
    /// Non-string values resolve to `None`.
    ///
    /// # Errors
    /// Returns error if the path cannot be parsed
    pub fn get_str(&self, path: &str) -> Result<Option<&str>, ParseError> {
        Ok(self.get(path)?.and_then(Value::as_str))
    }

    /// Look up a value by JSON pointer (RFC 6901)
    #[inline]
    #[must_use]
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.value.pointer(pointer)
    }

    /// Convert to typed struct
    ///
    /// # Errors
    /// Returns error if value doesn't match type
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T, ParseError> {
        T::deserialize(&self.value).map_err(|e| ParseError::Typed(e.to_string()))
    }

    /// Full resource ID recorded in the snapshot
    #[inline]
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.top_level_str("id")
    }

    /// Resource name
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.top_level_str("name")
    }

    /// Resource type, e.g. `Microsoft.Compute/virtualMachines`
    #[inline]
    #[must_use]
    pub fn resource_type(&self) -> Option<&str> {
        self.top_level_str("type")
    }

    /// API version the snapshot was rendered with
    #[inline]
    #[must_use]
    pub fn api_version(&self) -> Option<&str> {
        self.top_level_str("apiVersion")
    }

    /// Azure region
    #[inline]
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.top_level_str("location")
    }

    fn top_level_str(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(Value::as_str)
    }
}

impl From<Snapshot> for Value {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.value
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
