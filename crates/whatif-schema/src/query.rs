//! Lookup paths into schema-free JSON
//!
//! Provides [`QueryPath`] for addressing nested values inside resource
//! snapshots, in the dotted form the what-if service uses for property paths.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde_json::Value;

/// Path into a JSON value
///
/// Segments are separated by `.`. A segment addresses an object key, or an
/// array element when the value at that point is an array and the segment is
/// a decimal index. `name[2]` is accepted as shorthand for `name.2`.
///
/// # Examples
/// - `properties.hardwareProfile.vmSize`
/// - `properties.subnets.0.name` or `properties.subnets[0].name`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct QueryPath(Vec<String>);

impl QueryPath {
    /// Create path from segments
    #[inline]
    #[must_use]
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Empty path (addresses the whole value)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Get path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Get number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if path is empty (root)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a segment, returning new path
    #[inline]
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut new = self.clone();
        new.0.push(segment.into());
        new
    }

    /// Resolve against a JSON value
    #[must_use]
    pub fn resolve<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        self.0.iter().try_fold(root, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

impl Display for QueryPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl FromStr for QueryPath {
    type Err = QueryPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::root());
        }

        let mut segments = Vec::new();
        for part in s.split('.') {
            let (name, indices) = match part.find('[') {
                Some(open) => part.split_at(open),
                None => (part, ""),
            };
            if name.is_empty() && indices.is_empty() {
                return Err(QueryPathError::EmptySegment);
            }
            if !name.is_empty() {
                segments.push(name.to_string());
            }
            let mut rest = indices;
            while !rest.is_empty() {
                let inner = rest
                    .strip_prefix('[')
                    .and_then(|r| r.split_once(']'))
                    .ok_or_else(|| QueryPathError::InvalidIndex(part.to_string()))?;
                let (index, tail) = inner;
                if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(QueryPathError::InvalidIndex(part.to_string()));
                }
                segments.push(index.to_string());
                rest = tail;
            }
        }

        Ok(Self(segments))
    }
}

impl From<Vec<String>> for QueryPath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

/// Errors related to query paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryPathError {
    /// Empty segment in path
    #[error("path contains empty segment")]
    EmptySegment,

    /// Bracketed index is not a decimal number or is unterminated
    #[error("invalid index in segment: {0}")]
    InvalidIndex(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_from_str_dotted() {
        let path: QueryPath = "properties.hardwareProfile.vmSize".parse().unwrap();
        assert_eq!(path.segments(), &["properties", "hardwareProfile", "vmSize"]);
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn path_from_str_brackets() {
        let path: QueryPath = "subnets[0].name".parse().unwrap();
        assert_eq!(path.segments(), &["subnets", "0", "name"]);

        let nested: QueryPath = "grid[1][2]".parse().unwrap();
        assert_eq!(nested.segments(), &["grid", "1", "2"]);
    }

    #[test]
    fn path_from_str_empty() {
        let path: QueryPath = "".parse().unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn path_from_str_empty_segment() {
        let result: Result<QueryPath, _> = "a..b".parse();
        assert_eq!(result, Err(QueryPathError::EmptySegment));
    }

    #[test]
    fn path_from_str_bad_index() {
        assert!(matches!(
            "a[x]".parse::<QueryPath>(),
            Err(QueryPathError::InvalidIndex(_))
        ));
        assert!(matches!(
            "a[1".parse::<QueryPath>(),
            Err(QueryPathError::InvalidIndex(_))
        ));
    }

    #[test]
    fn path_resolve() {
        let value = json!({
            "properties": {
                "subnets": [{"name": "default"}, {"name": "backend"}],
                "0": "keyed"
            }
        });

        let path: QueryPath = "properties.subnets.1.name".parse().unwrap();
        assert_eq!(path.resolve(&value), Some(&json!("backend")));

        let keyed: QueryPath = "properties.0".parse().unwrap();
        assert_eq!(keyed.resolve(&value), Some(&json!("keyed")));

        let missing: QueryPath = "properties.subnets.7".parse().unwrap();
        assert_eq!(missing.resolve(&value), None);

        let through_scalar: QueryPath = "properties.0.x".parse().unwrap();
        assert_eq!(through_scalar.resolve(&value), None);
    }

    #[test]
    fn path_root_resolves_to_value() {
        let value = json!({"a": 1});
        assert_eq!(QueryPath::root().resolve(&value), Some(&value));
    }

    #[test]
    fn path_display_and_child() {
        let path = QueryPath::new(vec!["a".into()]).child("b");
        assert_eq!(path.to_string(), "a.b");
    }
}
