//! What-If Schema Model
//!
//! Typed model of the response returned by Azure Resource Manager's
//! `deployments/whatIf` preview operations.
//!
//! # Core Concepts
//!
//! - [`WhatIfResult`]: Decoded response (status, correlation ID, changes, error)
//! - [`ResourceChange`]: Predicted change to one resource with raw before/after state
//! - [`ChangeType`] / [`PropertyChangeType`]: Change classifications
//! - [`PropertyChange`]: Node of a property change tree parsed from a delta
//! - [`Snapshot`]: Queryable schema-free resource state
//! - [`Decoder`]: Decoding with [`DecodeOptions`]
//!
//! Unknown enum strings are preserved in an `Unrecognized` variant unless
//! [`DecodeOptions::strict_enums`] is set. Accessors over schema-free content
//! return [`ParseError`] rather than panicking.
//!
//! # Example
//!
//! ```rust
//! use whatif_schema::{ChangeType, WhatIfResult};
//!
//! let doc = r#"{
//!     "status": "Succeeded",
//!     "properties": {
//!         "correlationId": "abc-123",
//!         "changes": [{
//!             "resourceId": "/sub/rg/vm1",
//!             "changeType": "Modify",
//!             "before": {"size": "Standard_B1"},
//!             "after": {"size": "Standard_B2"}
//!         }]
//!     }
//! }"#;
//!
//! let result: WhatIfResult = doc.parse()?;
//! let change = &result.changes()[0];
//! assert_eq!(change.change_type(), &ChangeType::Modify);
//! assert_eq!(change.after_snapshot()?.get_str("size")?, Some("Standard_B2"));
//! # Ok::<(), whatif_schema::SchemaError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
mod change_type;
mod decode;
mod model;
mod property;
mod query;
mod snapshot;
mod summary;

pub mod error;

// Re-exports
pub use change_type::{ChangeType, PropertyChangeType};
pub use decode::{
    decode, decode_str, encode, encode_pretty, DecodeOptions, Decoder, DEFAULT_MAX_PROPERTY_DEPTH,
};
pub use error::{
    DecodeError, OptionsError, ParseError, SchemaError, SchemaResult, UnrecognizedEnumError,
};
pub use model::{
    ErrorAdditionalInfo, ErrorInfo, ResourceChange, WhatIfProperties, WhatIfResult,
    STATUS_FAILED, STATUS_SUCCEEDED,
};
pub use property::{Iter as PropertyIter, PropertyChange, Walk as PropertyWalk};
pub use query::{QueryPath, QueryPathError};
pub use snapshot::Snapshot;
pub use summary::ChangeSummary;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with what-if documents
    pub use crate::change_type::{ChangeType, PropertyChangeType};
    pub use crate::decode::{decode, DecodeOptions, Decoder};
    pub use crate::error::{DecodeError, ParseError, SchemaError};
    pub use crate::model::{ResourceChange, WhatIfResult};
    pub use crate::property::PropertyChange;
    pub use crate::snapshot::Snapshot;
}
