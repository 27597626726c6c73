//! Purpose: Parse raw response text into a navigable JSON tree.
//! Exports: `parse`, `field`, reserved field names.
//! Role: Single decode seam so callsites avoid ad hoc JSON handling.
//! Invariants: Side-effect free; absence of a field is `None`, never an error.

use crate::core::error::{Error, ErrorKind};
use serde_json::Value;

/// Reserved top-level field carrying the embedded hyperschema.
pub const SCHEMA_FIELD: &str = "_schema";

/// Reserved top-level field carrying collection members.
pub const MEMBERS_FIELD: &str = "members";

pub fn parse(text: &str) -> Result<Value, Error> {
    serde_json::from_str(text).map_err(|err| {
        Error::new(ErrorKind::MalformedDocument)
            .with_message("response body is not valid json")
            .with_body(text)
            .with_source(err)
    })
}

pub fn field<'a>(doc: &'a Value, name: &str) -> Option<&'a Value> {
    doc.as_object().and_then(|map| map.get(name))
}
