//! Purpose: Decode embedded `_schema` subtrees into navigable hyperschemas.
//! Exports: `JsonHyperSchema`, `Link`, `RequestDescriptor`.
//! Role: Maps relation names to link descriptors and resolves them to requests.
//! Invariants: Schemas are immutable after decode.
//! Invariants: An unknown relation resolves to `None`; only malformed schema text errors.

use crate::core::error::{Error, ErrorKind};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

const DEFAULT_METHOD: &str = "GET";

/// One link relation as it appears on the wire.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Link {
    pub href: String,
    #[serde(default)]
    pub method: Option<String>,
    /// Request-body schema advertised by the server; carried opaquely.
    #[serde(default)]
    pub schema: Option<Value>,
}

/// Decoded set of relations a resource offers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JsonHyperSchema {
    links: BTreeMap<String, Link>,
}

/// Transient request produced by resolving a relation; consumed by the transport.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
    pub method: String,
    pub href: String,
    pub body: Option<Value>,
}

impl RequestDescriptor {
    pub fn get(href: impl Into<String>) -> Self {
        Self {
            method: DEFAULT_METHOD.to_string(),
            href: href.into(),
            body: None,
        }
    }
}

impl JsonHyperSchema {
    /// Decodes the subtree found at the `_schema` field.
    pub fn decode(doc: &Value) -> Result<Self, Error> {
        let links = BTreeMap::<String, Link>::deserialize(doc).map_err(|err| {
            Error::new(ErrorKind::InvalidSchema)
                .with_message("embedded _schema does not conform to the hyperschema shape")
                .with_body(doc.to_string())
                .with_source(err)
        })?;
        Ok(Self { links })
    }

    pub fn link(&self, relation: &str) -> Option<&Link> {
        self.links.get(relation)
    }

    pub fn relations(&self) -> impl Iterator<Item = &str> {
        self.links.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Resolves a relation to a concrete request, or `None` when the
    /// resource does not offer that transition.
    pub fn resolve(&self, relation: &str) -> Option<RequestDescriptor> {
        let link = self.links.get(relation)?;
        Some(RequestDescriptor {
            method: link
                .method
                .clone()
                .unwrap_or_else(|| DEFAULT_METHOD.to_string()),
            href: link.href.clone(),
            body: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::JsonHyperSchema;
    use crate::core::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn decode_maps_relations_to_links() {
        let doc = json!({
            "orders": {"href": "/orders"},
            "send-back": {"href": "/x", "method": "POST"}
        });
        let schema = JsonHyperSchema::decode(&doc).expect("schema");
        assert_eq!(schema.relations().count(), 2);
        assert_eq!(schema.link("orders").expect("link").href, "/orders");
    }

    #[test]
    fn decode_accepts_empty_schema() {
        let schema = JsonHyperSchema::decode(&json!({})).expect("schema");
        assert!(schema.is_empty());
    }

    #[test]
    fn decode_rejects_link_without_href() {
        let err = JsonHyperSchema::decode(&json!({"orders": {"method": "GET"}}))
            .expect_err("err");
        assert_eq!(err.kind(), ErrorKind::InvalidSchema);
    }

    #[test]
    fn decode_rejects_non_object_subtree() {
        let err = JsonHyperSchema::decode(&json!([1, 2])).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::InvalidSchema);
    }

    #[test]
    fn resolve_defaults_method_to_get() {
        let schema = JsonHyperSchema::decode(&json!({"self": {"href": "/me"}})).expect("schema");
        let request = schema.resolve("self").expect("request");
        assert_eq!(request.method, "GET");
        assert_eq!(request.href, "/me");
        assert!(request.body.is_none());
    }

    #[test]
    fn resolve_unknown_relation_is_none() {
        let schema = JsonHyperSchema::decode(&json!({"self": {"href": "/me"}})).expect("schema");
        assert!(schema.resolve("orders").is_none());
    }
}
