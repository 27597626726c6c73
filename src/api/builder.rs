//! Purpose: Turn raw response text into `Response`/`ListResponse` values.
//! Exports: `ResponseBuilder`.
//! Role: The only constructor of response objects; shared by every follow call.
//! Invariants: An empty body is a valid no-content response, not a parse failure.
//! Invariants: List building is fail-fast; one bad member fails the whole call.

use crate::api::response::{ListResponse, Response};
use crate::api::transport::Transport;
use crate::core::document::{self, MEMBERS_FIELD, SCHEMA_FIELD};
use crate::core::error::{Error, ErrorKind};
use crate::core::schema::JsonHyperSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::type_name;
use std::sync::Arc;

#[derive(Clone)]
pub struct ResponseBuilder {
    transport: Arc<dyn Transport>,
}

impl ResponseBuilder {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Builds a single-resource response from raw body text.
    ///
    /// A zero-length body yields a response with no value and no schema,
    /// the handle for 204-style replies.
    pub fn build_response<T>(&self, text: &str) -> Result<Option<Response<T>>, Error>
    where
        T: DeserializeOwned,
    {
        if text.is_empty() {
            return Ok(Some(Response::new(self.clone(), None, None)));
        }
        let doc = document::parse(text)?;
        self.build_single(&doc)
    }

    /// Builds a collection response from raw body text.
    ///
    /// The document must carry a `members` array; each element is built
    /// exactly like a single-resource document, with its own schema.
    pub fn build_list_response<T>(&self, text: &str) -> Result<Option<ListResponse<T>>, Error>
    where
        T: DeserializeOwned,
    {
        let doc = document::parse(text)?;
        let schema = self.decode_schema(&doc)?;
        let Some(members) = document::field(&doc, MEMBERS_FIELD) else {
            return Err(Error::new(ErrorKind::MissingMembers)
                .with_message("there is no members field in the response")
                .with_body(text));
        };
        let Some(items) = members.as_array() else {
            return Err(Error::new(ErrorKind::MissingMembers)
                .with_message("the members field is not an array")
                .with_body(text));
        };

        let mut list = Vec::with_capacity(items.len());
        for item in items {
            let member = self.build_single::<T>(item)?;
            if let Some(member) = member {
                list.push(member);
            }
        }
        tracing::debug!(members = list.len(), "built list response");
        Ok(Some(ListResponse::new(self.clone(), schema, list)))
    }

    fn build_single<T>(&self, doc: &Value) -> Result<Option<Response<T>>, Error>
    where
        T: DeserializeOwned,
    {
        let schema = self.decode_schema(doc)?;
        let value: T = T::deserialize(doc).map_err(|err| {
            Error::new(ErrorKind::Deserialize)
                .with_message("the response document does not fit the target type")
                .with_type_name(type_name::<T>())
                .with_body(doc.to_string())
                .with_source(err)
        })?;
        Ok(Some(Response::new(self.clone(), schema, Some(value))))
    }

    fn decode_schema(&self, doc: &Value) -> Result<Option<JsonHyperSchema>, Error> {
        match document::field(doc, SCHEMA_FIELD) {
            Some(subtree) => JsonHyperSchema::decode(subtree).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ResponseBuilder;
    use crate::api::transport::Transport;
    use crate::core::error::{Error, ErrorKind};
    use crate::core::schema::RequestDescriptor;
    use serde::Deserialize;
    use serde_json::Value;
    use std::sync::Arc;

    struct NoTransport;

    impl Transport for NoTransport {
        fn execute(&self, _request: &RequestDescriptor) -> Result<String, Error> {
            Err(Error::new(ErrorKind::Transport).with_message("no transport in this test"))
        }
    }

    fn builder() -> ResponseBuilder {
        ResponseBuilder::new(Arc::new(NoTransport))
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Widget {
        name: String,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Member {
        id: u64,
    }

    #[test]
    fn plain_document_yields_value_and_no_schema() {
        let response = builder()
            .build_response::<Widget>(r#"{"name":"widget"}"#)
            .expect("build")
            .expect("response");
        assert_eq!(response.value().expect("value").name, "widget");
        assert!(response.schema().is_none());
    }

    #[test]
    fn empty_body_yields_no_value_and_no_schema() {
        let response = builder()
            .build_response::<Widget>("")
            .expect("build")
            .expect("response");
        assert!(!response.has_value());
        assert!(response.schema().is_none());
    }

    #[test]
    fn invalid_json_is_malformed_document() {
        let err = builder()
            .build_response::<Widget>("not json")
            .expect_err("err");
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
    }

    #[test]
    fn type_mismatch_carries_diagnostics() {
        let err = builder()
            .build_response::<Widget>(r#"{"name":7}"#)
            .expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Deserialize);
        assert!(err.type_name().expect("type name").contains("Widget"));
        assert!(err.body().expect("body").contains("\"name\""));
    }

    #[test]
    fn embedded_schema_is_decoded() {
        let response = builder()
            .build_response::<Widget>(r#"{"name":"w","_schema":{"self":{"href":"/w"}}}"#)
            .expect("build")
            .expect("response");
        let schema = response.schema().expect("schema");
        assert!(schema.resolve("self").is_some());
    }

    #[test]
    fn invalid_embedded_schema_is_rejected() {
        let err = builder()
            .build_response::<Widget>(r#"{"name":"w","_schema":[1]}"#)
            .expect_err("err");
        assert_eq!(err.kind(), ErrorKind::InvalidSchema);
    }

    #[test]
    fn missing_members_field_is_a_protocol_violation() {
        let err = builder()
            .build_list_response::<Member>(r#"{"_schema":{}}"#)
            .expect_err("err");
        assert_eq!(err.kind(), ErrorKind::MissingMembers);
    }

    #[test]
    fn non_array_members_field_is_rejected() {
        let err = builder()
            .build_list_response::<Member>(r#"{"members":3}"#)
            .expect_err("err");
        assert_eq!(err.kind(), ErrorKind::MissingMembers);
    }

    #[test]
    fn list_members_keep_order_and_own_schemas() {
        let text = r#"{
            "members": [{"id":1,"_schema":{}}, {"id":2}],
            "_schema": {"send-back": {"href": "/x"}}
        }"#;
        let list = builder()
            .build_list_response::<Member>(text)
            .expect("build")
            .expect("list");
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).expect("member 0").value(), Some(&Member { id: 1 }));
        assert_eq!(list.get(1).expect("member 1").value(), Some(&Member { id: 2 }));
        let schema = list.schema().expect("collection schema");
        assert!(schema.resolve("send-back").is_some());
    }

    #[test]
    fn one_bad_member_fails_the_whole_list() {
        let text = r#"{"members":[{"id":1},{"id":"oops"}],"_schema":{}}"#;
        let err = builder()
            .build_list_response::<Member>(text)
            .expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Deserialize);
    }

    #[test]
    fn untyped_target_accepts_any_document() {
        let response = builder()
            .build_response::<Value>(r#"{"anything":[1,2]}"#)
            .expect("build")
            .expect("response");
        assert_eq!(response.value().expect("value")["anything"][0], 1);
    }
}
