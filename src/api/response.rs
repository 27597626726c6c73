//! Purpose: Immutable response handles and the follow-relation builder.
//! Exports: `Response`, `ListResponse`, `RequestBuilder`.
//! Role: Bundle a decoded value with its hyperschema and chain into next requests.
//! Invariants: Responses never mutate after construction.
//! Invariants: A relation the schema does not offer is `Ok(None)`, never an error.

use crate::api::builder::ResponseBuilder;
use crate::core::error::{Error, ErrorKind};
use crate::core::schema::JsonHyperSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

/// A single decoded resource plus the transitions it offers.
///
/// The builder handle is a shared, non-owning capability reference; cloning
/// it is cheap and lets independent chains share one transport.
pub struct Response<T> {
    builder: ResponseBuilder,
    schema: Option<JsonHyperSchema>,
    value: Option<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Response<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("schema", &self.schema)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<T> Response<T> {
    pub(crate) fn new(
        builder: ResponseBuilder,
        schema: Option<JsonHyperSchema>,
        value: Option<T>,
    ) -> Self {
        Self {
            builder,
            schema,
            value,
        }
    }

    /// The decoded value; absent only for no-content replies.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    pub fn schema(&self) -> Option<&JsonHyperSchema> {
        self.schema.as_ref()
    }

    /// Prepares the next request from this resource's hyperschema.
    pub fn prepare_next<S>(&self) -> RequestBuilder<'_, S>
    where
        S: DeserializeOwned,
    {
        RequestBuilder::new(&self.builder, self.schema.as_ref())
    }
}

/// An ordered collection of member responses plus collection-level links.
pub struct ListResponse<T> {
    builder: ResponseBuilder,
    schema: Option<JsonHyperSchema>,
    members: Vec<Response<T>>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for ListResponse<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListResponse")
            .field("schema", &self.schema)
            .field("members", &self.members)
            .finish_non_exhaustive()
    }
}

impl<T> ListResponse<T> {
    pub(crate) fn new(
        builder: ResponseBuilder,
        schema: Option<JsonHyperSchema>,
        members: Vec<Response<T>>,
    ) -> Self {
        Self {
            builder,
            schema,
            members,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The i-th member, or `None` when the index is out of range.
    pub fn get(&self, index: usize) -> Option<&Response<T>> {
        self.members.get(index)
    }

    pub fn members(&self) -> &[Response<T>] {
        &self.members
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Response<T>> {
        self.members.iter()
    }

    pub fn schema(&self) -> Option<&JsonHyperSchema> {
        self.schema.as_ref()
    }

    /// Prepares the next request from the collection-level hyperschema,
    /// for collection-wide relations such as "create" or "next-page".
    pub fn prepare_next<S>(&self) -> RequestBuilder<'_, S>
    where
        S: DeserializeOwned,
    {
        RequestBuilder::new(&self.builder, self.schema.as_ref())
    }
}

impl<'a, T> IntoIterator for &'a ListResponse<T> {
    type Item = &'a Response<T>;
    type IntoIter = std::slice::Iter<'a, Response<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// Builds and executes the request for one named relation.
pub struct RequestBuilder<'a, S> {
    builder: &'a ResponseBuilder,
    schema: Option<&'a JsonHyperSchema>,
    body: Option<Value>,
    _target: PhantomData<S>,
}

impl<'a, S> RequestBuilder<'a, S>
where
    S: DeserializeOwned,
{
    fn new(builder: &'a ResponseBuilder, schema: Option<&'a JsonHyperSchema>) -> Self {
        Self {
            builder,
            schema,
            body: None,
            _target: PhantomData,
        }
    }

    /// Attaches a JSON request body for side-effecting relations.
    pub fn with_request_object(mut self, object: &impl Serialize) -> Result<Self, Error> {
        let body = serde_json::to_value(object).map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message("failed to encode the request object")
                .with_source(err)
        })?;
        self.body = Some(body);
        Ok(self)
    }

    /// Follows a relation into a single-resource response.
    ///
    /// `Ok(None)` means this resource does not offer the relation.
    pub fn call_with_rel(self, relation: &str) -> Result<Option<Response<S>>, Error> {
        let Some(text) = self.execute(relation)? else {
            return Ok(None);
        };
        self.builder.build_response(&text)
    }

    /// Follows a relation into a collection response.
    pub fn call_list_with_rel(self, relation: &str) -> Result<Option<ListResponse<S>>, Error> {
        let Some(text) = self.execute(relation)? else {
            return Ok(None);
        };
        self.builder.build_list_response(&text)
    }

    fn execute(&self, relation: &str) -> Result<Option<String>, Error> {
        let Some(schema) = self.schema else {
            return Ok(None);
        };
        let Some(mut request) = schema.resolve(relation) else {
            return Ok(None);
        };
        request.body = self.body.clone();
        tracing::debug!(relation, method = %request.method, href = %request.href, "following relation");
        self.builder
            .transport()
            .execute(&request)
            .map(Some)
            .map_err(|err| err.with_relation(relation))
    }
}
