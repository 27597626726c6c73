//! Purpose: Define the error taxonomy shared by parsing, schema, and transport code.
//! Exports: `Error`, `ErrorKind`.
//! Role: Single error type for the crate; context is attached via builder methods.
//! Invariants: Expected absences (missing relation, empty body) are never errors.
//! Invariants: Transport faults pass through with this kind, unwrapped and unretried.

use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Response text is not valid JSON.
    MalformedDocument,
    /// A list response lacks the required `members` field.
    MissingMembers,
    /// A `_schema` field is present but structurally invalid.
    InvalidSchema,
    /// The document does not fit the requested target type.
    Deserialize,
    /// The HTTP capability failed; surfaced unchanged.
    Transport,
    /// Caller mistake (bad base url, unencodable request object).
    Usage,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    relation: Option<String>,
    type_name: Option<&'static str>,
    body: Option<String>,
    status: Option<u16>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            relation: None,
            type_name: None,
            body: None,
            status: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn relation(&self) -> Option<&str> {
        self.relation.as_deref()
    }

    pub fn type_name(&self) -> Option<&'static str> {
        self.type_name
    }

    /// Raw document text attached for diagnostics, when available.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = Some(relation.into());
        self
    }

    pub fn with_type_name(mut self, type_name: &'static str) -> Self {
        self.type_name = Some(type_name);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(relation) = &self.relation {
            write!(f, " (relation: {relation})")?;
        }
        if let Some(type_name) = self.type_name {
            write!(f, " (target type: {type_name})")?;
        }
        if let Some(status) = self.status {
            write!(f, " (status: {status})")?;
        }
        if let Some(body) = &self.body {
            write!(f, " (document: {body})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}
