//! Purpose: Define the stable public API boundary for linkwalk.
//! Exports: Client, response handles, transport seam, schema types, errors.
//! Role: Public, additive-only surface; hides internal parsing modules.
//! Invariants: This module is the only public path to core primitives.

mod builder;
mod client;
mod response;
mod transport;

pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::schema::{JsonHyperSchema, Link, RequestDescriptor};
pub use builder::ResponseBuilder;
pub use client::Client;
pub use response::{ListResponse, RequestBuilder, Response};
pub use transport::{Transport, UreqTransport};
