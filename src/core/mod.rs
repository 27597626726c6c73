//! Purpose: Internal building blocks behind the public API surface.
//! Exports: `document` (JSON accessor), `schema` (hyperschema), `error` (taxonomy).
//! Role: Private modules; `api` is the only public path to them.

pub(crate) mod document;
pub(crate) mod error;
pub(crate) mod schema;
