//! Purpose: Client library for navigating HATEOAS-style hypermedia JSON APIs.
//! Exports: `api` (client, response handles, transport seam, errors).
//! Role: Library crate root; `api` is the stable boundary, `core` stays internal.
//! Invariants: Responses embed their links under a reserved `_schema` field.
//! Invariants: Collections carry their elements under a reserved `members` field.

pub mod api;
mod core;
