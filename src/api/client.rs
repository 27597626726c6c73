//! Purpose: Session entry point for a hypermedia navigation chain.
//! Exports: `Client`.
//! Role: Owns the transport and hands out the first response of a chain.
//! Invariants: The base url is normalized before any request is issued.

use crate::api::builder::ResponseBuilder;
use crate::api::response::Response;
use crate::api::transport::{Transport, UreqTransport};
use crate::core::error::Error;
use crate::core::schema::RequestDescriptor;
use serde::de::DeserializeOwned;
use std::sync::Arc;

#[derive(Clone)]
pub struct Client {
    builder: ResponseBuilder,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

impl Client {
    /// Connects to an API root over the default blocking transport.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let transport = UreqTransport::new(base_url)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Uses an injected HTTP capability instead of the default transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            builder: ResponseBuilder::new(transport),
        }
    }

    /// Fetches the root resource and starts a navigation chain from it.
    pub fn start<T>(&self) -> Result<Option<Response<T>>, Error>
    where
        T: DeserializeOwned,
    {
        let request = RequestDescriptor::get("/");
        let text = self.builder.transport().execute(&request)?;
        self.builder.build_response(&text)
    }

    pub fn builder(&self) -> &ResponseBuilder {
        &self.builder
    }
}

#[cfg(test)]
mod tests {
    use super::Client;
    use crate::core::error::ErrorKind;

    #[test]
    fn client_rejects_non_http_base_url() {
        let err = Client::new("file:///tmp/api").expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn client_rejects_base_url_with_path() {
        let err = Client::new("http://localhost:9090/api").expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }
}
