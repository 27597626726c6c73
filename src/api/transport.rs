//! Purpose: Provide the HTTP capability consumed when following relations.
//! Exports: `Transport`, `UreqTransport`.
//! Role: Seam between relation resolution and actual HTTP; injectable for tests.
//! Invariants: Transport failures surface unchanged as `ErrorKind::Transport`, never retried.
//! Invariants: Relative hrefs resolve against the normalized base url.

use crate::core::error::{Error, ErrorKind};
use crate::core::schema::RequestDescriptor;
use url::Url;

/// The consumed HTTP-client capability: one request in, the raw body out.
///
/// A zero-length body is a valid "no content" reply, not a failure.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &RequestDescriptor) -> Result<String, Error>;
}

/// Default blocking transport over a shared [`ureq::Agent`].
pub struct UreqTransport {
    base_url: Url,
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url.into())?;
        let agent = ureq::AgentBuilder::new().build();
        Ok(Self { base_url, agent })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve_href(&self, href: &str) -> Result<Url, Error> {
        self.base_url.join(href).map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message(format!("cannot resolve link href {href:?}"))
                .with_source(err)
        })
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &RequestDescriptor) -> Result<String, Error> {
        let url = self.resolve_href(&request.href)?;
        tracing::debug!(method = %request.method, url = %url, "executing hypermedia request");
        let call = self
            .agent
            .request(&request.method, url.as_str())
            .set("Accept", "application/json");
        let response = match &request.body {
            Some(body) => {
                let payload = serde_json::to_string(body).map_err(|err| {
                    Error::new(ErrorKind::Usage)
                        .with_message("failed to encode request json")
                        .with_source(err)
                })?;
                call.set("Content-Type", "application/json")
                    .send_string(&payload)
            }
            None => call.call(),
        };

        match response {
            Ok(resp) => resp.into_string().map_err(|err| {
                Error::new(ErrorKind::Transport)
                    .with_message("failed to read response body")
                    .with_source(err)
            }),
            Err(ureq::Error::Status(status, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                Err(Error::new(ErrorKind::Transport)
                    .with_message(format!("request failed with status {status}"))
                    .with_status(status)
                    .with_body(body))
            }
            Err(ureq::Error::Transport(err)) => Err(Error::new(ErrorKind::Transport)
                .with_message("request failed")
                .with_source(err)),
        }
    }
}

fn normalize_base_url(raw: String) -> Result<Url, Error> {
    let mut url = Url::parse(&raw).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message("invalid base url")
            .with_source(err)
    })?;
    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(
            Error::new(ErrorKind::Usage).with_message("base url must use http or https scheme")
        );
    }
    if url.path() != "/" && !url.path().is_empty() {
        return Err(Error::new(ErrorKind::Usage).with_message("base url must not include a path"));
    }
    url.set_path("/");
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
