//! Configuration holder and request executor.
//!
//! # Design
//! `Megaphone` is a cheap-to-clone handle around the current `ClientConfig`
//! and a `Transport`. Every request is split the same way: `build_request`
//! produces a plain `HttpRequest`, the transport performs the round-trip, and
//! `parse_response` turns the `HttpResponse` into a `Record`. The config is
//! read once per request, so a `reconfigure` takes effect on the next call
//! and nothing derived from an old token or id survives it.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ConnectionError, ErrorKind};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::record::Record;
use crate::resources::{
    Collection, EpisodeCollection, Podcast, PodcastCollection, ResourceIdentity,
};

/// Placeholder body for requests without a payload.
pub(crate) const NO_BODY: Option<&Value> = None;

/// Entry point: holds the account settings and hands out accessors.
#[derive(Clone)]
pub struct Megaphone {
    inner: Arc<Inner>,
}

struct Inner {
    config: RwLock<ClientConfig>,
    transport: Box<dyn Transport>,
}

impl Megaphone {
    /// Configures a client that talks to the network through `ureq`.
    pub fn configure(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            inner: Arc::new(Inner {
                config: RwLock::new(config),
                transport: Box::new(transport),
            }),
        }
    }

    /// Replaces the settings for every clone of this handle and every
    /// accessor created from it.
    pub fn reconfigure(&self, config: ClientConfig) {
        let mut current = self
            .inner
            .config
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = config;
        debug!("megaphone client reconfigured");
    }

    /// Snapshot of the current settings.
    pub fn config(&self) -> ClientConfig {
        self.inner
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn podcasts(&self) -> PodcastCollection {
        PodcastCollection::new(self.clone())
    }

    pub fn podcast(&self, id: impl Into<String>) -> Podcast {
        Podcast::new(self.clone(), id.into())
    }

    /// Organization-wide episodes. Use `podcast(id).episodes()` for the
    /// episodes of one podcast.
    pub fn episodes(&self) -> EpisodeCollection {
        EpisodeCollection::new(self.clone(), ResourceIdentity::default())
    }

    /// Builds the request for one API call using the current settings.
    pub fn build_request(
        &self,
        method: HttpMethod,
        url: &str,
        params: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<HttpRequest, ConnectionError> {
        build_request(&self.config(), method, url, params, body)
    }

    /// Checks the status and decodes the body of a response to `request`.
    pub fn parse_response(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<Record, ConnectionError> {
        parse_response(request, response)
    }

    /// Performs one API call: build, send, parse.
    ///
    /// `params` are encoded into the URL query string. `body` is sent as JSON.
    pub fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        params: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Record, ConnectionError> {
        self.execute_with(&self.config(), method, url, params, body)
    }

    /// Runs an accessor operation and returns the record unmodified.
    pub(crate) fn call<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        collection: Collection,
        identity: &ResourceIdentity,
        params: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Record, ConnectionError> {
        let config = self.config();
        let url = identity.url(&config, collection, method)?;
        self.execute_with(&config, method, &url, params, body)
    }

    /// Like `call`, for endpoints that answer with a JSON array.
    pub(crate) fn call_list(
        &self,
        collection: Collection,
        identity: &ResourceIdentity,
        params: &[(&str, &str)],
    ) -> Result<Vec<Record>, ConnectionError> {
        let method = HttpMethod::Get;
        let config = self.config();
        let url = identity.url(&config, collection, method)?;
        let record = self.execute_with(&config, method, &url, params, NO_BODY)?;
        record.into_list().ok_or_else(|| {
            ConnectionError::new(ErrorKind::Decode, "expected a JSON array", method, url)
        })
    }

    fn execute_with<B: Serialize + ?Sized>(
        &self,
        config: &ClientConfig,
        method: HttpMethod,
        url: &str,
        params: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Record, ConnectionError> {
        let request = build_request(config, method, url, params, body)?;
        debug!(method = %request.method, url = %request.url, "sending megaphone request");

        let response = self.inner.transport.send(&request).map_err(|e| {
            warn!(method = %request.method, url = %request.url, error = %e, "megaphone transport failed");
            ConnectionError::new(ErrorKind::Transport, e.message(), request.method, &request.url)
        })?;
        debug!(status = response.status, url = %request.url, "received megaphone response");

        parse_response(&request, response).inspect_err(|e| {
            warn!(error = %e, "megaphone request failed");
        })
    }
}

impl fmt::Debug for Megaphone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Megaphone")
            .field("config", &self.config())
            .finish_non_exhaustive()
    }
}

fn build_request<B: Serialize + ?Sized>(
    config: &ClientConfig,
    method: HttpMethod,
    url: &str,
    params: &[(&str, &str)],
    body: Option<&B>,
) -> Result<HttpRequest, ConnectionError> {
    let mut parsed = Url::parse(url)
        .map_err(|e| ConnectionError::new(ErrorKind::InvalidUrl, e.to_string(), method, url))?;
    if !params.is_empty() {
        parsed.query_pairs_mut().extend_pairs(params);
    }
    let url = String::from(parsed);

    let body = body
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| ConnectionError::new(ErrorKind::Encode, e.to_string(), method, &url))?;

    Ok(HttpRequest {
        method,
        headers: vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Authorization".to_string(), config.authorization()),
        ],
        url,
        body,
    })
}

fn parse_response(request: &HttpRequest, response: HttpResponse) -> Result<Record, ConnectionError> {
    if !response.is_success() {
        return Err(ConnectionError::new(
            ErrorKind::Status(response.status),
            response.description(),
            request.method,
            &request.url,
        ));
    }
    if response.body.trim().is_empty() {
        return Ok(Record::default());
    }
    serde_json::from_str(&response.body).map_err(|e| {
        ConnectionError::new(ErrorKind::Decode, e.to_string(), request.method, &request.url)
    })
}
