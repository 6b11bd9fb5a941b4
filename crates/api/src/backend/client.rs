//! HTTP client for the clinic REST backend.
//!
//! One [`BackendClient`] lives in the application state and is shared by
//! every request. Handlers start a [`BackendRequest`] from it (list calls
//! take their query pairs up front), attach the caller's bearer token or a
//! JSON body, and finish with one of the fetch methods, which all run
//! through the failure normalizer.

use std::sync::Arc;
use std::time::Duration;

use clinic_core::forms::FormState;
use clinic_core::models::ApiResponse;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::endpoints::{Endpoint, EndpointRegistry};
use super::normalize::{ensure_success, FetchError, HttpError, StatusMessages};

/// Shown when a successful envelope carries no body.
pub const MSG_EMPTY_ENVELOPE: &str = "Đã có lỗi xảy ra";

/// Shared client for the backend. Cheap to clone.
#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    endpoints: Arc<EndpointRegistry>,
}

impl BackendClient {
    pub fn new(endpoints: EndpointRegistry, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, endpoints))
    }

    /// Reuse an existing [`reqwest::Client`] (connection pool).
    pub fn with_client(client: reqwest::Client, endpoints: EndpointRegistry) -> Self {
        Self {
            client,
            endpoints: Arc::new(endpoints),
        }
    }

    pub fn request(&self, method: Method, endpoint: &Endpoint) -> BackendRequest {
        self.start(method, self.endpoints.url(endpoint))
    }

    fn start(&self, method: Method, url: Url) -> BackendRequest {
        BackendRequest {
            label: url.path().to_string(),
            inner: self.client.request(method, url),
            overrides: &[],
        }
    }

    pub fn get(&self, endpoint: &Endpoint) -> BackendRequest {
        self.request(Method::GET, endpoint)
    }

    /// GET a list endpoint with filter and paging pairs in the query string.
    pub fn list<K, V>(&self, endpoint: &Endpoint, pairs: &[(K, V)]) -> BackendRequest
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.start(Method::GET, self.endpoints.url_with_query(endpoint, pairs))
    }

    pub fn post(&self, endpoint: &Endpoint) -> BackendRequest {
        self.request(Method::POST, endpoint)
    }

    pub fn put(&self, endpoint: &Endpoint) -> BackendRequest {
        self.request(Method::PUT, endpoint)
    }
}

/// A request under construction.
pub struct BackendRequest {
    inner: reqwest::RequestBuilder,
    label: String,
    overrides: StatusMessages,
}

impl BackendRequest {
    pub fn bearer(mut self, token: &str) -> Self {
        self.inner = self.inner.bearer_auth(token);
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.inner = self.inner.json(body);
        self
    }

    /// Messages to use for these statuses when the body explains nothing.
    pub fn on_status(mut self, overrides: StatusMessages) -> Self {
        self.overrides = overrides;
        self
    }

    async fn dispatch(self, form: Option<&mut FormState>) -> Result<reqwest::Response, FetchError> {
        tracing::debug!(endpoint = %self.label, "Calling backend");
        let response = self
            .inner
            .send()
            .await
            .map_err(FetchError::from_transport)?;
        ensure_success(response, self.overrides, form).await
    }

    /// Send and discard the body.
    pub async fn send(self) -> Result<reqwest::Response, FetchError> {
        self.dispatch(None).await
    }

    /// Send on behalf of a form; field errors in the reply land in `form`.
    pub async fn submit(self, form: &mut FormState) -> Result<reqwest::Response, FetchError> {
        self.dispatch(Some(form)).await
    }

    /// Decode a bare JSON body.
    pub async fn fetch_json<T: DeserializeOwned>(self) -> Result<T, FetchError> {
        let response = self.send().await?;
        Ok(response.json::<T>().await?)
    }

    /// Decode an [`ApiResponse`] envelope and return its body.
    pub async fn fetch_body<T: DeserializeOwned>(self) -> Result<T, FetchError> {
        let envelope = self.fetch_json::<ApiResponse<T>>().await?;
        unwrap_envelope(envelope)
    }
}

/// An envelope may report failure inside a 2xx response.
pub fn unwrap_envelope<T>(envelope: ApiResponse<T>) -> Result<T, FetchError> {
    if envelope.is_failure() {
        let message = envelope
            .error_text()
            .unwrap_or_else(|| super::normalize::empty_body_message(envelope.status).to_string());
        return Err(HttpError::new(envelope.status, message).into());
    }
    envelope
        .body
        .ok_or_else(|| HttpError::new(500, MSG_EMPTY_ENVELOPE).into())
}
