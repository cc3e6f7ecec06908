//! Generic remote resource access with a request/response lifecycle.
//!
//! [`RemoteResource`] tracks `{data, loading, error}` across refetches.
//! Every refetch takes a generation number and a response is committed only
//! if no newer request has started since, so a slow stale response never
//! overwrites fresher state. Superseded requests are not cancelled, merely
//! discarded on arrival.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by a single resource fetch. Each fetch is attempted
/// exactly once; there is no retry layer.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, body read).
    #[error("fetch transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx response; carries the status code only, no body detail.
    #[error("http error, status: {0}")]
    Status(u16),
    /// Body was not the expected envelope shape.
    #[error("fetch decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Standard request options forwarded to the underlying client.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub method: reqwest::Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// Transport seam for [`RemoteResource`]. The HTTP client talks to the real
/// backend; tests substitute scripted doubles.
pub trait ResourceClient: Send + Sync {
    /// Perform one request and return the decoded JSON body.
    async fn fetch(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<serde_json::Value, FetchError>;
}

/// HTTP transport for remote resources.
#[derive(Clone, Debug, Default)]
pub struct HttpResourceClient {
    client: Client,
}

impl HttpResourceClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl ResourceClient for HttpResourceClient {
    async fn fetch(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<serde_json::Value, FetchError> {
        let mut request = self.client.request(options.method.clone(), url);
        for (name, value) in &options.headers {
            request = request.header(name, value);
        }
        if let Some(body) = &options.body {
            request = request.body(body.clone());
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }
}

/// Responses wrap their payload in a `data` field.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Observable state of a remote resource.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// A remote resource with `{data, loading, error}` state and refetch.
///
/// Each instance owns its state exclusively; nothing is shared between
/// resources. The payload type `T` is the content of the response envelope's
/// `data` field.
pub struct RemoteResource<T, C: ResourceClient> {
    client: C,
    url: Mutex<String>,
    options: RequestOptions,
    state: Mutex<ResourceState<T>>,
    generation: AtomicU64,
}

/// A remote resource over the real HTTP transport.
pub type HttpRemoteResource<T> = RemoteResource<T, HttpResourceClient>;

impl<T, C> RemoteResource<T, C>
where
    T: DeserializeOwned + Clone,
    C: ResourceClient,
{
    pub fn new(client: C, url: impl Into<String>, options: RequestOptions) -> Self {
        Self {
            client,
            url: Mutex::new(url.into()),
            options,
            state: Mutex::new(ResourceState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Point the resource at a new target.
    ///
    /// Bumps the generation so any in-flight response for the old target is
    /// discarded on arrival. Callers follow up with [`refetch`](Self::refetch)
    /// to load the new target.
    pub fn set_url(&self, url: impl Into<String>) {
        if let Ok(mut current) = self.url.lock() {
            *current = url.into();
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// The URL the next refetch will target.
    pub fn url(&self) -> String {
        self.url
            .lock()
            .map(|url| url.clone())
            .unwrap_or_default()
    }

    /// Run one request lifecycle: mark loading, clear the previous error,
    /// perform a single request, and commit either the unwrapped `data`
    /// payload or the error's message string.
    ///
    /// Only the most recent request's outcome is committed; a refetch that
    /// has been superseded (by a newer refetch or a URL change) leaves state
    /// untouched when it resolves.
    pub async fn refetch(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let url = self.url();

        if let Ok(mut state) = self.state.lock() {
            state.loading = true;
            state.error = None;
        }

        let outcome = self.fetch_payload(&url).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            // A newer request owns the state now.
            return;
        }

        if let Ok(mut state) = self.state.lock() {
            match outcome {
                Ok(data) => state.data = Some(data),
                Err(err) => {
                    error!("fetch error for {url}: {err}");
                    state.error = Some(err.to_string());
                }
            }
            state.loading = false;
        }
    }

    /// Clone of the current `{data, loading, error}` snapshot.
    pub fn state(&self) -> ResourceState<T> {
        self.state
            .lock()
            .map(|state| state.clone())
            .unwrap_or_default()
    }

    async fn fetch_payload(&self, url: &str) -> Result<T, FetchError> {
        let body = self.client.fetch(url, &self.options).await?;
        let envelope: Envelope<T> = serde_json::from_value(body)?;
        Ok(envelope.data)
    }
}
