use std::sync::Arc;

use http::{Method, StatusCode, header};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{ApiError, Result};
use crate::session_store::SessionStore;

/// One outbound call to the backend.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub needs_auth: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            needs_auth: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Serializes `body` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let bytes = sonic_rs::to_vec(body)
            .map_err(|e| ApiError::Decode(format!("Request serialization failed: {}", e)))?;
        self.body = Some(bytes);
        Ok(self)
    }

    /// Marks the request as carrying the bearer token when one exists.
    pub fn with_auth(mut self) -> Self {
        self.needs_auth = true;
        self
    }
}

/// A successful response body.
#[derive(Debug, Clone)]
pub struct Payload {
    pub body: Vec<u8>,
}

/// Known list envelopes: a bare array or a Spring-style page.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Page { content: Vec<T> },
    Bare(Vec<T>),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl Payload {
    /// The body as text, trimmed.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).trim().to_string()
    }

    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        sonic_rs::from_slice(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Normalizes a list response into one sequence.
    ///
    /// Anything that is neither an array nor an object with a `content`
    /// array fails with `UnexpectedShape`.
    pub fn listing<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        match sonic_rs::from_slice::<Listing<T>>(&self.body) {
            Ok(Listing::Page { content }) => Ok(content),
            Ok(Listing::Bare(items)) => Ok(items),
            Err(e) => Err(ApiError::UnexpectedShape(format!(
                "expected an array or a page with `content` ({}): {}",
                e,
                truncate(&self.text(), 120)
            ))),
        }
    }

    /// The `message` a success body may carry, else its raw text.
    pub fn message(&self) -> Option<String> {
        derive_message(&self.body)
    }
}

/// Extracts a human message from a response body: the JSON `message`
/// field, else the raw text. `None` when neither has content.
pub fn derive_message(body: &[u8]) -> Option<String> {
    match sonic_rs::from_slice::<ErrorBody>(body) {
        Ok(parsed) => parsed.message.filter(|m| !m.trim().is_empty()),
        Err(_) => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            (!text.is_empty()).then_some(text)
        }
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Wraps outbound HTTP calls to the fixed backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    session: SessionStore,
}

impl ApiClient {
    /// Creates a new `ApiClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The API root every request path is appended to.
    /// * `session` - The store the bearer token is read from.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `ApiClient`.
    pub fn new(base_url: &str, session: SessionStore) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("sociopedika/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends `request` and returns the body of a 2xx response.
    ///
    /// Non-2xx responses become `NotFound` (404) or `Http`, with the message
    /// taken from the body. The session store is only read, never written.
    pub async fn request(&self, request: ApiRequest) -> Result<Payload> {
        let url = format!("{}{}", self.base_url, request.path);
        tracing::debug!("➡️  {} {}", request.method, url);

        let mut builder = self.http.request(request.method.clone(), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if request.needs_auth {
            match self.session.token() {
                Some(token) => builder = builder.bearer_auth(token.expose()),
                None => tracing::debug!("No token available for {} {}", request.method, request.path),
            }
        }

        if let Some(body) = request.body {
            builder = builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!("❌ {} {} failed: {}", request.method, request.path, e);
            ApiError::Network(e)
        })?;

        let status = response.status();
        let body = response.bytes().await?.to_vec();
        tracing::debug!("⬅️  {} {} -> {}", request.method, request.path, status);

        if status.is_success() {
            return Ok(Payload { body });
        }

        let message = derive_message(&body);
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(
                message.unwrap_or_else(|| "Resource not found".to_string()),
            ));
        }

        Err(ApiError::http(status, message))
    }
}
