//! HTTP transport seam
//!
//! Endpoints build an [`HttpRequest`] and hand it to a [`Transport`]. The
//! default transport is backed by `reqwest`; tests substitute a double.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::{RestError, RestResult};

/// A request ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Full endpoint URL, without query string
    pub url: Url,
    /// Query parameters, in order
    pub query: Vec<(String, String)>,
    /// JSON body for POST requests
    pub body: Option<Value>,
}

impl HttpRequest {
    /// GET request with no parameters
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            query: Vec::new(),
            body: None,
        }
    }

    /// POST request with a JSON body
    pub fn post(url: Url, body: Value) -> Self {
        Self {
            method: Method::POST,
            url,
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Append a query parameter
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Look up a query parameter by name
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of a response, not yet interpreted
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: StatusCode,
    body: Vec<u8>,
}

impl RawResponse {
    /// Wrap a status and body
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// HTTP status code
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body as text, with invalid UTF-8 replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Fail on a non-2xx status, passing the response through otherwise
    pub fn error_for_status(self) -> RestResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(RestError::Status {
                status: self.status.as_u16(),
                body: self.text(),
            })
        }
    }

    /// Parse the body as `T`
    ///
    /// Non-2xx statuses, malformed JSON and the exchange's
    /// `{"error": {"code", "message"}}` envelope all become errors.
    pub fn json<T: DeserializeOwned>(&self) -> RestResult<T> {
        if !self.is_success() {
            return Err(RestError::Status {
                status: self.status.as_u16(),
                body: self.text(),
            });
        }

        let value: Value =
            serde_json::from_slice(&self.body).map_err(|e| RestError::Parse(e.to_string()))?;

        if let Some(err) = api_error(&value) {
            return Err(err);
        }

        serde_json::from_value(value).map_err(|e| RestError::Parse(e.to_string()))
    }
}

/// Extract the exchange error envelope, if the body is one
fn api_error(value: &Value) -> Option<RestError> {
    let error = value.as_object()?.get("error")?;

    let (code, message) = match error {
        Value::Object(obj) => {
            let code = obj.get("code").and_then(|c| {
                c.as_i64()
                    .or_else(|| c.as_str().and_then(|s| s.parse().ok()))
            });
            let message = obj
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            (code, message)
        }
        Value::String(message) => (None, message.clone()),
        _ => return None,
    };

    Some(RestError::Api { code, message })
}

/// Sends one HTTP request and returns the raw response
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Send a request
    async fn send(&self, request: HttpRequest) -> RestResult<RawResponse>;
}

/// Default transport backed by a reusable `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with JSON default headers
    pub fn new(timeout: Duration, user_agent: &str) -> RestResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| RestError::Configuration(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing `reqwest` client
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> RestResult<RawResponse> {
        debug!(method = %request.method, url = %request.url, "Sending request");

        let mut builder = self.client.request(request.method, request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!(status = status.as_u16(), len = body.len(), "Received response");
        Ok(RawResponse::new(status, body.to_vec()))
    }
}
