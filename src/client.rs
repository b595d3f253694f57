use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::backend::Backend;
use crate::client_logger::ClientLogger;
use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{
    HistoryResponse, IngestRequest, IngestResponse, QueryRequest, QueryResponse, StatusResponse,
};

/// Address used when neither an explicit URL nor `RAGCHAT_SERVER` is given.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Environment variable consulted for the server address.
pub const SERVER_ENV_VAR: &str = "RAGCHAT_SERVER";

/// HTTP client for the question-answering service.
#[derive(Clone)]
pub struct RagClient {
    client: ReqwestClient,
    base_url: Url,
    timeout: Option<Duration>,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl fmt::Debug for RagClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RagClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

impl RagClient {
    /// Create a new client.
    ///
    /// The server address can be provided directly or read from the
    /// `RAGCHAT_SERVER` environment variable, falling back to
    /// [`DEFAULT_SERVER_URL`].
    pub fn new(base_url: Option<String>) -> Result<Self> {
        Self::with_options(base_url, None)
    }

    /// Create a new client with custom settings.
    ///
    /// Without a `timeout` the transport's own defaults apply.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = match base_url {
            Some(url) => url,
            None => env::var(SERVER_ENV_VAR).unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string()),
        };
        let base_url = Url::parse(&base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::url(
                format!("{base_url} cannot be used as a server address"),
                None,
            ));
        }

        let mut builder = ReqwestClient::builder().default_headers(Self::default_headers());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            Error::http_client(
                format!("Failed to build HTTP client: {}", e),
                Some(Box::new(e)),
            )
        })?;

        Ok(Self {
            client,
            base_url,
            timeout,
            logger: None,
        })
    }

    /// Attach a logger that observes every request.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The server address requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Build the URL for the given path segments below the base address.
    ///
    /// Segments are percent-encoded, so session identifiers can be passed as-is.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::url("server address cannot have a path", None))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn map_transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(e.to_string(), self.timeout.map(|t| t.as_secs_f64()))
        } else if e.is_connect() {
            Error::connection(e.to_string(), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    /// Process API response errors and convert to our Error type
    async fn process_error_response(response: Response) -> Error {
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };
        let fallback = status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string();
        Error::api(status.as_u16(), error_message_from_body(&body, fallback))
    }

    async fn execute(&self, method: Method, url: Url, request: RequestBuilder) -> Result<Response> {
        CLIENT_REQUESTS.click();
        if let Some(logger) = &self.logger {
            logger.log_request(method.as_str(), url.as_str());
        }
        let start = Instant::now();
        let result = match request.send().await {
            Ok(response) if response.status().is_success() => Ok(response),
            Ok(response) => Err(Self::process_error_response(response).await),
            Err(e) => Err(self.map_transport_error(e)),
        };
        let elapsed = start.elapsed();
        CLIENT_REQUEST_DURATION.add(elapsed.as_secs_f64());
        match &result {
            Ok(response) => {
                if let Some(logger) = &self.logger {
                    logger.log_response(
                        method.as_str(),
                        url.as_str(),
                        response.status().as_u16(),
                        elapsed,
                    );
                }
            }
            Err(err) => {
                CLIENT_REQUEST_ERRORS.click();
                if let Some(logger) = &self.logger {
                    logger.log_error(method.as_str(), url.as_str(), err, elapsed);
                }
            }
        }
        result
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        let request = self.client.get(url.clone());
        let response = self.execute(Method::GET, url, request).await?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let request = self.client.post(url.clone()).json(body);
        let response = self.execute(Method::POST, url, request).await?;
        decode(response).await
    }

    async fn delete(&self, segments: &[&str]) -> Result<()> {
        let url = self.endpoint(segments)?;
        let request = self.client.delete(url.clone());
        self.execute(Method::DELETE, url, request).await?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    response.json::<T>().await.map_err(|e| {
        Error::serialization(
            format!("Failed to parse response: {}", e),
            Some(Box::new(e)),
        )
    })
}

/// Extract a human-readable message from a non-2xx response body.
///
/// The service reports errors as `{"detail": ...}`; a string detail is used
/// verbatim and any other detail is rendered as JSON.  Bodies that are not JSON
/// are used as-is, and an empty body yields `fallback`.
pub fn error_message_from_body(body: &str, fallback: String) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(body) {
        match map.get("detail") {
            Some(serde_json::Value::String(detail)) => return detail.clone(),
            Some(detail) => return detail.to_string(),
            None => {}
        }
    }
    let body = body.trim();
    if body.is_empty() {
        fallback
    } else {
        body.to_string()
    }
}

#[async_trait::async_trait]
impl Backend for RagClient {
    async fn status(&self) -> Result<StatusResponse> {
        self.get(&["api", "status"]).await
    }

    async fn query(&self, request: QueryRequest) -> Result<QueryResponse> {
        self.post_json(&["api", "query"], &request).await
    }

    async fn history(&self, session_id: &str) -> Result<HistoryResponse> {
        self.get(&["api", "history", session_id]).await
    }

    async fn clear_history(&self, session_id: &str) -> Result<()> {
        self.delete(&["api", "history", session_id]).await
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        self.delete(&["api", "session", session_id]).await
    }

    async fn ingest(&self, request: IngestRequest) -> Result<IngestResponse> {
        self.post_json(&["api", "ingest"], &request).await
    }

    async fn upload(&self, file_name: &str, contents: Vec<u8>) -> Result<IngestResponse> {
        let url = self.endpoint(&["api", "upload"])?;
        let part = Part::bytes(contents).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        let request = self.client.post(url.clone()).multipart(form);
        let response = self.execute(Method::POST, url, request).await?;
        decode(response).await
    }
}
