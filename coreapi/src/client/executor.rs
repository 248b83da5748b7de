//! Request execution with tracing instrumentation.
//!
//! [`HttpExecutor`] is the transport seam. [`ReqwestExecutor`] is the
//! production implementation; tests substitute their own.

use std::future::Future;
use std::time::Duration;

use coreapi_define::RestMethod;
use reqwest::Method;
use tracing::{instrument, Span};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::request::HttpRequest;
use crate::response::RawResponse;

/// Sends a bound request and returns the raw response.
///
/// Any status code is a successful execution; interpreting non-2xx answers
/// is the response binder's job.
pub trait HttpExecutor: Send + Sync {
    /// Executes `request`.
    fn execute(&self, request: HttpRequest) -> impl Future<Output = Result<RawResponse, ClientError>> + Send;
}

/// [`HttpExecutor`] backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestExecutor {
    /// Builds the HTTP client from `config`.
    ///
    /// ## Errors
    ///
    /// Returns [`ClientError::Request`] if the client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(config.default_headers.clone())
            .pool_max_idle_per_host(10)
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    /// Wraps an existing client. `timeout` is only used for error reporting.
    pub fn from_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    fn classify(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout {
                duration_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else if err.is_connect() {
            ClientError::Connection(err.to_string())
        } else {
            ClientError::Request(err)
        }
    }
}

impl HttpExecutor for ReqwestExecutor {
    #[instrument(
        name = "api_request",
        skip(self, request),
        fields(
            operation = %request.operation_id,
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse, ClientError> {
        Span::current().record("http.method", request.method.to_string().as_str());
        Span::current().record("http.url", request.url.as_str());

        let mut builder = self
            .client
            .request(http_method(request.method), request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| self.classify(e))?;

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());
        let otel_status = if status.is_success() {
            "OK"
        } else if status.is_server_error() {
            "ERROR"
        } else {
            "UNSET"
        };
        Span::current().record("otel.status_code", otel_status);

        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        Ok(RawResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}

/// Maps the schema's method onto reqwest's.
pub(crate) fn http_method(method: RestMethod) -> Method {
    match method {
        RestMethod::Get => Method::GET,
        RestMethod::Post => Method::POST,
        RestMethod::Put => Method::PUT,
        RestMethod::Patch => Method::PATCH,
        RestMethod::Delete => Method::DELETE,
        RestMethod::Head => Method::HEAD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RetryMetadata;
    use bytes::Bytes;
    use reqwest::header::HeaderMap;
    use url::Url;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(url: Url, method: RestMethod, body: Option<&'static str>) -> HttpRequest {
        let mut headers = HeaderMap::new();
        headers.insert("opc-request-id", "req-1".parse().unwrap());
        HttpRequest {
            operation_id: "Test".to_string(),
            method,
            url,
            headers,
            body: body.map(|b| Bytes::from_static(b.as_bytes())),
            retry: RetryMetadata::default(),
        }
    }

    #[test]
    fn test_http_method_mapping() {
        assert_eq!(http_method(RestMethod::Get), Method::GET);
        assert_eq!(http_method(RestMethod::Patch), Method::PATCH);
        assert_eq!(http_method(RestMethod::Delete), Method::DELETE);
    }

    #[tokio::test]
    async fn test_execute_sends_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/volumes"))
            .and(header("opc-request-id", "req-1"))
            .and(body_string(r#"{"size":1}"#))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("etag", "abc")
                    .set_body_string(r#"{"id":"v1"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig::new(Url::parse(&server.uri()).unwrap());
        let executor = ReqwestExecutor::new(&config).unwrap();
        let url = Url::parse(&format!("{}/volumes", server.uri())).unwrap();
        let raw = executor
            .execute(request(url, RestMethod::Post, Some(r#"{"size":1}"#)))
            .await
            .unwrap();

        assert_eq!(raw.status, 200);
        assert_eq!(raw.header("etag"), Some("abc"));
        assert_eq!(&raw.body[..], br#"{"id":"v1"}"#);
    }

    #[tokio::test]
    async fn test_execute_returns_error_status_as_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
            .mount(&server)
            .await;

        let config = ClientConfig::new(Url::parse(&server.uri()).unwrap());
        let executor = ReqwestExecutor::new(&config).unwrap();
        let url = Url::parse(&format!("{}/missing", server.uri())).unwrap();
        let raw = executor.execute(request(url, RestMethod::Get, None)).await.unwrap();

        assert_eq!(raw.status, 404);
        assert!(!raw.is_success());
    }

    #[tokio::test]
    async fn test_execute_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let config = ClientConfig::new(Url::parse(&server.uri()).unwrap())
            .timeout(Duration::from_millis(50));
        let executor = ReqwestExecutor::new(&config).unwrap();
        let url = Url::parse(&format!("{}/slow", server.uri())).unwrap();
        let err = executor.execute(request(url, RestMethod::Get, None)).await.unwrap_err();

        assert!(matches!(err, ClientError::Timeout { duration_ms: 50 }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_execute_connection_refused() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let url = Url::parse(&format!("http://127.0.0.1:{port}/volumes")).unwrap();
        let executor = ReqwestExecutor::new(&ClientConfig::new(url.clone())).unwrap();
        let err = executor.execute(request(url, RestMethod::Get, None)).await.unwrap_err();

        assert!(matches!(err, ClientError::Connection(_)), "got {err:?}");
        assert!(err.is_retryable());
    }
}
