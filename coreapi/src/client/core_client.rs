//! The call pipeline: bind, sign, execute, bind response.

use coreapi_define::{Operation, SchemaRegistry};
use tracing::{debug, instrument};

use super::cancel::CancelToken;
use super::executor::{HttpExecutor, ReqwestExecutor};
use super::signer::{NoSigner, RequestSigner};
use crate::config::ClientConfig;
use crate::error::{ApiError, ClientError};
use crate::request::{RequestBinder, RetryMetadata};
use crate::response::{BoundResponse, ResponseBinder};
use crate::value::Value;

/// Per-call settings.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Cancellation signal; defaults to one that never fires.
    pub cancel: CancelToken,
    /// Retry hints forwarded with the request.
    pub retry: RetryMetadata,
}

impl CallOptions {
    /// Attaches a cancellation token.
    pub fn cancel_with(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Attaches retry metadata.
    pub fn retry(mut self, retry: RetryMetadata) -> Self {
        self.retry = retry;
        self
    }
}

/// Client for Core Services operations described by a [`SchemaRegistry`].
///
/// Non-2xx answers come back as [`ApiError::Remote`]; invalid requests fail
/// with [`ApiError::Bind`] before anything is sent.
#[derive(Debug)]
pub struct CoreClient<'r, E, S = NoSigner> {
    registry: &'r SchemaRegistry,
    config: ClientConfig,
    executor: E,
    signer: S,
}

impl<'r> CoreClient<'r, ReqwestExecutor> {
    /// Creates a client that talks HTTP with reqwest.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiError::Client`] if the HTTP client cannot be built.
    pub fn from_config(registry: &'r SchemaRegistry, config: ClientConfig) -> Result<Self, ApiError> {
        let executor = ReqwestExecutor::new(&config)?;
        Ok(Self::new(registry, config, executor))
    }
}

impl<'r, E: HttpExecutor> CoreClient<'r, E> {
    /// Creates an unsigned client over any executor.
    pub fn new(registry: &'r SchemaRegistry, config: ClientConfig, executor: E) -> Self {
        Self {
            registry,
            config,
            executor,
            signer: NoSigner,
        }
    }
}

impl<'r, E: HttpExecutor, S: RequestSigner> CoreClient<'r, E, S> {
    /// Replaces the request signer.
    pub fn with_signer<T: RequestSigner>(self, signer: T) -> CoreClient<'r, E, T> {
        CoreClient {
            registry: self.registry,
            config: self.config,
            executor: self.executor,
            signer,
        }
    }

    /// The schema registry.
    pub fn registry(&self) -> &'r SchemaRegistry {
        self.registry
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Performs `operation` with `request`.
    ///
    /// ## Errors
    ///
    /// - [`ApiError::Client`] with [`ClientError::Cancelled`] if the token
    ///   fires before the response arrives
    /// - [`ApiError::Bind`] if the request fails validation or binding
    /// - [`ApiError::Auth`] if signing fails
    /// - [`ApiError::Client`] for transport failures
    /// - [`ApiError::Remote`] for non-2xx answers
    /// - [`ApiError::Codec`] if a 2xx body cannot be decoded
    #[instrument(
        name = "core_call",
        skip_all,
        fields(operation = %operation.id, http.method = %operation.method)
    )]
    pub async fn call(
        &self,
        operation: &Operation,
        request: &Value,
        options: CallOptions,
    ) -> Result<BoundResponse, ApiError> {
        if options.cancel.is_cancelled() {
            debug!("call cancelled before send");
            return Err(ClientError::Cancelled.into());
        }

        let binder = RequestBinder::new(self.registry, self.config.endpoint.clone());
        let mut http = binder.bind(operation, request, options.retry)?;
        self.signer.sign(&mut http)?;

        let raw = tokio::select! {
            biased;
            () = options.cancel.cancelled() => {
                debug!("call cancelled in flight");
                return Err(ClientError::Cancelled.into());
            }
            result = self.executor.execute(http) => result?,
        };

        let bound = ResponseBinder::new(self.registry).bind(operation, raw)?;
        debug!(status = bound.status, violations = bound.violations.len(), "call complete");
        Ok(bound)
    }

    /// Looks up `operation_id` and performs it.
    ///
    /// ## Errors
    ///
    /// [`ApiError::Schema`] for an unknown id, otherwise as [`CoreClient::call`].
    pub async fn call_by_id(
        &self,
        operation_id: &str,
        request: &Value,
        options: CallOptions,
    ) -> Result<BoundResponse, ApiError> {
        let operation = self.registry.operation(operation_id)?;
        self.call(operation, request, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{cancel_pair, HeaderSigner};
    use crate::request::HttpRequest;
    use crate::response::RawResponse;
    use crate::value::Record;
    use coreapi_define::{FieldDescriptor, RecordDescriptor, RestMethod, ValueKind};
    use std::sync::Mutex;
    use std::time::Duration;
    use url::Url;

    fn registry() -> &'static SchemaRegistry {
        let mut builder = SchemaRegistry::builder();
        builder
            .record(
                RecordDescriptor::new("Volume")
                    .field(FieldDescriptor::body("id", ValueKind::string()).required()),
            )
            .record(
                RecordDescriptor::new("GetVolumeRequest")
                    .field(FieldDescriptor::path("volumeId", ValueKind::string())),
            )
            .record(
                RecordDescriptor::new("GetVolumeResponse")
                    .field(FieldDescriptor::body("volume", ValueKind::record("Volume")).required()),
            )
            .operation(Operation::new(
                "GetVolume",
                RestMethod::Get,
                "/volumes/{volumeId}",
                "GetVolumeRequest",
                "GetVolumeResponse",
            ));
        Box::leak(Box::new(builder.build().unwrap()))
    }

    fn config() -> ClientConfig {
        ClientConfig::new(Url::parse("http://core.test/20160918").unwrap())
    }

    fn get_volume(id: &str) -> Value {
        Record::new("GetVolumeRequest").with("volumeId", id).into()
    }

    /// Answers every request with the same response and remembers what it saw.
    #[derive(Default)]
    struct StaticExecutor {
        body: &'static str,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl HttpExecutor for StaticExecutor {
        async fn execute(&self, request: HttpRequest) -> Result<RawResponse, ClientError> {
            self.seen.lock().unwrap().push(request);
            Ok(RawResponse::new(200, self.body))
        }
    }

    struct SlowExecutor;

    impl HttpExecutor for SlowExecutor {
        async fn execute(&self, _request: HttpRequest) -> Result<RawResponse, ClientError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(RawResponse::new(200, "{}"))
        }
    }

    #[tokio::test]
    async fn test_call_binds_both_ways() {
        let executor = StaticExecutor {
            body: r#"{"id":"v1"}"#,
            ..Default::default()
        };
        let client = CoreClient::new(registry(), config(), executor);
        let response = client
            .call_by_id("GetVolume", &get_volume("v1"), CallOptions::default())
            .await
            .unwrap();

        let volume = response.body().and_then(Value::as_record).unwrap();
        assert_eq!(volume.get_str("id"), Some("v1"));
        let seen = client.executor.seen.lock().unwrap();
        assert_eq!(seen[0].url.as_str(), "http://core.test/20160918/volumes/v1");
    }

    #[tokio::test]
    async fn test_signer_runs_before_execute() {
        let executor = StaticExecutor {
            body: r#"{"id":"v1"}"#,
            ..Default::default()
        };
        let client = CoreClient::new(registry(), config(), executor)
            .with_signer(HeaderSigner::bearer("t0k").unwrap());
        client
            .call_by_id("GetVolume", &get_volume("v1"), CallOptions::default())
            .await
            .unwrap();

        let seen = client.executor.seen.lock().unwrap();
        assert_eq!(seen[0].header("authorization"), Some("Bearer t0k"));
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_executor() {
        let client = CoreClient::new(registry(), config(), StaticExecutor::default());
        let request: Value = Record::new("GetVolumeRequest").into();
        let err = client
            .call_by_id("GetVolume", &request, CallOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Bind(_)));
        assert!(client.executor.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_operation() {
        let client = CoreClient::new(registry(), config(), StaticExecutor::default());
        let err = client
            .call_by_id("DeleteEverything", &get_volume("v1"), CallOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Schema(_)));
    }

    #[tokio::test]
    async fn test_pre_cancelled_call() {
        let client = CoreClient::new(registry(), config(), StaticExecutor::default());
        let (handle, token) = cancel_pair();
        handle.cancel();
        let err = client
            .call_by_id("GetVolume", &get_volume("v1"), CallOptions::default().cancel_with(token))
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert!(client.executor.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_in_flight() {
        let client = CoreClient::new(registry(), config(), SlowExecutor);
        let (handle, token) = cancel_pair();
        let canceller = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.cancel();
        };
        let request = get_volume("v1");
        let call = client.call_by_id("GetVolume", &request, CallOptions::default().cancel_with(token));

        let (result, ()) = tokio::time::timeout(Duration::from_secs(5), async { tokio::join!(call, canceller) })
            .await
            .expect("cancellation should end the call");
        assert!(result.unwrap_err().is_cancelled());
    }
}
