//! Client layer: credentials, transport binding, the request pipeline, and one facade
//! per channel.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::HeaderValue;
use url::Url;

use crate::domain::{ApiKey, ApiResponse, RawResponse, RuleValidator, ValidationError, Validator};
use crate::transport::UrlError;

mod email;
mod handler;
mod http;
mod mms;
mod numbers;
mod rcs;
mod sms;
mod tfa;
mod webrtc;
mod whatsapp;

pub use email::Email;
pub use handler::{Endpoint, Handler};
pub use http::{
    BoxFuture, HttpRequest, HttpTransport, MultipartBody, Part, PartValue, RequestBody,
    TransportFailure,
};
pub use mms::Mms;
pub use numbers::Numbers;
pub use rcs::Rcs;
pub use sms::Sms;
pub use tfa::Tfa;
pub use webrtc::WebRtc;
pub use whatsapp::WhatsApp;

/// Environment variable read by [`Client::from_env`] for the base URL.
pub const BASE_URL_ENV: &str = "IB_BASE_URL";

const DEFAULT_USER_AGENT: &str = concat!("infobip-rust/", env!("CARGO_PKG_VERSION"));

/// Result of every facade operation.
pub type ApiResult<T> = Result<ApiResponse<T>, Error>;

#[derive(Debug, thiserror::Error)]
/// Client-side failures. Errors reported by the service are never returned here;
/// they arrive through [`crate::ResponseEnvelope::error`].
pub enum Error {
    /// Missing or invalid base URL, API key, or environment variable.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The request body broke one or more constraints; nothing was sent.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The HTTP method is not one the API accepts.
    #[error("unsupported HTTP method: {0}")]
    InvalidMethod(Method),

    /// The request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Marshal(#[source] serde_json::Error),

    /// The request URL could not be built.
    #[error("failed to build request URL: {0}")]
    Url(#[from] UrlError),

    /// Network, TLS, timeout, or cancellation.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response head arrived but its body could not be read.
    #[error("failed to read response body: {0}")]
    BodyRead(#[source] Box<dyn StdError + Send + Sync>),

    /// A `2xx` body did not match the expected payload type.
    #[error("failed to decode response body (HTTP {status}): {source}", status = .response.status)]
    Decode {
        #[source]
        source: serde_json::Error,
        response: Box<RawResponse>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Coarse classification of [`Error`].
pub enum ErrorKind {
    Config,
    Validation,
    InvalidMethod,
    Marshal,
    Url,
    Transport,
    BodyRead,
    Decode,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::Validation(_) => ErrorKind::Validation,
            Self::InvalidMethod(_) => ErrorKind::InvalidMethod,
            Self::Marshal(_) => ErrorKind::Marshal,
            Self::Url(_) => ErrorKind::Url,
            Self::Transport(_) => ErrorKind::Transport,
            Self::BodyRead(_) => ErrorKind::BodyRead,
            Self::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// Whether the caller's cancellation token aborted the request.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Transport(err) if err.kind() == TransportErrorKind::Cancelled)
    }

    /// Raw response attached to a decode failure.
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            Self::Decode { response, .. } => Some(response),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("invalid base URL {input:?}: {reason}")]
    InvalidBaseUrl { input: String, reason: String },

    #[error("invalid API key: {0}")]
    InvalidApiKey(#[source] ValidationError),

    #[error("invalid user agent {0:?}")]
    InvalidUserAgent(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// The caller's cancellation token fired.
    Cancelled,
    /// A transport-level timeout elapsed.
    Timeout,
    /// DNS, TCP, or TLS connection setup failed.
    Connect,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cancelled => "request cancelled",
            Self::Timeout => "request timed out",
            Self::Connect => "connection failed",
            Self::Other => "request failed",
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct TransportError {
    kind: TransportErrorKind,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self {
            kind,
            source: Some(source.into()),
        }
    }

    pub fn cancelled() -> Self {
        Self {
            kind: TransportErrorKind::Cancelled,
            source: None,
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else {
            TransportErrorKind::Other
        };
        Self::new(kind, err)
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }
}

#[derive(Clone)]
/// Builder for [`Client`].
///
/// Use this when you need a custom HTTP client (timeouts, TLS, proxies), a custom
/// transport, or a different validation engine.
pub struct ClientBuilder {
    base_url: String,
    api_key: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    http_client: Option<reqwest::Client>,
    transport: Option<Arc<dyn HttpTransport>>,
    validator: Arc<dyn Validator>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("custom_transport", &self.transport.is_some())
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

impl ClientBuilder {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: None,
            user_agent: None,
            http_client: None,
            transport: None,
            validator: Arc::new(RuleValidator),
        }
    }

    /// Timeout for the whole request. Ignored when [`ClientBuilder::http_client`] or
    /// [`ClientBuilder::transport`] is set.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use a preconfigured `reqwest` client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Replace the HTTP stack entirely.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the constraint engine run on request bodies.
    pub fn validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        let base_url = parse_base_url(&self.base_url)?;
        let api_key = ApiKey::new(self.api_key).map_err(ConfigError::InvalidApiKey)?;
        let mut authorization = HeaderValue::from_str(&format!("App {}", api_key.expose()))
            .map_err(|_| {
                ConfigError::InvalidApiKey(ValidationError::single(
                    "apiKey",
                    "header_value",
                    "must contain visible ASCII characters only",
                ))
            })?;
        authorization.set_sensitive(true);

        let user_agent = self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let user_agent = HeaderValue::from_str(user_agent)
            .map_err(|_| ConfigError::InvalidUserAgent(user_agent.to_owned()))?;

        let http: Arc<dyn HttpTransport> = match (self.transport, self.http_client) {
            (Some(transport), _) => transport,
            (None, Some(client)) => Arc::new(http::ReqwestTransport::new(client)),
            (None, None) => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                let client = builder.build().map_err(ConfigError::HttpClient)?;
                Arc::new(http::ReqwestTransport::new(client))
            }
        };

        tracing::debug!(base_url = %base_url, "infobip client configured");
        Ok(Client {
            handler: Handler::new(base_url, authorization, user_agent, http, self.validator),
        })
    }
}

fn parse_base_url(input: &str) -> Result<Url, ConfigError> {
    let trimmed = input.trim();
    let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
        input: input.to_owned(),
        reason: reason.to_owned(),
    };
    if trimmed.is_empty() {
        return Err(invalid("must not be empty"));
    }
    let url = Url::parse(trimmed).map_err(|err| invalid(&err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if !url.has_host() {
        return Err(invalid("must contain a host"));
    }
    Ok(url)
}

#[derive(Debug, Clone)]
/// Entry point of the library.
///
/// Holds the base URL, the API key, and the HTTP transport. Cheap to clone and safe
/// to share between tasks; every facade borrows the same request pipeline.
pub struct Client {
    handler: Handler,
}

impl Client {
    /// Create a client with the default HTTP stack.
    ///
    /// Fails with [`Error::Config`] if `base_url` is not an absolute `http(s)` URL or
    /// `api_key` is blank.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, Error> {
        ClientBuilder::new(base_url, api_key).build()
    }

    pub fn builder(base_url: impl Into<String>, api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url, api_key)
    }

    /// Create a client from `IB_BASE_URL` and `IB_API_KEY`.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Like [`Client::from_env`] with a custom variable lookup.
    pub fn from_env_with<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::MissingEnv(name))
        };
        let base_url = read(BASE_URL_ENV)?;
        let api_key = read(ApiKey::ENV)?;
        Self::new(base_url, api_key)
    }

    /// The shared request pipeline, for endpoints without a facade method.
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn sms(&self) -> Sms<'_> {
        Sms::new(&self.handler)
    }

    pub fn mms(&self) -> Mms<'_> {
        Mms::new(&self.handler)
    }

    pub fn rcs(&self) -> Rcs<'_> {
        Rcs::new(&self.handler)
    }

    pub fn whatsapp(&self) -> WhatsApp<'_> {
        WhatsApp::new(&self.handler)
    }

    pub fn email(&self) -> Email<'_> {
        Email::new(&self.handler)
    }

    pub fn numbers(&self) -> Numbers<'_> {
        Numbers::new(&self.handler)
    }

    pub fn webrtc(&self) -> WebRtc<'_> {
        WebRtc::new(&self.handler)
    }

    pub fn tfa(&self) -> Tfa<'_> {
        Tfa::new(&self.handler)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use bytes::Bytes;
    use reqwest::header::HeaderMap;
    use reqwest::{StatusCode, Version};

    use super::*;

    /// Records every request and answers with a canned response.
    #[derive(Debug, Clone)]
    pub(crate) struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        requests: Vec<HttpRequest>,
        response_status: u16,
        response_body: String,
    }

    impl FakeTransport {
        pub(crate) fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    requests: Vec::new(),
                    response_status,
                    response_body: response_body.into(),
                })),
            }
        }

        pub(crate) fn requests(&self) -> Vec<HttpRequest> {
            self.state.lock().unwrap().requests.clone()
        }

        pub(crate) fn last_request(&self) -> HttpRequest {
            self.requests().pop().expect("no request was sent")
        }
    }

    impl HttpTransport for FakeTransport {
        fn send<'a>(&'a self, request: HttpRequest) -> BoxFuture<'a, Result<RawResponse, TransportFailure>> {
            Box::pin(async move {
                let (status, body) = {
                    let mut state = self.state.lock().unwrap();
                    state.requests.push(request);
                    (state.response_status, state.response_body.clone())
                };
                Ok(RawResponse {
                    status: StatusCode::from_u16(status).unwrap(),
                    version: Version::HTTP_11,
                    headers: HeaderMap::new(),
                    body: Bytes::from(body),
                })
            })
        }
    }

    pub(crate) fn make_client(transport: FakeTransport) -> Client {
        Client::builder("https://api.test", "secret")
            .transport(Arc::new(transport))
            .build()
            .unwrap()
    }

    /// JSON body of the request, parsed for comparison.
    pub(crate) fn json_body(request: &HttpRequest) -> serde_json::Value {
        match &request.body {
            Some(RequestBody::Json(bytes)) => serde_json::from_slice(bytes).unwrap(),
            other => panic!("expected JSON body, got {other:?}"),
        }
    }

    #[test]
    fn new_validates_base_url_and_key() {
        assert!(Client::new("https://api.test", "secret").is_ok());

        for bad in ["", "   ", "api.test", "/relative", "ftp://api.test", "mailto:x@y.z"] {
            let err = Client::new(bad, "secret").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config, "accepted {bad:?}");
        }

        let err = Client::new("https://api.test", "  ").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::InvalidApiKey(_))));

        let err = Client::new("https://api.test", "bad\nkey").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn from_env_requires_both_variables() {
        let env = HashMap::from([
            ("IB_BASE_URL".to_owned(), "https://api.test".to_owned()),
            ("IB_API_KEY".to_owned(), "secret".to_owned()),
        ]);
        let client = Client::from_env_with(|name| env.get(name).cloned()).unwrap();
        assert_eq!(client.handler().base_url().as_str(), "https://api.test/");

        let err = Client::from_env_with(|name| {
            (name == "IB_API_KEY").then(|| "secret".to_owned())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingEnv("IB_BASE_URL"))
        ));

        let err = Client::from_env_with(|name| {
            (name == "IB_BASE_URL").then(|| "https://api.test".to_owned())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingEnv("IB_API_KEY"))
        ));
    }

    #[test]
    fn builder_accepts_custom_http_client() {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let client = Client::builder("https://api.test/", "secret")
            .http_client(http)
            .user_agent("my-app/1.0")
            .build()
            .unwrap();
        assert_eq!(client.handler().base_url().as_str(), "https://api.test/");
    }

    #[test]
    fn debug_output_never_contains_the_key() {
        let builder = Client::builder("https://api.test", "top-secret-key");
        assert!(!format!("{builder:?}").contains("top-secret-key"));
        let client = builder.build().unwrap();
        assert!(!format!("{client:?}").contains("top-secret-key"));
    }

    #[test]
    fn error_kinds_are_reported() {
        let err: Error = TransportError::cancelled().into();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.is_cancelled());
        assert_eq!(err.to_string(), "transport error: request cancelled");

        let err: Error = ValidationError::single("to", "not_blank", "must not be blank").into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!err.is_cancelled());
        assert!(err.response().is_none());
    }

    #[tokio::test]
    async fn default_headers_include_user_agent() {
        let transport = FakeTransport::new(200, "{}");
        let client = Client::builder("https://api.test", "secret")
            .transport(Arc::new(transport.clone()))
            .user_agent("my-app/1.0")
            .build()
            .unwrap();
        client
            .handler()
            .get::<serde_json::Value>(&tokio_util::sync::CancellationToken::new(), Endpoint::new("ping"))
            .await
            .unwrap();
        let request = transport.last_request();
        assert_eq!(request.headers[reqwest::header::USER_AGENT], "my-app/1.0");
        assert!(request.headers[reqwest::header::AUTHORIZATION].is_sensitive());
    }
}
