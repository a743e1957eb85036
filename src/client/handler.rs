//! Request pipeline shared by every channel facade.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::client::http::{
    HttpRequest, HttpTransport, MultipartBody, Part, PartValue, RequestBody, TransportFailure,
};
use crate::client::{ApiResult, Error, TransportError};
use crate::domain::{
    ApiResponse, RawResponse, ResponseEnvelope, Validate, ValidationError, Validator, is_media_type,
};
use crate::transport::{QueryParams, UrlError, build_url, decode_service_error, render_path};

const JSON: &str = "application/json";
const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
];

#[derive(Debug)]
/// Path template plus the values bound to it for one call.
pub struct Endpoint {
    template: &'static str,
    path_params: Vec<(&'static str, String)>,
    query: Result<QueryParams, UrlError>,
}

impl Endpoint {
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            path_params: Vec::new(),
            query: Ok(QueryParams::new()),
        }
    }

    /// Bind a `{name}` slot; the value is percent-encoded when the URL is built.
    pub fn path_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_params.push((name, value.into()));
        self
    }

    /// Merge query parameters from a flat params struct.
    pub fn query<T: Serialize + ?Sized>(mut self, params: &T) -> Self {
        self.query = match (self.query, QueryParams::from_serialize(params)) {
            (Ok(mut current), Ok(extra)) => {
                for (key, value) in extra.pairs() {
                    current.insert(key, value);
                }
                Ok(current)
            }
            (Err(err), _) | (_, Err(err)) => Err(err),
        };
        self
    }

    pub fn query_param(mut self, name: &str, value: impl Into<String>) -> Self {
        if let Ok(query) = self.query.as_mut() {
            query.insert(name, value);
        }
        self
    }

    pub fn template(&self) -> &'static str {
        self.template
    }
}

#[derive(Clone)]
/// Low-level executor: assembles requests, runs them, and demultiplexes responses.
///
/// Cheap to clone; clones share the transport and validator.
pub struct Handler {
    base_url: Url,
    authorization: HeaderValue,
    user_agent: HeaderValue,
    http: Arc<dyn HttpTransport>,
    validator: Arc<dyn Validator>,
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("base_url", &self.base_url.as_str())
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

impl Handler {
    pub(crate) fn new(
        base_url: Url,
        authorization: HeaderValue,
        user_agent: HeaderValue,
        http: Arc<dyn HttpTransport>,
        validator: Arc<dyn Validator>,
    ) -> Self {
        Self {
            base_url,
            authorization,
            user_agent,
            http,
            validator,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send one request and return the raw response with its body fully read.
    ///
    /// Non-2xx statuses are not errors here. Errors mean the request never completed:
    /// it could not be built, the transport failed, or `cancel` fired first.
    pub async fn execute(
        &self,
        cancel: &CancellationToken,
        method: Method,
        endpoint: Endpoint,
        body: Option<RequestBody>,
    ) -> Result<RawResponse, Error> {
        let template = endpoint.template;
        let request = self.prepare(method, endpoint, body)?;

        if cancel.is_cancelled() {
            tracing::warn!(method = %request.method, template, "request cancelled before send");
            return Err(TransportError::cancelled().into());
        }

        tracing::debug!(method = %request.method, template, url = %request.url, "sending request");
        let started = Instant::now();
        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::warn!(template, "request cancelled in flight");
                return Err(TransportError::cancelled().into());
            }
            outcome = self.http.send(request) => outcome,
        };

        match outcome {
            Ok(raw) => {
                tracing::debug!(
                    template,
                    status = raw.status.as_u16(),
                    bytes = raw.body.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "received response"
                );
                Ok(raw)
            }
            Err(TransportFailure::Request(err)) => {
                tracing::warn!(template, error = %err, "transport failure");
                Err(err.into())
            }
            Err(TransportFailure::BodyRead(err)) => {
                tracing::warn!(template, error = %err, "failed to read response body");
                Err(Error::BodyRead(err))
            }
        }
    }

    pub async fn get<R: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        endpoint: Endpoint,
    ) -> ApiResult<R> {
        self.round_trip(cancel, Method::GET, endpoint, None).await
    }

    pub async fn delete<R: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        endpoint: Endpoint,
    ) -> ApiResult<R> {
        self.round_trip(cancel, Method::DELETE, endpoint, None).await
    }

    /// `POST` without a request body.
    pub async fn post_empty<R: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        endpoint: Endpoint,
    ) -> ApiResult<R> {
        self.round_trip(cancel, Method::POST, endpoint, None).await
    }

    pub async fn post<B, R>(&self, cancel: &CancellationToken, endpoint: Endpoint, body: &B) -> ApiResult<R>
    where
        B: Serialize + Validate,
        R: DeserializeOwned,
    {
        let body = self.json_body(body)?;
        self.round_trip(cancel, Method::POST, endpoint, Some(body)).await
    }

    pub async fn put<B, R>(&self, cancel: &CancellationToken, endpoint: Endpoint, body: &B) -> ApiResult<R>
    where
        B: Serialize + Validate,
        R: DeserializeOwned,
    {
        let body = self.json_body(body)?;
        self.round_trip(cancel, Method::PUT, endpoint, Some(body)).await
    }

    pub async fn post_multipart<B, R>(
        &self,
        cancel: &CancellationToken,
        endpoint: Endpoint,
        body: &B,
    ) -> ApiResult<R>
    where
        B: MultipartBody + Validate,
        R: DeserializeOwned,
    {
        self.validator.check(body)?;
        let parts = body.to_parts().map_err(Error::Marshal)?;
        check_part_media_types(&parts)?;
        self.round_trip(cancel, Method::POST, endpoint, Some(RequestBody::Multipart(parts)))
            .await
    }

    fn json_body<B: Serialize + Validate>(&self, body: &B) -> Result<RequestBody, Error> {
        self.validator.check(body)?;
        let bytes = serde_json::to_vec(body).map_err(Error::Marshal)?;
        Ok(RequestBody::Json(Bytes::from(bytes)))
    }

    async fn round_trip<R: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        method: Method,
        endpoint: Endpoint,
        body: Option<RequestBody>,
    ) -> ApiResult<R> {
        let raw = self.execute(cancel, method, endpoint, body).await?;
        demultiplex(raw)
    }

    fn prepare(
        &self,
        method: Method,
        endpoint: Endpoint,
        body: Option<RequestBody>,
    ) -> Result<HttpRequest, Error> {
        if !ALLOWED_METHODS.contains(&method) {
            return Err(Error::InvalidMethod(method));
        }

        let path = render_path(endpoint.template, &endpoint.path_params)?;
        let query = endpoint.query?;
        let url = build_url(&self.base_url, &path, &query)?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        headers.insert(USER_AGENT, self.user_agent.clone());
        if matches!(body, Some(RequestBody::Json(_))) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        }

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }
}

/// Reject part content types the multipart encoder would refuse, even when
/// validation is skipped.
fn check_part_media_types(parts: &[Part]) -> Result<(), Error> {
    for part in parts {
        if let PartValue::Binary {
            content_type: Some(content_type),
            ..
        } = &part.value
        {
            if !is_media_type(content_type) {
                return Err(ValidationError::single(
                    part.name.as_str(),
                    "media_type",
                    format!("{content_type:?} is not a valid media type"),
                )
                .into());
            }
        }
    }
    Ok(())
}

/// Split a completed exchange into a success payload or a service error.
fn demultiplex<R: DeserializeOwned>(raw: RawResponse) -> ApiResult<R> {
    if !raw.is_success() {
        let error = decode_service_error(&raw.body);
        return Ok(ApiResponse {
            payload: None,
            envelope: ResponseEnvelope {
                transport: Some(raw),
                error,
            },
        });
    }

    let payload = if raw.body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        match serde_json::from_slice::<R>(&raw.body) {
            Ok(payload) => Some(payload),
            Err(source) => {
                return Err(Error::Decode {
                    source,
                    response: Box::new(raw),
                });
            }
        }
    };

    Ok(ApiResponse {
        payload,
        envelope: ResponseEnvelope {
            transport: Some(raw),
            error: None,
        },
    })
}
