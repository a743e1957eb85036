use std::collections::BTreeMap;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{StatusCode, Version};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
/// HTTP response metadata plus the fully read body.
pub struct RawResponse {
    pub status: StatusCode,
    pub version: Version,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    /// Only `2xx` takes the success branch; `3xx` is treated as an error.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body as UTF-8 text, lossy.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Documented error body returned with non-2xx responses.
pub struct ServiceErrorBody {
    pub request_error: RequestError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestError {
    pub service_exception: ServiceException,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Server-side diagnostics: a machine tag (`BAD_REQUEST`, `UNAUTHORIZED`, ...),
/// a human readable text, and per-field violations.
pub struct ServiceException {
    pub message_id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub validation_errors: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default)]
/// Metadata returned next to every payload once a round-trip completed.
///
/// Both fields are empty when the request never left the client.
pub struct ResponseEnvelope {
    pub transport: Option<RawResponse>,
    pub error: Option<ServiceErrorBody>,
}

impl ResponseEnvelope {
    pub fn status(&self) -> Option<StatusCode> {
        self.transport.as_ref().map(|raw| raw.status)
    }

    pub fn is_success(&self) -> bool {
        self.transport.as_ref().is_some_and(RawResponse::is_success)
    }

    pub fn service_exception(&self) -> Option<&ServiceException> {
        self.error
            .as_ref()
            .map(|body| &body.request_error.service_exception)
    }

    /// `true` when no round-trip happened.
    pub fn is_empty(&self) -> bool {
        self.transport.is_none() && self.error.is_none()
    }
}

#[derive(Debug, Clone)]
/// Outcome of a completed round-trip.
///
/// On `2xx` the payload is decoded (absent only for empty bodies). On any other
/// status the payload is absent and the envelope carries the service error.
pub struct ApiResponse<T> {
    pub payload: Option<T>,
    pub envelope: ResponseEnvelope,
}

impl<T> ApiResponse<T> {
    pub fn status(&self) -> Option<StatusCode> {
        self.envelope.status()
    }

    pub fn is_success(&self) -> bool {
        self.envelope.is_success()
    }

    pub fn service_exception(&self) -> Option<&ServiceException> {
        self.envelope.service_exception()
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<T> {
        self.payload
    }
}
