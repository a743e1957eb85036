//! HTTP transport seam. The default implementation is backed by `reqwest`.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::HeaderMap;
use url::Url;

use crate::client::TransportError;
use crate::domain::RawResponse;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
/// Fully assembled outbound request.
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Compact JSON; the pipeline sets `Content-Type: application/json`.
    Json(Bytes),
    /// `multipart/form-data`; the transport owns the boundary and content type.
    Multipart(Vec<Part>),
}

#[derive(Debug, Clone)]
/// One field of a multipart form.
pub struct Part {
    pub name: String,
    pub value: PartValue,
}

#[derive(Debug, Clone)]
pub enum PartValue {
    Text(String),
    Binary {
        data: Bytes,
        file_name: Option<String>,
        content_type: Option<String>,
    },
}

impl Part {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: PartValue::Text(value.into()),
        }
    }

    /// JSON-encoded part with an `application/json` content type.
    pub fn json<T: serde::Serialize + ?Sized>(
        name: impl Into<String>,
        value: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            name: name.into(),
            value: PartValue::Binary {
                data: Bytes::from(serde_json::to_vec(value)?),
                file_name: None,
                content_type: Some("application/json".to_owned()),
            },
        })
    }

    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: Option<String>,
        data: Bytes,
    ) -> Self {
        Self {
            name: name.into(),
            value: PartValue::Binary {
                data,
                file_name: Some(file_name.into()),
                content_type,
            },
        }
    }
}

/// Request bodies sent as `multipart/form-data`.
pub trait MultipartBody {
    fn to_parts(&self) -> Result<Vec<Part>, serde_json::Error>;
}

#[derive(Debug)]
/// Failure reported by an [`HttpTransport`].
pub enum TransportFailure {
    /// The request could not be sent or no response head arrived.
    Request(TransportError),
    /// The response head arrived but the body could not be read.
    BodyRead(Box<dyn StdError + Send + Sync>),
}

/// Executes one HTTP exchange and drains the response body.
///
/// Implementations must be safe to share between concurrent callers. Non-2xx
/// responses are returned as `Ok`.
pub trait HttpTransport: Send + Sync {
    fn send<'a>(&'a self, request: HttpRequest) -> BoxFuture<'a, Result<RawResponse, TransportFailure>>;
}

#[derive(Debug, Clone)]
pub(crate) struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub(crate) fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(&'a self, request: HttpRequest) -> BoxFuture<'a, Result<RawResponse, TransportFailure>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(request.method, request.url)
                .headers(request.headers);
            match request.body {
                Some(RequestBody::Json(bytes)) => builder = builder.body(bytes),
                Some(RequestBody::Multipart(parts)) => builder = builder.multipart(into_form(parts)?),
                None => {}
            }

            let response = builder
                .send()
                .await
                .map_err(|err| TransportFailure::Request(TransportError::from_reqwest(err)))?;
            let status = response.status();
            let version = response.version();
            let headers = response.headers().clone();
            let body = response
                .bytes()
                .await
                .map_err(|err| TransportFailure::BodyRead(Box::new(err)))?;

            Ok(RawResponse {
                status,
                version,
                headers,
                body,
            })
        })
    }
}

fn into_form(parts: Vec<Part>) -> Result<reqwest::multipart::Form, TransportFailure> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        form = match part.value {
            PartValue::Text(value) => form.text(part.name, value),
            PartValue::Binary {
                data,
                file_name,
                content_type,
            } => {
                let mut field = reqwest::multipart::Part::bytes(data.to_vec());
                if let Some(file_name) = file_name {
                    field = field.file_name(file_name);
                }
                if let Some(content_type) = content_type {
                    field = field
                        .mime_str(&content_type)
                        .map_err(|err| TransportFailure::Request(TransportError::from_reqwest(err)))?;
                }
                form.part(part.name, field)
            }
        };
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_part_carries_content_type() {
        let part = Part::json("head", &serde_json::json!({"from": "a"})).unwrap();
        assert_eq!(part.name, "head");
        match part.value {
            PartValue::Binary {
                data,
                file_name,
                content_type,
            } => {
                assert_eq!(&data[..], br#"{"from":"a"}"#);
                assert!(file_name.is_none());
                assert_eq!(content_type.as_deref(), Some("application/json"));
            }
            PartValue::Text(_) => panic!("expected binary part"),
        }
    }

    #[test]
    fn form_accepts_text_and_file_parts() {
        let parts = vec![
            Part::text("from", "sender@example.com"),
            Part::file(
                "attachment",
                "a.txt",
                Some("text/plain".to_owned()),
                Bytes::from_static(b"hi"),
            ),
        ];
        assert!(into_form(parts).is_ok());
    }
}
