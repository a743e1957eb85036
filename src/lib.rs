//! Typed Rust client for the Infobip HTTP API.
//!
//! The crate is split into a domain layer of request and response types with
//! their validation rules, a transport layer for wire-format details, and a
//! client layer that runs the request pipeline behind one facade per channel.
//!
//! Every operation takes a [`CancellationToken`] and returns an [`ApiResult`].
//! `Err` means the request never completed on the client side. A response from
//! the service, successful or not, is always `Ok`: check
//! [`ApiResponse::service_exception`] for errors the service reported.
//!
//! ```rust,no_run
//! use infobip::domain::sms::{SmsDestination, SmsMessage, SmsRequest};
//! use infobip::{CancellationToken, Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), infobip::Error> {
//!     let client = Client::from_env()?;
//!     let request = SmsRequest {
//!         messages: vec![SmsMessage {
//!             destinations: vec![SmsDestination::to("41793026727")],
//!             from: Some("InfoSMS".to_owned()),
//!             text: Some("Hello".to_owned()),
//!             ..Default::default()
//!         }],
//!         ..Default::default()
//!     };
//!     let response = client.sms().send(&CancellationToken::new(), &request).await?;
//!     match response.service_exception() {
//!         Some(err) => eprintln!("rejected: {} {}", err.message_id, err.text),
//!         None => println!("{:?}", response.payload),
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    ApiResult, Client, ClientBuilder, ConfigError, Error, ErrorKind, TransportError,
    TransportErrorKind,
};
pub use domain::{ApiResponse, RawResponse, ResponseEnvelope, ServiceException, ValidationError};
pub use tokio_util::sync::CancellationToken;
pub use transport::{QueryParams, UrlError};
