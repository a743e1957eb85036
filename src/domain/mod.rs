//! Domain layer: request/response payloads, validation rules, and the response
//! envelope (no I/O).

pub mod email;
pub mod mms;
pub mod numbers;
pub mod rcs;
pub mod sms;
pub mod tfa;
pub mod webrtc;
pub mod whatsapp;

mod response;
mod validation;
mod value;

pub use response::{
    ApiResponse, RawResponse, RequestError, ResponseEnvelope, ServiceErrorBody, ServiceException,
};
pub use validation::{
    FieldPath, RuleValidator, SkipValidation, Validate, ValidationError, Validator, Violation,
    Violations,
};
pub use value::{
    ApiKey, Empty, MessageError, MessagePrice, MessageStatus, SentMessage, StatusGroup, Timestamp,
};

pub(crate) use validation::is_media_type;
pub(crate) use value::open_enum;
