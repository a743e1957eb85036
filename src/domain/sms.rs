//! SMS payloads: text and binary sends, reports, logs, inbound messages, previews,
//! and scheduled bulks.

use serde::{Deserialize, Serialize};

use crate::domain::validation::{FieldPath, Validate, Violations};
use crate::domain::value::{MessageError, MessagePrice, MessageStatus, SentMessage, Timestamp, open_enum};

/// Longest validity period accepted for an SMS, in minutes.
pub const MAX_VALIDITY_PERIOD_MINUTES: u32 = 2880;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /sms/2/text/advanced`.
pub struct SmsRequest {
    pub messages: Vec<SmsMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking: Option<SmsTracking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sending_speed_limit: Option<SendingSpeedLimit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_sms_count_in_response: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsMessage {
    pub destinations: Vec<SmsDestination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediate_report: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<SmsLanguage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_time_window: Option<DeliveryTimeWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsDestination {
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}

impl SmsDestination {
    pub fn to(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            message_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsLanguage {
    pub language_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_shift: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locking_shift: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryTimeWindow {
    pub days: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<TimeOfDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<TimeOfDay>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsTracking {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendingSpeedLimit {
    pub amount: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<TimeUnit>,
}

open_enum! {
    /// Unit for speed limits and validity periods.
    pub enum TimeUnit {
        Second => "SECOND",
        Minute => "MINUTE",
        Hour => "HOUR",
        Day => "DAY",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /sms/2/binary/advanced`.
pub struct BinarySmsRequest {
    pub messages: Vec<BinarySmsMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sending_speed_limit: Option<SendingSpeedLimit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinarySmsMessage {
    pub destinations: Vec<SmsDestination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary: Option<BinaryContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediate_report: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryContent {
    /// Payload as hex pairs separated by spaces (`0f c2 4a`).
    pub hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_coding: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub esm_class: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Acknowledgement of a text or binary send.
pub struct SmsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_id: Option<String>,
    #[serde(default)]
    pub messages: Vec<SentMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Query of `GET /sms/1/reports`.
pub struct DeliveryReportsParams {
    pub bulk_id: Option<String>,
    pub message_id: Option<String>,
    pub limit: Option<u32>,
    pub entity_id: Option<String>,
    pub application_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmsDeliveryReports {
    #[serde(default)]
    pub results: Vec<SmsReport>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcc_mnc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<MessagePrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<MessageError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Query of `GET /sms/1/logs`.
pub struct LogsParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub bulk_id: Option<String>,
    pub message_id: Option<String>,
    pub general_status: Option<String>,
    pub sent_since: Option<Timestamp>,
    pub sent_until: Option<Timestamp>,
    pub limit: Option<u32>,
    pub mcc: Option<String>,
    pub mnc: Option<String>,
    pub entity_id: Option<String>,
    pub application_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmsLogs {
    #[serde(default)]
    pub results: Vec<SmsLog>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsLog {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcc_mnc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<MessagePrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<MessageError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Query of the inbound (`inbox/reports`) endpoints.
pub struct InboundParams {
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsInbound {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_message_count: Option<u32>,
    #[serde(default)]
    pub results: Vec<InboundSms>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundSms {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<MessagePrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /sms/1/preview`.
pub struct PreviewRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(default)]
    pub previews: Vec<Preview>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characters_remaining: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Query selecting one scheduled bulk.
pub struct BulkParams {
    pub bulk_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Body of `PUT /sms/1/bulks`.
pub struct RescheduleRequest {
    pub send_at: Timestamp,
}

open_enum! {
    /// Processing state of a scheduled bulk.
    pub enum BulkStatus {
        Pending => "PENDING",
        Paused => "PAUSED",
        Processing => "PROCESSING",
        Canceled => "CANCELED",
        Finished => "FINISHED",
        Failed => "FAILED",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkStatusInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BulkStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Body of `PUT /sms/1/bulks/status`.
pub struct UpdateBulkStatusRequest {
    pub status: BulkStatus,
}

fn validate_destinations(destinations: &[SmsDestination], path: &FieldPath, violations: &mut Violations) {
    violations.not_empty(path, destinations);
    for (idx, destination) in destinations.iter().enumerate() {
        let path = path.index(idx);
        violations.not_blank(&path.field("to"), &destination.to);
        violations.length(&path.field("to"), &destination.to, 0, 50);
        violations.optional_length(&path.field("messageId"), destination.message_id.as_deref(), 0, 200);
    }
}

fn validate_validity_period(value: Option<u32>, path: &FieldPath, violations: &mut Violations) {
    if let Some(minutes) = value {
        violations.range(path, minutes, 1, MAX_VALIDITY_PERIOD_MINUTES);
    }
}

impl Validate for SmsRequest {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        violations.not_empty(&path.field("messages"), &self.messages);
        self.messages.validate_at(&path.field("messages"), violations);
        if let Some(limit) = &self.sending_speed_limit {
            violations.range(&path.field("sendingSpeedLimit").field("amount"), limit.amount, 1, u32::MAX);
        }
    }
}

impl Validate for SmsMessage {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        validate_destinations(&self.destinations, &path.field("destinations"), violations);
        violations.optional_length(&path.field("callbackData"), self.callback_data.as_deref(), 0, 4000);
        violations.optional_url(&path.field("notifyUrl"), self.notify_url.as_deref());
        validate_validity_period(self.validity_period, &path.field("validityPeriod"), violations);
        if let Some(language) = &self.language {
            violations.not_blank(&path.field("language").field("languageCode"), &language.language_code);
        }
        if let Some(window) = &self.delivery_time_window {
            violations.not_empty(&path.field("deliveryTimeWindow").field("days"), &window.days);
        }
    }
}

impl Validate for BinarySmsRequest {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        violations.not_empty(&path.field("messages"), &self.messages);
        self.messages.validate_at(&path.field("messages"), violations);
    }
}

impl Validate for BinarySmsMessage {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        validate_destinations(&self.destinations, &path.field("destinations"), violations);
        violations.optional_url(&path.field("notifyUrl"), self.notify_url.as_deref());
        validate_validity_period(self.validity_period, &path.field("validityPeriod"), violations);
        if let Some(binary) = &self.binary {
            let hex = path.field("binary").field("hex");
            let valid = binary
                .hex
                .split_whitespace()
                .all(|pair| pair.len() == 2 && pair.bytes().all(|b| b.is_ascii_hexdigit()));
            if binary.hex.trim().is_empty() || !valid {
                violations.push(&hex, "pattern", "must be space separated hex pairs");
            }
        }
    }
}

impl Validate for PreviewRequest {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        violations.not_blank(&path.field("text"), &self.text);
    }
}

impl Validate for RescheduleRequest {
    fn validate_at(&self, _path: &FieldPath, _violations: &mut Violations) {}
}

impl Validate for UpdateBulkStatusRequest {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        violations.one_of(
            &path.field("status"),
            self.status.as_str(),
            &["PAUSED", "PROCESSING", "CANCELED"],
        );
    }
}
